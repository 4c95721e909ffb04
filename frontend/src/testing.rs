use crate::admin::api::{CatalogApi, LoginResponse};
use crate::admin::errors::ApiError;
use crate::cancel::RequestScope;
use crate::models::{
    AdminAccount, AdminProfile, CatalogStats, FeaturedEntry, NewCatalogEntry, NewFeaturedEntry,
    SearchResult,
};
use async_trait::async_trait;
use std::cell::RefCell;

/// In-memory stand-in for the backend. Records every call it receives.
#[derive(Default)]
pub struct FakeApi {
    pub calls: RefCell<Vec<&'static str>>,
    pub fail_with: RefCell<Option<ApiError>>,
    pub stats: RefCell<CatalogStats>,
    pub search_results: RefCell<Vec<SearchResult>>,
    pub featured: RefCell<Vec<FeaturedEntry>>,
    pub entries: RefCell<Vec<NewCatalogEntry>>,
    pub featured_posts: RefCell<Vec<(NewFeaturedEntry, String)>>,
    pub admins: RefCell<Vec<AdminAccount>>,
}

impl FakeApi {
    pub fn failing(error: ApiError) -> Self {
        let api = Self::default();
        *api.fail_with.borrow_mut() = Some(error);
        api
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.fail_with.borrow().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl CatalogApi for FakeApi {
    async fn login(
        &self,
        username: &str,
        _password: &str,
        _scope: &RequestScope,
    ) -> Result<LoginResponse, ApiError> {
        self.record("login")?;
        Ok(LoginResponse {
            token: format!("token-for-{username}"),
            admin: Some(AdminProfile {
                username: username.to_string(),
                role: None,
            }),
        })
    }

    async fn list_movies(&self, _scope: &RequestScope) -> Result<CatalogStats, ApiError> {
        self.record("list_movies")?;
        Ok(self.stats.borrow().clone())
    }

    async fn create_catalog_entry(
        &self,
        entry: &NewCatalogEntry,
        _scope: &RequestScope,
    ) -> Result<(), ApiError> {
        self.record("create_catalog_entry")?;
        self.entries.borrow_mut().push(entry.clone());
        Ok(())
    }

    async fn search_external(
        &self,
        _query: &str,
        _scope: &RequestScope,
    ) -> Result<Vec<SearchResult>, ApiError> {
        self.record("search_external")?;
        Ok(self.search_results.borrow().clone())
    }

    async fn list_featured(&self, _scope: &RequestScope) -> Result<Vec<FeaturedEntry>, ApiError> {
        self.record("list_featured")?;
        Ok(self.featured.borrow().clone())
    }

    async fn create_featured(
        &self,
        entry: &NewFeaturedEntry,
        token: &str,
        _scope: &RequestScope,
    ) -> Result<(), ApiError> {
        self.record("create_featured")?;
        self.featured_posts
            .borrow_mut()
            .push((entry.clone(), token.to_string()));
        Ok(())
    }

    async fn delete_featured(
        &self,
        id: &str,
        _token: &str,
        _scope: &RequestScope,
    ) -> Result<(), ApiError> {
        self.record("delete_featured")?;
        self.featured.borrow_mut().retain(|entry| entry.id != id);
        Ok(())
    }

    async fn create_admin(
        &self,
        account: &AdminAccount,
        _scope: &RequestScope,
    ) -> Result<(), ApiError> {
        self.record("create_admin")?;
        self.admins.borrow_mut().push(account.clone());
        Ok(())
    }
}
