use crate::admin::api::{use_api, CatalogApi};
use crate::admin::components::{LinkModal, NotificationBanner, PageHeader};
use crate::admin::errors::ApiError;
use crate::admin::forms::{edit, submit_form, use_submission_form, FormAction, FormFields};
use crate::admin::search::SearchPanel;
use crate::cancel::{use_request_scope, RequestScope};
use crate::models::{NewCatalogEntry, SearchResult};
use async_trait::async_trait;
use yew::prelude::*;

/// Download link being attached to a search result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkFields {
    pub selected: Option<SearchResult>,
    pub download_url: String,
}

impl LinkFields {
    pub fn open(result: SearchResult) -> Self {
        Self {
            selected: Some(result),
            download_url: String::new(),
        }
    }
}

pub fn catalog_entry(result: &SearchResult, download_url: &str) -> NewCatalogEntry {
    NewCatalogEntry {
        title: result.display_title().to_string(),
        year: result.year(),
        download_url: download_url.to_string(),
        kind: result.kind(),
        genre: None,
        description: None,
        movie_id: Some(result.id),
        poster: result.poster_url(),
        overview: result.overview.clone().filter(|o| !o.is_empty()),
    }
}

#[async_trait(?Send)]
impl FormFields for LinkFields {
    type Request = NewCatalogEntry;
    type Output = ();

    fn validate(&self) -> Result<NewCatalogEntry, String> {
        let Some(result) = &self.selected else {
            return Err("Please select a title first".to_string());
        };
        let download_url = self.download_url.trim();
        if download_url.is_empty() {
            return Err("Please provide a download link".to_string());
        }
        Ok(catalog_entry(result, download_url))
    }

    async fn send(
        &self,
        api: &dyn CatalogApi,
        request: &NewCatalogEntry,
        _token: Option<&str>,
        scope: &RequestScope,
    ) -> Result<(), ApiError> {
        api.create_catalog_entry(request, scope).await
    }

    fn success_message(&self, request: &NewCatalogEntry) -> String {
        format!("{} added successfully!", request.kind.label())
    }
}

#[function_component(MoviesPage)]
pub fn movies_page() -> Html {
    let form = use_submission_form::<LinkFields>();
    let api = use_api();
    let scope = use_request_scope();

    let on_select = {
        let form = form.clone();
        Callback::from(move |result: SearchResult| {
            edit(&form, move |f| *f = LinkFields::open(result));
        })
    };
    let on_input = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.download_url = value))
    };
    let on_cancel = {
        let form = form.clone();
        Callback::from(move |_: ()| form.dispatch(FormAction::Clear))
    };
    let on_confirm = {
        let form = form.clone();
        let api = api.clone();
        let scope = scope.clone();
        Callback::from(move |_: ()| {
            submit_form(
                form.clone(),
                api.clone(),
                None,
                scope.clone(),
                Callback::from(|_| log::info!("Download link attached")),
            );
        })
    };

    html! {
        <div class="p-4 md:p-8">
            <PageHeader title="Movies & Series" subtitle="Search TMDB and attach download links to your catalog" />

            <NotificationBanner notification={form.notification.clone()} />

            <SearchPanel api={api} scope={scope} action_label="Add Download Link" on_select={on_select} />

            {
                match &form.fields.selected {
                    Some(result) => html! {
                        <LinkModal
                            heading="Add Download Link"
                            confirm_label="Add to Catalog"
                            hint="Direct link to the file or the hosting page"
                            result={result.clone()}
                            download_url={form.fields.download_url.clone()}
                            saving={form.is_submitting()}
                            on_input={on_input}
                            on_cancel={on_cancel}
                            on_confirm={on_confirm}
                        />
                    },
                    None => html! {},
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::forms::{run_submission, Notification, SubmissionForm};
    use crate::models::CatalogKind;
    use crate::testing::FakeApi;
    use serde_json::json;

    fn severance() -> SearchResult {
        serde_json::from_value(json!({
            "id": 95396, "media_type": "tv", "name": "Severance",
            "first_air_date": "2022-02-18", "poster_path": "/s.jpg", "overview": ""
        }))
        .unwrap()
    }

    #[test]
    fn entry_carries_search_metadata() {
        let entry = catalog_entry(&severance(), "https://x/s");
        assert_eq!(entry.movie_id, Some(95396));
        assert_eq!(entry.title, "Severance");
        assert_eq!(entry.year, "2022");
        assert_eq!(entry.kind, CatalogKind::Series);
        assert_eq!(entry.poster.as_deref(), Some("https://image.tmdb.org/t/p/w500/s.jpg"));
        assert_eq!(entry.overview, None);
    }

    #[tokio::test]
    async fn blank_link_is_rejected() {
        let api = FakeApi::default();
        let fields = LinkFields::open(severance());
        let err = run_submission(&fields, &api, None, &RequestScope::detached())
            .await
            .err()
            .unwrap();
        assert_eq!(err.message, "Please provide a download link");
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn linking_posts_once_and_closes_the_modal() {
        let api = FakeApi::default();
        let fields = LinkFields {
            download_url: " https://x/s ".to_string(),
            ..LinkFields::open(severance())
        };
        let completion = run_submission(&fields, &api, None, &RequestScope::detached())
            .await
            .ok()
            .unwrap();
        assert_eq!(completion.notification.message, "Series added successfully!");
        assert_eq!(api.entries.borrow()[0].download_url, "https://x/s");

        let mut form = SubmissionForm {
            fields,
            ..Default::default()
        };
        form.apply(FormAction::Begin);
        form.apply(FormAction::Finish(completion.notification));
        assert_eq!(form.fields.selected, None);
    }

    #[test]
    fn failure_keeps_the_modal_open() {
        let mut form = SubmissionForm {
            fields: LinkFields {
                download_url: "https://x/s".to_string(),
                ..LinkFields::open(severance())
            },
            ..Default::default()
        };
        form.apply(FormAction::Begin);
        form.apply(FormAction::Finish(Notification::failure("Failed to add download link")));
        assert!(form.fields.selected.is_some());
        assert_eq!(form.fields.download_url, "https://x/s");
    }
}
