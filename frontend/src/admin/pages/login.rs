use crate::admin::api::{use_api, CatalogApi, LoginResponse};
use crate::admin::components::{NotificationBanner, TextField};
use crate::admin::errors::ApiError;
use crate::admin::forms::{
    edit, notify, submit_form, use_submission_form, FormFields, NoticeBoard, Notification,
};
use crate::cancel::{use_request_scope, RequestScope};
use crate::env_variable_utils::APP_CONFIG;
use crate::router::Route;
use crate::session::use_session;
use async_trait::async_trait;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginFields {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[async_trait(?Send)]
impl FormFields for LoginFields {
    type Request = Credentials;
    type Output = LoginResponse;

    fn validate(&self) -> Result<Credentials, String> {
        let username = self.username.trim();
        if username.is_empty() || self.password.trim().is_empty() {
            return Err("Please enter both username and password".to_string());
        }
        Ok(Credentials {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }

    async fn send(
        &self,
        api: &dyn CatalogApi,
        request: &Credentials,
        _token: Option<&str>,
        scope: &RequestScope,
    ) -> Result<LoginResponse, ApiError> {
        api.login(&request.username, &request.password, scope).await
    }

    fn success_message(&self, request: &Credentials) -> String {
        format!("Welcome back, {}", request.username)
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let form = use_submission_form::<LoginFields>();
    let notices = use_reducer(NoticeBoard::default);
    let session = use_session();
    let api = use_api();
    let scope = use_request_scope();
    let navigator = use_navigator();

    let on_username = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.username = value))
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.password = value))
    };

    let on_logged_in = {
        let notices = notices.clone();
        let scope = scope.clone();
        Callback::from(move |response: LoginResponse| {
            let username = response.admin.as_ref().map(|a| a.username.clone());
            match session.login(response.into_session()) {
                Ok(()) => {
                    log::info!("Signed in as {}", username.as_deref().unwrap_or("unknown"));
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Dashboard);
                    }
                }
                Err(e) => {
                    log::error!("Could not persist session: {}", e);
                    notify(&notices, &scope, Notification::failure(e.to_string()));
                }
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit_form(form.clone(), api.clone(), None, scope.clone(), on_logged_in.clone());
        })
    };

    // Storage failures take precedence over the form's own notice.
    let banner = notices
        .current
        .clone()
        .or_else(|| form.notification.clone().filter(|n| !n.is_success()));

    html! {
        <div class="min-h-screen bg-black flex items-center justify-center p-4">
            <div class="w-full max-w-md bg-[#1A1A1A] border border-[#333333] rounded-2xl p-8">
                <div class="text-center mb-8">
                    <h1 class="text-3xl font-bold text-white mb-2">{ APP_CONFIG.app_name.clone() }</h1>
                    <p class="text-gray-400">{"Sign in to manage your content"}</p>
                </div>

                <NotificationBanner notification={banner} />

                <form onsubmit={on_submit} class="space-y-5">
                    <TextField
                        label="Username"
                        value={form.fields.username.clone()}
                        on_change={on_username}
                        placeholder="Enter your username"
                        disabled={form.is_submitting()}
                    />
                    <TextField
                        label="Password"
                        input_type="password"
                        value={form.fields.password.clone()}
                        on_change={on_password}
                        placeholder="Enter your password"
                        disabled={form.is_submitting()}
                    />
                    <button
                        type="submit"
                        disabled={form.is_submitting()}
                        class="w-full bg-[#21A9A9] hover:bg-teal-600 text-black font-semibold py-3 rounded-lg disabled:opacity-50"
                    >
                        { if form.is_submitting() { "Signing in..." } else { "Sign In" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
