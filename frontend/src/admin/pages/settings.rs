use crate::admin::api::{use_api, CatalogApi};
use crate::admin::components::{NotificationBanner, PageHeader, TextField};
use crate::admin::errors::ApiError;
use crate::admin::forms::{edit, submit_form, use_submission_form, FormFields};
use crate::admin::sidebar::{display_name, display_role};
use crate::cancel::{use_request_scope, RequestScope};
use crate::models::AdminAccount;
use crate::session::use_session;
use async_trait::async_trait;
use yew::prelude::*;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminFields {
    pub username: String,
    pub password: String,
    pub show_password: bool,
}

#[async_trait(?Send)]
impl FormFields for AdminFields {
    type Request = AdminAccount;
    type Output = ();

    fn validate(&self) -> Result<AdminAccount, String> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() {
            return Err("Please fill in all fields".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters long".to_string());
        }
        Ok(AdminAccount {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }

    // TODO: send the bearer token once /admin/register requires one.
    async fn send(
        &self,
        api: &dyn CatalogApi,
        request: &AdminAccount,
        _token: Option<&str>,
        scope: &RequestScope,
    ) -> Result<(), ApiError> {
        api.create_admin(request, scope).await
    }

    fn success_message(&self, _request: &AdminAccount) -> String {
        "New admin created successfully!".to_string()
    }

    fn reset(&mut self) {
        *self = Self {
            show_password: self.show_password,
            ..Self::default()
        };
    }
}

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let form = use_submission_form::<AdminFields>();
    let session = use_session();
    let api = use_api();
    let scope = use_request_scope();

    let on_username = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.username = value))
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.password = value))
    };
    let on_toggle = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| edit(&form, |f| f.show_password = !f.show_password))
    };
    let on_submit = {
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit_form(
                form.clone(),
                api.clone(),
                None,
                scope.clone(),
                Callback::from(|_| log::info!("Admin account created")),
            );
        })
    };

    let submitting = form.is_submitting();
    let fields = &form.fields;

    html! {
        <div class="p-4 md:p-8 max-w-2xl">
            <PageHeader title="Settings" subtitle="Manage administrator accounts" />

            <div class="bg-[#1A1A1A] p-6 rounded-xl border border-[#333333] mb-6">
                <h2 class="text-lg font-semibold text-white mb-2">{"Signed in as"}</h2>
                <p class="text-white">{ display_name(session.admin()) }</p>
                <p class="text-sm text-gray-400">{ display_role(session.admin()) }</p>
            </div>

            <NotificationBanner notification={form.notification.clone()} />

            <form onsubmit={on_submit} class="bg-[#1A1A1A] p-6 rounded-xl border border-[#333333] space-y-5">
                <h2 class="text-lg font-semibold text-white">{"Create New Admin"}</h2>
                <TextField label="Username" required=true value={fields.username.clone()} on_change={on_username}
                    placeholder="New admin username" disabled={submitting} />
                <div class="relative">
                    <TextField
                        label="Password"
                        required=true
                        input_type={if fields.show_password { "text" } else { "password" }}
                        value={fields.password.clone()}
                        on_change={on_password}
                        placeholder="At least 6 characters"
                        disabled={submitting}
                    />
                    <button
                        type="button"
                        onclick={on_toggle}
                        class="absolute right-3 bottom-3 text-sm text-gray-400 hover:text-white"
                    >
                        { if fields.show_password { "Hide" } else { "Show" } }
                    </button>
                </div>
                <button
                    type="submit"
                    disabled={submitting}
                    class="w-full bg-[#21A9A9] hover:bg-teal-600 text-black font-semibold py-3 rounded-lg disabled:opacity-50"
                >
                    { if submitting { "Creating..." } else { "Create Admin" } }
                </button>
            </form>
        </div>
    }
}
