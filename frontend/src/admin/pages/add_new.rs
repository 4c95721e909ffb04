use crate::admin::api::{use_api, CatalogApi};
use crate::admin::components::{NotificationBanner, PageHeader, TextField};
use crate::admin::errors::ApiError;
use crate::admin::forms::{edit, submit_form, use_submission_form, FormAction, FormFields};
use crate::cancel::{use_request_scope, RequestScope};
use crate::models::{CatalogKind, NewCatalogEntry};
use async_trait::async_trait;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddNewFields {
    pub title: String,
    pub year: String,
    pub download_url: String,
    pub kind: CatalogKind,
    pub genre: String,
    pub description: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[async_trait(?Send)]
impl FormFields for AddNewFields {
    type Request = NewCatalogEntry;
    type Output = ();

    fn validate(&self) -> Result<NewCatalogEntry, String> {
        let title = self.title.trim();
        let year = self.year.trim();
        let download_url = self.download_url.trim();
        if title.is_empty() || year.is_empty() || download_url.is_empty() {
            return Err("Please fill in title, year and download URL".to_string());
        }

        Ok(NewCatalogEntry {
            title: title.to_string(),
            year: year.to_string(),
            download_url: download_url.to_string(),
            kind: self.kind,
            genre: optional(&self.genre),
            description: optional(&self.description),
            movie_id: None,
            poster: None,
            overview: None,
        })
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

    fn clear(&mut self) {
        *self = Self {
            kind: self.kind,
            ..Self::default()
        };
    }
}

#[function_component(AddNewPage)]
pub fn add_new_page() -> Html {
    let form = use_submission_form::<AddNewFields>();
    let api = use_api();
    let scope = use_request_scope();

    let on_title = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.title = value))
    };
    let on_year = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.year = value))
    };
    let on_url = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.download_url = value))
    };
    let on_genre = {
        let form = form.clone();
        Callback::from(move |value: String| edit(&form, move |f| f.genre = value))
    };
    let on_description = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            edit(&form, move |f| f.description = value);
        })
    };
    let on_kind = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let kind = match e.target_unchecked_into::<HtmlSelectElement>().value().as_str() {
                "series" => CatalogKind::Series,
                _ => CatalogKind::Movie,
            };
            edit(&form, move |f| f.kind = kind);
        })
    };

    let on_clear = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.dispatch(FormAction::Clear))
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
                Callback::from(|_| log::info!("Catalog entry created")),
            );
        })
    };

    let submitting = form.is_submitting();
    let fields = &form.fields;

    html! {
        <div class="p-4 md:p-8 max-w-3xl">
            <PageHeader title="Add New Content" subtitle="Add a movie or series with its download link" />

            <NotificationBanner notification={form.notification.clone()} />

            <form onsubmit={on_submit} class="bg-[#1A1A1A] p-6 rounded-xl border border-[#333333] space-y-5">
                <div class="flex flex-col">
                    <label class="text-gray-300 text-sm mb-2 font-medium">{"Type"}</label>
                    <select
                        onchange={on_kind}
                        disabled={submitting}
                        class="p-3 rounded-lg bg-[#262626] border border-[#333333] text-white"
                    >
                        { for [CatalogKind::Movie, CatalogKind::Series].iter().map(|kind| html! {
                            <option value={kind.as_str()} selected={fields.kind == *kind}>{ kind.label() }</option>
                        }) }
                    </select>
                </div>

                <TextField label="Title" required=true value={fields.title.clone()} on_change={on_title}
                    placeholder="Enter title" disabled={submitting} />
                <div class="grid grid-cols-1 md:grid-cols-2 gap-5">
                    <TextField label="Year" required=true value={fields.year.clone()} on_change={on_year}
                        placeholder="2024" disabled={submitting} />
                    <TextField label="Genre" value={fields.genre.clone()} on_change={on_genre}
                        placeholder="Action, Drama..." disabled={submitting} />
                </div>
                <TextField label="Download URL" required=true value={fields.download_url.clone()} on_change={on_url}
                    placeholder="https://example.com/download/..." disabled={submitting} />

                <div class="flex flex-col">
                    <label class="text-gray-300 text-sm mb-2 font-medium">{"Description"}</label>
                    <textarea
                        rows="4"
                        class="p-3 rounded-lg bg-[#262626] border border-[#333333] text-white focus:outline-none focus:border-[#21A9A9]"
                        placeholder="Short synopsis"
                        value={fields.description.clone()}
                        oninput={on_description}
                        disabled={submitting}
                    />
                </div>

                <div class="flex gap-3">
                    <button
                        type="submit"
                        disabled={submitting}
                        class="flex-1 bg-[#21A9A9] hover:bg-teal-600 text-black font-semibold py-3 rounded-lg disabled:opacity-50"
                    >
                        { if submitting { "Adding...".to_string() } else { format!("Add {}", fields.kind.label()) } }
                    </button>
                    <button
                        type="button"
                        onclick={on_clear}
                        disabled={submitting}
                        class="px-6 py-3 rounded-lg border border-[#333333] text-gray-300 hover:bg-zinc-900"
                    >
                        {"Clear"}
                    </button>
                </div>
            </form>
        </div>
    }
}
