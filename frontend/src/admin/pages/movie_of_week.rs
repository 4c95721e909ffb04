use crate::admin::api::{use_api, ApiContext, CatalogApi};
use crate::admin::components::{LinkModal, NotificationBanner, PageHeader};
use crate::admin::errors::ApiError;
use crate::admin::forms::{
    edit, newest, notify, submit_form, use_submission_form, FormAction, FormFields, NoticeBoard,
    Notification,
};
use crate::admin::search::SearchPanel;
use crate::cancel::{use_request_scope, RequestScope};
use crate::models::{FeaturedEntry, NewFeaturedEntry, SearchResult};
use crate::session::use_session;
use crate::utils::{confirm, format_added_date, format_rating, week_label};
use async_trait::async_trait;
use chrono::Utc;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureFields {
    pub selected: Option<SearchResult>,
    pub download_url: String,
}

pub fn featured_entry(result: &SearchResult, download_url: &str) -> NewFeaturedEntry {
    NewFeaturedEntry {
        movie_id: result.id,
        title: result.display_title().to_string(),
        year: result.year(),
        download_url: download_url.to_string(),
        kind: result.kind(),
        poster: result.poster_url(),
        overview: result.overview.clone().filter(|o| !o.is_empty()),
        rating: result.rating(),
    }
}

#[async_trait(?Send)]
impl FormFields for FeatureFields {
    type Request = NewFeaturedEntry;
    type Output = ();

    fn validate(&self) -> Result<NewFeaturedEntry, String> {
        let Some(result) = &self.selected else {
            return Err("Please select a title first".to_string());
        };
        let download_url = self.download_url.trim();
        if download_url.is_empty() {
            return Err("Please provide a download link".to_string());
        }
        Ok(featured_entry(result, download_url))
    }

    async fn send(
        &self,
        api: &dyn CatalogApi,
        request: &NewFeaturedEntry,
        token: Option<&str>,
        scope: &RequestScope,
    ) -> Result<(), ApiError> {
        let token = token.ok_or_else(|| ApiError::Auth("Please log in again".to_string()))?;
        api.create_featured(request, token, scope).await
    }

    fn success_message(&self, _request: &NewFeaturedEntry) -> String {
        "Added as Movie of the Week successfully!".to_string()
    }
}

/// Featured entries as shown on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedList {
    pub entries: Vec<FeaturedEntry>,
    pub loading: bool,
}

impl Default for FeaturedList {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            loading: true,
        }
    }
}

pub enum FeaturedAction {
    Loading,
    Loaded(Vec<FeaturedEntry>),
    LoadFailed,
    Removed(String),
}

pub fn remove_featured(entries: &[FeaturedEntry], id: &str) -> Vec<FeaturedEntry> {
    entries.iter().filter(|e| e.id != id).cloned().collect()
}

impl Reducible for FeaturedList {
    type Action = FeaturedAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            FeaturedAction::Loading => Self {
                entries: self.entries.clone(),
                loading: true,
            },
            FeaturedAction::Loaded(entries) => Self {
                entries,
                loading: false,
            },
            FeaturedAction::LoadFailed => Self {
                entries: self.entries.clone(),
                loading: false,
            },
            FeaturedAction::Removed(id) => Self {
                entries: remove_featured(&self.entries, &id),
                loading: self.loading,
            },
        };
        Rc::new(next)
    }
}

fn load_featured(
    api: ApiContext,
    scope: RequestScope,
    list: UseReducerHandle<FeaturedList>,
    notices: UseReducerHandle<NoticeBoard>,
) {
    list.dispatch(FeaturedAction::Loading);
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = api.0.list_featured(&scope).await;
        if scope.is_cancelled() {
            return;
        }
        match outcome {
            Ok(entries) => list.dispatch(FeaturedAction::Loaded(entries)),
            Err(e) => {
                list.dispatch(FeaturedAction::LoadFailed);
                notify(&notices, &scope, Notification::failure(e.to_string()));
            }
        }
    });
}

/// Deletes one featured entry. Both sides carry the notification to show;
/// without a token the client is not called.
pub async fn run_delete(
    api: &dyn CatalogApi,
    id: &str,
    token: Option<&str>,
    scope: &RequestScope,
) -> Result<Notification, Notification> {
    let Some(token) = token else {
        return Err(Notification::failure("Please log in again"));
    };
    match api.delete_featured(id, token, scope).await {
        Ok(()) => Ok(Notification::success("Movie of the Week removed successfully")),
        Err(e) => Err(Notification::failure(e.to_string())),
    }
}

/// The list only changes once the server confirmed the delete.
pub fn deletion_action(
    id: &str,
    outcome: &Result<Notification, Notification>,
) -> Option<FeaturedAction> {
    outcome
        .is_ok()
        .then(|| FeaturedAction::Removed(id.to_string()))
}

#[function_component(MovieOfWeekPage)]
pub fn movie_of_week_page() -> Html {
    let form = use_submission_form::<FeatureFields>();
    let list = use_reducer(FeaturedList::default);
    let notices = use_reducer(NoticeBoard::default);
    let session = use_session();
    let api = use_api();
    let scope = use_request_scope();
    let token = session.token().map(str::to_string);

    {
        let api = api.clone();
        let scope = scope.clone();
        let list = list.clone();
        let notices = notices.clone();
        use_effect_with((), move |_| {
            load_featured(api, scope, list, notices);
            || ()
        });
    }

    let on_select = {
        let form = form.clone();
        Callback::from(move |result: SearchResult| {
            edit(&form, move |f| {
                *f = FeatureFields {
                    selected: Some(result),
                    download_url: String::new(),
                }
            });
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
        let list = list.clone();
        let notices = notices.clone();
        let token = token.clone();
        Callback::from(move |_: ()| {
            let reload = {
                let api = api.clone();
                let scope = scope.clone();
                let list = list.clone();
                let notices = notices.clone();
                Callback::from(move |_: ()| {
                    load_featured(api.clone(), scope.clone(), list.clone(), notices.clone())
                })
            };
            submit_form(form.clone(), api.clone(), token.clone(), scope.clone(), reload);
        })
    };

    let on_delete = {
        let api = api.clone();
        let scope = scope.clone();
        let list = list.clone();
        let notices = notices.clone();
        Callback::from(move |entry: FeaturedEntry| {
            if !confirm("Are you sure you want to remove this Movie of the Week?") {
                return;
            }
            let api = api.clone();
            let scope = scope.clone();
            let list = list.clone();
            let notices = notices.clone();
            let token = token.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = run_delete(api.0.as_ref(), &entry.id, token.as_deref(), &scope).await;
                if scope.is_cancelled() {
                    return;
                }
                if let Some(action) = deletion_action(&entry.id, &outcome) {
                    log::info!("Removed featured entry {}", entry.id);
                    list.dispatch(action);
                }
                let (Ok(notification) | Err(notification)) = outcome;
                notify(&notices, &scope, notification);
            });
        })
    };

    let now = Utc::now();
    let banner = newest(form.notification.clone(), notices.current.clone());

    html! {
        <div class="p-4 md:p-8">
            <PageHeader title="Movie of the Week" subtitle="Feature titles on the home page" />

            <NotificationBanner notification={banner} />

            <section class="mb-10">
                <h2 class="text-xl font-semibold text-white mb-4">{"Current Selections"}</h2>
                {
                    if list.loading && list.entries.is_empty() {
                        html! { <p class="text-gray-400">{"Loading..."}</p> }
                    } else if list.entries.is_empty() {
                        html! { <p class="text-gray-400">{"No Movies of the Week yet. Search below to add one."}</p> }
                    } else {
                        html! {
                            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                                { for list.entries.iter().map(|entry| featured_card(entry, now, on_delete.clone())) }
                            </div>
                        }
                    }
                }
            </section>

            <section>
                <h2 class="text-xl font-semibold text-white mb-4">{"Add a Movie of the Week"}</h2>
                <SearchPanel api={api} scope={scope} action_label="Feature" on_select={on_select} />
            </section>

            {
                match &form.fields.selected {
                    Some(result) => html! {
                        <LinkModal
                            heading="Add Movie of the Week"
                            confirm_label="Feature"
                            hint="Shown on the home page alongside the poster"
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

fn featured_card(
    entry: &FeaturedEntry,
    now: chrono::DateTime<Utc>,
    on_delete: Callback<FeaturedEntry>,
) -> Html {
    let on_click = {
        let entry = entry.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(entry.clone()))
    };

    html! {
        <div key={entry.id.clone()} class="bg-[#1A1A1A] rounded-xl border border-[#333333] overflow-hidden flex">
            {
                match entry.poster.as_deref().filter(|p| !p.is_empty()) {
                    Some(src) => html! { <img src={src.to_string()} alt={entry.title.clone()} class="w-24 object-cover" /> },
                    None => html! { <div class="w-24 bg-zinc-900 flex items-center justify-center text-3xl">{"🎬"}</div> },
                }
            }
            <div class="p-4 flex-1 min-w-0">
                <div class="flex items-center gap-2 mb-1">
                    { for week_label(&entry.created_at, now).map(|label| html! {
                        <span class="text-xs px-2 py-0.5 rounded bg-teal-600/30 text-teal-300">{ label }</span>
                    }) }
                    <span class="text-xs text-gray-500">{ entry.kind.label() }</span>
                </div>
                <h3 class="text-white font-semibold truncate">{ &entry.title }</h3>
                <p class="text-gray-400 text-sm">
                    { &entry.year }
                    { for entry.rating.filter(|r| *r > 0.0).map(|r| html! {
                        <span class="text-yellow-400">{ format!(" · ⭐ {}", format_rating(r)) }</span>
                    }) }
                </p>
                { for format_added_date(&entry.created_at).map(|date| html! {
                    <p class="text-xs text-gray-500 mt-1">{ format!("Added: {date}") }</p>
                }) }
                <button
                    onclick={on_click}
                    class="mt-3 text-sm text-red-400 hover:text-red-300"
                >
                    {"Remove"}
                </button>
            </div>
        </div>
    }
}
