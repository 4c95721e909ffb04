use crate::admin::api::{ApiContext, CatalogApi};
use crate::admin::components::{NotificationBanner, ResultCard};
use crate::admin::forms::{notify, NoticeBoard, Notification};
use crate::cancel::RequestScope;
use crate::models::{MediaType, SearchResult};
use crate::utils::plural;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Movies,
    Series,
}

impl KindFilter {
    pub const ALL: [KindFilter; 3] = [KindFilter::All, KindFilter::Movies, KindFilter::Series];

    pub fn label(self) -> &'static str {
        match self {
            KindFilter::All => "All",
            KindFilter::Movies => "Movies",
            KindFilter::Series => "Series",
        }
    }

    pub fn matches(self, result: &SearchResult) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Movies => result.media_type == MediaType::Movie,
            KindFilter::Series => result.media_type == MediaType::Tv,
        }
    }
}

pub fn filter_results(results: &[SearchResult], filter: KindFilter) -> Vec<SearchResult> {
    results
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Searches for `query`. `Err` carries the notification to show; the
/// client is not called for a blank query.
pub async fn run_search(
    api: &dyn CatalogApi,
    query: &str,
    scope: &RequestScope,
) -> Result<Vec<SearchResult>, Notification> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Notification::failure("Please enter a search query"));
    }

    api.search_external(query, scope)
        .await
        .map_err(|e| Notification::failure(e.to_string()))
}

pub fn empty_results_notice(results: &[SearchResult]) -> Option<Notification> {
    results
        .is_empty()
        .then(|| Notification::failure("No results found"))
}

#[derive(Properties, PartialEq)]
pub struct SearchPanelProps {
    pub api: ApiContext,
    pub scope: RequestScope,
    pub action_label: AttrValue,
    pub on_select: Callback<SearchResult>,
}

/// Search box, type filter and result grid shared by the movies and
/// movie-of-the-week pages.
#[function_component(SearchPanel)]
pub fn search_panel(props: &SearchPanelProps) -> Html {
    let query = use_state(String::new);
    let results = use_state(Vec::<SearchResult>::new);
    let filter = use_state(KindFilter::default);
    let searching = use_state(|| false);
    let notices = use_reducer(NoticeBoard::default);

    let on_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            query.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_search = {
        let query = query.clone();
        let results = results.clone();
        let searching = searching.clone();
        let notices = notices.clone();
        let api = props.api.clone();
        let scope = props.scope.clone();

        Callback::from(move |_: ()| {
            if *searching {
                return;
            }
            let query = (*query).clone();
            let results = results.clone();
            let searching = searching.clone();
            let notices = notices.clone();
            let api = api.clone();
            let scope = scope.clone();

            searching.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = run_search(api.0.as_ref(), &query, &scope).await;
                if scope.is_cancelled() {
                    return;
                }
                match outcome {
                    Ok(found) => {
                        log::debug!("Search '{}' returned {} results", query, found.len());
                        if let Some(notice) = empty_results_notice(&found) {
                            notify(&notices, &scope, notice);
                        }
                        results.set(found);
                    }
                    Err(notice) => notify(&notices, &scope, notice),
                }
                searching.set(false);
            });
        })
    };

    let on_keypress = {
        let on_search = on_search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_search.emit(());
            }
        })
    };

    let on_click = {
        let on_search = on_search.clone();
        Callback::from(move |_: MouseEvent| on_search.emit(()))
    };

    let visible = filter_results(&results, *filter);

    html! {
        <div>
            <NotificationBanner notification={notices.current.clone()} />

            <div class="flex gap-3 mb-4">
                <input
                    type="text"
                    class="flex-1 p-3 rounded-lg bg-[#262626] border border-[#333333] text-white focus:outline-none focus:border-[#21A9A9]"
                    placeholder="Search for movies or series on TMDB..."
                    value={(*query).clone()}
                    oninput={on_input}
                    onkeypress={on_keypress}
                />
                <button
                    onclick={on_click}
                    disabled={*searching}
                    class="px-6 rounded-lg bg-[#21A9A9] hover:bg-teal-600 text-black font-semibold disabled:opacity-50"
                >
                    { if *searching { "Searching..." } else { "Search" } }
                </button>
            </div>

            {
                if results.is_empty() {
                    html! {}
                } else {
                    html! {
                        <div class="flex items-center gap-2 mb-6">
                            {
                                for KindFilter::ALL.iter().map(|option| {
                                    let option = *option;
                                    let selected = *filter == option;
                                    let on_pick = {
                                        let filter = filter.clone();
                                        Callback::from(move |_: MouseEvent| filter.set(option))
                                    };
                                    html! {
                                        <button
                                            onclick={on_pick}
                                            class={if selected {
                                                "px-4 py-2 rounded-lg bg-[#21A9A9] text-white"
                                            } else {
                                                "px-4 py-2 rounded-lg bg-black text-gray-400 hover:bg-zinc-900"
                                            }}
                                        >
                                            { option.label() }
                                        </button>
                                    }
                                })
                            }
                            <span class="ml-auto text-sm text-gray-400">{ plural(visible.len(), "result") }</span>
                        </div>
                    }
                }
            }

            {
                if visible.is_empty() {
                    html! {
                        <div class="text-center py-12 text-gray-400">
                            <p class="text-lg">{ if query.is_empty() { "Start searching" } else { "No results found" } }</p>
                            <p class="text-sm">
                                { if query.is_empty() { "Search for movies or series to add to your platform" } else { "Try a different search term" } }
                            </p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="grid grid-cols-2 md:grid-cols-4 lg:grid-cols-5 gap-4">
                            {
                                for visible.into_iter().map(|result| html! {
                                    <ResultCard
                                        key={result.id.to_string()}
                                        result={result.clone()}
                                        action_label={props.action_label.clone()}
                                        on_select={props.on_select.clone()}
                                    />
                                })
                            }
                        </div>
                    }
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::errors::ApiError;
    use crate::testing::FakeApi;
    use serde_json::json;

    fn result(id: u64, media_type: &str) -> SearchResult {
        serde_json::from_value(json!({"id": id, "media_type": media_type, "title": "T"})).unwrap()
    }

    #[test]
    fn filter_by_kind() {
        let results = vec![result(1, "movie"), result(2, "tv"), result(3, "movie")];
        assert_eq!(filter_results(&results, KindFilter::All).len(), 3);
        assert_eq!(filter_results(&results, KindFilter::Movies).len(), 2);
        let series = filter_results(&results, KindFilter::Series);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].id, 2);
    }

    #[tokio::test]
    async fn blank_query_is_rejected_without_calling_client() {
        let api = FakeApi::default();
        let err = run_search(&api, "   ", &RequestScope::detached())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Please enter a search query");
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_result_list_is_not_an_error() {
        let api = FakeApi::default();
        let found = run_search(&api, "zzzz", &RequestScope::detached())
            .await
            .unwrap();
        assert!(found.is_empty());
        assert_eq!(
            empty_results_notice(&found).map(|n| n.message),
            Some("No results found".to_string())
        );
    }

    #[tokio::test]
    async fn search_failures_surface_as_notices() {
        let api = FakeApi::failing(ApiError::Network("Error connecting to TMDB".to_string()));
        let err = run_search(&api, "dune", &RequestScope::detached())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Error connecting to TMDB");
        assert!(!err.is_success());
    }

    #[tokio::test]
    async fn results_are_passed_through() {
        let api = FakeApi::default();
        *api.search_results.borrow_mut() = vec![result(438631, "movie")];
        let found = run_search(&api, "dune", &RequestScope::detached())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(empty_results_notice(&found).is_none());
    }
}
