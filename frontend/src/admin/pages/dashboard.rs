use crate::admin::api::use_api;
use crate::admin::components::{ErrorMessage, PageHeader, StatCard};
use crate::cancel::use_request_scope;
use crate::models::CatalogStats;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

const SHORTCUT_CLASS: &str =
    "block bg-[#1A1A1A] p-6 rounded-xl border border-[#333333] hover:border-[#21A9A9]";

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let api = use_api();
    let scope = use_request_scope();
    let stats = use_state(|| None::<CatalogStats>);
    let error_message = use_state(|| None::<String>);
    let loading = use_state(|| true);

    {
        let stats = stats.clone();
        let error_message = error_message.clone();
        let loading = loading.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = api.0.list_movies(&scope).await;
                if scope.is_cancelled() {
                    return;
                }
                match outcome {
                    Ok(data) => {
                        stats.set(Some(data));
                        error_message.set(None);
                    }
                    Err(e) => {
                        log::warn!("Dashboard stats unavailable: {}", e);
                        error_message.set(Some(e.to_string()));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    html! {
        <div class="p-4 md:p-8">
            <PageHeader title="Dashboard" subtitle="Overview of your content library" />

            <ErrorMessage error_message={(*error_message).clone()} />

            {
                if *loading {
                    html! {
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                            { for (0..3).map(|_| html! {
                                <div class="bg-[#1A1A1A] p-6 rounded-xl border border-[#333333] animate-pulse h-32" />
                            }) }
                        </div>
                    }
                } else if let Some(stats) = &*stats {
                    html! {
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                            <StatCard title="Total Movies" value={stats.total_movies} icon="🎬" />
                            <StatCard title="Series" value={stats.total_series} icon="📺" />
                            <StatCard title="Pending Uploads" value={stats.pending_uploads} icon="⏳" />
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <div class="mt-8 grid grid-cols-1 md:grid-cols-2 gap-6">
                <Link<Route> to={Route::AddNew} classes={classes!(SHORTCUT_CLASS)}>
                    <h3 class="text-white font-semibold mb-1">{"Add New Content"}</h3>
                    <p class="text-gray-400 text-sm">{"Upload a movie or series by hand"}</p>
                </Link<Route>>
                <Link<Route> to={Route::Movies} classes={classes!(SHORTCUT_CLASS)}>
                    <h3 class="text-white font-semibold mb-1">{"Search TMDB"}</h3>
                    <p class="text-gray-400 text-sm">{"Find titles and attach download links"}</p>
                </Link<Route>>
            </div>
        </div>
    }
}
