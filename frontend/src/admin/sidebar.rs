use crate::models::AdminProfile;
use crate::router::Route;
use crate::session::use_session;
use yew::prelude::*;
use yew_router::prelude::*;

pub static NAV_LINKS: [(Route, &str); 5] = [
    (Route::Dashboard, "Dashboard"),
    (Route::Movies, "Movies/Series"),
    (Route::AddNew, "Add New"),
    (Route::MovieOfWeek, "Movie of the Week"),
    (Route::Settings, "Settings"),
];

/// Exact match only: `/admin` is not active on `/admin/movies`.
pub fn is_active(current: Option<&Route>, link: &Route) -> bool {
    current == Some(link)
}

pub fn display_name(admin: Option<&AdminProfile>) -> &str {
    admin
        .map(|a| a.username.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Administrator")
}

pub fn display_role(admin: Option<&AdminProfile>) -> &str {
    match admin {
        Some(profile) => profile.role.as_deref().unwrap_or("Super Admin"),
        None => "Guest",
    }
}

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let current = use_route::<Route>();
    let open = use_state(|| false);

    let on_toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };

    let on_close = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };

    // Pages still waiting on a response are aborted when they unmount.
    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            log::info!("Logging out");
            session.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let panel_position = if *open { "translate-x-0" } else { "-translate-x-full" };

    html! {
        <>
            <button
                class="md:hidden p-3 text-white bg-teal-600 fixed top-4 left-4 z-50 rounded-xl shadow-lg"
                onclick={on_toggle}
            >
                { if *open { "✕" } else { "☰" } }
            </button>

            {
                if *open {
                    html! { <div class="fixed inset-0 bg-black/60 z-30 md:hidden" onclick={on_close.clone()} /> }
                } else {
                    html! {}
                }
            }

            <aside class={classes!(
                "fixed", "top-0", "left-0", "h-full", "w-64", "bg-black", "border-r", "border-zinc-800",
                "md:translate-x-0", "transition-transform", "z-40", "flex", "flex-col", panel_position
            )}>
                <div class="p-6 border-b border-zinc-800">
                    <h1 class="text-white text-xl font-bold">{"Admin Panel"}</h1>
                    <p class="text-xs text-gray-400">{"Content Management"}</p>
                </div>

                <div class="px-4 py-3 border-b border-zinc-800">
                    <div class="p-3 bg-zinc-900/50 rounded-lg">
                        <p class="text-sm font-semibold text-white">{ display_name(session.admin()) }</p>
                        <p class="text-xs text-gray-400">{ display_role(session.admin()) }</p>
                    </div>
                </div>

                <nav class="flex-1 p-4 overflow-y-auto space-y-1">
                    {
                        for NAV_LINKS.iter().map(|(route, label)| {
                            let link_class = if is_active(current.as_ref(), route) {
                                "flex items-center gap-3 p-3 rounded-lg bg-teal-600 text-white font-semibold"
                            } else {
                                "flex items-center gap-3 p-3 rounded-lg text-gray-400 hover:text-white hover:bg-zinc-900"
                            };
                            html! {
                                <div onclick={on_close.clone()}>
                                    <Link<Route> to={route.clone()} classes={classes!(link_class)}>
                                        <span class="flex-1">{ *label }</span>
                                    </Link<Route>>
                                </div>
                            }
                        })
                    }
                </nav>

                <div class="p-4 border-t border-zinc-800">
                    <button
                        onclick={on_logout}
                        class="p-3 w-full text-gray-300 rounded-lg border border-zinc-800 hover:bg-red-600 hover:text-white"
                    >
                        {"Logout"}
                    </button>
                </div>
            </aside>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct AdminShellProps {
    pub children: Children,
}

#[function_component(AdminShell)]
pub fn admin_shell(props: &AdminShellProps) -> Html {
    html! {
        <div class="flex min-h-screen bg-black">
            <Sidebar />
            <main class="flex-1 p-4 md:ml-64">
                { for props.children.iter() }
            </main>
        </div>
    }
}
