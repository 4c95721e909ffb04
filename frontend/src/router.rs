use crate::admin::pages::{
    add_new::AddNewPage, dashboard::DashboardPage, login::LoginPage, movie_of_week::MovieOfWeekPage,
    movies::MoviesPage, settings::SettingsPage,
};
use crate::admin::sidebar::AdminShell;
use crate::session::use_session;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/admin")]
    Dashboard,
    #[at("/admin/movies")]
    Movies,
    #[at("/admin/new")]
    AddNew,
    #[at("/admin/movie-of-the-week")]
    MovieOfWeek,
    #[at("/admin/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    Render,
    Redirect(Route),
}

/// Decides whether `route` may render for the current session.
///
/// Only the presence of a token counts; it is never checked with the
/// backend, so an expired token passes until a protected call fails.
pub fn guard(route: &Route, token: Option<&str>) -> Guard {
    let authenticated = token.is_some_and(|t| !t.is_empty());
    match route {
        Route::NotFound => Guard::Redirect(Route::Login),
        Route::Login if authenticated => Guard::Redirect(Route::Dashboard),
        Route::Login => Guard::Render,
        _ if authenticated => Guard::Render,
        _ => Guard::Redirect(Route::Login),
    }
}

pub fn switch(route: Route) -> Html {
    html! { <Guarded route={route} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    route: Route,
}

#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let session = use_session();

    match guard(&props.route, session.token()) {
        Guard::Redirect(to) => {
            log::debug!("Redirecting {:?} -> {:?}", props.route, to);
            html! { <Redirect<Route> to={to} /> }
        }
        Guard::Render => render(&props.route),
    }
}

fn render(route: &Route) -> Html {
    let page = match route {
        Route::Login => return html! { <LoginPage /> },
        Route::NotFound => return html! {},
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Movies => html! { <MoviesPage /> },
        Route::AddNew => html! { <AddNewPage /> },
        Route::MovieOfWeek => html! { <MovieOfWeekPage /> },
        Route::Settings => html! { <SettingsPage /> },
    };

    html! {
        <AdminShell>
            { page }
        </AdminShell>
    }
}
