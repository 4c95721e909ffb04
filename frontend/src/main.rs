mod admin;
mod cancel;
mod env_variable_utils;
mod logging;
mod models;
mod router;
mod session;
#[cfg(test)]
mod testing;
mod utils;

use crate::admin::api::{ApiContext, HttpCatalogClient};
use crate::env_variable_utils::APP_CONFIG;
use crate::router::{switch, Route};
use crate::session::{SessionProvider, SessionStore};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let store = use_memo((), |_| SessionStore::local());
    let api = use_memo((), |_| ApiContext(Rc::new(HttpCatalogClient::new(&APP_CONFIG))));

    html! {
        <SessionProvider store={(*store).clone()}>
            <ContextProvider<ApiContext> context={(*api).clone()}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ContextProvider<ApiContext>>
        </SessionProvider>
    }
}

fn main() {
    logging::init(APP_CONFIG.debug);

    yew::Renderer::<App>::new().render();

    log::info!(
        "NAME: \"{}\", API: \"{}\" DEBUG: \"{}\"",
        APP_CONFIG.app_name,
        APP_CONFIG.backend_url,
        APP_CONFIG.debug
    );
}
