//! Root component. Configuration is loaded once here and handed down.

use crate::{app_lib::config::AppConfig, features::auth::state::AuthProvider, routes::AppRoutes};
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    log::debug!("session endpoint: {}", config.session_url);
    let session_url = config.session_url.clone();

    view! {
        <AuthProvider session_url=session_url>
            <Router>
                <AppRoutes config=config />
            </Router>
        </AuthProvider>
    }
}
