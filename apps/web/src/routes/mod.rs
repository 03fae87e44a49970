mod not_found;
mod outlet;
mod views;

pub(crate) use not_found::{NotFoundContent, NotFoundPage};
pub(crate) use outlet::{AppNavigator, RouteOutlet, build_navigator, use_href};

use crate::{app_lib::config::AppConfig, features::auth::state::use_auth};
use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

/// Every path goes through [`RouteOutlet`]; matching and guarding happen in
/// the navigator, not in the Leptos router.
#[component]
pub fn AppRoutes(config: AppConfig) -> impl IntoView {
    let auth = use_auth();

    match build_navigator(auth.handle, &config) {
        Ok(navigator) => {
            provide_context::<AppNavigator>(navigator);
            view! {
                <Routes fallback=|| view! { <RouteOutlet /> }>
                    <Route path=path!("/*any") view=RouteOutlet />
                </Routes>
            }
            .into_any()
        }
        Err(err) => {
            log::error!("route table unavailable: {err}");
            view! { <NotFoundPage /> }.into_any()
        }
    }
}
