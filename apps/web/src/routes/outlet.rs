//! Bridges the navigator to the Leptos location. A navigation is resolved
//! whenever the path or the session changes; redirects replace the history
//! entry so the back button skips the guarded page.

use crate::{
    app_lib::{AppError, config::AppConfig},
    components::{AppShell, Spinner},
    features::auth::state::use_auth,
    routes::{NotFoundPage, views::RouteView},
};
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    hooks::{use_location, use_navigate},
};
use navgate::{NavigationAttempt, Navigator, NavigatorConfig, RouteTable, SessionHandle};
use std::sync::Arc;

pub(crate) type AppNavigator = Arc<Navigator<SessionHandle>>;

/// Builds the navigator over the built-in table. An invalid sign-in path is
/// logged and replaced by the default one.
pub(crate) fn build_navigator(
    session: SessionHandle,
    config: &AppConfig,
) -> Result<AppNavigator, AppError> {
    let configured = config.navigator();
    let navigator = match Navigator::new(RouteTable::builtin()?, session.clone(), &configured) {
        Ok(navigator) => navigator,
        Err(err) => {
            log::error!("invalid routing configuration, using the default sign-in path: {err}");
            let fallback = NavigatorConfig {
                base_path: configured.base_path,
                ..NavigatorConfig::default()
            };
            Navigator::new(RouteTable::builtin()?, session, &fallback)?
        }
    };

    Ok(Arc::new(navigator))
}

/// Browser location of an in-app path, honoring the base path.
pub(crate) fn use_href(path: &str) -> String {
    use_context::<AppNavigator>().map_or_else(|| path.to_string(), |navigator| navigator.href(path))
}

#[component]
pub fn RouteOutlet() -> impl IntoView {
    let Some(navigator) = use_context::<AppNavigator>() else {
        return view! { <NotFoundPage /> }.into_any();
    };

    let snapshot = use_auth().snapshot;
    let location = use_location();
    let navigate = use_navigate();

    let resolver = Arc::clone(&navigator);
    let resolution = Memo::new(move |_| {
        // Hold navigation until restoration has completed.
        if !snapshot.get().is_restored() {
            return None;
        }
        let attempt = NavigationAttempt::new(&location.pathname.get());
        Some(resolver.resolve_now(&attempt))
    });

    Effect::new(move |_| {
        let Some(resolution) = resolution.get() else {
            return;
        };
        set_document_title(&resolution.title);
        if let Some(from) = &resolution.redirected_from {
            log::debug!("redirecting {from} to {}", resolution.path);
            navigate(
                &navigator.href(&resolution.path),
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    view! {
        <AppShell>
            {move || match resolution.get() {
                None => {
                    view! {
                        <div class="flex justify-center py-16">
                            <Spinner label="Restoring session" />
                        </div>
                    }
                        .into_any()
                }
                Some(resolution) => view! { <RouteView resolution=resolution /> }.into_any(),
            }}
        </AppShell>
    }
    .into_any()
}

fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|window| window.document()) {
        document.set_title(title);
    }
}
