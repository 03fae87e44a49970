//! Auth session state and context for the frontend. The provider restores the
//! session once on mount and mirrors the shared [`SessionHandle`] into a signal
//! so routes re-render when the session changes.

use crate::features::auth::client;
use leptos::{prelude::*, task::spawn_local};
use navgate::{CurrentUser, SessionHandle, SessionProvider, SessionSnapshot};

#[derive(Clone)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    /// Read by the navigator.
    pub handle: SessionHandle,
    /// Reactive mirror of `handle`.
    pub snapshot: RwSignal<SessionSnapshot>,
    pub is_authenticated: Signal<bool>,
    pub is_restored: Signal<bool>,
}

impl AuthContext {
    fn new(handle: SessionHandle) -> Self {
        let snapshot = RwSignal::new(handle.snapshot());
        Self {
            handle,
            snapshot,
            is_authenticated: Signal::derive(move || snapshot.get().is_signed_in()),
            is_restored: Signal::derive(move || snapshot.get().is_restored()),
        }
    }

    /// Records the restoration outcome and releases pending navigations.
    pub fn finish_restoration(&self, user: Option<CurrentUser>) {
        self.handle.finish_restoration(user);
        self.sync();
    }

    fn sync(&self) {
        self.snapshot.set(self.handle.snapshot());
    }
}

/// Provides auth context and restores the session once on mount.
#[component]
pub fn AuthProvider(session_url: String, children: Children) -> impl IntoView {
    let auth = AuthContext::new(SessionHandle::new());
    provide_context(auth.clone());

    let auth_for_fetch = auth.clone();
    spawn_local(async move {
        let user = match client::fetch_session(&session_url).await {
            Ok(user) => user,
            Err(err) => {
                // Treat an unreachable provider as signed out.
                log::warn!("session restoration failed: {err}");
                None
            }
        };
        log::debug!("session restored, signed in: {}", user.is_some());
        auth_for_fetch.finish_restoration(user);
    });

    view! { {children()} }
}

/// Returns the current auth context or a restored, signed-out fallback.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .unwrap_or_else(|| AuthContext::new(SessionHandle::restored_with(None)))
}
