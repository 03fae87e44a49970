//! Session state as seen by the guard. The identity provider owns the session;
//! this module only defines how it is read.

use serde::{Deserialize, Serialize};
use std::{future::Future, sync::Arc};
use tokio::sync::watch;

/// The signed-in user, as reported by the identity provider. Only
/// non-sensitive metadata; tokens stay with the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl CurrentUser {
    #[must_use]
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            email: None,
            display_name: None,
        }
    }
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionSnapshot {
    /// The provider has not finished restoring a previous session yet.
    #[default]
    Restoring,
    SignedOut,
    SignedIn(CurrentUser),
}

impl SessionSnapshot {
    #[must_use]
    pub fn from_user(user: Option<CurrentUser>) -> Self {
        user.map_or(Self::SignedOut, Self::SignedIn)
    }

    #[must_use]
    pub fn is_restored(&self) -> bool {
        !matches!(self, Self::Restoring)
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    #[must_use]
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Restoring | Self::SignedOut => None,
        }
    }
}

/// Read side of an identity provider.
pub trait SessionProvider {
    /// Synchronous point-in-time read of the session.
    fn snapshot(&self) -> SessionSnapshot;

    /// Resolves once the provider has finished restoring any previous session,
    /// and immediately on every later call.
    fn restored(&self) -> impl Future<Output = ()> + Send;
}

/// Shared session handle fed by the identity provider adapter.
///
/// Starts in [`SessionSnapshot::Restoring`]. Signing in or out marks
/// restoration as complete.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: Arc<watch::Sender<SessionSnapshot>>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SessionSnapshot::Restoring);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// A handle whose restoration has already completed.
    #[must_use]
    pub fn restored_with(user: Option<CurrentUser>) -> Self {
        let handle = Self::new();
        handle.finish_restoration(user);
        handle
    }

    /// Records the outcome of session restoration.
    pub fn finish_restoration(&self, user: Option<CurrentUser>) {
        self.sender.send_replace(SessionSnapshot::from_user(user));
    }

    pub fn sign_in(&self, user: CurrentUser) {
        self.sender.send_replace(SessionSnapshot::SignedIn(user));
    }

    pub fn sign_out(&self) {
        self.sender.send_replace(SessionSnapshot::SignedOut);
    }

    /// Change notifications for reactive front ends.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.sender.subscribe()
    }
}

impl SessionProvider for SessionHandle {
    fn snapshot(&self) -> SessionSnapshot {
        self.sender.borrow().clone()
    }

    fn restored(&self) -> impl Future<Output = ()> + Send {
        let mut receiver = self.sender.subscribe();
        async move {
            // The sender lives in `self`, so the channel cannot close while waiting.
            let _ = receiver.wait_for(SessionSnapshot::is_restored).await;
        }
    }
}

/// A fixed, already-restored session. Used by the CLI and tests.
#[derive(Debug, Clone)]
pub struct StaticSession(SessionSnapshot);

impl StaticSession {
    #[must_use]
    pub fn signed_in(user: CurrentUser) -> Self {
        Self(SessionSnapshot::SignedIn(user))
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self(SessionSnapshot::SignedOut)
    }
}

impl SessionProvider for StaticSession {
    fn snapshot(&self) -> SessionSnapshot {
        self.0.clone()
    }

    fn restored(&self) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn snapshot_helpers() {
        assert!(!SessionSnapshot::Restoring.is_restored());
        assert!(SessionSnapshot::SignedOut.is_restored());
        assert!(!SessionSnapshot::SignedOut.is_signed_in());

        let signed_in = SessionSnapshot::from_user(Some(CurrentUser::new("u-1")));
        assert!(signed_in.is_signed_in());
        assert_eq!(signed_in.user().map(|user| user.uid.as_str()), Some("u-1"));
        assert_eq!(SessionSnapshot::from_user(None), SessionSnapshot::SignedOut);
    }

    #[test]
    fn handle_starts_restoring() {
        let handle = SessionHandle::new();
        assert_eq!(handle.snapshot(), SessionSnapshot::Restoring);

        handle.sign_in(CurrentUser::new("u-1"));
        assert!(handle.snapshot().is_signed_in());

        handle.sign_out();
        assert_eq!(handle.snapshot(), SessionSnapshot::SignedOut);
    }

    #[test]
    fn clones_share_state() {
        let handle = SessionHandle::new();
        let adapter = handle.clone();
        adapter.finish_restoration(Some(CurrentUser::new("u-2")));
        assert_eq!(
            handle.snapshot().user().map(|user| user.uid.clone()),
            Some("u-2".to_string())
        );
    }

    #[tokio::test]
    async fn restored_waits_for_restoration() {
        let handle = SessionHandle::new();

        assert!(
            timeout(Duration::from_millis(20), handle.restored())
                .await
                .is_err(),
            "restored() must not resolve while restoring"
        );

        let adapter = handle.clone();
        let restore = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            adapter.finish_restoration(None);
        });

        timeout(Duration::from_secs(1), handle.restored())
            .await
            .expect("restored() resolves after restoration");
        restore.await.unwrap();

        // Already restored: resolves immediately.
        timeout(Duration::from_millis(20), handle.restored())
            .await
            .expect("restored() resolves immediately once restored");
    }

    #[tokio::test]
    async fn restored_with_is_immediately_restored() {
        let handle = SessionHandle::restored_with(Some(CurrentUser::new("u-3")));
        handle.restored().await;
        assert!(handle.snapshot().is_signed_in());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let handle = SessionHandle::new();
        let mut receiver = handle.subscribe();

        handle.sign_in(CurrentUser::new("u-4"));
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_signed_in());
    }

    #[tokio::test]
    async fn static_session_is_always_restored() {
        let session = StaticSession::signed_out();
        session.restored().await;
        assert_eq!(session.snapshot(), SessionSnapshot::SignedOut);

        let session = StaticSession::signed_in(CurrentUser::new("u-5"));
        assert!(session.snapshot().is_signed_in());
    }

    #[test]
    fn current_user_json_uses_camel_case() {
        let user: CurrentUser =
            serde_json::from_str(r#"{"uid":"u-6","displayName":"Ada"}"#).unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
        assert_eq!(user.email, None);
    }
}
