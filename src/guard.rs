//! The authentication navigation guard.

use crate::{routes::RouteMatch, session::SessionSnapshot};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIGN_IN_PATH: &str = "/login";

/// Outcome of a guard evaluation. There is no failure state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Redirect { to: String },
}

/// Where unauthenticated navigations are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPolicy {
    sign_in_path: String,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SIGN_IN_PATH)
    }
}

impl GuardPolicy {
    #[must_use]
    pub fn new(sign_in_path: &str) -> Self {
        Self {
            sign_in_path: sign_in_path.to_string(),
        }
    }

    #[must_use]
    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }
}

/// Decides whether a navigation to `target` may proceed.
///
/// Only a signed-in session passes a route that requires auth; a session that
/// is still restoring is treated as signed out. The original destination is
/// not carried along with the redirect.
#[must_use]
pub fn evaluate(target: &RouteMatch<'_>, session: &SessionSnapshot, policy: &GuardPolicy) -> Decision {
    if !target.requires_auth() || session.is_signed_in() {
        return Decision::Allow;
    }

    Decision::Redirect {
        to: policy.sign_in_path.clone(),
    }
}
