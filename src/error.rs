use thiserror::Error;

/// Configuration-time errors. Navigation itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid route pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
    #[error("route table has no catch-all route")]
    MissingCatchAll,
    #[error("catch-all route {0} must be declared last")]
    CatchAllNotLast(String),
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("missing parameter {param:?} for route {route:?}")]
    MissingParam { route: String, param: String },
    #[error("sign-in path {0} requires authentication")]
    SignInGuarded(String),
    #[error("sign-in path {0} does not match a declared route")]
    SignInUnresolved(String),
    #[error("invalid route table: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
