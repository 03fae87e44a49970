//! Ties the route table, the session provider and the guard together.
//!
//! Navigation waits once for the session provider to finish restoring, then
//! every navigation resolves synchronously: match the path, read the session,
//! evaluate the guard, and report what to render.

use crate::{
    error::{Error, Result},
    guard::{self, DEFAULT_SIGN_IN_PATH, Decision, GuardPolicy},
    routes::{Params, RouteMatch, RouteTable},
    session::SessionProvider,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument};
use url::Url;

/// Placeholder origin used to resolve relative and dot-segment paths.
const ORIGIN: &str = "http://navgate.localhost/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigatorConfig {
    /// Prefix the application is served under.
    pub base_path: String,
    /// Where unauthenticated navigations to guarded routes land.
    pub sign_in_path: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_string(),
        }
    }
}

/// One navigation request. Paths are browser locations: they may carry the
/// base path, a query string or a fragment, and `to` may be relative to `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationAttempt {
    pub to: String,
    pub from: Option<String>,
}

impl NavigationAttempt {
    #[must_use]
    pub fn new(to: &str) -> Self {
        Self {
            to: to.to_string(),
            from: None,
        }
    }

    #[must_use]
    pub fn from_path(mut self, from: &str) -> Self {
        self.from = Some(from.to_string());
        self
    }
}

/// The route to render after the guard has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub name: String,
    pub component: String,
    /// In-app path of the rendered route, base path removed.
    pub path: String,
    pub params: Params,
    pub title: String,
    pub requires_auth: bool,
    pub not_found: bool,
    /// The path originally requested when the guard redirected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
}

impl Resolution {
    fn render(target: &RouteMatch<'_>, redirected_from: Option<String>) -> Self {
        let leaf = target.leaf();
        Self {
            name: leaf.name().to_string(),
            component: leaf.component().to_string(),
            path: target.path().to_string(),
            params: target.params().clone(),
            title: leaf
                .meta()
                .title
                .clone()
                .unwrap_or_else(|| leaf.name().to_string()),
            requires_auth: target.requires_auth(),
            not_found: target.is_not_found(),
            redirected_from,
        }
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.redirected_from.is_some()
    }
}

pub struct Navigator<P> {
    table: RouteTable,
    provider: P,
    policy: GuardPolicy,
    base_path: String,
    restored: AtomicBool,
}

impl<P: SessionProvider> Navigator<P> {
    /// # Errors
    /// Returns [`Error::SignInUnresolved`] when the sign-in path falls through to
    /// the catch-all, and [`Error::SignInGuarded`] when it requires auth itself.
    pub fn new(table: RouteTable, provider: P, config: &NavigatorConfig) -> Result<Self> {
        let sign_in_path = normalize_path(&config.sign_in_path);
        {
            let sign_in = table.resolve(&sign_in_path);
            if sign_in.is_not_found() {
                return Err(Error::SignInUnresolved(sign_in_path));
            }
            if sign_in.requires_auth() {
                return Err(Error::SignInGuarded(sign_in_path));
            }
        }

        Ok(Self {
            table,
            provider,
            policy: GuardPolicy::new(&sign_in_path),
            base_path: normalize_path(&config.base_path),
            restored: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resolves a navigation, waiting for session restoration first if it has
    /// not been observed yet.
    #[instrument(skip(self, attempt), fields(to = %attempt.to))]
    pub async fn navigate(&self, attempt: &NavigationAttempt) -> Resolution {
        if !self.restored.load(Ordering::Acquire) {
            debug!("waiting for session restoration");
            self.provider.restored().await;
            self.restored.store(true, Ordering::Release);
        }

        self.resolve_now(attempt)
    }

    /// Resolves a navigation against the current session snapshot without
    /// waiting. Callers are responsible for having awaited restoration.
    #[must_use]
    pub fn resolve_now(&self, attempt: &NavigationAttempt) -> Resolution {
        let path = self.locate(attempt);
        let target = self.table.resolve(&path);
        let session = self.provider.snapshot();

        match guard::evaluate(&target, &session, &self.policy) {
            Decision::Allow => {
                debug!(
                    path = target.path(),
                    route = target.leaf().name(),
                    not_found = target.is_not_found(),
                    "navigation allowed"
                );
                Resolution::render(&target, None)
            }
            Decision::Redirect { to } => {
                let sign_in = self.table.resolve(&to);
                debug!(
                    path = target.path(),
                    route = target.leaf().name(),
                    redirect = sign_in.path(),
                    "navigation redirected"
                );
                Resolution::render(&sign_in, Some(target.path().to_string()))
            }
        }
    }

    /// Browser location of an in-app path.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        if self.base_path == "/" {
            path.to_string()
        } else {
            format!("{}{path}", self.base_path)
        }
    }

    /// In-app path of the attempt. Locations on another origin keep their
    /// full text, which no declared route matches, so they land on the fallback.
    fn locate(&self, attempt: &NavigationAttempt) -> String {
        let location = Url::parse(ORIGIN).and_then(|origin| {
            let current = match attempt.from.as_deref() {
                Some(from) => origin.join(&collapse_leading_slashes(from))?,
                None => origin.clone(),
            };
            let target = current.join(&collapse_leading_slashes(&attempt.to))?;
            Ok((origin, target))
        });

        let path = match location {
            Ok((origin, url)) if url.origin() == origin.origin() => url.path().to_string(),
            Ok((_, url)) => {
                debug!(host = url.host_str(), "navigation leaves the application");
                attempt.to.clone()
            }
            Err(_) => attempt.to.clone(),
        };

        self.strip_base(&path).to_string()
    }

    fn strip_base<'p>(&self, path: &'p str) -> &'p str {
        if self.base_path == "/" {
            return path;
        }
        match path.strip_prefix(self.base_path.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

/// `//host/x` would otherwise parse as a scheme-relative URL.
fn collapse_leading_slashes(path: &str) -> String {
    if path.starts_with("//") {
        format!("/{}", path.trim_start_matches('/'))
    } else {
        path.to_string()
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
