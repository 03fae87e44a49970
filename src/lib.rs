//! # navgate
//!
//! Client-side route table and authentication navigation guard for a
//! single-page front end.
//!
//! ## Route table
//!
//! Routes are data: an ordered list of `(path, name, component, meta)` records
//! loaded from JSON (see [`RouteTable::builtin`]) independently of any view
//! code. Component keys are opaque strings; mapping them to views is the host
//! front end's job. The last top-level record is a catch-all that renders the
//! not-found view, so resolution never fails.
//!
//! ## Guard
//!
//! [`guard::evaluate`] is a pure function over the matched records, an explicit
//! [`SessionSnapshot`] and a [`GuardPolicy`]. It either allows the navigation or
//! redirects to the sign-in path, discarding the original destination.
//!
//! ## Session restoration
//!
//! Identity providers usually restore a previous session asynchronously on page
//! load. A guard that reads the session before restoration has finished sees
//! "no user" and bounces signed-in users to the sign-in page. The
//! [`SessionProvider`] seam exposes an explicit restoration signal and
//! [`Navigator::navigate`] waits on it before the first guarded navigation is
//! evaluated.

#[cfg(feature = "cli")]
pub mod cli;
mod error;
pub mod guard;
pub mod navigation;
pub mod routes;
pub mod session;

pub use error::{Error, Result};
pub use guard::{Decision, GuardPolicy};
pub use navigation::{NavigationAttempt, Navigator, NavigatorConfig, Resolution};
pub use routes::{Params, PathPattern, RouteDescriptor, RouteMatch, RouteMeta, RouteRecord, RouteTable};
pub use session::{CurrentUser, SessionHandle, SessionProvider, SessionSnapshot, StaticSession};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
