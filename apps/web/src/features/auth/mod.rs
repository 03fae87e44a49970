//! Session restoration and auth state. The session endpoint is the identity
//! provider: it answers with the current user or 401/404 when signed out.
//! This module never logs user identifiers.

pub(crate) mod client;
pub(crate) mod state;
