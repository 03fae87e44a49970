//! Front-end features. Routes import these modules to keep view code focused.

pub(crate) mod auth;
