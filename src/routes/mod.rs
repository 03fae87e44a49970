//! Route declarations, path patterns, and the ordered route table.

mod descriptor;
mod pattern;
mod table;

pub use descriptor::{RouteDescriptor, RouteMeta};
pub use pattern::{Params, PathPattern};
pub use table::{RouteMatch, RouteRecord, RouteTable};
