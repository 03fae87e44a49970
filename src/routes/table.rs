use super::{
    descriptor::{RouteDescriptor, RouteMeta},
    pattern::{Params, PathPattern, split_path},
};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// The application's route data, bundled at build time.
const BUILTIN_ROUTES: &str = include_str!("routes.json");

/// A compiled route: its full path pattern and a link to its parent record.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    name: String,
    component: String,
    meta: RouteMeta,
    pattern: PathPattern,
    parent: Option<usize>,
}

impl RouteRecord {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    #[must_use]
    pub fn meta(&self) -> &RouteMeta {
        &self.meta
    }

    /// Full path, including the paths of any parent routes.
    #[must_use]
    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// True for child routes.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.parent.is_some()
    }
}

/// A resolved path: the leaf record plus every ancestor, parent first.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    path: String,
    params: Params,
    leaf: &'a RouteRecord,
    matched: Vec<&'a RouteRecord>,
}

impl<'a> RouteMatch<'a> {
    /// Normalized path: no query, fragment, repeated or trailing slashes.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[must_use]
    pub fn leaf(&self) -> &'a RouteRecord {
        self.leaf
    }

    #[must_use]
    pub fn matched(&self) -> &[&'a RouteRecord] {
        &self.matched
    }

    /// True when any matched record, parent or child, requires auth.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|record| record.meta.requires_auth)
    }

    /// True when the path fell through to a catch-all route.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.leaf.pattern.is_catch_all()
    }
}

/// Ordered, validated route table. Immutable once built.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    records: Vec<RouteRecord>,
    names: HashMap<String, usize>,
    fallback: usize,
}

impl RouteTable {
    /// Builds a table from declarations.
    ///
    /// # Errors
    /// Returns an error for malformed patterns, duplicate names or paths, and a
    /// missing or misplaced catch-all route.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self> {
        let mut records = Vec::new();
        flatten(&routes, "/", None, &mut records)?;

        let mut names = HashMap::with_capacity(records.len());
        let mut paths = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if names.insert(record.name.clone(), index).is_some() {
                return Err(Error::DuplicateName(record.name.clone()));
            }
            if !paths.insert(record.pattern.key()) {
                return Err(Error::DuplicatePath(record.path().to_string()));
            }
        }

        let fallback = records
            .iter()
            .rposition(|record| record.parent.is_none())
            .filter(|&index| records[index].pattern.is_catch_all())
            .ok_or(Error::MissingCatchAll)?;

        Ok(Self {
            routes,
            records,
            names,
            fallback,
        })
    }

    /// Loads a table from its JSON representation: an array of route
    /// declarations.
    ///
    /// # Errors
    /// Returns [`Error::Json`] for malformed data and any [`RouteTable::new`]
    /// validation error.
    pub fn from_json(json: &str) -> Result<Self> {
        let routes: Vec<RouteDescriptor> = serde_json::from_str(json)?;
        Self::new(routes)
    }

    /// The application's own route table.
    ///
    /// # Errors
    /// Only if the bundled route data is invalid.
    pub fn builtin() -> Result<Self> {
        let table = Self::from_json(BUILTIN_ROUTES)?;
        debug!(routes = table.len(), "loaded built-in route table");
        Ok(table)
    }

    /// Resolves a path, first match in declaration order. Unmatched paths
    /// resolve to the catch-all route.
    #[must_use]
    pub fn resolve(&self, path: &str) -> RouteMatch<'_> {
        let segments = split_path(path);
        let normalized = format!("/{}", segments.join("/"));

        let (index, params) = self
            .records
            .iter()
            .enumerate()
            .find_map(|(index, record)| {
                record
                    .pattern
                    .captures(&segments)
                    .map(|params| (index, params))
            })
            .unwrap_or_else(|| (self.fallback, Params::new()));

        self.chain(index, normalized, params)
    }

    /// Looks a route up by name for programmatic navigation.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteRecord> {
        self.names.get(name).map(|&index| &self.records[index])
    }

    /// Builds the concrete path of a named route.
    ///
    /// # Errors
    /// Returns [`Error::UnknownRoute`] or [`Error::MissingParam`].
    pub fn href(&self, name: &str, params: &Params) -> Result<String> {
        let record = self
            .by_name(name)
            .ok_or_else(|| Error::UnknownRoute(name.to_string()))?;

        record
            .pattern
            .fill(params)
            .map_err(|param| Error::MissingParam {
                route: name.to_string(),
                param,
            })
    }

    /// The route rendered for unmatched paths.
    #[must_use]
    pub fn fallback(&self) -> &RouteRecord {
        &self.records[self.fallback]
    }

    /// Every record with its full path, in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The declarations the table was built from.
    #[must_use]
    pub fn descriptors(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Serializes the declarations back to JSON.
    ///
    /// # Errors
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.routes)?)
    }

    fn chain(&self, index: usize, path: String, params: Params) -> RouteMatch<'_> {
        let leaf = &self.records[index];
        let mut matched = vec![leaf];
        let mut cursor = leaf.parent;
        while let Some(parent) = cursor {
            let record = &self.records[parent];
            matched.push(record);
            cursor = record.parent;
        }
        matched.reverse();

        RouteMatch {
            path,
            params,
            leaf,
            matched,
        }
    }
}

fn flatten(
    routes: &[RouteDescriptor],
    base: &str,
    parent: Option<usize>,
    records: &mut Vec<RouteRecord>,
) -> Result<()> {
    for (position, route) in routes.iter().enumerate() {
        let full_path = join(base, &route.path);
        let pattern = PathPattern::parse(&full_path)?;
        if pattern.is_catch_all() && position + 1 != routes.len() {
            return Err(Error::CatchAllNotLast(full_path));
        }

        let index = records.len();
        records.push(RouteRecord {
            name: route.name.clone(),
            component: route.component.clone(),
            meta: route.meta.clone(),
            pattern,
            parent,
        });

        flatten(&route.children, &full_path, Some(index), records)?;
    }

    Ok(())
}

fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{path}", base.trim_end_matches('/'))
    }
}
