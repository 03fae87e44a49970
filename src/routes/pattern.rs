//! Route path patterns.
//!
//! A pattern is a `/`-separated list of segments:
//!
//! - `pricing`: static text, matched case-insensitively;
//! - `:id`: one non-empty segment captured as `id`;
//! - `:id(\d+)`: a captured segment that must fully match the regex;
//! - `:rest(.*)` or `*rest`: everything left in the path, possibly empty. Any
//!   regex able to match across a `/` turns the parameter into a catch-all.
//!
//! Paths are matched with the trailing slash optional, repeated slashes
//! collapsed, and the query string and fragment ignored. Captured values are
//! percent-decoded.

use crate::error::{Error, Result};
use regex::Regex;
use std::{borrow::Cow, collections::BTreeMap, fmt};

/// Captured path parameters, percent-decoded.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone)]
enum Segment {
    Static { text: String, folded: String },
    Param { name: String, matcher: Option<Regex> },
    Rest { name: String, matcher: Option<Regex> },
}

/// A parsed route path.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses an absolute route path.
    ///
    /// # Errors
    /// Returns [`Error::Pattern`] when the path is relative, has unbalanced
    /// parentheses, an invalid parameter name or regex, or a catch-all segment
    /// that is not the last one.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        if !source.starts_with('/') {
            return Err(Error::pattern(source, "must start with '/'"));
        }

        let raw = split_segments(source)?;
        let mut segments = Vec::with_capacity(raw.len());
        for (index, raw_segment) in raw.iter().enumerate() {
            let segment = parse_segment(source, raw_segment)?;
            if matches!(segment, Segment::Rest { .. }) && index + 1 != raw.len() {
                return Err(Error::pattern(source, "catch-all segment must be last"));
            }
            segments.push(segment);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The pattern as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when the pattern ends in a segment that swallows the rest of the path.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Rest { .. }))
    }

    /// Names of the captured parameters, in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Static { .. } => None,
            Segment::Param { name, .. } | Segment::Rest { name, .. } => Some(name.as_str()),
        })
    }

    /// Matches a concrete path, returning the captured parameters.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.captures(&split_path(path))
    }

    /// Matches pre-split, still percent-encoded path segments.
    pub(crate) fn captures(&self, path: &[&str]) -> Option<Params> {
        let mut params = Params::new();
        let mut remaining = path;

        for segment in &self.segments {
            match segment {
                Segment::Static { folded, .. } => {
                    let (head, tail) = remaining.split_first()?;
                    if decode(head).to_lowercase() != *folded {
                        return None;
                    }
                    remaining = tail;
                }
                Segment::Param { name, matcher } => {
                    let (head, tail) = remaining.split_first()?;
                    let value = decode(head).into_owned();
                    if !accepts(matcher.as_ref(), &value) {
                        return None;
                    }
                    params.insert(name.clone(), value);
                    remaining = tail;
                }
                Segment::Rest { name, matcher } => {
                    let value = remaining
                        .iter()
                        .map(|part| decode(part))
                        .collect::<Vec<_>>()
                        .join("/");
                    if !accepts(matcher.as_ref(), &value) {
                        return None;
                    }
                    params.insert(name.clone(), value);
                    remaining = &[];
                }
            }
        }

        remaining.is_empty().then_some(params)
    }

    /// Builds a concrete path from parameters. `Err` carries the name of the
    /// first missing parameter.
    pub(crate) fn fill(&self, params: &Params) -> std::result::Result<String, String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static { text, .. } => parts.push(text.clone()),
                Segment::Param { name, .. } => {
                    let value = params.get(name).ok_or_else(|| name.clone())?;
                    parts.push(urlencoding::encode(value).into_owned());
                }
                Segment::Rest { name, .. } => {
                    let value = params.get(name).ok_or_else(|| name.clone())?;
                    parts.extend(
                        value
                            .split('/')
                            .filter(|part| !part.is_empty())
                            .map(|part| urlencoding::encode(part).into_owned()),
                    );
                }
            }
        }
        Ok(format!("/{}", parts.join("/")))
    }

    /// Normalized form used to detect two patterns matching the same paths.
    pub(crate) fn key(&self) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Static { folded, .. } => folded.clone(),
                Segment::Param { matcher, .. } => {
                    format!(":{}", matcher.as_ref().map_or("", Regex::as_str))
                }
                Segment::Rest { .. } => "*".to_string(),
            })
            .collect();
        format!("/{}", parts.join("/"))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Splits a concrete path into its non-empty segments, dropping the query
/// string and fragment.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|part| !part.is_empty()).collect()
}

fn split_segments(source: &str) -> Result<Vec<&str>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, ch) in source.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::pattern(source, "unbalanced parenthesis"))?;
            }
            '/' if depth == 0 => {
                if index > start {
                    segments.push(&source[start..index]);
                }
                start = index + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::pattern(source, "unbalanced parenthesis"));
    }
    if start < source.len() {
        segments.push(&source[start..]);
    }

    Ok(segments)
}

fn parse_segment(source: &str, raw: &str) -> Result<Segment> {
    if let Some(name) = raw.strip_prefix('*') {
        return Ok(Segment::Rest {
            name: param_name(source, name)?,
            matcher: None,
        });
    }

    let Some(body) = raw.strip_prefix(':') else {
        if raw.contains(['(', ')', ':', '*']) {
            return Err(Error::pattern(
                source,
                format!("parameters must span a whole segment, got {raw:?}"),
            ));
        }
        return Ok(Segment::Static {
            text: raw.to_string(),
            folded: raw.to_lowercase(),
        });
    };

    let (name, expr) = match body.split_once('(') {
        Some((name, rest)) => {
            let expr = rest
                .strip_suffix(')')
                .ok_or_else(|| Error::pattern(source, "unbalanced parenthesis"))?;
            (name, Some(expr))
        }
        None => (body, None),
    };

    let name = param_name(source, name)?;
    let matcher = expr
        .map(|expr| {
            Regex::new(&format!("^(?:{expr})$"))
                .map_err(|err| Error::pattern(source, err.to_string()))
        })
        .transpose()?;

    if matcher.as_ref().is_some_and(|matcher| matcher.is_match("a/b")) {
        Ok(Segment::Rest { name, matcher })
    } else {
        Ok(Segment::Param { name, matcher })
    }
}

fn param_name(source: &str, name: &str) -> Result<String> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::pattern(
            source,
            format!("invalid parameter name {name:?}"),
        ));
    }
    Ok(name.to_string())
}

fn accepts(matcher: Option<&Regex>, value: &str) -> bool {
    matcher.is_none_or(|matcher| matcher.is_match(value))
}

fn decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn static_paths_match_case_insensitively() {
        let pattern = PathPattern::parse("/forgot-password").unwrap();
        assert_eq!(pattern.matches("/forgot-password"), Some(Params::new()));
        assert_eq!(pattern.matches("/Forgot-Password"), Some(Params::new()));
        assert_eq!(pattern.matches("/forgot-password/"), Some(Params::new()));
        assert_eq!(pattern.matches("//forgot-password"), Some(Params::new()));
        assert_eq!(pattern.matches("/forgot"), None);
        assert_eq!(pattern.matches("/forgot-password/extra"), None);
    }

    #[test]
    fn root_matches_only_root() {
        let pattern = PathPattern::parse("/").unwrap();
        assert_eq!(pattern.matches("/"), Some(Params::new()));
        assert_eq!(pattern.matches(""), Some(Params::new()));
        assert_eq!(pattern.matches("/?tab=1"), Some(Params::new()));
        assert_eq!(pattern.matches("/home"), None);
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        let pattern = PathPattern::parse("/pricing").unwrap();
        assert!(pattern.matches("/pricing?plan=pro").is_some());
        assert!(pattern.matches("/pricing#faq").is_some());
        assert!(pattern.matches("/pricing/?plan=pro#faq").is_some());
    }

    #[test]
    fn named_params_are_captured_and_decoded() {
        let pattern = PathPattern::parse("/users/:id/reports/:report").unwrap();
        assert_eq!(
            pattern.matches("/users/42/reports/q3%20sales"),
            Some(params(&[("id", "42"), ("report", "q3 sales")]))
        );
        assert_eq!(pattern.matches("/users/42/reports"), None);
        assert_eq!(
            pattern.param_names().collect::<Vec<_>>(),
            vec!["id", "report"]
        );
        assert!(!pattern.is_catch_all());
    }

    #[test]
    fn regex_params_constrain_the_segment() {
        let pattern = PathPattern::parse(r"/orders/:id(\d+)").unwrap();
        assert_eq!(pattern.matches("/orders/17"), Some(params(&[("id", "17")])));
        assert_eq!(pattern.matches("/orders/latest"), None);
        assert!(!pattern.is_catch_all());
    }

    #[test]
    fn catch_all_swallows_the_remainder() {
        let pattern = PathPattern::parse("/:catchAll(.*)").unwrap();
        assert!(pattern.is_catch_all());
        assert_eq!(
            pattern.matches("/unknown-path"),
            Some(params(&[("catchAll", "unknown-path")]))
        );
        assert_eq!(
            pattern.matches("/a/b%2Fc/d"),
            Some(params(&[("catchAll", "a/b/c/d")]))
        );
        assert_eq!(pattern.matches("/"), Some(params(&[("catchAll", "")])));
    }

    #[test]
    fn splat_is_a_catch_all() {
        let pattern = PathPattern::parse("/docs/*rest").unwrap();
        assert!(pattern.is_catch_all());
        assert_eq!(
            pattern.matches("/docs/guide/intro"),
            Some(params(&[("rest", "guide/intro")]))
        );
        assert_eq!(pattern.matches("/docs"), Some(params(&[("rest", "")])));
        assert_eq!(pattern.matches("/blog"), None);
    }

    #[test]
    fn regex_may_contain_slashes() {
        let pattern = PathPattern::parse("/files/:path([^/]+)").unwrap();
        assert!(!pattern.is_catch_all());
        assert!(pattern.matches("/files/readme").is_some());
        assert!(pattern.matches("/files/a/b").is_none());
    }

    #[test]
    fn parse_rejects_malformed_patterns() {
        for bad in [
            "pricing",
            "/:id(\\d+",
            "/:id\\d+)",
            "/:",
            "/:bad-name",
            "/*",
            "/:id([)",
            "/*rest/more",
            "/:rest(.*)/more",
            "/a:b",
        ] {
            let err = PathPattern::parse(bad).unwrap_err();
            assert!(
                matches!(err, Error::Pattern { .. }),
                "expected pattern error for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn fill_builds_concrete_paths() {
        let pattern = PathPattern::parse("/users/:id/*rest").unwrap();
        assert_eq!(
            pattern.fill(&params(&[("id", "a b"), ("rest", "x/y")])),
            Ok("/users/a%20b/x/y".to_string())
        );
        assert_eq!(pattern.fill(&params(&[("id", "1")])), Err("rest".to_string()));

        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.fill(&Params::new()), Ok("/".to_string()));
    }

    #[test]
    fn key_ignores_case_and_parameter_names() {
        let a = PathPattern::parse("/Users/:id").unwrap();
        let b = PathPattern::parse("/users/:user/").unwrap();
        let c = PathPattern::parse(r"/users/:id(\d+)").unwrap();
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn split_path_drops_empty_segments() {
        assert_eq!(split_path("/a//b/?q=1"), vec!["a", "b"]);
        assert!(split_path("/").is_empty());
        assert!(split_path("#top").is_empty());
    }
}
