//! Ordered route table with first-match-wins lookup.
//!
//! Entries are tried in declaration order. The catch-all, when present, must
//! be the final entry; [`RouteTable::new`] refuses any other placement so a
//! misordered table fails at startup instead of shadowing routes at runtime.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use super::pattern::{Params, Pattern, PatternError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("route table declares more than one catch-all")]
    DuplicateCatchAll,
    #[error("catch-all at position {index} must be the last of {len} routes")]
    MisplacedCatchAll { index: usize, len: usize },
}

#[derive(Clone, Debug)]
struct Route<V> {
    source: String,
    pattern: Pattern,
    view: V,
}

/// Result of [`RouteTable::match_path`].
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch<'a, V> {
    Found { view: &'a V, params: Params },
    NotFound,
}

impl<'a, V> RouteMatch<'a, V> {
    pub fn view(&self) -> Option<&'a V> {
        match self {
            Self::Found { view, .. } => Some(*view),
            Self::NotFound => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
}

impl<V> RouteTable<V> {
    /// Build a validated table from `(pattern, view)` pairs in match order.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] for unparsable patterns, more than one
    /// catch-all, or a catch-all that is not last.
    pub fn new<I, P>(entries: I) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = (P, V)>,
        P: Into<String>,
    {
        let routes = entries
            .into_iter()
            .map(|(raw, view)| {
                let raw: String = raw.into();
                match Pattern::parse(&raw) {
                    Ok(pattern) => Ok(Route { source: raw, pattern, view }),
                    Err(err) => Err(RouteTableError::InvalidPattern { pattern: raw, source: err }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let catch_alls: Vec<usize> = routes
            .iter()
            .enumerate()
            .filter(|(_, r)| r.pattern.is_catch_all())
            .map(|(i, _)| i)
            .collect();
        if catch_alls.len() > 1 {
            return Err(RouteTableError::DuplicateCatchAll);
        }
        if let Some(&index) = catch_alls.first() {
            if index + 1 != routes.len() {
                return Err(RouteTableError::MisplacedCatchAll { index, len: routes.len() });
            }
        }

        Ok(Self { routes })
    }

    /// First entry matching `path`, or [`RouteMatch::NotFound`].
    pub fn match_path(&self, path: &str) -> RouteMatch<'_, V> {
        self.routes
            .iter()
            .find_map(|route| {
                route
                    .pattern
                    .matches(path)
                    .map(|params| RouteMatch::Found { view: &route.view, params })
            })
            .unwrap_or(RouteMatch::NotFound)
    }

    pub fn has_catch_all(&self) -> bool {
        self.routes.last().is_some_and(|r| r.pattern.is_catch_all())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Declared patterns with their views, in match order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.routes.iter().map(|r| (r.source.as_str(), &r.view))
    }
}
