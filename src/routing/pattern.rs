//! Route patterns: exact paths, `:param` segments, and the `*` catch-all.

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;

use std::collections::BTreeMap;

/// Captured parameters, keyed by parameter name.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,
    #[error("pattern must start with `/` or be `*`")]
    MissingLeadingSlash,
    #[error("parameter segment has no name")]
    UnnamedParam,
    #[error("parameter `{0}` appears more than once")]
    DuplicateParam(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Matches one path, string-equal.
    Exact(String),
    /// Same segment count, literals equal, params capture non-empty segments.
    Parameterized(Vec<Segment>),
    /// Matches anything.
    CatchAll,
}

impl Pattern {
    /// Parse `*`, `/literal/path`, or `/path/:name/...`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for empty patterns, patterns without a leading
    /// `/`, unnamed parameters, and repeated parameter names.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        if raw == "*" {
            return Ok(Self::CatchAll);
        }
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash);
        }
        if !raw.split('/').any(|s| s.starts_with(':')) {
            return Ok(Self::Exact(raw.to_owned()));
        }

        let mut segments = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        for part in raw.split('/') {
            match part.strip_prefix(':') {
                Some("") => return Err(PatternError::UnnamedParam),
                Some(name) => {
                    if names.contains(&name) {
                        return Err(PatternError::DuplicateParam(name.to_owned()));
                    }
                    names.push(name);
                    segments.push(Segment::Param(name.to_owned()));
                }
                None => segments.push(Segment::Literal(part.to_owned())),
            }
        }
        Ok(Self::Parameterized(segments))
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll)
    }

    /// Match `path`, returning captured params on success.
    pub fn matches(&self, path: &str) -> Option<Params> {
        match self {
            Self::CatchAll => Some(Params::new()),
            Self::Exact(literal) => (literal == path).then(Params::new),
            Self::Parameterized(segments) => {
                let parts: Vec<&str> = path.split('/').collect();
                if parts.len() != segments.len() {
                    return None;
                }
                let mut params = Params::new();
                for (segment, part) in segments.iter().zip(parts) {
                    match segment {
                        Segment::Literal(expected) if expected == part => {}
                        Segment::Param(name) if !part.is_empty() => {
                            params.insert(name.clone(), part.to_owned());
                        }
                        _ => return None,
                    }
                }
                Some(params)
            }
        }
    }
}
