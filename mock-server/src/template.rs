//! Endpoint path templates.
//!
//! # Design
//! Templates are written the way GitHub documents its paths:
//! `{name}` binds one non-empty segment. Matching itself is done by
//! [`matchit`], the radix-tree router axum is built on; this module only
//! translates the catalog syntax into matchit's and rejects what matchit
//! cannot express.
//!
//! A trailing `{name:.+}` or `{name:.*}` binds the whole remainder of the
//! path, slashes included (matchit's `{*name}`), which is how refs such as
//! `heads/main` are addressed. Any other `{name:regex}` constraint is
//! rejected: silently widening it to "any segment" would match requests the
//! pattern was written to exclude.

use crate::error::MockError;

/// Values captured by the `{name}` segments of a matched template.
///
/// The router stores this in the request extensions before it calls the
/// handler, so custom handlers can read e.g. the `owner` of
/// `/repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'k, 'v> FromIterator<(&'k str, &'v str)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (&'k str, &'v str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }
}

/// A catalog pattern translated to matchit route syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    route: String,
}

impl PathTemplate {
    pub fn parse(pattern: &str) -> Result<Self, MockError> {
        let unsupported = |reason: &str| MockError::UnsupportedPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = pattern.split('/').collect();
        let last = segments.len() - 1;
        let mut route = Vec::with_capacity(segments.len());

        for (index, segment) in segments.into_iter().enumerate() {
            let Some(inner) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
                route.push(segment.to_string());
                continue;
            };
            match inner.split_once(':') {
                None => route.push(segment.to_string()),
                Some((name, ".+" | ".*")) if index == last => route.push(format!("{{*{name}}}")),
                Some((_, ".+" | ".*")) => {
                    return Err(unsupported("a match-all parameter must be the last segment"))
                }
                Some((_, _)) => return Err(unsupported("regex constraints are not supported")),
            }
        }

        Ok(Self { route: route.join("/") })
    }

    /// The route in matchit syntax.
    pub fn as_str(&self) -> &str {
        &self.route
    }
}
