//! Addressable location and navigation history
//!
//! A location is a URL such as `https://example.test/directus-preview?formId=7`
//! or a relative reference like `?formId=7`. Pushing a location onto the
//! history only records it; nothing is reloaded.

use reqwest::Url;
use std::fmt;
use thiserror::Error;

/// Query parameter that deep-links a form
pub const FORM_ID_PARAM: &str = "formId";

/// Location used when none is given on the command line
pub const DEFAULT_LOCATION: &str = "/";

/// Relative references are resolved against this base; it is never rendered
const RELATIVE_BASE: &str = "http://relative.invalid/";

#[derive(Debug, Error)]
#[error("Invalid location '{input}': {reason}")]
pub struct LocationError {
    input: String,
    reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
    relative: bool,
}

impl Location {
    /// Parse an absolute URL or a reference relative to the current page
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        let input = input.trim();
        if let Ok(url) = Url::parse(input) {
            return Ok(Self {
                url,
                relative: false,
            });
        }

        Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(input))
            .map(|url| Self {
                url,
                relative: true,
            })
            .map_err(|e| LocationError {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Copy with the parameter set, replacing the first occurrence in place
    /// and dropping the rest
    pub fn with_query_param(&self, name: &str, value: &str) -> Self {
        let mut pairs = self.pairs();
        match pairs.iter().position(|(key, _)| key == name) {
            Some(index) => {
                let mut seen = false;
                pairs.retain(|(key, _)| key != name || !std::mem::replace(&mut seen, true));
                pairs[index].1 = value.to_string();
            }
            None => pairs.push((name.to_string(), value.to_string())),
        }
        self.with_pairs(pairs)
    }

    /// Copy with every occurrence of the parameter removed
    pub fn without_query_param(&self, name: &str) -> Self {
        let mut pairs = self.pairs();
        pairs.retain(|(key, _)| key != name);
        self.with_pairs(pairs)
    }

    fn pairs(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }

    fn with_pairs(&self, pairs: Vec<(String, String)>) -> Self {
        let mut url = self.url.clone();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        Self {
            url,
            relative: self.relative,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.relative {
            return f.write_str(self.url.as_str());
        }

        f.write_str(self.url.path())?;
        if let Some(query) = self.url.query() {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = self.url.fragment() {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Session history of visited locations
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn current(&self) -> &Location {
        // `entries` is never empty: it starts with one entry and only grows
        &self.entries[self.entries.len() - 1]
    }

    /// Record a new current location without any other effect
    pub fn push_state(&mut self, location: Location) {
        tracing::debug!(location = %location, "History push");
        self.entries.push(location);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[Location] {
        &self.entries
    }
}
