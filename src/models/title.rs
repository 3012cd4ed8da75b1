use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A movie name as known to the recommendation backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match against an already lowercased needle
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Title {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Title {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Every title available for search, in backend order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    titles: Vec<Title>,
}

impl Catalog {
    pub fn new(titles: Vec<Title>) -> Self {
        Self { titles }
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn contains(&self, title: &Title) -> bool {
        self.titles.contains(title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl FromIterator<Title> for Catalog {
    fn from_iter<I: IntoIterator<Item = Title>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
