use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Resort identifier: a lowercase slug such as `kauai-beach-club`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResortId(String);

impl ResortId {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let valid = !s.is_empty()
            && !s.starts_with('-')
            && !s.ends_with('-')
            && s.bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if !valid {
            return Err(DomainError::InvalidId(s.into()));
        }
        Ok(Self(s.to_string()))
    }

    /// Derive a slug from a display name ("Ko Olina Beach Club" -> "ko-olina-beach-club").
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        let mut slug = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        Self::parse(&slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResortId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResortId> for String {
    fn from(id: ResortId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ResortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
