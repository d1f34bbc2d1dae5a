//! Pet Store entity types
//!
//! The shapes here mirror the public Pet Store API. This crate only
//! populates and inspects them; the service owns their semantics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a pet, shared by every step of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(i64);

impl PetId {
    /// Creates a strictly positive identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is zero or negative.
    pub fn new(value: i64) -> DomainResult<Self> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidIdentifier(value.to_string()))
        }
    }

    /// Parses an externally supplied override.
    ///
    /// Only plain ASCII digits describing a value greater than zero are
    /// accepted; anything else yields `None` so the caller falls back to a
    /// generated identifier.
    #[must_use]
    pub fn parse_override(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse::<i64>().ok().and_then(|v| Self::new(v).ok())
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sale status of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    /// Listed and available.
    Available,
    /// Reserved.
    Pending,
    /// Sold.
    Sold,
}

impl PetStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Sold => "sold",
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "available" => Ok(Self::Available),
            "pending" => Ok(Self::Pending),
            "sold" => Ok(Self::Sold),
            other => Err(DomainError::UnknownPetStatus(other.to_string())),
        }
    }
}

/// Category a pet belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id
    pub id: i64,
    /// Category name
    pub name: String,
}

impl Category {
    /// Creates a new category.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Free-form tag attached to a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag id
    pub id: i64,
    /// Tag name
    pub name: String,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A pet as submitted to and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Pet identifier
    pub id: PetId,
    /// Display name
    pub name: String,
    /// Sale status
    pub status: PetStatus,
    /// Optional category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Photo URLs, in order
    #[serde(default)]
    pub photo_urls: Vec<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Pet {
    /// Creates a pet with no category, photos or tags.
    #[must_use]
    pub fn new(id: PetId, name: impl Into<String>, status: PetStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            category: None,
            photo_urls: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the category (builder pattern).
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Appends a photo URL (builder pattern).
    #[must_use]
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_urls.push(url.into());
        self
    }

    /// Appends a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }
}
