use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::ConsoleError;

pub type Id = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Image,
    OsFamily,
    OperatingSystem,
    Provider,
    OsArchitecture,
    OsBuilder,
    Build,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EntityKind::Image => write!(f, "image"),
            EntityKind::OsFamily => write!(f, "os family"),
            EntityKind::OperatingSystem => write!(f, "operating system"),
            EntityKind::Provider => write!(f, "provider"),
            EntityKind::OsArchitecture => write!(f, "os architecture"),
            EntityKind::OsBuilder => write!(f, "os builder"),
            EntityKind::Build => write!(f, "build"),
        }
    }
}

/// A record kept in one of the console's entity collections.
///
/// Every kind pairs with a `Draft` type: the shape of the add/edit form. A draft
/// carries every user-editable field and nothing the store assigns itself (the
/// identifier, denormalized counters).
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Clone + Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    const KIND: EntityKind;

    fn id(&self) -> Id;

    /// Build a brand new record from a submitted draft.
    fn from_draft(id: Id, draft: Self::Draft) -> Self;

    /// Copy the editable fields out of an existing record.
    fn to_draft(&self) -> Self::Draft;

    /// Replace the editable fields in place, keeping id and derived fields.
    fn apply_draft(&mut self, draft: Self::Draft);

    /// Text fields matched by the free-text search box.
    fn search_fields(&self) -> Vec<&str>;

    /// Evaluate one categorical filter. Kinds without filters reject every key.
    fn matches_filter(&self, key: &str, value: &str) -> Result<bool, ConsoleError> {
        Err(ConsoleError::invalid_filter(key, value))
    }

    /// Text fields that must be non-blank when the form is submitted.
    fn required_fields(draft: &Self::Draft) -> Vec<(&'static str, &str)>;

    /// Clear sub-fields hidden by the current value of their sibling switch.
    fn normalize_draft(_draft: &mut Self::Draft) {}

    /// Inconsistencies worth logging that do not block a save
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Case-insensitive substring match used by every search box.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parse the yes/no style values the boolean filters accept.
pub fn parse_flag(key: &str, value: &str, truthy: &str, falsy: &str) -> Result<bool, ConsoleError> {
    if value.eq_ignore_ascii_case(truthy) {
        Ok(true)
    } else if value.eq_ignore_ascii_case(falsy) {
        Ok(false)
    } else {
        Err(ConsoleError::invalid_filter(key, value))
    }
}

pub fn parse_id(key: &str, value: &str) -> Result<Id, ConsoleError> {
    value
        .trim()
        .parse::<Id>()
        .map_err(|_| ConsoleError::invalid_filter(key, value))
}

pub(crate) fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}
