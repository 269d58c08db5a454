//! Product categories.

use crate::error::CommerceError;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Category {
    /// Description, or a generic blurb when the admin left it empty.
    pub fn description_or_default(&self) -> &str {
        if self.description.trim().is_empty() {
            "Discover our collection"
        } else {
            &self.description
        }
    }
}

/// Body of `POST /categories`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

impl NewCategory {
    /// A category needs a non-blank name. Names are trimmed.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CommerceError::ValidationError(
                "category name is required".to_string(),
            ));
        }
        Ok(Self {
            name,
            description: description.into().trim().to_string(),
        })
    }
}

/// Body of `PUT /categories/{id}`. Only the fields that are set change.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Reject an update that changes nothing or blanks the name.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::ValidationError(
                "nothing to update".to_string(),
            ));
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CommerceError::ValidationError(
                "category name cannot be blank".to_string(),
            ));
        }
        Ok(())
    }
}
