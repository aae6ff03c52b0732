//! Organization identity.
//!
//! Every activity, energy reading, and goal is scoped by an
//! [`OrganizationId`]; the organization itself only carries a display name.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Error;

/// Maximum accepted length of an organization name, in characters.
pub const ORGANIZATION_NAME_MAX: usize = 120;

/// Validation errors for organization identity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrganizationValidationError {
    /// Identifier is blank.
    #[error("organization id must not be empty")]
    EmptyId,
    /// Identifier is not a UUID.
    #[error("organization id must be a valid UUID")]
    InvalidId,
    /// Name is blank after trimming.
    #[error("organization name must not be empty")]
    EmptyName,
    /// Name exceeds [`ORGANIZATION_NAME_MAX`].
    #[error("organization name must be at most {max} characters")]
    NameTooLong {
        /// Longest accepted name, in characters.
        max: usize,
    },
}

impl OrganizationValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
        }
    }

    /// Machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::EmptyName => "empty",
            Self::InvalidId => "invalid_format",
            Self::NameTooLong { .. } => "too_long",
        }
    }
}

impl From<OrganizationValidationError> for Error {
    fn from(value: OrganizationValidationError) -> Self {
        Error::validation(value.field(), value.code(), value.to_string())
    }
}

/// Stable organization identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrganizationId(Uuid);

impl OrganizationId {
    /// Validate and construct an identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, OrganizationValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(OrganizationValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(OrganizationValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| OrganizationValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OrganizationId> for String {
    fn from(value: OrganizationId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for OrganizationId {
    type Error = OrganizationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// An organization whose footprint is being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    id: OrganizationId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Organization {
    /// Validate the name and build an organization.
    pub fn new(
        id: OrganizationId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrganizationValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(OrganizationValidationError::EmptyName);
        }
        if name.chars().count() > ORGANIZATION_NAME_MAX {
            return Err(OrganizationValidationError::NameTooLong {
                max: ORGANIZATION_NAME_MAX,
            });
        }
        Ok(Self {
            id,
            name,
            created_at,
        })
    }

    /// Organization identifier.
    pub fn id(&self) -> OrganizationId {
        self.id
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Registration instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", OrganizationValidationError::EmptyId)]
    #[case("not-a-uuid", OrganizationValidationError::InvalidId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", OrganizationValidationError::InvalidId)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: OrganizationValidationError) {
        assert_eq!(OrganizationId::new(raw), Err(expected));
    }

    #[rstest]
    fn trims_names_and_rejects_blank_ones() {
        let org = Organization::new(OrganizationId::random(), "  Green Relief  ", Utc::now())
            .expect("valid organization");
        assert_eq!(org.name(), "Green Relief");

        let blank = Organization::new(OrganizationId::random(), "   ", Utc::now());
        assert_eq!(blank, Err(OrganizationValidationError::EmptyName));
    }

    #[rstest]
    fn rejects_overlong_names() {
        let name = "x".repeat(ORGANIZATION_NAME_MAX + 1);
        let result = Organization::new(OrganizationId::random(), name, Utc::now());
        assert_eq!(
            result,
            Err(OrganizationValidationError::NameTooLong {
                max: ORGANIZATION_NAME_MAX
            })
        );
    }
}
