//! UUID-backed identifiers for stored records.

/// Error raised when a record identifier is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{label} must be a valid UUID")]
pub struct InvalidRecordId {
    /// Name of the rejected identifier, such as `goal id`.
    pub label: &'static str,
}

/// Define a `Copy` UUID newtype with string conversions and serde support.
macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Parse an identifier from its hyphenated UUID form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, $crate::domain::InvalidRecordId> {
                uuid::Uuid::parse_str(id.as_ref())
                    .map(Self)
                    .map_err(|_| $crate::domain::InvalidRecordId { label: $label })
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random (v4) identifier.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Borrow the underlying UUID.
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::InvalidRecordId;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_record_id;

/// Round `value` to `places` decimal places.
///
/// # Examples
/// ```
/// use ecopulse::domain::round_to;
///
/// assert_eq!(round_to(12.3456, 2), 12.35);
/// assert_eq!(round_to(99.94, 1), 99.9);
/// ```
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
