//! Error types for pack resolution

use thiserror::Error;

/// Result type alias for resolution
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Reasons a pack can be rejected by the resolver.
///
/// Every variant names the zero-based position of the offending record in
/// the input pack. Resolution stops at the first of these it meets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// A record declares a version newer than the resolver understands
    #[error("Record {index}: version {version} is higher than supported (max {max})")]
    UnsupportedVersion { index: usize, version: u32, max: u32 },

    /// Two records of the same pack disagree on `bver`
    #[error("Record {index}: base version {found} differs from {expected} declared earlier in the pack")]
    InconsistentVersion {
        index: usize,
        expected: u32,
        found: u32,
    },

    /// Base name and name concatenate to the empty string
    #[error("Record {index}: resolved name is empty")]
    EmptyName { index: usize },

    /// Resolved name contains a character outside `A-Z a-z 0-9 - : . / _`
    #[error("Record {index}: resolved name '{name}' contains invalid characters")]
    InvalidNameCharacters { index: usize, name: String },

    /// Resolved name does not start with an ASCII letter or digit
    #[error("Record {index}: resolved name '{name}' must start with a letter or digit")]
    InvalidNameStart { index: usize, name: String },

    /// Record carries none of `v`, `vb`, `vs`, `vd` or `s`
    #[error("Record {index}: '{name}' has no value, boolean value, string value, data value or sum")]
    MissingValue { index: usize, name: String },
}

impl ResolveError {
    /// Position of the offending record in the input pack
    pub fn index(&self) -> usize {
        match self {
            Self::UnsupportedVersion { index, .. }
            | Self::InconsistentVersion { index, .. }
            | Self::EmptyName { index }
            | Self::InvalidNameCharacters { index, .. }
            | Self::InvalidNameStart { index, .. }
            | Self::MissingValue { index, .. } => *index,
        }
    }

    /// Create an invalid name characters error
    pub fn invalid_name_characters<S: Into<String>>(index: usize, name: S) -> Self {
        Self::InvalidNameCharacters {
            index,
            name: name.into(),
        }
    }

    /// Create an invalid name start error
    pub fn invalid_name_start<S: Into<String>>(index: usize, name: S) -> Self {
        Self::InvalidNameStart {
            index,
            name: name.into(),
        }
    }

    /// Create a missing value error
    pub fn missing_value<S: Into<String>>(index: usize, name: S) -> Self {
        Self::MissingValue {
            index,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolveError::EmptyName { index: 3 };
        assert_eq!(err.to_string(), "Record 3: resolved name is empty");

        let err = ResolveError::UnsupportedVersion {
            index: 0,
            version: 11,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "Record 0: version 11 is higher than supported (max 10)"
        );
    }

    #[test]
    fn test_error_index() {
        assert_eq!(ResolveError::invalid_name_start(7, "-x").index(), 7);
        assert_eq!(ResolveError::missing_value(2, "temp").index(), 2);
        assert_eq!(
            ResolveError::InconsistentVersion {
                index: 4,
                expected: 5,
                found: 6
            }
            .index(),
            4
        );
    }
}
