//! Error types for syllog.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific error conditions and provides clear error messages.

use thiserror::Error;

use crate::registry::BaseKind;

/// Top-level error type for syllog.
#[derive(Debug, Error)]
pub enum SyllogError {
    /// A base name is already taken in one of the two process namespaces.
    ///
    /// Raised at registration time, before either namespace is mutated.
    #[error("name '{name}' is already registered as a {occupied_by}")]
    NameCollision {
        /// The name that collided.
        name: String,
        /// The namespace that already holds the name.
        occupied_by: BaseKind,
    },

    /// No entity list exists under this name and no factory is configured.
    ///
    /// Recoverable: the caller may treat it as "no such entity category"
    /// or as a misconfiguration.
    #[error("entity list '{entity}' not found in base '{base}' and no factory is configured")]
    EntityListNotFound {
        /// Name of the base that was asked.
        base: String,
        /// The unresolved entity name.
        entity: String,
    },

    /// An entity list with this name is already installed in the base.
    ///
    /// Entity list entries are created at most once per name; explicit
    /// installation over an existing entry would break identity stability.
    #[error("entity list '{entity}' already exists in base '{base}'")]
    EntityListExists {
        /// Name of the base that was asked.
        base: String,
        /// The occupied entity name.
        entity: String,
    },

    /// A failure raised by a match engine or an entity list variant.
    ///
    /// Propagated unchanged to the caller; this core never wraps or
    /// suppresses collaborator failures beyond boxing them.
    #[error("match engine error: {0}")]
    Match(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl SyllogError {
    /// Wraps a collaborator failure as a match error.
    pub fn match_error(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Match(Box::new(err))
    }

    /// Returns true if this is a registration name collision.
    #[must_use]
    pub const fn is_name_collision(&self) -> bool {
        matches!(self, Self::NameCollision { .. })
    }

    /// Returns true if this is an unresolved entity list name.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityListNotFound { .. })
    }
}

/// Result type alias for syllog operations.
pub type SyllogResult<T> = Result<T, SyllogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_collision_display() {
        let err = SyllogError::NameCollision {
            name: "family".to_string(),
            occupied_by: BaseKind::Rule,
        };
        let msg = format!("{err}");
        assert!(msg.contains("family"));
        assert!(msg.contains("rule base"));
        assert!(err.is_name_collision());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_entity_list_not_found_display() {
        let err = SyllogError::EntityListNotFound {
            base: "family".to_string(),
            entity: "parent".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("parent"));
        assert!(msg.contains("family"));
        assert!(msg.contains("no factory"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_entity_list_exists_display() {
        let err = SyllogError::EntityListExists {
            base: "family".to_string(),
            entity: "parent".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("already exists"));
    }

    #[test]
    fn test_match_error_preserves_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::InvalidData, "malformed pattern");
        let err = SyllogError::match_error(inner);
        let msg = format!("{err}");
        assert!(msg.contains("malformed pattern"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
