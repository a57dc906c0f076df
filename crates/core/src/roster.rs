//! Talent roster entry kinds.
//!
//! Roster entries are either individuals or groups (a band, a stunt team).
//! Both count once toward the roster size the readiness engine reads: a
//! group occupies a single daily assignment slot just like an individual.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Valid talent kind strings (stored in `talent.kind`).
pub const KIND_INDIVIDUAL: &str = "individual";
pub const KIND_GROUP: &str = "group";

/// All valid talent kind strings.
pub const VALID_TALENT_KINDS: &[&str] = &[KIND_INDIVIDUAL, KIND_GROUP];

/// Kind of a talent roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentKind {
    Individual,
    Group,
}

impl TalentKind {
    /// Parse a kind string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            KIND_INDIVIDUAL => Ok(Self::Individual),
            KIND_GROUP => Ok(Self::Group),
            _ => Err(CoreError::Validation(format!(
                "Invalid talent kind '{s}'. Must be one of: {}",
                VALID_TALENT_KINDS.join(", ")
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => KIND_INDIVIDUAL,
            Self::Group => KIND_GROUP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_str_valid() {
        assert_eq!(
            TalentKind::from_str_db("individual").unwrap(),
            TalentKind::Individual
        );
        assert_eq!(TalentKind::from_str_db("group").unwrap(), TalentKind::Group);
    }

    #[test]
    fn kind_from_str_invalid() {
        assert!(TalentKind::from_str_db("ensemble").is_err());
        assert!(TalentKind::from_str_db("").is_err());
    }

    #[test]
    fn kind_as_str_roundtrip() {
        for kind in [TalentKind::Individual, TalentKind::Group] {
            assert_eq!(TalentKind::from_str_db(kind.as_str()).unwrap(), kind);
        }
    }
}
