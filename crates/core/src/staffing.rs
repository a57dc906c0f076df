//! Staffing role categories and team composition.
//!
//! Every team assignment carries a role category. The readiness engine
//! reads the per-category breakdown when assembling a configuration
//! snapshot; the escort count also bounds how many daily assignments can
//! be covered on any one day.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Role categories
// ---------------------------------------------------------------------------

/// Valid role category strings (stored in `role_templates.category` and
/// `team_assignments.role_category`).
pub const CATEGORY_SUPERVISOR: &str = "supervisor";
pub const CATEGORY_COORDINATOR: &str = "coordinator";
pub const CATEGORY_ESCORT: &str = "escort";

/// All valid role category strings.
pub const VALID_ROLE_CATEGORIES: &[&str] =
    &[CATEGORY_SUPERVISOR, CATEGORY_COORDINATOR, CATEGORY_ESCORT];

/// Category of a staffing role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Supervisor,
    Coordinator,
    Escort,
}

impl RoleCategory {
    /// Parse a category string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            CATEGORY_SUPERVISOR => Ok(Self::Supervisor),
            CATEGORY_COORDINATOR => Ok(Self::Coordinator),
            CATEGORY_ESCORT => Ok(Self::Escort),
            _ => Err(CoreError::Validation(format!(
                "Invalid role category '{s}'. Must be one of: {}",
                VALID_ROLE_CATEGORIES.join(", ")
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supervisor => CATEGORY_SUPERVISOR,
            Self::Coordinator => CATEGORY_COORDINATOR,
            Self::Escort => CATEGORY_ESCORT,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Supervisor => "Supervisor",
            Self::Coordinator => "Coordinator",
            Self::Escort => "Talent Escort",
        }
    }
}

// ---------------------------------------------------------------------------
// Team composition
// ---------------------------------------------------------------------------

/// Per-category staff counts for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StaffBreakdown {
    pub supervisors: i64,
    pub coordinators: i64,
    pub escorts: i64,
}

impl StaffBreakdown {
    /// Total staff assigned across all categories.
    pub fn total(&self) -> i64 {
        self.supervisors + self.coordinators + self.escorts
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_str_valid() {
        assert_eq!(
            RoleCategory::from_str_db("supervisor").unwrap(),
            RoleCategory::Supervisor
        );
        assert_eq!(
            RoleCategory::from_str_db("coordinator").unwrap(),
            RoleCategory::Coordinator
        );
        assert_eq!(RoleCategory::from_str_db("escort").unwrap(), RoleCategory::Escort);
    }

    #[test]
    fn category_from_str_invalid() {
        assert!(RoleCategory::from_str_db("driver").is_err());
        assert!(RoleCategory::from_str_db("Escort").is_err());
        assert!(RoleCategory::from_str_db("").is_err());
    }

    #[test]
    fn category_as_str_roundtrip() {
        for category in [
            RoleCategory::Supervisor,
            RoleCategory::Coordinator,
            RoleCategory::Escort,
        ] {
            assert_eq!(
                RoleCategory::from_str_db(category.as_str()).unwrap(),
                category
            );
        }
    }

    #[test]
    fn labels_are_nonempty() {
        for s in VALID_ROLE_CATEGORIES {
            assert!(!RoleCategory::from_str_db(s).unwrap().label().is_empty());
        }
    }

    #[test]
    fn breakdown_total_sums_categories() {
        let breakdown = StaffBreakdown {
            supervisors: 1,
            coordinators: 2,
            escorts: 4,
        };
        assert_eq!(breakdown.total(), 7);
    }

    #[test]
    fn default_breakdown_is_empty() {
        assert_eq!(StaffBreakdown::default().total(), 0);
    }
}
