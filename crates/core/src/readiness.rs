//! Project readiness computation.
//!
//! Rolls up the configuration state of five independent subsystems
//! (locations, role templates, team, talent roster, daily escort
//! assignments) into a single readiness verdict: per-category statuses, a
//! strict overall roll-up, an ordered list of blocking issues, and the set
//! of application features the current state unlocks.
//!
//! Evaluation is pure and deterministic: the caller loads a
//! [`ConfigurationSnapshot`] from the database and passes it in. This
//! module never reads storage and never inspects optional fields ad hoc —
//! the snapshot is fully populated at the read boundary.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::staffing::StaffBreakdown;

// ---------------------------------------------------------------------------
// Status strings
// ---------------------------------------------------------------------------

/// Setup status values (locations, role templates).
pub const SETUP_DEFAULT_ONLY: &str = "default_only";
pub const SETUP_CONFIGURED: &str = "configured";
pub const SETUP_FINALIZED: &str = "finalized";

/// Roster status values (team, talent).
pub const ROSTER_NONE: &str = "none";
pub const ROSTER_PARTIAL: &str = "partial";
pub const ROSTER_FINALIZED: &str = "finalized";

/// Assignment coverage status values.
pub const ASSIGNMENTS_NONE: &str = "none";
pub const ASSIGNMENTS_PARTIAL: &str = "partial";
pub const ASSIGNMENTS_CURRENT: &str = "current";
pub const ASSIGNMENTS_COMPLETE: &str = "complete";

/// Overall readiness values.
pub const OVERALL_GETTING_STARTED: &str = "getting_started";
pub const OVERALL_OPERATIONAL: &str = "operational";
pub const OVERALL_PRODUCTION_READY: &str = "production_ready";

// ---------------------------------------------------------------------------
// Feature names
// ---------------------------------------------------------------------------

/// Multi-day timecard entry. Needs at least one staff member.
pub const FEATURE_TIME_TRACKING: &str = "time_tracking";

/// The talent-to-escort assignment grid. Needs staff and talent.
pub const FEATURE_ESCORT_ASSIGNMENT: &str = "escort_assignment";

/// Daily talent location tracking. Needs non-default locations and at
/// least one escort assignment on the books.
pub const FEATURE_LOCATION_TRACKING: &str = "location_tracking";

/// The day-of-show operations dashboard.
pub const FEATURE_DAILY_OPERATIONS: &str = "daily_operations";

/// End-of-production wrap reporting.
pub const FEATURE_WRAP_REPORTS: &str = "wrap_reports";

// ---------------------------------------------------------------------------
// Category status enums
// ---------------------------------------------------------------------------

/// Configuration state of a defaulted setup category (locations, roles).
///
/// Variant order is ascending readiness; the derived `Ord` is relied on by
/// the overall roll-up and by monotonicity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStatus {
    DefaultOnly,
    Configured,
    Finalized,
}

impl SetupStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            SETUP_DEFAULT_ONLY => Ok(Self::DefaultOnly),
            SETUP_CONFIGURED => Ok(Self::Configured),
            SETUP_FINALIZED => Ok(Self::Finalized),
            _ => Err(CoreError::Validation(format!(
                "Invalid setup status '{s}'. Must be one of: {SETUP_DEFAULT_ONLY}, {SETUP_CONFIGURED}, {SETUP_FINALIZED}"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultOnly => SETUP_DEFAULT_ONLY,
            Self::Configured => SETUP_CONFIGURED,
            Self::Finalized => SETUP_FINALIZED,
        }
    }
}

/// Population state of a roster category (team, talent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterStatus {
    None,
    Partial,
    Finalized,
}

impl RosterStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            ROSTER_NONE => Ok(Self::None),
            ROSTER_PARTIAL => Ok(Self::Partial),
            ROSTER_FINALIZED => Ok(Self::Finalized),
            _ => Err(CoreError::Validation(format!(
                "Invalid roster status '{s}'. Must be one of: {ROSTER_NONE}, {ROSTER_PARTIAL}, {ROSTER_FINALIZED}"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => ROSTER_NONE,
            Self::Partial => ROSTER_PARTIAL,
            Self::Finalized => ROSTER_FINALIZED,
        }
    }
}

/// Coverage state of the daily assignment grid.
///
/// `Current` means every talent-day slot has an escort but the grid has not
/// been explicitly closed out; `Complete` requires the close-out action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentsStatus {
    None,
    Partial,
    Current,
    Complete,
}

impl AssignmentsStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            ASSIGNMENTS_NONE => Ok(Self::None),
            ASSIGNMENTS_PARTIAL => Ok(Self::Partial),
            ASSIGNMENTS_CURRENT => Ok(Self::Current),
            ASSIGNMENTS_COMPLETE => Ok(Self::Complete),
            _ => Err(CoreError::Validation(format!(
                "Invalid assignments status '{s}'. Must be one of: {ASSIGNMENTS_NONE}, {ASSIGNMENTS_PARTIAL}, {ASSIGNMENTS_CURRENT}, {ASSIGNMENTS_COMPLETE}"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => ASSIGNMENTS_NONE,
            Self::Partial => ASSIGNMENTS_PARTIAL,
            Self::Current => ASSIGNMENTS_CURRENT,
            Self::Complete => ASSIGNMENTS_COMPLETE,
        }
    }
}

/// Overall project readiness. Strictly derived from the five category
/// statuses, never independently set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    GettingStarted,
    Operational,
    ProductionReady,
}

impl OverallStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            OVERALL_GETTING_STARTED => Ok(Self::GettingStarted),
            OVERALL_OPERATIONAL => Ok(Self::Operational),
            OVERALL_PRODUCTION_READY => Ok(Self::ProductionReady),
            _ => Err(CoreError::Validation(format!(
                "Invalid overall status '{s}'. Must be one of: {OVERALL_GETTING_STARTED}, {OVERALL_OPERATIONAL}, {OVERALL_PRODUCTION_READY}"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GettingStarted => OVERALL_GETTING_STARTED,
            Self::Operational => OVERALL_OPERATIONAL,
            Self::ProductionReady => OVERALL_PRODUCTION_READY,
        }
    }
}

// ---------------------------------------------------------------------------
// Change kinds
// ---------------------------------------------------------------------------

/// Which configuration source changed. Passed to the invalidation
/// coordinator by every mutation handler after a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Locations,
    Roles,
    Team,
    Talent,
    Assignments,
    Status,
}

impl ChangeKind {
    /// Stable string form, used in structured log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locations => "locations",
            Self::Roles => "roles",
            Self::Team => "team",
            Self::Talent => "talent",
            Self::Assignments => "assignments",
            Self::Status => "status",
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration snapshot
// ---------------------------------------------------------------------------

/// The tuple of counts and flags read from all configuration sources for
/// one project at one instant.
///
/// Populated by exhaustive mapping at the read boundary; a source with zero
/// rows contributes zero counts, never an error. A failed read aborts the
/// whole snapshot instead of substituting zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationSnapshot {
    pub location_count: i64,
    pub has_only_default_locations: bool,
    pub locations_finalized: bool,

    pub role_template_count: i64,
    pub has_only_default_roles: bool,
    pub roles_finalized: bool,

    pub staff_count: i64,
    pub staff_breakdown: StaffBreakdown,
    pub team_finalized: bool,

    pub talent_count: i64,
    pub talent_finalized: bool,

    /// Talent entity count multiplied by the project duration in days.
    pub total_possible_assignments: i64,
    /// Daily talent-escort links with a non-null escort.
    pub completed_assignments: i64,
    /// Whether the assignment grid has been explicitly closed out.
    pub assignments_closed_out: bool,
}

impl ConfigurationSnapshot {
    /// Check data-model invariants.
    ///
    /// Violations indicate a bug in snapshot collection and fail loudly as
    /// [`CoreError::Invariant`]; they are never silently clamped.
    pub fn validate(&self) -> Result<(), CoreError> {
        let counts = [
            ("location_count", self.location_count),
            ("role_template_count", self.role_template_count),
            ("staff_count", self.staff_count),
            ("talent_count", self.talent_count),
            ("total_possible_assignments", self.total_possible_assignments),
            ("completed_assignments", self.completed_assignments),
        ];
        for (name, value) in counts {
            if value < 0 {
                return Err(CoreError::Invariant(format!("{name} is negative: {value}")));
            }
        }

        if self.completed_assignments > self.total_possible_assignments {
            return Err(CoreError::Invariant(format!(
                "completed_assignments {} exceeds total_possible_assignments {}",
                self.completed_assignments, self.total_possible_assignments
            )));
        }

        if self.staff_breakdown.total() != self.staff_count {
            return Err(CoreError::Invariant(format!(
                "staff breakdown sums to {} but staff_count is {}",
                self.staff_breakdown.total(),
                self.staff_count
            )));
        }

        Ok(())
    }

    /// Fraction of the daily assignment grid that is covered.
    ///
    /// Returns 0.0 when the grid has no slots (zero talent or zero days).
    pub fn assignment_ratio(&self) -> f64 {
        if self.total_possible_assignments == 0 {
            return 0.0;
        }
        self.completed_assignments as f64 / self.total_possible_assignments as f64
    }

    fn locations_status(&self) -> SetupStatus {
        if self.locations_finalized {
            SetupStatus::Finalized
        } else if self.location_count > 0 && !self.has_only_default_locations {
            SetupStatus::Configured
        } else {
            SetupStatus::DefaultOnly
        }
    }

    fn roles_status(&self) -> SetupStatus {
        if self.roles_finalized {
            SetupStatus::Finalized
        } else if self.role_template_count > 0 && !self.has_only_default_roles {
            SetupStatus::Configured
        } else {
            SetupStatus::DefaultOnly
        }
    }

    fn team_status(&self) -> RosterStatus {
        if self.team_finalized {
            RosterStatus::Finalized
        } else if self.staff_count > 0 {
            RosterStatus::Partial
        } else {
            RosterStatus::None
        }
    }

    fn talent_status(&self) -> RosterStatus {
        if self.talent_finalized {
            RosterStatus::Finalized
        } else if self.talent_count > 0 {
            RosterStatus::Partial
        } else {
            RosterStatus::None
        }
    }

    fn assignments_status(&self) -> AssignmentsStatus {
        let full = self.total_possible_assignments > 0
            && self.completed_assignments == self.total_possible_assignments;
        if full && self.assignments_closed_out {
            AssignmentsStatus::Complete
        } else if full {
            AssignmentsStatus::Current
        } else if self.completed_assignments > 0 {
            AssignmentsStatus::Partial
        } else {
            AssignmentsStatus::None
        }
    }
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// The aggregator's output for one snapshot, before persistence stamps a
/// `last_updated` timestamp on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessAssessment {
    pub locations_status: SetupStatus,
    pub roles_status: SetupStatus,
    pub team_status: RosterStatus,
    pub talent_status: RosterStatus,
    pub assignments_status: AssignmentsStatus,
    pub overall_status: OverallStatus,
    /// Human-readable reasons the project cannot progress, in priority
    /// order: staffing, then talent, then configuration, then finalization.
    pub blocking_issues: Vec<String>,
    /// Feature names unlocked by the current state.
    pub available_features: Vec<&'static str>,
}

/// Compute the overall roll-up from the five category statuses.
///
/// `ProductionReady` requires every category at its maximal status.
/// `Operational` requires a non-empty team and a non-empty roster; default
/// locations and roles are usable and do not block it.
pub fn overall_status(
    locations: SetupStatus,
    roles: SetupStatus,
    team: RosterStatus,
    talent: RosterStatus,
    assignments: AssignmentsStatus,
) -> OverallStatus {
    let all_maximal = locations == SetupStatus::Finalized
        && roles == SetupStatus::Finalized
        && team == RosterStatus::Finalized
        && talent == RosterStatus::Finalized
        && assignments == AssignmentsStatus::Complete;

    if all_maximal {
        OverallStatus::ProductionReady
    } else if team > RosterStatus::None && talent > RosterStatus::None {
        OverallStatus::Operational
    } else {
        OverallStatus::GettingStarted
    }
}

/// Evaluate a configuration snapshot into a full readiness assessment.
///
/// Pure and deterministic: two calls over the same snapshot produce
/// identical assessments.
pub fn evaluate_snapshot(
    snapshot: &ConfigurationSnapshot,
) -> Result<ReadinessAssessment, CoreError> {
    snapshot.validate()?;

    let locations = snapshot.locations_status();
    let roles = snapshot.roles_status();
    let team = snapshot.team_status();
    let talent = snapshot.talent_status();
    let assignments = snapshot.assignments_status();

    let overall = overall_status(locations, roles, team, talent, assignments);

    Ok(ReadinessAssessment {
        locations_status: locations,
        roles_status: roles,
        team_status: team,
        talent_status: talent,
        assignments_status: assignments,
        overall_status: overall,
        blocking_issues: blocking_issues(snapshot, locations, roles, team, talent, assignments),
        available_features: available_features(locations, team, talent, assignments, overall),
    })
}

/// Build the ordered blocking-issue list for a snapshot.
///
/// Priority order: staffing gaps, then roster gaps, then configuration
/// gaps (assignment coverage, default-only setup), then pending
/// finalization.
fn blocking_issues(
    snapshot: &ConfigurationSnapshot,
    locations: SetupStatus,
    roles: SetupStatus,
    team: RosterStatus,
    talent: RosterStatus,
    assignments: AssignmentsStatus,
) -> Vec<String> {
    let mut issues = Vec::new();

    // Staffing.
    if team == RosterStatus::None {
        issues.push("No staff assigned to the team yet".to_string());
    }

    // Talent.
    if talent == RosterStatus::None {
        issues.push("No talent on the roster yet".to_string());
    }

    // Configuration: assignment coverage first, then default-only setup.
    match assignments {
        AssignmentsStatus::None if snapshot.total_possible_assignments > 0 => {
            issues.push("No escort assignments yet".to_string());
        }
        AssignmentsStatus::Partial => {
            issues.push(format!(
                "Escort assignments incomplete: {} of {} slots covered",
                snapshot.completed_assignments, snapshot.total_possible_assignments
            ));
        }
        _ => {}
    }
    if locations == SetupStatus::DefaultOnly {
        issues.push("Only default locations configured".to_string());
    }
    if roles == SetupStatus::DefaultOnly {
        issues.push("Only default role templates configured".to_string());
    }

    // Finalization.
    if locations == SetupStatus::Configured {
        issues.push("Locations not finalized".to_string());
    }
    if roles == SetupStatus::Configured {
        issues.push("Role templates not finalized".to_string());
    }
    if team == RosterStatus::Partial {
        issues.push("Team not finalized".to_string());
    }
    if talent == RosterStatus::Partial {
        issues.push("Talent roster not finalized".to_string());
    }
    if assignments == AssignmentsStatus::Current {
        issues.push("Daily assignments not closed out".to_string());
    }

    issues
}

/// Fixed mapping from category statuses to unlocked feature names.
fn available_features(
    locations: SetupStatus,
    team: RosterStatus,
    talent: RosterStatus,
    assignments: AssignmentsStatus,
    overall: OverallStatus,
) -> Vec<&'static str> {
    let mut features = Vec::new();

    if team > RosterStatus::None {
        features.push(FEATURE_TIME_TRACKING);
    }
    if team > RosterStatus::None && talent > RosterStatus::None {
        features.push(FEATURE_ESCORT_ASSIGNMENT);
    }
    if locations > SetupStatus::DefaultOnly && assignments > AssignmentsStatus::None {
        features.push(FEATURE_LOCATION_TRACKING);
    }
    if overall >= OverallStatus::Operational {
        features.push(FEATURE_DAILY_OPERATIONS);
    }
    if overall == OverallStatus::ProductionReady {
        features.push(FEATURE_WRAP_REPORTS);
    }

    features
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
