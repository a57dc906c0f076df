pub mod daily_assignment;
pub mod location;
pub mod project;
pub mod readiness_record;
pub mod role_template;
pub mod talent;
pub mod team_assignment;
