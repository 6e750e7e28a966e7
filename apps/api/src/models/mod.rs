pub mod analysis;
pub mod job_profile;
pub mod processing;
pub mod resume;
