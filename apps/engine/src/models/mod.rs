pub mod job;
pub mod profile;

pub use job::{compute_hash, detect_experience_level, ExperienceLevel, JobPosting, MatchedJob};
pub use profile::{
    Certification, ConfidenceLabel, EducationEntry, ExperienceEntry, Profile, ProjectEntry,
};
