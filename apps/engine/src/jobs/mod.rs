//! Job-side processing: duplicate detection, category classification, and
//! candidate matching.

pub mod classifier;
pub mod dedup;
pub mod matcher;
pub mod ranking;
pub mod similarity;

pub use classifier::JobClassifier;
pub use dedup::JobDeduplicator;
pub use matcher::{Matcher, RemoteRankingMatcher, SkillOverlapMatcher};
pub use ranking::RankingClient;
