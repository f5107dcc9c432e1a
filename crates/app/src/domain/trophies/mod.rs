//! Trophies

pub mod errors;
pub mod service;

pub use errors::TrophiesError;
pub use service::TrophyTracker;
