// ============================================================================
// Venue Module
// Caller-facing orchestration over the per-instrument matching engines
// ============================================================================

pub mod api;
mod builder;
mod error;
mod orchestrator;

pub use builder::VenueBuilder;
pub use error::{VenueError, VenueResult};
pub use orchestrator::Venue;
