// ============================================================================
// VIEWS - Render DOM y wiring de eventos
// ============================================================================

pub mod location;
pub mod planner;
pub mod results;
pub mod social;

pub use location::LocationView;
pub use planner::PlannerView;
pub use social::SocialView;
