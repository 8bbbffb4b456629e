//! Win-rate tuned level generation on top of the solver

/// Random base configurations with proportional scaling
pub mod config_generator;
/// Generation loop and its events
pub mod generation;
/// Builder ranges and acceptance criteria
pub mod settings;
/// Star condition generation from solve statistics
pub mod star_conditions;
