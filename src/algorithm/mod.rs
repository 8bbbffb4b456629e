/// Fixed-size bitset over grid cell ids
pub mod bitset;
/// Star conditions and their evaluation
pub mod conditions;
/// Placement scoring over one occupied-cell bitset
pub mod scoring;
/// Exhaustive placement enumeration engine
pub mod solver;
/// Background solve worker and cancellation
pub mod worker;
