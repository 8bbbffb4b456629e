pub mod grid;
pub mod neighbors;
