pub mod geo;
pub mod grid;
pub mod rng;

// Foundation crate: small, well-tested primitives only.
pub use geo::*;
pub use grid::*;
pub use rng::*;
