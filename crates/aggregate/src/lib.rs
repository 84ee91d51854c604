pub mod grid;
pub mod threshold;
pub mod visible;

pub use grid::*;
pub use threshold::*;
pub use visible::*;
