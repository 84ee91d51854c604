pub mod reconciler;
pub mod sink;

pub use reconciler::*;
pub use sink::*;
