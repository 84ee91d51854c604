pub mod popup;
pub mod radius;
pub mod symbology;

pub use popup::*;
pub use symbology::*;
