pub mod csv;
pub mod dataset;

pub use csv::*;
pub use dataset::*;
