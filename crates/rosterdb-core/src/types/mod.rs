mod float64;
mod id;

pub use float64::*;
pub use id::*;
