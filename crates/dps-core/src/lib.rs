#![deny(missing_docs)]
#![doc = "Core data types for the dps sweep driver: simulator parameter sets, preset composition and the shared error surface."]

pub mod compose;
pub mod errors;
pub mod params;

pub use compose::{add, merge};
pub use errors::{DpsError, ErrorInfo};
pub use params::{ParamSet, ParamValue};
