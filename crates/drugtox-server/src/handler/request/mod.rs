//! Request types for HTTP handlers.
//!
//! Every field is optional at the wire level so that a missing value is
//! reported with the same domain message as an empty one.

mod assistant;
mod predictions;

pub use assistant::*;
pub use predictions::*;
