//! Response types for HTTP handlers.

mod assistant;
mod error_response;
mod index;
mod monitors;
mod predictions;
mod vision;

pub use assistant::*;
pub use error_response::ErrorResponse;
pub use index::*;
pub use monitors::*;
pub use predictions::*;
pub use vision::*;
