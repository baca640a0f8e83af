//! Application layer - Generic services that use ports.

pub mod share;
pub mod upload;

pub use share::ShareService;
pub use upload::{UploadError, UploadRequest, UploadService};
