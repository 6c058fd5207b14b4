pub mod error;
pub mod service;

pub use error::TakeServiceError;
pub use service::{TakeService, TakeStatus, TakeSummary, WavExport};
