//! Archive extraction with a byte budget and rollback.

pub mod engine;
pub mod rollback;

pub use engine::ExtractionRequest;
pub use engine::Extractor;
pub use rollback::RollbackReport;
pub use rollback::rollback;
