//! Validated wrapper types for extraction.
//!
//! Values of these types can only be obtained through constructors that
//! perform the validation they stand for.

pub mod dest_dir;

pub use dest_dir::DestDir;
