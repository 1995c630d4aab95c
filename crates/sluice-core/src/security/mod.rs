//! Security checks applied while extracting.

pub mod path;
pub mod quota;

pub use path::EntryResolution;
pub use path::is_within_root;
pub use path::normalize_entry_name;
pub use path::resolve_entry_path;
pub use quota::ByteBudget;
