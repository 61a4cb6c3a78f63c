//! Domain logic - pure version rules independent of files on disk

pub mod version;
pub mod version_set;

pub use version::{next_version, IncrementMode, Version};
pub use version_set::VersionSet;
