//! Versioned values and enums for matching identifiers across API versions

pub mod config;
pub mod logging;
pub mod version;

pub use version::alias::{Alias, AliasSource, normalize_alias};
pub use version::catalog::Catalog;
pub use version::error::{CatalogError, ConstructionError, ResolveError};
pub use version::group::VersionedEnum;
pub use version::pep440::{ALL, LATEST, Version};
pub use version::value::{Matching, VersionedValue};
