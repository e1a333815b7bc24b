//! Versioned values and enums
//!
//! A versioned value maps version ranges to alias lists. Binding it to a
//! version selects the aliases that were in effect at that version, which can
//! then be compared against identifiers coming from different API versions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │   Version   │────▶│  VersionedValue  │◀────│  VersionedEnum  │
//! │  (ordering) │     │ (alias lookup)   │     │ (member lookup) │
//! └─────────────┘     └──────────────────┘     └─────────────────┘
//!                             ▲                        ▲
//!                             │                        │
//!                     ┌──────────────┐          ┌─────────────┐
//!                     │    Alias     │          │   Catalog   │
//!                     │(normalizing) │          │ (JSON file) │
//!                     └──────────────┘          └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`pep440`]: Version tokens with `ALL` / `LATEST` sentinels
//! - [`alias`]: Alias tokens, normalization and alias sources
//! - [`value`]: Version-scoped alias sets with alias equality
//! - [`group`]: Enums of versioned values sharing one bound version
//! - [`catalog`]: Named enums loaded from JSON
//! - [`error`]: Error types for construction, resolution and catalogs

pub mod alias;
pub mod catalog;
pub mod error;
pub mod group;
pub mod pep440;
pub mod value;
