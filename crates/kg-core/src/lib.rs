//! Core types for Kivotos Guessr: characters, regions, and attribute fields.
//!
//! This crate defines the data model shared by the roster loader and the
//! game engine. It has no I/O; characters are built programmatically or by
//! the roster parser in `kg-roster`.

/// Characters, identifiers, and attribute values.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Attribute fields shown in the feedback table or disclosed as hints.
pub mod field;
/// Distribution regions and per-region release flags.
pub mod region;

/// Re-export character types.
pub use character::{AttrValue, Character, CharacterId};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export field types.
pub use field::Field;
/// Re-export region types.
pub use region::{REGION_COUNT, Region};
