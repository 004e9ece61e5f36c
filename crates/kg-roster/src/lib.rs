//! Roster loading for Kivotos Guessr.
//!
//! Fetches character data from a [`RosterSource`], normalizes the two
//! supported document shapes (id-keyed object or plain array), rejects
//! malformed records, and exposes the roster filtered to the active region.
//! Observers registered on the [`RosterStore`] are notified after every
//! state change.

pub mod error;
pub mod parse;
pub mod source;
pub mod store;

pub use error::{RosterError, RosterResult};
pub use parse::parse_roster;
pub use source::{DataLayout, DirSource, MemorySource, RosterSource};
pub use store::{LoadRequest, RegionChange, RosterStatus, RosterStore};
