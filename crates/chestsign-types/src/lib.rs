//! # chestsign-types
//!
//! Data model for protection signs.
//!
//! A protection sign is a small block of text lines. The first line is the
//! header naming the kind of protection; every following line names one
//! owner or allowed user. This crate holds the value types shared by the
//! parser and the writer:
//!
//! - [`ProtectionType`]: the closed set of protection kinds
//! - [`SignLocation`]: an opaque handle used to find the sign again
//! - [`Profile`]: one owner/user entry, with its full-fidelity saved record
//! - [`ProtectionRecord`]: the parsed sign: location, type and ordered profiles
//!
//! No I/O happens here. Reading and writing live signs is the job of
//! `chestsign-codec`.

#![deny(unsafe_code)]

pub mod profile;
pub mod protection;

pub use profile::{
    Profile, ProfileKind, SavedRecord, EVERYONE_KEY, GROUP_KEY, NAME_KEY, UUID_KEY,
};
pub use protection::{ProtectionRecord, ProtectionType, SignLocation};
