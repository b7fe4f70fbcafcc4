//! # chestsign-codec
//!
//! Reads and writes protection signs.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐   read_hidden    ┌──────────────────┐
//!   │ SignSurface  │ ───────────────▶ │ HiddenDataStore  │
//!   └──────┬───────┘                  └────────┬─────────┘
//!          │ lines                             │ saved records
//!          ▼                                   ▼
//!   ┌──────────────────────────────────────────────────┐
//!   │ SignCodec::decode                                │
//!   │   HeaderMatcher (line 0) + ProfileFactory        │
//!   └──────────────────────┬───────────────────────────┘
//!                          ▼
//!                  ProtectionRecord
//!                          │
//!                          ▼
//!   ┌──────────────────────────────────────────────────┐
//!   │ SignCodec::encode                                │
//!   │   SurfaceResolver → set lines → commit text      │
//!   │                   → write hidden records         │
//!   └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Rules
//!
//! - **Hidden data first**: when a sign has hidden records they are the
//!   source of profiles; otherwise every non-blank line below the header
//!   becomes a name-only profile.
//! - **Unknown header voids the sign**: both decode paths return `None`.
//! - **Best effort**: unreadable saved records are skipped, never reported.
//! - **Text before hidden data**: encode commits the visible lines before
//!   writing hidden records, since a commit may reset hidden data.
//! - **Collaborator errors pass through**: failures of the world, store or
//!   sign are returned unchanged and never retried.

#![deny(unsafe_code)]

pub mod codec;
pub mod error;
pub mod header;
pub mod memory;
pub mod profile;
pub mod settings;
pub mod surface;

pub use codec::{EncodeOutcome, SignCodec};
pub use error::{CodecError, CodecResult};
pub use header::{normalize_header, strip_color_codes, HeaderMatcher};
pub use memory::{InMemoryWorld, MemorySign, WorldCall, SIGN_LINES};
pub use profile::{DefaultProfileFactory, ProfileFactory};
pub use settings::{HeaderSettings, HeaderStrings, LocalizedHeaders, ReloadableHeaders};
pub use surface::{HiddenDataStore, SignSurface, SurfaceResolver};
