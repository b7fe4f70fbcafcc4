//! Owner and user profiles.
//!
//! A profile can be built two ways: from a saved record (full fidelity, any
//! extra keys are carried along untouched) or from the text on a sign line
//! (lossy, only the name survives). Both routes end in the same [`Profile`]
//! shape: a display name plus the record that gets written to the hidden
//! channel.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A flat key/value record holding one profile with full fidelity.
pub type SavedRecord = Map<String, Value>;

/// Player name.
pub const NAME_KEY: &str = "n";
/// Player unique id, hyphenated.
pub const UUID_KEY: &str = "u";
/// Group name.
pub const GROUP_KEY: &str = "g";
/// Marker for the everyone wildcard.
pub const EVERYONE_KEY: &str = "e";

/// What a profile refers to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileKind {
    /// A single player. The id is absent when the profile came from sign text.
    Player { id: Option<Uuid> },
    /// Every member of a named group.
    Group,
    /// Anyone at all.
    Everyone,
}

/// One owner or user entry on a protection sign.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    kind: ProfileKind,
    display_name: String,
    save_record: SavedRecord,
}

impl Profile {
    /// Build a profile from already decoded parts.
    ///
    /// Used by profile factories that keep unknown keys of a saved record.
    pub fn from_parts(
        kind: ProfileKind,
        display_name: impl Into<String>,
        save_record: SavedRecord,
    ) -> Self {
        Self {
            kind,
            display_name: display_name.into(),
            save_record,
        }
    }

    /// A player profile with its canonical saved record.
    pub fn player(name: impl Into<String>, id: Option<Uuid>) -> Self {
        let name = name.into();
        let mut record = SavedRecord::new();
        record.insert(NAME_KEY.to_string(), Value::String(name.clone()));
        if let Some(id) = id {
            record.insert(UUID_KEY.to_string(), Value::String(id.to_string()));
        }
        Self {
            kind: ProfileKind::Player { id },
            display_name: name,
            save_record: record,
        }
    }

    /// A group profile, shown on the sign as `[name]`.
    pub fn group(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut record = SavedRecord::new();
        record.insert(GROUP_KEY.to_string(), Value::String(name.clone()));
        Self {
            kind: ProfileKind::Group,
            display_name: format!("[{}]", name),
            save_record: record,
        }
    }

    /// The everyone wildcard, shown on the sign as `[tag]`.
    pub fn everyone(tag: &str) -> Self {
        let mut record = SavedRecord::new();
        record.insert(EVERYONE_KEY.to_string(), Value::Bool(true));
        Self {
            kind: ProfileKind::Everyone,
            display_name: format!("[{}]", tag),
            save_record: record,
        }
    }

    pub fn kind(&self) -> &ProfileKind {
        &self.kind
    }

    /// Text written to the sign line for this profile.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Record written to the hidden channel for this profile.
    pub fn save_record(&self) -> &SavedRecord {
        &self.save_record
    }

    /// Stable player id, if this is a player profile that has one.
    pub fn player_id(&self) -> Option<Uuid> {
        match self.kind {
            ProfileKind::Player { id } => id,
            _ => None,
        }
    }
}
