//! Building profiles from saved records and from sign text.

use chestsign_types::{
    Profile, ProfileKind, SavedRecord, EVERYONE_KEY, GROUP_KEY, NAME_KEY, UUID_KEY,
};
use serde_json::Value;
use uuid::Uuid;

use crate::settings::LocalizedHeaders;

/// Turns stored data or sign text into profiles.
pub trait ProfileFactory: Send + Sync {
    /// Rebuild a profile from its saved record, or `None` if the record is
    /// not a valid profile.
    fn from_saved_record(&self, record: &SavedRecord) -> Option<Profile>;

    /// Build a profile from the text of one sign line. Never fails; only the
    /// name is recovered.
    fn from_display_text(&self, text: &str) -> Profile;
}

/// Player, group and everyone profiles.
///
/// Saved records use the short keys from `chestsign_types`. Keys this
/// factory does not know are kept in the profile's record so they are
/// written back untouched.
#[derive(Clone, Debug)]
pub struct DefaultProfileFactory {
    everyone_tag: String,
}

impl DefaultProfileFactory {
    pub fn new(everyone_tag: impl Into<String>) -> Self {
        Self {
            everyone_tag: everyone_tag.into(),
        }
    }

    pub fn from_headers(headers: &LocalizedHeaders) -> Self {
        Self::new(headers.everyone_tag.clone())
    }

    fn non_empty_str<'r>(record: &'r SavedRecord, key: &str) -> Option<&'r str> {
        match record.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Default for DefaultProfileFactory {
    fn default() -> Self {
        Self::from_headers(&LocalizedHeaders::default())
    }
}

impl ProfileFactory for DefaultProfileFactory {
    fn from_saved_record(&self, record: &SavedRecord) -> Option<Profile> {
        if let Some(group) = Self::non_empty_str(record, GROUP_KEY) {
            return Some(Profile::from_parts(
                ProfileKind::Group,
                format!("[{}]", group),
                record.clone(),
            ));
        }

        if record.get(EVERYONE_KEY) == Some(&Value::Bool(true)) {
            return Some(Profile::from_parts(
                ProfileKind::Everyone,
                format!("[{}]", self.everyone_tag),
                record.clone(),
            ));
        }

        let name = Self::non_empty_str(record, NAME_KEY)?;
        let id = match record.get(UUID_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(Uuid::parse_str(raw).ok()?),
            Some(_) => return None,
        };
        Some(Profile::from_parts(
            ProfileKind::Player { id },
            name,
            record.clone(),
        ))
    }

    fn from_display_text(&self, text: &str) -> Profile {
        let text = text.trim();
        if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let inner = inner.trim();
            if inner.to_lowercase() == self.everyone_tag.to_lowercase() {
                return Profile::everyone(&self.everyone_tag);
            }
            if !inner.is_empty() {
                return Profile::group(inner);
            }
        }
        Profile::player(text, None)
    }
}
