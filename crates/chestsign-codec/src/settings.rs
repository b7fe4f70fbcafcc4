//! Localized header settings.
//!
//! Every protection type has two header strings: a plain one that typed
//! headers are matched against, and a decorated one that is written back
//! to the sign. Both are read through [`HeaderSettings`] on each call so a
//! language change applies to the next decode or encode.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use chestsign_types::ProtectionType;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CodecError, CodecResult};
use crate::header::normalize_header;

/// Source of the localized header strings.
pub trait HeaderSettings: Send + Sync {
    /// Header text matched when reading a sign.
    fn plain_header(&self, protection_type: ProtectionType) -> String;

    /// Decorated header text written to a sign.
    fn fancy_header(&self, protection_type: ProtectionType) -> String;
}

/// Plain and decorated header text for one protection type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStrings {
    pub plain: String,
    pub fancy: String,
}

impl HeaderStrings {
    pub fn new(plain: impl Into<String>, fancy: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            fancy: fancy.into(),
        }
    }
}

/// Header configuration, usually loaded from a TOML file.
///
/// ```toml
/// everyone_tag = "Everyone"
///
/// [private]
/// plain = "[Private]"
/// fancy = "§1[Private]"
///
/// [more_users]
/// plain = "[More Users]"
/// fancy = "§1[More Users]"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedHeaders {
    pub private: HeaderStrings,
    pub more_users: HeaderStrings,
    /// Name shown between brackets for the everyone wildcard.
    pub everyone_tag: String,
}

impl Default for LocalizedHeaders {
    fn default() -> Self {
        Self {
            private: HeaderStrings::new("[Private]", "\u{00A7}1[Private]"),
            more_users: HeaderStrings::new("[More Users]", "\u{00A7}1[More Users]"),
            everyone_tag: "Everyone".to_string(),
        }
    }
}

impl LocalizedHeaders {
    /// Load settings from a TOML file.
    ///
    /// A missing file yields the built-in defaults.
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "header settings file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "loaded header settings");
        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(contents: &str) -> CodecResult<Self> {
        let settings: LocalizedHeaders =
            toml::from_str(contents).map_err(|e| CodecError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn headers(&self, protection_type: ProtectionType) -> &HeaderStrings {
        match protection_type {
            ProtectionType::Private => &self.private,
            ProtectionType::MoreUsers => &self.more_users,
        }
    }

    /// Check that every header is usable and that headers can be told apart.
    ///
    /// The decorated header must read as the plain header once formatting
    /// is removed, otherwise a written sign would not be recognized again.
    pub fn validate(&self) -> CodecResult<()> {
        if self.everyone_tag.trim().is_empty() {
            return Err(CodecError::Config("everyone_tag must not be empty".into()));
        }

        let mut seen: HashMap<String, ProtectionType> = HashMap::new();
        for t in ProtectionType::ALL {
            let strings = self.headers(t);
            let plain = normalize_header(&strings.plain);
            if plain.is_empty() {
                return Err(CodecError::Config(format!("plain header for {} is empty", t)));
            }
            if normalize_header(&strings.fancy) != plain {
                return Err(CodecError::Config(format!(
                    "fancy header for {} does not read as {:?}",
                    t, strings.plain
                )));
            }
            if let Some(other) = seen.insert(plain, t) {
                return Err(CodecError::Config(format!(
                    "{} and {} share the header {:?}",
                    other, t, strings.plain
                )));
            }
        }
        Ok(())
    }
}

impl HeaderSettings for LocalizedHeaders {
    fn plain_header(&self, protection_type: ProtectionType) -> String {
        self.headers(protection_type).plain.clone()
    }

    fn fancy_header(&self, protection_type: ProtectionType) -> String {
        self.headers(protection_type).fancy.clone()
    }
}

/// Header settings that can be swapped at runtime.
#[derive(Debug, Default)]
pub struct ReloadableHeaders {
    current: RwLock<LocalizedHeaders>,
}

impl ReloadableHeaders {
    pub fn new(headers: LocalizedHeaders) -> Self {
        Self {
            current: RwLock::new(headers),
        }
    }

    /// Validate and install new settings.
    pub fn replace(&self, headers: LocalizedHeaders) -> CodecResult<()> {
        headers.validate()?;
        let mut current = self.current.write().map_err(|_| CodecError::LockPoisoned)?;
        *current = headers;
        Ok(())
    }

    /// Copy of the settings currently in use.
    pub fn snapshot(&self) -> CodecResult<LocalizedHeaders> {
        let current = self.current.read().map_err(|_| CodecError::LockPoisoned)?;
        Ok(current.clone())
    }
}

impl HeaderSettings for ReloadableHeaders {
    fn plain_header(&self, protection_type: ProtectionType) -> String {
        match self.current.read() {
            Ok(current) => current.plain_header(protection_type),
            Err(poisoned) => poisoned.into_inner().plain_header(protection_type),
        }
    }

    fn fancy_header(&self, protection_type: ProtectionType) -> String {
        match self.current.read() {
            Ok(current) => current.fancy_header(protection_type),
            Err(poisoned) => poisoned.into_inner().fancy_header(protection_type),
        }
    }
}
