//! Sign decoding and encoding.
//!
//! A protection sign carries its profiles twice: as display names on the
//! visible lines and, when the back-end supports it, as saved records in a
//! hidden channel. Decoding prefers the hidden channel and falls back to the
//! visible text. Encoding writes both, text first.

use std::sync::Arc;

use chestsign_types::{Profile, ProtectionRecord, ProtectionType, SavedRecord, SignLocation};
use tracing::{debug, trace, warn};

use crate::error::CodecResult;
use crate::header::HeaderMatcher;
use crate::profile::ProfileFactory;
use crate::settings::HeaderSettings;
use crate::surface::{HiddenDataStore, SignSurface, SurfaceResolver};

/// What an encode call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// Text and hidden records were written.
    Written {
        /// Profiles that fit on the visible lines.
        visible_profiles: usize,
        /// Records written to the hidden channel. Always every profile.
        hidden_records: usize,
    },
    /// No sign at the record's location any more; nothing was written.
    SurfaceMissing,
}

/// Reads and writes protection signs.
pub struct SignCodec {
    resolver: Arc<dyn SurfaceResolver>,
    store: Arc<dyn HiddenDataStore>,
    settings: Arc<dyn HeaderSettings>,
    profiles: Arc<dyn ProfileFactory>,
}

impl SignCodec {
    pub fn new(
        resolver: Arc<dyn SurfaceResolver>,
        store: Arc<dyn HiddenDataStore>,
        settings: Arc<dyn HeaderSettings>,
        profiles: Arc<dyn ProfileFactory>,
    ) -> Self {
        Self {
            resolver,
            store,
            settings,
            profiles,
        }
    }

    fn matcher(&self) -> HeaderMatcher<'_> {
        HeaderMatcher::new(self.settings.as_ref())
    }

    /// Protection type named by the sign's header, if any.
    pub fn sign_type(&self, surface: &dyn SignSurface) -> Option<ProtectionType> {
        self.matcher().match_type(surface.line(0).unwrap_or_default())
    }

    pub fn has_valid_header(&self, surface: &dyn SignSurface) -> bool {
        self.sign_type(surface).is_some()
    }

    /// Protection type named by lines a player is about to put on a sign.
    pub fn sign_type_for_edit(&self, lines: &[String]) -> Option<ProtectionType> {
        self.matcher()
            .match_type(lines.first().map(String::as_str).unwrap_or_default())
    }

    /// Parse a sign into a protection record.
    ///
    /// Returns `Ok(None)` when the header names no protection type. Only
    /// failures of the hidden data store are reported as errors.
    pub fn decode(&self, surface: &dyn SignSurface) -> CodecResult<Option<ProtectionRecord>> {
        let location = surface.location();
        match self.store.read_hidden(surface)? {
            Some(records) => {
                debug!(%location, records = records.len(), "decoding sign from hidden data");
                Ok(self.decode_hidden(
                    location,
                    surface.line(0).unwrap_or_default(),
                    &records,
                ))
            }
            None => {
                debug!(%location, "decoding sign from visible text");
                Ok(self.decode_text(location, &surface.lines()))
            }
        }
    }

    fn decode_hidden(
        &self,
        location: SignLocation,
        header: &str,
        records: &[SavedRecord],
    ) -> Option<ProtectionRecord> {
        let Some(protection_type) = self.matcher().match_type(header) else {
            debug!(%location, "hidden data present but header not recognized");
            return None;
        };

        let mut profiles = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match self.profiles.from_saved_record(record) {
                Some(profile) if !profile.display_name().trim().is_empty() => {
                    profiles.push(profile)
                }
                Some(_) => debug!(%location, index, "skipping saved profile with empty name"),
                None => debug!(%location, index, "skipping unreadable saved profile"),
            }
        }

        Some(ProtectionRecord::new(location, protection_type, profiles))
    }

    fn decode_text(&self, location: SignLocation, lines: &[String]) -> Option<ProtectionRecord> {
        let header = lines.first().map(String::as_str).unwrap_or_default();
        let Some(protection_type) = self.matcher().match_type(header) else {
            trace!(%location, "header not recognized");
            return None;
        };

        let profiles: Vec<Profile> = lines
            .iter()
            .skip(1)
            .map(|line| line.trim())
            .filter(|name| !name.is_empty())
            .map(|name| self.profiles.from_display_text(name))
            .collect();

        Some(ProtectionRecord::new(location, protection_type, profiles))
    }

    /// Write a protection record to its sign.
    ///
    /// Line 0 receives the decorated header and each following line one
    /// display name. Profiles that do not fit are left off the visible text
    /// but still go into the hidden channel, and lines past the last profile
    /// are cleared. The text is committed before the hidden records because
    /// a text commit may reset hidden data. If the hidden write then fails
    /// the sign keeps its new text without matching hidden data; the error
    /// is returned and nothing is rolled back.
    pub fn encode(&self, record: &ProtectionRecord) -> CodecResult<EncodeOutcome> {
        let location = &record.location;
        let Some(mut surface) = self.resolver.resolve(location)? else {
            debug!(%location, "no sign to write to");
            return Ok(EncodeOutcome::SurfaceMissing);
        };

        let line_count = surface.line_count();
        if line_count == 0 {
            debug!(%location, "sign has no text lines");
            return Ok(EncodeOutcome::SurfaceMissing);
        }

        surface.set_line(0, &self.settings.fancy_header(record.protection_type))?;

        let mut hidden = Vec::with_capacity(record.profiles.len());
        let mut visible_profiles = 0;
        for (offset, profile) in record.profiles.iter().enumerate() {
            let line = offset + 1;
            if line < line_count {
                trace!(%location, line, name = profile.display_name(), "writing profile");
                surface.set_line(line, profile.display_name())?;
                visible_profiles += 1;
            }
            hidden.push(profile.save_record().clone());
        }
        for line in (visible_profiles + 1)..line_count {
            surface.set_line(line, "")?;
        }

        if visible_profiles < record.profiles.len() {
            debug!(
                %location,
                visible = visible_profiles,
                total = record.profiles.len(),
                "profile list longer than sign, visible text truncated"
            );
        }

        surface.commit_text()?;
        if let Err(e) = self.store.write_hidden(surface.as_mut(), &hidden) {
            warn!(%location, error = %e, "sign text written but hidden profile data was not");
            return Err(e);
        }

        Ok(EncodeOutcome::Written {
            visible_profiles,
            hidden_records: hidden.len(),
        })
    }
}
