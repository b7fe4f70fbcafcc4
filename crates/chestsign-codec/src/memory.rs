//! In-memory world for tests and tooling.
//!
//! Holds signs and their hidden records in a map keyed by location and
//! journals every collaborator call so tests can assert on call order.
//! Back-ends where a text commit wipes hidden data can be emulated with
//! [`InMemoryWorld::clearing_hidden_on_commit`], and commit or hidden-write
//! failures can be injected.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chestsign_types::{SavedRecord, SignLocation};

use crate::error::{CodecError, CodecResult};
use crate::surface::{HiddenDataStore, SignSurface, SurfaceResolver};

/// Line count of a standard sign.
pub const SIGN_LINES: usize = 4;

/// A collaborator call observed by the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldCall {
    Resolve(SignLocation),
    ReadHidden(SignLocation),
    CommitText(SignLocation),
    WriteHidden { location: SignLocation, records: usize },
}

#[derive(Clone, Debug)]
struct StoredSign {
    lines: Vec<String>,
    hidden: Option<Vec<SavedRecord>>,
}

/// Signs and hidden data kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryWorld {
    signs: Mutex<HashMap<SignLocation, StoredSign>>,
    journal: Mutex<Vec<WorldCall>>,
    clear_hidden_on_commit: bool,
    fail_commit: AtomicBool,
    fail_hidden_write: AtomicBool,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every text commit drop the sign's hidden data.
    pub fn clearing_hidden_on_commit(mut self) -> Self {
        self.clear_hidden_on_commit = true;
        self
    }

    fn signs(&self) -> CodecResult<MutexGuard<'_, HashMap<SignLocation, StoredSign>>> {
        self.signs.lock().map_err(|_| CodecError::LockPoisoned)
    }

    fn record(&self, call: WorldCall) -> CodecResult<()> {
        self.journal
            .lock()
            .map_err(|_| CodecError::LockPoisoned)?
            .push(call);
        Ok(())
    }

    /// Place a standard four-line sign. Missing lines are blank, extra lines
    /// are dropped. Replaces any sign and hidden data at `location`.
    pub fn place_sign(&self, location: SignLocation, lines: &[&str]) -> CodecResult<()> {
        self.place_surface(location, SIGN_LINES, lines)
    }

    /// Place a sign with `capacity` lines.
    pub fn place_surface(
        &self,
        location: SignLocation,
        capacity: usize,
        lines: &[&str],
    ) -> CodecResult<()> {
        let mut stored: Vec<String> = lines
            .iter()
            .take(capacity)
            .map(|l| l.to_string())
            .collect();
        stored.resize(capacity, String::new());
        self.signs()?.insert(
            location,
            StoredSign {
                lines: stored,
                hidden: None,
            },
        );
        Ok(())
    }

    /// Remove the sign at `location`, as if the block was broken.
    pub fn remove_sign(&self, location: &SignLocation) -> CodecResult<()> {
        self.signs()?.remove(location);
        Ok(())
    }

    /// Overwrite the hidden data of an existing sign.
    pub fn set_hidden(
        &self,
        location: &SignLocation,
        hidden: Option<Vec<SavedRecord>>,
    ) -> CodecResult<()> {
        let mut signs = self.signs()?;
        let sign = signs
            .get_mut(location)
            .ok_or_else(|| CodecError::HiddenStore(format!("no sign at {}", location)))?;
        sign.hidden = hidden;
        Ok(())
    }

    /// Committed lines of the sign at `location`.
    pub fn lines(&self, location: &SignLocation) -> CodecResult<Option<Vec<String>>> {
        Ok(self.signs()?.get(location).map(|s| s.lines.clone()))
    }

    /// Hidden data of the sign at `location`.
    pub fn hidden(&self, location: &SignLocation) -> CodecResult<Option<Vec<SavedRecord>>> {
        Ok(self.signs()?.get(location).and_then(|s| s.hidden.clone()))
    }

    /// A detached view of the sign at `location`, without journaling a
    /// resolve call.
    pub fn surface(&self, location: &SignLocation) -> CodecResult<Option<MemorySign<'_>>> {
        Ok(self.signs()?.get(location).map(|s| MemorySign {
            world: self,
            location: location.clone(),
            lines: s.lines.clone(),
        }))
    }

    /// Every call recorded so far, oldest first.
    pub fn journal(&self) -> CodecResult<Vec<WorldCall>> {
        Ok(self
            .journal
            .lock()
            .map_err(|_| CodecError::LockPoisoned)?
            .clone())
    }

    pub fn clear_journal(&self) -> CodecResult<()> {
        self.journal
            .lock()
            .map_err(|_| CodecError::LockPoisoned)?
            .clear();
        Ok(())
    }

    pub fn set_fail_commit(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_hidden_write(&self, fail: bool) {
        self.fail_hidden_write.store(fail, Ordering::SeqCst);
    }

    fn commit_lines(&self, location: &SignLocation, lines: &[String]) -> CodecResult<()> {
        self.record(WorldCall::CommitText(location.clone()))?;
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(CodecError::Surface {
                location: location.clone(),
                message: "text commit rejected".into(),
            });
        }

        let mut signs = self.signs()?;
        let sign = signs.get_mut(location).ok_or_else(|| CodecError::Surface {
            location: location.clone(),
            message: "sign no longer present".into(),
        })?;
        sign.lines = lines.to_vec();
        if self.clear_hidden_on_commit {
            sign.hidden = None;
        }
        Ok(())
    }
}

/// Pending view of one in-memory sign. Edits stay local until committed.
#[derive(Debug)]
pub struct MemorySign<'w> {
    world: &'w InMemoryWorld,
    location: SignLocation,
    lines: Vec<String>,
}

impl SignSurface for MemorySign<'_> {
    fn location(&self) -> SignLocation {
        self.location.clone()
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn set_line(&mut self, index: usize, text: &str) -> CodecResult<()> {
        let line = self.lines.get_mut(index).ok_or_else(|| CodecError::Surface {
            location: self.location.clone(),
            message: format!("line {} out of range", index),
        })?;
        *line = text.to_string();
        Ok(())
    }

    fn commit_text(&mut self) -> CodecResult<()> {
        self.world.commit_lines(&self.location, &self.lines)
    }
}

impl SurfaceResolver for InMemoryWorld {
    fn resolve(&self, location: &SignLocation) -> CodecResult<Option<Box<dyn SignSurface + '_>>> {
        self.record(WorldCall::Resolve(location.clone()))?;
        Ok(self
            .surface(location)?
            .map(|s| Box::new(s) as Box<dyn SignSurface + '_>))
    }
}

impl HiddenDataStore for InMemoryWorld {
    fn read_hidden(&self, surface: &dyn SignSurface) -> CodecResult<Option<Vec<SavedRecord>>> {
        let location = surface.location();
        self.record(WorldCall::ReadHidden(location.clone()))?;
        self.hidden(&location)
    }

    fn write_hidden(
        &self,
        surface: &mut dyn SignSurface,
        records: &[SavedRecord],
    ) -> CodecResult<()> {
        let location = surface.location();
        self.record(WorldCall::WriteHidden {
            location: location.clone(),
            records: records.len(),
        })?;
        if self.fail_hidden_write.load(Ordering::SeqCst) {
            return Err(CodecError::HiddenStore("hidden write rejected".into()));
        }
        self.set_hidden(&location, Some(records.to_vec()))
    }
}
