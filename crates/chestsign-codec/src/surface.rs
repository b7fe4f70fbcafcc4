//! World-facing collaborators: the sign text surface, the hidden metadata
//! store attached to it, and the lookup of a sign by location.
//!
//! The codec never owns or creates any of these. It borrows them for one
//! call and assumes nobody else touches the same sign meanwhile.

use chestsign_types::{SavedRecord, SignLocation};

use crate::error::CodecResult;

/// A sign's visible text: a fixed number of short lines.
pub trait SignSurface {
    /// Where this sign lives.
    fn location(&self) -> SignLocation;

    /// Number of text lines, header included.
    fn line_count(&self) -> usize;

    /// Text of line `index`, or `None` past the last line.
    fn line(&self, index: usize) -> Option<&str>;

    /// Replace line `index`. Nothing is visible until [`commit_text`](Self::commit_text).
    fn set_line(&mut self, index: usize, text: &str) -> CodecResult<()>;

    /// Push the pending lines to the world.
    ///
    /// On some back-ends this also wipes the hidden metadata.
    fn commit_text(&mut self) -> CodecResult<()>;

    /// All lines in order.
    fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .map(|i| self.line(i).unwrap_or_default().to_string())
            .collect()
    }
}

/// Out-of-band structured data stored alongside a sign.
pub trait HiddenDataStore: Send + Sync {
    /// Saved profile records attached to `surface`, or `None` if the sign
    /// carries no hidden data.
    fn read_hidden(&self, surface: &dyn SignSurface) -> CodecResult<Option<Vec<SavedRecord>>>;

    /// Attach `records` to `surface`, replacing whatever was there.
    fn write_hidden(&self, surface: &mut dyn SignSurface, records: &[SavedRecord])
        -> CodecResult<()>;
}

/// Finds the live sign at a location.
pub trait SurfaceResolver: Send + Sync {
    /// The sign at `location`, or `None` when that block no longer holds a
    /// sign.
    fn resolve(&self, location: &SignLocation) -> CodecResult<Option<Box<dyn SignSurface + '_>>>;
}
