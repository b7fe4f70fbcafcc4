//! Header recognition.
//!
//! The first line of a sign names its protection type. Players type it by
//! hand, so matching ignores case, surrounding whitespace and formatting
//! codes. Matching is done against the plain header text; the decorated
//! variant is only ever written.

use chestsign_types::ProtectionType;

use crate::settings::HeaderSettings;

/// Character that starts a formatting code on sign text.
pub const FORMAT_CODE_CHAR: char = '\u{00A7}';

fn is_format_code(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r' | 'x')
}

/// Remove formatting codes (`§` followed by a code character) from `text`.
///
/// A `§` that is not followed by a code character is kept as is.
pub fn strip_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == FORMAT_CODE_CHAR {
            if let Some(&next) = chars.peek() {
                if is_format_code(next) {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Canonical form used for header comparison.
pub fn normalize_header(text: &str) -> String {
    strip_color_codes(text).trim().to_lowercase()
}

/// Maps a header line to the protection type it names.
pub struct HeaderMatcher<'a> {
    settings: &'a dyn HeaderSettings,
}

impl<'a> HeaderMatcher<'a> {
    pub fn new(settings: &'a dyn HeaderSettings) -> Self {
        Self { settings }
    }

    /// Protection type named by `line`, or `None` for any other text.
    ///
    /// Headers are looked up on every call so a settings reload takes
    /// effect immediately.
    pub fn match_type(&self, line: &str) -> Option<ProtectionType> {
        let header = normalize_header(line);
        if header.is_empty() {
            return None;
        }
        ProtectionType::ALL
            .into_iter()
            .find(|t| normalize_header(&self.settings.plain_header(*t)) == header)
    }
}
