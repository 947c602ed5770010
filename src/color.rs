//! Deterministic display colours for users.

use std::fmt;

use serde::{Serialize, Serializer};

/// A 24-bit RGB colour, shown as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub fn rgb(&self) -> u32 {
        self.0
    }

    /// Six uppercase hex digits without the leading `#`.
    pub fn hex(&self) -> String {
        format!("{:06X}", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Colour for a user handle.
///
/// `hash = unit + (hash << 5) - hash` over UTF-16 code units with 32-bit
/// signed wraparound, keeping the low 24 bits.
pub fn color_for(handle: &str) -> Color {
    let hash = handle.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    Color((hash as u32) & 0x00FF_FFFF)
}
