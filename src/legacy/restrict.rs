//! The 16-bit user restriction mask and its fixed-order display codec.
//!
//! WWIV stores restrictions as one bit per position and shows them as a
//! 16-character ruler, one designated letter per position. The stock tables
//! leave the five user-defined positions blank on screen, which makes the
//! string ambiguous; here they display as the digits `1`-`5` (the labels
//! sysop documentation uses for them), so every position has a globally
//! unique letter and the display string converts back to the exact mask.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller may not log on.
pub const RESTRICT_LOGON: u16 = 0x0001;
/// Caller may not page the sysop for chat.
pub const RESTRICT_CHAT: u16 = 0x0002;
/// Caller's mail and posts go to the unvalidated queue.
pub const RESTRICT_VALIDATE: u16 = 0x0004;
/// Caller may not write the auto-message.
pub const RESTRICT_AUTOMESSAGE: u16 = 0x0008;
/// Caller may not post or mail anonymously.
pub const RESTRICT_ANONY: u16 = 0x0010;
/// Caller may not post.
pub const RESTRICT_POST: u16 = 0x0020;
/// Caller may not send email.
pub const RESTRICT_EMAIL: u16 = 0x0040;
/// Caller may not vote.
pub const RESTRICT_VOTE: u16 = 0x0080;
/// Caller may not use inter-system chat.
pub const RESTRICT_IICHAT: u16 = 0x0100;
/// Caller may not send network mail or posts.
pub const RESTRICT_NET: u16 = 0x0200;
/// Caller's uploads go to the sysop directory.
pub const RESTRICT_UPLOAD: u16 = 0x0400;

/// Display letter for each bit position, least significant first.
pub const RESTRICT_LETTERS: [char; 16] = [
    'L', 'C', 'M', 'A', '*', 'P', 'E', 'V', 'K', 'N', 'U', '1', '2', '3', '4', '5',
];

/// A user restriction set. The 16-bit mask is the authoritative value; the
/// boolean and display forms are derived views of it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestrictionFlags {
    mask: u16,
}

impl RestrictionFlags {
    /// Wraps a raw mask, as stored in a record field.
    pub const fn from_mask(mask: u16) -> Self {
        Self { mask }
    }

    /// The raw mask, ready to store back into a record field.
    pub const fn mask(self) -> u16 {
        self.mask
    }

    /// Whether the given bit (one of the `RESTRICT_*` constants) is set.
    pub const fn is_set(self, bit: u16) -> bool {
        self.mask & bit != 0
    }

    /// Flips the given bit, as the user editor does on a keypress.
    pub fn toggle(&mut self, bit: u16) {
        self.mask ^= bit;
    }

    /// Expands the mask into one boolean per position, bit 0 first.
    pub fn flags(self) -> [bool; 16] {
        let mut flags = [false; 16];
        for (i, flag) in flags.iter_mut().enumerate() {
            *flag = self.mask & (1 << i) != 0;
        }
        flags
    }

    /// Collapses per-position booleans back into a mask. Inverse of
    /// [`flags`](Self::flags) for every possible mask.
    pub fn from_flags(flags: [bool; 16]) -> Self {
        let mut mask = 0u16;
        for (i, &flag) in flags.iter().enumerate() {
            if flag {
                mask |= 1 << i;
            }
        }
        Self { mask }
    }

    /// Builds a mask from the letters present in `text`, case-insensitive.
    /// Characters that are not a designated letter are ignored, so parsing
    /// a rendered display string recovers the exact mask.
    pub fn parse(text: &str) -> Self {
        let mut mask = 0u16;
        for ch in text.chars() {
            let up = ch.to_ascii_uppercase();
            if let Some(i) = RESTRICT_LETTERS.iter().position(|&l| l == up) {
                mask |= 1 << i;
            }
        }
        Self { mask }
    }
}

impl fmt::Display for RestrictionFlags {
    /// Renders the fixed 16-character ruler: the designated letter where a
    /// bit is set, a space where it is clear.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = RESTRICT_LETTERS
            .iter()
            .enumerate()
            .map(|(i, &letter)| if self.mask & (1 << i) != 0 { letter } else { ' ' })
            .collect();
        f.write_str(&s)
    }
}
