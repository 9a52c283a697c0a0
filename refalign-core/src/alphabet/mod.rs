//! Sequence alphabets
//!
//! Nucleotide (IUPAC) and amino-acid letters, each with a dedicated gap symbol
//! and a substitution lookup that honors ambiguity codes.

pub mod aminoacid;
pub mod nucleotide;

pub use aminoacid::Aminoacid;
pub use nucleotide::Nucleotide;

use std::fmt;

/// Character outside the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid letter '{0}'")]
pub struct InvalidLetter(pub char);

/// Owned sequence over a closed alphabet.
pub type Sequence<L> = Vec<L>;

/// A letter of a closed alphabet usable by the banded aligner.
pub trait Letter: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Gap sentinel.
    const GAP: Self;

    /// Fallback used when sanitizing input containing an unknown character.
    const UNKNOWN: Self;

    /// Parse a single character, case-insensitively.
    fn from_byte(byte: u8) -> Option<Self>;

    /// Canonical upper-case character.
    fn to_byte(self) -> u8;

    /// Substitution lookup; a positive value means the letters are compatible.
    fn lookup(self, other: Self) -> i32;

    fn is_gap(self) -> bool {
        self == Self::GAP
    }

    fn to_char(self) -> char {
        self.to_byte() as char
    }
}

/// Sanitize and parse raw text into a sequence.
///
/// Whitespace is dropped, letters are upper-cased and anything outside the
/// alphabet becomes [`Letter::UNKNOWN`].
pub fn parse_sequence<L: Letter>(raw: &str) -> Sequence<L> {
    parse_bytes(raw.as_bytes())
}

pub fn parse_bytes<L: Letter>(raw: &[u8]) -> Sequence<L> {
    let mut unknown = 0usize;
    let seq = raw
        .iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|&b| {
            L::from_byte(b).unwrap_or_else(|| {
                unknown += 1;
                L::UNKNOWN
            })
        })
        .collect();

    if unknown > 0 {
        log::warn!(
            "Replaced {} unrecognized character(s) with '{}'",
            unknown,
            L::UNKNOWN.to_char()
        );
    }
    seq
}

/// Render a sequence back into text.
pub fn to_string<L: Letter>(seq: &[L]) -> String {
    seq.iter().map(|l| l.to_char()).collect()
}

/// Copy of `seq` without gap letters.
pub fn remove_gaps<L: Letter>(seq: &[L]) -> Sequence<L> {
    seq.iter().copied().filter(|l| !l.is_gap()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sanitizes_input() {
        let seq: Sequence<Nucleotide> = parse_sequence("ac gt\nn-x");
        assert_eq!(to_string(&seq), "ACGTN-N");
    }

    #[test]
    fn test_remove_gaps() {
        let seq: Sequence<Nucleotide> = parse_sequence("A--CG-T");
        assert_eq!(to_string(&remove_gaps(&seq)), "ACGT");
    }

    #[test]
    fn test_aminoacid_fallback_is_x() {
        let seq: Sequence<Aminoacid> = parse_sequence("MK1*");
        assert_eq!(to_string(&seq), "MKX*");
    }
}
