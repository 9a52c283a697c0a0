//! IUPAC nucleotide alphabet

use serde::{Deserialize, Serialize};

use super::{InvalidLetter, Letter};

/// IUPAC nucleotide code.
///
/// Apart from `U`, the discriminant doubles as a base set bitmask
/// (T=1, A=2, C=4, G=8), so compatibility is a non-empty intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
#[repr(u8)]
pub enum Nucleotide {
    U = 0,
    T = 1,
    A = 2,
    W = 3,
    C = 4,
    Y = 5,
    M = 6,
    H = 7,
    G = 8,
    K = 9,
    R = 10,
    D = 11,
    S = 12,
    B = 13,
    V = 14,
    N = 15,
    Gap = 16,
}

impl Nucleotide {
    fn mask(self) -> u8 {
        match self {
            Nucleotide::U | Nucleotide::Gap => 0,
            other => other as u8,
        }
    }
}

impl Letter for Nucleotide {
    const GAP: Self = Nucleotide::Gap;
    const UNKNOWN: Self = Nucleotide::N;

    fn from_byte(byte: u8) -> Option<Self> {
        use Nucleotide::*;
        let nuc = match byte.to_ascii_uppercase() {
            b'U' => U,
            b'T' => T,
            b'A' => A,
            b'W' => W,
            b'C' => C,
            b'Y' => Y,
            b'M' => M,
            b'H' => H,
            b'G' => G,
            b'K' => K,
            b'R' => R,
            b'D' => D,
            b'S' => S,
            b'B' => B,
            b'V' => V,
            b'N' => N,
            b'-' => Gap,
            _ => return None,
        };
        Some(nuc)
    }

    fn to_byte(self) -> u8 {
        b"UTAWCYMHGKRDSBVN-"[self as usize]
    }

    fn lookup(self, other: Self) -> i32 {
        if self == Nucleotide::Gap || other == Nucleotide::Gap {
            return 0;
        }
        let compatible = match (self, other) {
            (Nucleotide::U, x) | (x, Nucleotide::U) => {
                x == Nucleotide::U || x == Nucleotide::N
            }
            (x, y) => x.mask() & y.mask() != 0,
        };
        i32::from(compatible)
    }
}

impl From<Nucleotide> for char {
    fn from(nuc: Nucleotide) -> Self {
        nuc.to_char()
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = InvalidLetter;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .ok()
            .and_then(Nucleotide::from_byte)
            .ok_or(InvalidLetter(c))
    }
}
