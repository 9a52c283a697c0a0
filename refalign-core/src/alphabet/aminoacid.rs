//! Extended amino-acid alphabet

use serde::{Deserialize, Serialize};

use super::{InvalidLetter, Letter};

/// Amino-acid code including ambiguity letters, stop (`*`) and gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
#[repr(u8)]
pub enum Aminoacid {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    Y,
    Z,
    X,
    Stop,
    Gap,
}

const LETTERS: &[u8; 28] = b"ABCDEFGHIJKLMNOPQRSTUVWYZX*-";

const ALL: [Aminoacid; 28] = {
    use Aminoacid::*;
    [
        A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, Y, Z, X, Stop, Gap,
    ]
};

/// Ambiguity letter and the residues it stands for.
fn ambiguity_group(aa: Aminoacid) -> &'static [Aminoacid] {
    use Aminoacid::*;
    match aa {
        B => &[D, N],
        J => &[I, L],
        Z => &[E, Q],
        _ => &[],
    }
}

impl Letter for Aminoacid {
    const GAP: Self = Aminoacid::Gap;
    const UNKNOWN: Self = Aminoacid::X;

    fn from_byte(byte: u8) -> Option<Self> {
        let upper = byte.to_ascii_uppercase();
        LETTERS
            .iter()
            .position(|&l| l == upper)
            .map(|index| ALL[index])
    }

    fn to_byte(self) -> u8 {
        LETTERS[self as usize]
    }

    fn lookup(self, other: Self) -> i32 {
        if self == Aminoacid::Gap || other == Aminoacid::Gap {
            return 0;
        }
        let compatible = self == other
            || self == Aminoacid::X
            || other == Aminoacid::X
            || ambiguity_group(self).contains(&other)
            || ambiguity_group(other).contains(&self);
        i32::from(compatible)
    }
}

impl From<Aminoacid> for char {
    fn from(aa: Aminoacid) -> Self {
        aa.to_char()
    }
}

impl TryFrom<char> for Aminoacid {
    type Error = InvalidLetter;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .ok()
            .and_then(Aminoacid::from_byte)
            .ok_or(InvalidLetter(c))
    }
}
