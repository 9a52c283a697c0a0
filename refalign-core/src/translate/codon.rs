//! Standard genetic code

use crate::alphabet::{Aminoacid, Nucleotide, Sequence};

/// Amino acids of the standard code, indexed by codon with bases ordered T, C, A, G.
const STANDARD_CODE: &[u8; 64] = b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

fn base_index(nuc: Nucleotide) -> Option<usize> {
    match nuc {
        Nucleotide::T => Some(0),
        Nucleotide::C => Some(1),
        Nucleotide::A => Some(2),
        Nucleotide::G => Some(3),
        _ => None,
    }
}

/// Decode one codon. `---` is a gap; anything not made of A, C, G, T is `X`.
pub fn decode(codon: &[Nucleotide]) -> Aminoacid {
    if codon.iter().all(|&nuc| nuc == Nucleotide::Gap) {
        return Aminoacid::Gap;
    }

    let index = codon
        .iter()
        .try_fold(0usize, |acc, &nuc| base_index(nuc).map(|base| acc * 4 + base));

    match index {
        Some(index) if codon.len() == 3 => {
            let letter = STANDARD_CODE[index];
            Aminoacid::try_from(letter as char).unwrap_or(Aminoacid::X)
        }
        _ => Aminoacid::X,
    }
}

/// Translate consecutive, non-overlapping codons.
///
/// Trailing bases that do not fill a codon are ignored; callers check the
/// length beforehand.
pub fn translate(seq: &[Nucleotide]) -> Sequence<Aminoacid> {
    debug_assert_eq!(seq.len() % 3, 0);
    seq.chunks_exact(3).map(decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{parse_sequence, to_string};

    fn nuc(s: &str) -> Sequence<Nucleotide> {
        parse_sequence(s)
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(&nuc("ATG")), Aminoacid::M);
        assert_eq!(decode(&nuc("TAA")), Aminoacid::Stop);
        assert_eq!(decode(&nuc("GGG")), Aminoacid::G);
        assert_eq!(decode(&nuc("---")), Aminoacid::Gap);
        assert_eq!(decode(&nuc("AT-")), Aminoacid::X);
        assert_eq!(decode(&nuc("ANG")), Aminoacid::X);
    }

    #[test]
    fn test_translate() {
        let peptide = translate(&nuc("ACGAGGGCGAATTCGCTCGCTACAGAA"));
        assert_eq!(to_string(&peptide), "TRANSLATE");
    }

    #[test]
    fn test_translate_with_gaps_and_partial_codons() {
        assert_eq!(to_string(&translate(&nuc("ACGAGG---AATTCGCTCGCTACAGAA"))), "TR-NSLATE");
        assert_eq!(to_string(&translate(&nuc("ACGAGGGC--TTTCGCTCGCTACAGAA"))), "TRXXSLATE");
    }
}
