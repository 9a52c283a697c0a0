//! Shared fixtures for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use refalign_core::{Gene, GeneMap};

/// Seeded random nucleotide sequence, stable for a given `seed`.
pub fn random_sequence(len: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)] as char).collect()
}

/// 480 nt reference with two genes, `gA` (30..330) and `gB` (360..450).
pub fn reference() -> String {
    random_sequence(480, 7)
}

pub fn gene_map() -> GeneMap {
    let mut gene_map = GeneMap::new();
    gene_map.insert("gA".to_string(), Gene::new("gA", 30, 330));
    gene_map.insert("gB".to_string(), Gene::new("gB", 360, 450));
    gene_map
}

/// Reference variant with three substitutions, a 3 nt deletion at 151, a
/// `GGA` insertion and both ends trimmed (10 nt left, 12 nt right).
pub fn mutated_query() -> String {
    let mut query: Vec<u8> = reference().into_bytes();
    for pos in [50, 120, 400] {
        query[pos] = match query[pos] {
            b'A' => b'C',
            b'C' => b'G',
            b'G' => b'T',
            _ => b'A',
        };
    }
    query.drain(151..154);
    query.splice(247..247, b"GGA".iter().copied());
    let end = query.len() - 12;
    String::from_utf8_lossy(&query[10..end]).into_owned()
}
