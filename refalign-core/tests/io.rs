use std::io::Write;

use tempfile::NamedTempFile;

use refalign_core::alphabet;
use refalign_core::io::{read_gene_map, read_reference, FastaError, FastaReader, GffError};
use refalign_core::{Aligner, AlignmentParams, Pipeline, Strand};

mod common;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_reference_takes_first_record() {
    let file = temp_file(">ref one\nacgt-nn\nACGT\n>second\nTTTT\n");
    let (name, seq) = read_reference(file.path()).unwrap();
    assert_eq!(name, "ref one");
    assert_eq!(alphabet::to_string(&seq), "ACGTNNACGT");
}

#[test]
fn test_read_reference_rejects_empty_sequence() {
    let file = temp_file(">empty\n---\n");
    assert!(matches!(read_reference(file.path()), Err(FastaError::EmptyFile)));
}

#[test]
fn test_read_gene_map_from_gff3() {
    let file = temp_file(
        "##gff-version 3\n\
         MN908947\tGenbank\tgene\t266\t21555\t.\t+\t.\tgene_name=ORF1ab\n\
         MN908947\tGenbank\tCDS\t266\t13483\t.\t+\t0\tgene_name=ORF1a\n\
         MN908947\tGenbank\tgene\t21563\t25384\t.\t+\t.\tID=gene-S;Name=S\n",
    );
    let gene_map = read_gene_map(file.path()).unwrap();
    assert_eq!(gene_map.len(), 2);

    let s = &gene_map["S"];
    assert_eq!((s.start, s.end), (21562, 25384));
    assert_eq!(s.strand, Strand::Forward);
    assert_eq!(s.length() % 3, 0);
    assert!(!gene_map.contains_key("ORF1a"));
}

#[test]
fn test_read_gene_map_reports_line_of_duplicate() {
    let file = temp_file(
        "seq\tsrc\tgene\t1\t9\t.\t+\t.\tgene_name=E\n\
         seq\tsrc\tgene\t10\t18\t.\t+\t.\tgene_name=E\n",
    );
    match read_gene_map(file.path()) {
        Err(GffError::DuplicateGene { line, name }) => {
            assert_eq!(line, 2);
            assert_eq!(name, "E");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_fasta_file_through_pipeline() {
    let reference = common::reference();
    let mut content = String::new();
    content.push_str(">same\n");
    content.push_str(&reference);
    content.push_str("\n>same\n");
    content.push_str(&common::mutated_query());
    content.push_str("\n>tiny\nACGT\n");
    let file = temp_file(&content);

    let aligner = Aligner::new(
        alphabet::parse_sequence(&reference),
        Default::default(),
        Vec::new(),
        AlignmentParams::default(),
    );
    let pipeline = Pipeline::new(&aligner, Some(2)).unwrap();

    let mut names = Vec::new();
    let stats = pipeline
        .run(FastaReader::from_path(file.path()).unwrap(), |output| {
            names.push((output.name, output.result.is_ok()));
            Ok::<(), FastaError>(())
        })
        .unwrap();

    assert_eq!(stats.processed, 3);
    assert_eq!(stats.failed, 1);
    assert_eq!(
        names,
        vec![
            ("same".to_string(), true),
            ("same (1)".to_string(), true),
            ("tiny".to_string(), false),
        ]
    );
}
