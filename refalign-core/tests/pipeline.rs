mod common;

use std::convert::Infallible;

use proptest::prelude::*;

use common::{gene_map, mutated_query, random_sequence, reference};
use refalign_core::alphabet::{parse_sequence, to_string};
use refalign_core::translate::{extract_gene, map_coordinates, translate};
use refalign_core::{
    strip_insertions, AlgorithmInput, AlgorithmOutput, AlignError, Aligner, AlignmentParams, AlignmentResult, Gene,
    GeneMap, Insertion, Nucleotide, Pipeline,
};

fn aligner(genes: &[&str]) -> Aligner {
    Aligner::new(
        parse_sequence(&reference()),
        gene_map(),
        genes.iter().map(|gene| gene.to_string()),
        AlignmentParams::default(),
    )
}

fn gap_columns(seq: &str) -> Vec<usize> {
    seq.char_indices().filter(|(_, c)| *c == '-').map(|(i, _)| i).collect()
}

#[test]
fn test_nucleotide_only_alignment() {
    let output = aligner(&[]).align_raw(&mutated_query()).unwrap();

    assert_eq!(output.score, 1341);
    assert_eq!(
        output.insertions,
        vec![Insertion {
            begin: 250,
            end: 253,
            seq: "GGA".to_string()
        }]
    );
    assert!(output.peptides.is_empty());

    let query = output.query_string();
    assert_eq!(query.len(), 480);
    let expected_gaps: Vec<usize> = (0..10).chain(151..154).chain(468..480).collect();
    assert_eq!(gap_columns(&query), expected_gaps);
}

#[test]
fn test_codon_aware_alignment_with_genes() {
    let output = aligner(&["gB", "gA"]).align_raw(&mutated_query()).unwrap();

    assert_eq!(output.score, 1337);
    assert_eq!(
        output.insertions,
        vec![Insertion {
            begin: 249,
            end: 252,
            seq: "CGG".to_string()
        }]
    );

    let query = output.query_string();
    assert_eq!(query.len(), 480);
    let expected_gaps: Vec<usize> = (0..10).chain(150..153).chain(468..480).collect();
    assert_eq!(gap_columns(&query), expected_gaps);

    let names: Vec<_> = output.peptides.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["gA", "gB"]);

    let gene_a = &output.peptides[0];
    assert_eq!(
        gene_a.reference_string(),
        "HISNTNNVMLSCPEG*PTRGLIVMCMEPIILIVQIRRSARKGILCLQSVRDNVLPLCLLTTYMRRRRWVY*LF-PPKV*GLGRI*SLAV*LAIFHIGEQYA"
    );
    assert_eq!(
        gene_a.query_string(),
        "HISNTNKVMLSCPEG*PTRGLIVMCMEPIIIIVQIRRSAR-RILCLQSVRDNVLPLCLLTTYMRRRRWVY*LFRTPKV*GLGRI*SLAV*LAIFHIGEQYA"
    );

    let gene_b = &output.peptides[1];
    assert_eq!(gene_b.reference_string(), "RQTELGVA*HPMGEGPSHRIQCQYLGATT*");
    assert_eq!(gene_b.query_string(), "RQTELGVA*HPMGAGPSHRIQCQYLGATT*");
}

#[test]
fn test_unknown_gene_fails_the_query() {
    let err = aligner(&["gA", "missing"]).align_raw(&mutated_query()).unwrap_err();
    assert_eq!(err, AlignError::gene_not_found("missing"));
}

fn pipeline_inputs() -> Vec<AlgorithmInput> {
    let reference = reference();
    let sequences = vec![
        ("full", reference.clone()),
        ("mutated", mutated_query()),
        ("short", "ACGTACGT".to_string()),
        ("slice", reference[20..400].to_string()),
        ("unrelated", random_sequence(300, 11)),
        ("trimmed", reference[5..470].to_string()),
    ];

    sequences
        .into_iter()
        .enumerate()
        .map(|(index, (name, seq))| AlgorithmInput {
            index,
            name: name.to_string(),
            seq,
        })
        .collect()
}

fn run_pipeline(aligner: &Aligner, jobs: i64, inputs: Vec<AlgorithmInput>) -> Vec<AlgorithmOutput> {
    let pipeline = Pipeline::new(aligner, Some(jobs)).unwrap();
    let mut outputs = Vec::new();
    let stats = pipeline
        .run(inputs.into_iter().map(Ok::<_, Infallible>), |output| {
            outputs.push(output);
            Ok(())
        })
        .unwrap();
    assert_eq!(stats.processed, outputs.len());
    outputs
}

#[test]
fn test_pipeline_preserves_input_order_and_isolates_failures() {
    let aligner = aligner(&[]);
    let outputs = run_pipeline(&aligner, 4, pipeline_inputs());

    let indices: Vec<_> = outputs.iter().map(|output| output.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);

    let failed: Vec<_> = outputs
        .iter()
        .filter(|output| output.result.is_err())
        .map(|output| output.name.as_str())
        .collect();
    assert_eq!(failed, vec!["short", "unrelated"]);
    assert!(matches!(outputs[2].result, Err(AlignError::SequenceTooShort { .. })));
    assert_eq!(outputs[4].result, Err(AlignError::NoSeedMatches));

    let scores: Vec<_> = outputs
        .iter()
        .filter_map(|output| output.result.as_ref().ok())
        .map(|result| result.score)
        .collect();
    assert_eq!(scores, vec![1440, 1341, 1140, 1395]);
}

#[test]
fn test_pipeline_matches_serial_alignment() {
    let aligner = aligner(&["gA", "gB"]);
    let inputs: Vec<AlgorithmInput> = (0..24)
        .flat_map(|_| pipeline_inputs())
        .enumerate()
        .map(|(index, input)| AlgorithmInput { index, ..input })
        .collect();

    let serial: Vec<_> = inputs.iter().map(|input| aligner.align_input(input.clone())).collect();
    let parallel = run_pipeline(&aligner, 3, inputs);

    assert_eq!(parallel, serial);
}

#[test]
fn test_pipeline_stops_on_consumer_error() {
    let aligner = aligner(&[]);
    let pipeline = Pipeline::new(&aligner, Some(2)).unwrap();
    let inputs: Vec<AlgorithmInput> = (0..40)
        .flat_map(|_| pipeline_inputs())
        .enumerate()
        .map(|(index, input)| AlgorithmInput { index, ..input })
        .collect();

    let mut seen = 0;
    let result = pipeline.run(inputs.into_iter().map(Ok), |_| {
        seen += 1;
        if seen == 3 {
            Err("disk full")
        } else {
            Ok(())
        }
    });
    assert_eq!(result, Err("disk full"));
    assert_eq!(seen, 3);
}

#[test]
fn test_pipeline_reports_input_error() {
    let aligner = aligner(&[]);
    let pipeline = Pipeline::new(&aligner, Some(2)).unwrap();
    let mut inputs: Vec<Result<AlgorithmInput, String>> = pipeline_inputs().into_iter().map(Ok).collect();
    inputs.insert(2, Err("truncated record".to_string()));

    let mut emitted = Vec::new();
    let result = pipeline.run(inputs, |output| {
        emitted.push(output.index);
        Ok(())
    });
    assert_eq!(result, Err("truncated record".to_string()));
    assert_eq!(emitted, vec![0, 1]);
}

fn nucleotide_column() -> impl Strategy<Value = (char, char)> {
    prop_oneof![
        (prop::sample::select(vec!['A', 'C', 'G', 'T']), prop::sample::select(vec!['A', 'C', 'G', 'T', '-'])),
        (Just('-'), prop::sample::select(vec!['A', 'C', 'G', 'T'])),
    ]
}

proptest! {
    #[test]
    fn prop_reinserting_insertions_restores_query(columns in prop::collection::vec(nucleotide_column(), 0..120)) {
        let aligned_ref: String = columns.iter().map(|(r, _)| *r).collect();
        let aligned_query: String = columns.iter().map(|(_, q)| *q).collect();

        let stripped = strip_insertions::<Nucleotide>(&parse_sequence(&aligned_ref), &parse_sequence(&aligned_query));
        let ref_letters = aligned_ref.chars().filter(|c| *c != '-').count();
        prop_assert_eq!(stripped.query.len(), ref_letters);

        let mut restored = to_string(&stripped.query);
        for insertion in &stripped.insertions {
            restored.insert_str(insertion.begin, &insertion.seq);
        }
        prop_assert_eq!(restored, aligned_query);
    }

    #[test]
    fn prop_gap_free_gene_translates_to_full_peptide(seq in "[ACGT]{60,150}", start in 0usize..20, codons in 1usize..13) {
        let end = start + 3 * codons;
        let alignment = AlignmentResult {
            query: parse_sequence::<Nucleotide>(&seq),
            reference: parse_sequence::<Nucleotide>(&seq),
            score: 0,
        };
        let coord_map = map_coordinates(&alignment.reference);
        let gene = Gene::new("g", start, end);

        let extracted = extract_gene(&gene, &coord_map, &alignment).unwrap();
        prop_assert_eq!(translate(&extracted.reference).len(), gene.length() / 3);
        prop_assert_eq!(translate(&extracted.query).len(), codons);
    }
}

#[test]
fn test_gene_map_is_not_consulted_without_genes() {
    let aligner = Aligner::new(parse_sequence(&reference()), GeneMap::new(), Vec::new(), AlignmentParams::default());
    assert!(aligner.align_raw(&mutated_query()).is_ok());
}
