//! Integration tests: annotator sheets on disk through to section scores.

use slpa_core::{HandConfig, Transcription, TranscriptionOptions};
use slpa_reliability::reader::{BLOCK_WIDTH, DATA_COLUMNS, METADATA_COLUMNS};
use slpa_reliability::{
    compare_sheets, compare_word, read_sheet, AnnotatorSheet, ReliabilityOptions,
    SectionSelector, SECTIONS,
};

fn transcription(code: &str) -> Transcription {
    Transcription::parse(code, &TranscriptionOptions::unrestricted()).expect("parse code")
}

fn row(word: &str, codes: [&str; 4]) -> String {
    let mut cells = vec![word.to_string(), "1".into(), "2".into(), "3".into(), "4".into()];
    for code in codes {
        let t = transcription(code);
        let mut block: Vec<String> = t.values().map(str::to_string).collect();
        block.resize(BLOCK_WIDTH, String::new());
        cells.extend(block);
    }
    cells.resize(METADATA_COLUMNS + DATA_COLUMNS, String::new());
    cells.join(",")
}

const HOUSE_A: &str = "[V]1[O=EH]2[tp\u{2205}/fd1---]3[1HEE]4[x+2iFF]5[<3EEE]6[=4HEi]7";
const HOUSE_B: &str = "[V]1[O<EH]2[tp\u{2205}/fd1---]3[1HEE]4[x+2iFF]5[<3EEE]6[=4HEF]7";
const EMPTY: &str = "[_]1[____]2[__\u{2205}/______]3[1___]4[_2___]5[_3___]6[_4___]7";

fn write_sheets(dir: &std::path::Path) -> (AnnotatorSheet, AnnotatorSheet) {
    let first = [
        "gloss,a,b,c,d,data".to_string(),
        row("HOUSE", [HOUSE_A, EMPTY, HOUSE_A, EMPTY]),
        row("CAT", [EMPTY, EMPTY, EMPTY, EMPTY]),
    ]
    .join("\n");
    let second = [
        "gloss,a,b,c,d,data".to_string(),
        row("house", [HOUSE_B, EMPTY, HOUSE_A, EMPTY]),
        row("DOG", [EMPTY, EMPTY, EMPTY, EMPTY]),
    ]
    .join("\n");

    let a = dir.join("first.csv");
    let b = dir.join("second.csv");
    std::fs::write(&a, first).expect("write first");
    std::fs::write(&b, second).expect("write second");
    (
        read_sheet(&a).expect("read first"),
        read_sheet(&b).expect("read second"),
    )
}

#[test]
fn sheets_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (first, _) = write_sheets(dir.path());
    assert_eq!(first.len(), 2);
    assert!(first.skipped.is_empty());
    assert_eq!(
        first.transcription("house", HandConfig::Config1Hand1),
        Some(&transcription(HOUSE_A))
    );
}

#[test]
fn self_comparison_is_full_agreement() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (first, _) = write_sheets(dir.path());
    let options = ReliabilityOptions::default();

    for which in HandConfig::ALL {
        let report = compare_word(
            &first,
            &first,
            "HOUSE",
            which,
            SectionSelector::AllSummary,
            &options,
        )
        .expect("compare");
        for score in &report.scores {
            if score.agreement.compared > 0 {
                assert_eq!(score.agreement.percent, Some(100.0), "{}", score.name);
            }
        }
    }
}

#[test]
fn comparison_is_symmetric() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (first, second) = write_sheets(dir.path());
    let options = ReliabilityOptions::default();

    for number in 1..=20 {
        let selector = SectionSelector::from_number(number).expect("section");
        let which = HandConfig::Config1Hand1;
        let ab = compare_word(&first, &second, "house", which, selector, &options)
            .expect("a vs b");
        let ba = compare_word(&second, &first, "HOUSE", which, selector, &options)
            .expect("b vs a");
        assert_eq!(ab.scores, ba.scores, "section {number}");
    }
}

#[test]
fn known_disagreements() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (first, second) = write_sheets(dir.path());
    let options = ReliabilityOptions::default();

    let thumb = SectionSelector::from_number(3).expect("thumb");
    let report = compare_word(&first, &second, "HOUSE", HandConfig::Config1Hand1, thumb, &options)
        .expect("compare");
    // Slot 3 differs (= vs <).
    assert_eq!(report.scores[0].agreement.matched, 3);
    assert_eq!(report.scores[0].agreement.compared, 4);

    let all = SectionSelector::from_number(1).expect("all");
    let report = compare_word(&first, &second, "HOUSE", HandConfig::Config1Hand1, all, &options)
        .expect("compare");
    // 34 slots less the six constants; slots 3 and 34 differ.
    assert_eq!(report.scores[0].agreement.compared, 28);
    assert_eq!(report.scores[0].agreement.matched, 26);
}

#[test]
fn summary_equals_sections_computed_separately() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (first, second) = write_sheets(dir.path());
    let options = ReliabilityOptions::default();

    let summary = compare_word(
        &first,
        &second,
        "HOUSE",
        HandConfig::Config1Hand1,
        SectionSelector::AllSummary,
        &options,
    )
    .expect("summary");
    assert_eq!(summary.scores.len(), SECTIONS.len());

    for (i, score) in summary.scores.iter().enumerate() {
        let single = compare_word(
            &first,
            &second,
            "HOUSE",
            HandConfig::Config1Hand1,
            SectionSelector::from_number(i + 1).expect("section"),
            &options,
        )
        .expect("single");
        assert_eq!(single.scores, vec![*score]);
    }
}

#[test]
fn word_missing_from_one_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (first, second) = write_sheets(dir.path());
    let result = compare_word(
        &first,
        &second,
        "CAT",
        HandConfig::Config1Hand1,
        SectionSelector::AllSummary,
        &ReliabilityOptions::default(),
    );
    assert!(result.is_err());

    let batch = compare_sheets(&first, &second, &ReliabilityOptions::default());
    assert_eq!(batch.entries.len(), 4);
    assert_eq!(batch.skipped, vec!["CAT".to_string(), "DOG".to_string()]);
}
