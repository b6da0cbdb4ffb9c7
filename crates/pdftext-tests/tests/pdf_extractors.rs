use pdftext_core::extraction::{ExtractionAttempt, ExtractionStage, TextExtractor};
use pdftext_extraction::{resolve_text, LayoutExtractor, LopdfExtractor};
use pdftext_tests::build_pdf;

#[test]
fn layout_extractor_joins_pages_in_order() {
    let pdf = build_pdf(&["Alpha page text", "", "Bravo page text"]);

    let text = match LayoutExtractor.extract(&pdf) {
        ExtractionAttempt::Text(text) => text,
        other => panic!("expected text, got {other:?}"),
    };

    let alpha = text.find("Alpha").expect("first page");
    let bravo = text.find("Bravo").expect("third page");
    assert!(alpha < bravo, "pages out of order: {text:?}");
    assert_eq!(text, text.trim());
    assert!(!text.contains("\n\n\n"), "blank page left a gap: {text:?}");
}

#[test]
fn lopdf_reads_every_page_in_order() {
    let pdf = build_pdf(&["Alpha page text", "Bravo page text", "Charlie page text"]);

    let text = match LopdfExtractor.extract(&pdf) {
        ExtractionAttempt::Text(text) => text,
        other => panic!("expected text, got {other:?}"),
    };

    let alpha = text.find("Alpha").expect("first page");
    let bravo = text.find("Bravo").expect("second page");
    let charlie = text.find("Charlie").expect("third page");
    assert!(alpha < bravo && bravo < charlie, "pages out of order: {text:?}");
    assert_eq!(text, text.trim());
}

#[test]
fn lopdf_ignores_pages_without_text() {
    let pdf = build_pdf(&["", "Only this page has words", ""]);

    let attempt = LopdfExtractor.extract(&pdf);

    let text = attempt.text().expect("text from the middle page");
    assert!(text.contains("Only this page has words"));
    assert_eq!(text, text.trim());
}

#[test]
fn document_without_any_text_is_empty_for_lopdf() {
    let pdf = build_pdf(&["", ""]);
    assert_eq!(LopdfExtractor.extract(&pdf), ExtractionAttempt::Empty);
}

#[test]
fn two_stage_extraction_recovers_text() {
    let pdf = build_pdf(&["Minutes of the annual general meeting"]);

    let (attempt, stage) = resolve_text(&LayoutExtractor, &LopdfExtractor, &pdf, 10);

    assert_eq!(stage, ExtractionStage::Primary, "primary yielded {attempt:?}");
    assert!(attempt.meets(10), "no usable text: {attempt:?}");
    assert!(attempt.text().unwrap_or_default().contains("annual"));
}

#[test]
fn garbage_fails_both_extractors() {
    let junk: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();

    assert!(matches!(LayoutExtractor.extract(&junk), ExtractionAttempt::Failed(_)));
    assert!(matches!(LopdfExtractor.extract(&junk), ExtractionAttempt::Failed(_)));

    let (attempt, _) = resolve_text(&LayoutExtractor, &LopdfExtractor, &junk, 10);
    assert!(!attempt.meets(10));
    assert_eq!(attempt.char_len(), 0);
}

#[test]
fn truncated_pdf_never_panics() {
    let pdf = build_pdf(&["This document gets cut in half"]);
    let half = &pdf[..pdf.len() / 2];

    // Either extractor may salvage something or fail; neither may unwind.
    let _ = LayoutExtractor.extract(half);
    let _ = LopdfExtractor.extract(half);
}
