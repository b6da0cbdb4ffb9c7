use pdftext_core::extraction::{DocumentOutcome, ExtractionStage};
use pdftext_tests::{scripted_pipeline, StubFetcher};

// ---------------------------------------------------------------------------
// Single document
// ---------------------------------------------------------------------------

#[tokio::test]
async fn primary_text_is_returned_without_fallback() {
    let pipeline = scripted_pipeline(
        StubFetcher::new().with("https://docs.test/a.pdf", "  Annual report 2023, page one.\n"),
    );

    let outcome = pipeline
        .orchestrator
        .process("https://docs.test/a.pdf")
        .await
        .expect("pipeline should not fault");

    assert_eq!(
        outcome,
        DocumentOutcome::Extracted {
            text: "Annual report 2023, page one.".to_string(),
            length: 29,
            stage: ExtractionStage::Primary,
        }
    );
    assert_eq!(pipeline.primary.calls(), 1);
    assert_eq!(pipeline.fallback.calls(), 0);
}

#[tokio::test]
async fn empty_primary_falls_back() {
    let pipeline = scripted_pipeline(
        StubFetcher::new().with("https://docs.test/scan.pdf", "scanned:Text recovered by the fallback"),
    );

    let outcome = pipeline
        .orchestrator
        .process("https://docs.test/scan.pdf")
        .await
        .unwrap();

    match outcome {
        DocumentOutcome::Extracted { text, stage, .. } => {
            assert_eq!(text, "Text recovered by the fallback");
            assert_eq!(stage, ExtractionStage::Fallback);
        }
        other => panic!("expected extracted text, got {other:?}"),
    }
    assert_eq!(pipeline.fallback.calls(), 1);
}

#[tokio::test]
async fn short_text_from_both_extractors_is_unreadable() {
    let pipeline = scripted_pipeline(StubFetcher::new().with("https://docs.test/tiny.pdf", "x:  p. 1 "));

    let outcome = pipeline
        .orchestrator
        .process("https://docs.test/tiny.pdf")
        .await
        .unwrap();

    // Fallback returned "p. 1" (4 chars) after trimming.
    assert_eq!(outcome, DocumentOutcome::Unreadable { extracted_length: 4 });
    assert_eq!(pipeline.primary.calls(), 1);
    assert_eq!(pipeline.fallback.calls(), 1);
}

#[tokio::test]
async fn broken_document_is_unreadable_not_a_fault() {
    let pipeline = scripted_pipeline(
        StubFetcher::new().with("https://docs.test/broken.pdf", "broken:\x00\x01\x02"),
    );

    let outcome = pipeline
        .orchestrator
        .process("https://docs.test/broken.pdf")
        .await
        .expect("parse failures must not surface as errors");

    assert_eq!(outcome, DocumentOutcome::Unreadable { extracted_length: 0 });
}

#[tokio::test]
async fn download_failure_skips_extraction() {
    let pipeline = scripted_pipeline(StubFetcher::new());

    let outcome = pipeline
        .orchestrator
        .process("https://docs.test/missing.pdf")
        .await
        .unwrap();

    assert!(matches!(outcome, DocumentOutcome::DownloadFailed { .. }));
    assert_eq!(pipeline.primary.calls(), 0);
    assert_eq!(pipeline.fallback.calls(), 0);
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_preserves_input_order_and_length() {
    let pipeline = scripted_pipeline(
        StubFetcher::new()
            .with("https://docs.test/1.pdf", "First document body text")
            .with("https://docs.test/3.pdf", "scanned:Third document via fallback")
            .with("https://docs.test/4.pdf", "broken:"),
    );
    let urls: Vec<String> = (1..=4).map(|i| format!("https://docs.test/{i}.pdf")).collect();

    let batch = pipeline.orchestrator.process_batch(&urls).await.unwrap();

    assert_eq!(batch.total_processed, 4);
    assert_eq!(batch.results.len(), 4);
    let result_urls: Vec<&str> = batch.results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(result_urls, urls.iter().map(String::as_str).collect::<Vec<_>>());

    assert!(batch.results[0].outcome.is_success());
    assert!(matches!(
        batch.results[1].outcome,
        DocumentOutcome::DownloadFailed { .. }
    ));
    assert!(batch.results[2].outcome.is_success());
    assert!(matches!(
        batch.results[3].outcome,
        DocumentOutcome::Unreadable { .. }
    ));
    assert_eq!(batch.succeeded(), 2);

    // Every URL is attempted, sequentially and in order.
    assert_eq!(pipeline.fetcher.requested(), urls);
}

#[tokio::test]
async fn batch_where_everything_fails_still_counts_every_url() {
    let pipeline = scripted_pipeline(StubFetcher::new());
    let urls = vec![
        "https://nowhere.test/a.pdf".to_string(),
        "https://nowhere.test/b.pdf".to_string(),
        "https://nowhere.test/a.pdf".to_string(),
    ];

    let batch = pipeline.orchestrator.process_batch(&urls).await.unwrap();

    assert_eq!(batch.total_processed, 3);
    assert_eq!(batch.results.len(), 3);
    assert_eq!(batch.succeeded(), 0);
}

#[tokio::test]
async fn empty_batch_is_fine() {
    let pipeline = scripted_pipeline(StubFetcher::new());

    let batch = pipeline.orchestrator.process_batch(&[]).await.unwrap();

    assert_eq!(batch.total_processed, 0);
    assert!(batch.results.is_empty());
}
