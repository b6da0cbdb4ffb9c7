//! Fixtures shared by the integration tests: scripted pipeline components,
//! a PDF builder and a throwaway HTTP server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdftext_core::error::{PdfTextError, Result};
use pdftext_core::extraction::{DocumentFetcher, ExtractionAttempt, TextExtractor};
use pdftext_extraction::ExtractionOrchestrator;

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Serves canned documents by URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct StubFetcher {
    documents: HashMap<String, Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(url.to_string(), body.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| PdfTextError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Extractor whose behaviour is a plain function of the input bytes.
pub struct ScriptedExtractor {
    name: &'static str,
    script: fn(&[u8]) -> ExtractionAttempt,
    calls: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn new(name: &'static str, script: fn(&[u8]) -> ExtractionAttempt) -> Self {
        Self {
            name,
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for ScriptedExtractor {
    fn name(&self) -> &str {
        self.name
    }

    fn extract(&self, bytes: &[u8]) -> ExtractionAttempt {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.script)(bytes)
    }
}

/// Documents are UTF-8 text. A `scanned:` prefix makes the primary come back
/// empty, `broken:` makes it fail; otherwise it returns the body.
pub fn primary_script(bytes: &[u8]) -> ExtractionAttempt {
    let body = String::from_utf8_lossy(bytes);
    if body.starts_with("scanned:") {
        ExtractionAttempt::Empty
    } else if body.starts_with("broken:") {
        ExtractionAttempt::Failed("invalid file header".to_string())
    } else {
        ExtractionAttempt::from_pages([&*body])
    }
}

/// Returns whatever follows the marker prefix; `broken:` still fails.
pub fn fallback_script(bytes: &[u8]) -> ExtractionAttempt {
    let body = String::from_utf8_lossy(bytes);
    if body.starts_with("broken:") {
        return ExtractionAttempt::Failed("no trailer found".to_string());
    }
    let rest = body.split_once(':').map(|(_, rest)| rest).unwrap_or(&*body);
    ExtractionAttempt::from_pages([rest])
}

pub struct Pipeline {
    pub fetcher: Arc<StubFetcher>,
    pub primary: Arc<ScriptedExtractor>,
    pub fallback: Arc<ScriptedExtractor>,
    pub orchestrator: ExtractionOrchestrator,
}

/// Orchestrator over the scripted components with the default threshold.
pub fn scripted_pipeline(fetcher: StubFetcher) -> Pipeline {
    let fetcher = Arc::new(fetcher);
    let primary = Arc::new(ScriptedExtractor::new("primary", primary_script));
    let fallback = Arc::new(ScriptedExtractor::new("fallback", fallback_script));
    let orchestrator = ExtractionOrchestrator::new(
        fetcher.clone(),
        primary.clone(),
        fallback.clone(),
        pdftext_core::config::DEFAULT_MIN_TEXT_LENGTH,
    );
    Pipeline {
        fetcher,
        primary,
        fallback,
        orchestrator,
    }
}

// ---------------------------------------------------------------------------
// Real PDFs
// ---------------------------------------------------------------------------

/// Build a PDF with one page per entry; an empty entry yields a page with no text.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 14.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("serialize pdf");
    out
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Serve `router` on an ephemeral local port for the rest of the test.
pub async fn spawn_server(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    addr
}
