//! Concurrent conversion tests.
//!
//! Each `convert` call owns its own subprocess and temporary file, so calls
//! with distinct ids must never cross wires: every Completed event has to
//! carry the bytes of its own request's HTML.

#![cfg(unix)]

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::FakeRenderer;
use tokio::task::JoinSet;
use wkhtml2pdf::prelude::*;

/// Runs many conversions in parallel through one shared converter and
/// verifies that every notification arrives under the right id with the
/// right payload.
#[tokio::test]
async fn test_concurrent_conversions_keep_ids_separate() {
    let renderer = FakeRenderer::echoing();

    let mut converter = PdfConverter::new(&renderer.path);
    let mut events = converter.events();
    let converter = Arc::new(converter);

    const REQUESTS: usize = 8;

    let mut tasks = JoinSet::new();
    for i in 0..REQUESTS {
        let converter = Arc::clone(&converter);
        tasks.spawn(async move {
            let id = format!("doc-{i}");
            let html = format!("<html><body>payload for request {i}</body></html>");
            converter.convert(PdfDocument::new(id, html), None).await;
        });
    }
    while let Some(result) = tasks.join_next().await {
        assert!(result.is_ok(), "conversion task should not panic");
    }

    // Collect exactly one event per request.
    let mut received: HashMap<String, Vec<u8>> = HashMap::new();
    for _ in 0..REQUESTS {
        match events.recv().await.unwrap() {
            ConvertEvent::Completed { id, bytes } => {
                let previous = received.insert(id.clone(), bytes);
                assert!(previous.is_none(), "duplicate notification for {}", id);
            }
            ConvertEvent::Failed { id, error } => {
                panic!("request {} unexpectedly failed: {}", id, error);
            }
        }
    }
    assert!(events.try_recv().is_err(), "no extra notifications");

    // Every id got the bytes of its own HTML, not a neighbor's.
    for i in 0..REQUESTS {
        let id = format!("doc-{i}");
        let expected = format!("<html><body>payload for request {i}</body></html>\n");
        assert_eq!(
            received.get(&id).map(|b| b.as_slice()),
            Some(expected.as_bytes()),
            "payload mismatch for {}",
            id
        );
    }
}

/// One request's failure must not disturb a concurrently running success.
#[tokio::test]
async fn test_failure_is_isolated_from_concurrent_success() {
    let good_renderer = FakeRenderer::fixed("GOOD");
    let bad_renderer = FakeRenderer::failing("boom", 1);

    let mut good = PdfConverter::new(&good_renderer.path);
    let mut good_events = good.events();
    let mut bad = PdfConverter::new(&bad_renderer.path);
    let mut bad_events = bad.events();

    tokio::join!(
        good.convert(PdfDocument::new("doc-good", "<html/>"), None),
        bad.convert(PdfDocument::new("doc-bad", "<html/>"), None),
    );

    match good_events.recv().await.unwrap() {
        ConvertEvent::Completed { id, bytes } => {
            assert_eq!(id, "doc-good");
            assert_eq!(bytes, b"GOOD");
        }
        other => panic!("Expected Completed, got {:?}", other),
    }

    match bad_events.recv().await.unwrap() {
        ConvertEvent::Failed { id, error } => {
            assert_eq!(id, "doc-bad");
            assert!(matches!(error, ConvertError::Conversion(_)));
        }
        other => panic!("Expected Failed, got {:?}", other),
    }
}
