use pedigree_scan::preprocessing::SourceImage;
use pedigree_scan::{ExtractionError, Gender, ScanSession};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

mod common;

use common::{pipeline_with, png, scripted_pipeline, WidthRecognizer, SEED_TEXT};

#[tokio::test]
async fn test_scan_reports_progress_in_order() {
    let pipeline = scripted_pipeline(SEED_TEXT);
    let mut seen = Vec::new();

    let extraction = pipeline
        .extract(png(12, 8), |percent| seen.push(percent))
        .await
        .unwrap();

    assert_eq!(seen, vec![10, 10, 55, 100]);
    assert_eq!(extraction.engine, "scripted");
    assert_eq!(extraction.raw_text, SEED_TEXT);
    assert_eq!(extraction.record.name.as_deref(), Some("SORNRUK"));
}

#[test]
fn test_identical_images_give_identical_records() {
    let pipeline = scripted_pipeline(SEED_TEXT);
    let image = png(20, 10);

    let first = tokio_test::block_on(pipeline.extract(image.clone(), |_| {})).unwrap();
    let second = tokio_test::block_on(pipeline.extract(image, |_| {})).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_corrupt_image_is_a_decode_error() {
    let pipeline = scripted_pipeline(SEED_TEXT);
    let mut seen = Vec::new();

    let err = pipeline
        .extract(b"definitely not a png".to_vec(), |percent| seen.push(percent))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractionError::ImageDecode(_)));
    assert!(err.is_recoverable());
    assert!(seen.is_empty());
}

#[tokio::test]
async fn test_blank_transcript_is_a_recognition_error() {
    let pipeline = scripted_pipeline("  \n \n");
    let err = pipeline.extract(png(8, 8), |_| {}).await.unwrap_err();
    assert!(matches!(err, ExtractionError::Recognition(_)));
}

#[tokio::test]
async fn test_unknown_engine_is_rejected() {
    let pipeline = scripted_pipeline(SEED_TEXT);
    let err = pipeline
        .extract_with(Some("tesseract-9000"), png(8, 8), |_| {})
        .await
        .unwrap_err();
    assert_eq!(err, ExtractionError::UnknownEngine("tesseract-9000".to_string()));
}

#[tokio::test]
async fn test_failed_scan_falls_back_to_manual_entry() {
    let session = ScanSession::new(Arc::new(scripted_pipeline(SEED_TEXT)));

    let outcome = session.scan(Vec::new(), |_| {}).await;

    assert!(outcome.manual_entry);
    assert!(outcome.record.is_empty());
    assert_eq!(outcome.form.gender, Gender::Male);
    assert!(outcome.error.is_some());
    assert!(session.latest().is_none());
}

#[tokio::test]
async fn test_successful_scan_prefills_form() {
    let session = ScanSession::new(Arc::new(scripted_pipeline(SEED_TEXT)));

    let outcome = session.scan(png(8, 8), |_| {}).await;

    assert!(!outcome.manual_entry);
    assert_eq!(outcome.form.name, "SORNRUK");
    assert_eq!(outcome.form.gender, Gender::Female);
    assert_eq!(outcome.form.birth_date, "2007-07-15");
    assert_eq!(outcome.form.sire_name, "");
    assert_eq!(
        session.latest().map(|e| e.record),
        Some(outcome.record.clone())
    );
}

#[tokio::test]
async fn test_newer_scan_supersedes_older_one() {
    // Preprocessing scales by 1.5: the 32px image becomes 48px wide
    let session = ScanSession::new(Arc::new(pipeline_with(WidthRecognizer {
        min_slow_width: 40,
        delay: Duration::from_millis(300),
        slow_text: "FIRSTDOG\nMale",
        fast_text: "SECONDDOG\nFemale",
    })));

    let first = session.attempt(png(32, 8), |_| {});
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.attempt(png(8, 8), |_| {}).await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap_err(), ExtractionError::Superseded);
    assert_eq!(second.unwrap().record.name.as_deref(), Some("SECONDDOG"));
    assert_eq!(
        session.latest().and_then(|e| e.record.name),
        Some("SECONDDOG".to_string())
    );
}

#[test]
fn test_source_image_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&png(7, 3)).unwrap();

    let image = SourceImage::open(file.path()).unwrap();
    assert_eq!((image.width(), image.height()), (7, 3));
}
