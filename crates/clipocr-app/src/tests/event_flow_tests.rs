use std::sync::Arc;
use std::sync::atomic::Ordering;

use clipocr_core::texts::UiTexts;
use clipocr_types::{AppEvent, CaptureRegion, CopyTarget, InterfaceLanguage, NoticeKind, OcrLanguage};

use super::{BrokenScreen, Harness, Reply, SolidScreen, StubClipboard};
use crate::events::copy::handle_copy;
use crate::events::event_loop;
use crate::events::region_selected::{handle_region_selected, handle_selection_cancelled};
use crate::events::start_capture::handle_start_capture;

fn english() -> &'static UiTexts {
    UiTexts::for_language(InterfaceLanguage::English)
}

fn expect_notice(event: AppEvent) -> (NoticeKind, String) {
    match event {
        AppEvent::Notice { kind, message } => (kind, message),
        other => panic!("expected notice, got {other:?}"),
    }
}

#[tokio::test]
async fn test_copy_without_capture_warns() {
    let h = Harness::new(|| Reply::Text("unused"), StubClipboard::default());

    handle_copy(h.ctx.clone(), CopyTarget::Text, OcrLanguage::English).await;

    assert!(matches!(h.next().await, AppEvent::Busy(true)));
    assert!(matches!(h.next().await, AppEvent::Busy(false)));
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Warning);
    assert_eq!(message, english().warning_no_screenshot);
    assert!(h.clipboard.texts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_copy_text_cleans_and_copies() {
    let h = Harness::new(|| Reply::Text("Merhaba  \r\ndünya\n\n\x0c"), StubClipboard::default())
        .with_capture(20, 10)
        .await;

    handle_copy(h.ctx.clone(), CopyTarget::Text, OcrLanguage::Turkish).await;

    assert!(matches!(h.next().await, AppEvent::Busy(true)));
    assert!(matches!(h.next().await, AppEvent::Busy(false)));
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Info);
    assert_eq!(message, english().info_text_copied);
    assert_eq!(*h.clipboard.texts.lock().unwrap(), vec!["Merhaba\ndünya".to_string()]);
    assert!(!h.ctx.state.busy.load(Ordering::Acquire));
}

#[tokio::test]
async fn test_copy_text_with_nothing_recognized() {
    let h = Harness::new(|| Reply::Text(" \n\x0c"), StubClipboard::default())
        .with_capture(20, 10)
        .await;

    handle_copy(h.ctx.clone(), CopyTarget::Text, OcrLanguage::English).await;

    h.next().await;
    h.next().await;
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Info);
    assert_eq!(message, english().info_no_text);
    assert!(h.clipboard.texts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_tesseract_reported() {
    let h = Harness::new(|| Reply::Missing, StubClipboard::default())
        .with_capture(20, 10)
        .await;

    handle_copy(h.ctx.clone(), CopyTarget::Text, OcrLanguage::English).await;

    h.next().await;
    h.next().await;
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Error);
    assert_eq!(message, english().error_tesseract_not_found);
}

#[tokio::test]
async fn test_ocr_failure_includes_detail() {
    let h = Harness::new(|| Reply::Crash, StubClipboard::default())
        .with_capture(20, 10)
        .await;

    handle_copy(h.ctx.clone(), CopyTarget::Text, OcrLanguage::English).await;

    h.next().await;
    h.next().await;
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Error);
    assert!(message.starts_with("An error occurred during OCR"));
    assert!(message.contains("boom"));
}

#[tokio::test]
async fn test_copy_image() {
    let h = Harness::new(|| Reply::Text("unused"), StubClipboard::default())
        .with_capture(32, 16)
        .await;

    handle_copy(h.ctx.clone(), CopyTarget::Image, OcrLanguage::English).await;

    h.next().await;
    h.next().await;
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Info);
    assert_eq!(message, english().info_image_copied);
    assert_eq!(*h.clipboard.images.lock().unwrap(), vec![(32, 16)]);
}

#[tokio::test]
async fn test_copy_image_unsupported() {
    let clipboard = StubClipboard {
        images_unsupported: true,
        ..StubClipboard::default()
    };
    let h = Harness::new(|| Reply::Text("unused"), clipboard)
        .with_capture(32, 16)
        .await;

    handle_copy(h.ctx.clone(), CopyTarget::Image, OcrLanguage::English).await;

    h.next().await;
    h.next().await;
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Info);
    assert_eq!(message, english().info_copy_not_supported);
}

#[tokio::test]
async fn test_copy_ignored_while_busy() {
    let h = Harness::new(|| Reply::Text("text"), StubClipboard::default())
        .with_capture(20, 10)
        .await;
    h.ctx.state.busy.store(true, Ordering::Release);

    handle_copy(h.ctx.clone(), CopyTarget::Text, OcrLanguage::English).await;

    assert!(h.drained());
    assert!(h.clipboard.texts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_start_capture_freezes_frame() {
    let h = Harness::new(|| Reply::Text("unused"), StubClipboard::default());

    handle_start_capture(h.ctx.clone(), 0).await;

    assert!(matches!(h.next().await, AppEvent::HideMainWindow));
    match h.next().await {
        AppEvent::ShowOverlay(frame) => {
            assert_eq!((frame.width, frame.height), (400, 200));
            assert_eq!(frame.pixels.len(), 400 * 200 * 4);
        }
        other => panic!("expected overlay, got {other:?}"),
    }
    assert!(h.ctx.state.pending_frame.lock().await.is_some());
}

#[tokio::test]
async fn test_start_capture_failure_restores_window() {
    let h = Harness::build(
        || Reply::Text("unused"),
        StubClipboard::default(),
        Arc::new(BrokenScreen),
        None,
    );

    handle_start_capture(h.ctx.clone(), 0).await;

    assert!(matches!(h.next().await, AppEvent::HideMainWindow));
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Warning);
    assert_eq!(message, english().warning_screenshot_failed);
    assert!(matches!(h.next().await, AppEvent::RestoreMainWindow));
}

#[tokio::test]
async fn test_selection_on_scaled_view_crops_frame_pixels() {
    let h = Harness::new(|| Reply::Text("unused"), StubClipboard::default());
    handle_start_capture(h.ctx.clone(), 0).await;
    h.next().await;
    h.next().await;

    // 400x200 frame shown in a 200x100 logical view
    let selection = CaptureRegion::new(10, 20, 50, 25);
    handle_region_selected(&h.ctx, selection, (200.0, 100.0)).await;

    match h.next().await {
        AppEvent::CaptureReady(frame) => assert_eq!((frame.width, frame.height), (100, 50)),
        other => panic!("expected capture, got {other:?}"),
    }
    assert!(matches!(h.next().await, AppEvent::RestoreMainWindow));

    let session = h.ctx.state.session.lock().await;
    assert_eq!(session.require().unwrap().image.dimensions(), (100, 50));
    assert!(h.ctx.state.pending_frame.lock().await.is_none());
}

#[tokio::test]
async fn test_empty_selection_keeps_previous_capture() {
    let h = Harness::new(|| Reply::Text("unused"), StubClipboard::default())
        .with_capture(8, 8)
        .await;
    handle_start_capture(h.ctx.clone(), 0).await;
    h.next().await;
    h.next().await;

    handle_region_selected(&h.ctx, CaptureRegion::new(5, 5, 0, 30), (400.0, 200.0)).await;

    let (kind, _) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Warning);
    assert!(matches!(h.next().await, AppEvent::RestoreMainWindow));
    let session = h.ctx.state.session.lock().await;
    assert_eq!(session.require().unwrap().image.dimensions(), (8, 8));
}

#[tokio::test]
async fn test_selection_without_frame_only_restores() {
    let h = Harness::new(|| Reply::Text("unused"), StubClipboard::default());

    handle_region_selected(&h.ctx, CaptureRegion::new(0, 0, 10, 10), (100.0, 100.0)).await;

    assert!(matches!(h.next().await, AppEvent::RestoreMainWindow));
    assert!(h.drained());
}

#[tokio::test]
async fn test_cancel_drops_frame() {
    let h = Harness::build(
        || Reply::Text("unused"),
        StubClipboard::default(),
        Arc::new(SolidScreen(10, 10)),
        None,
    );
    handle_start_capture(h.ctx.clone(), 0).await;
    h.next().await;
    h.next().await;

    handle_selection_cancelled(&h.ctx).await;

    assert!(h.ctx.state.pending_frame.lock().await.is_none());
    assert!(!h.ctx.state.session.lock().await.has_capture());
}

#[tokio::test]
async fn test_event_loop_stops_on_shutdown() {
    let h = Harness::new(|| Reply::Text("unused"), StubClipboard::default());
    let (tx, rx) = kanal::unbounded_async();
    let cancel = tokio_util::sync::CancellationToken::new();
    let handle = tokio::spawn(event_loop(h.ctx.clone(), rx, cancel));

    tx.send(AppEvent::Shutdown).await.unwrap();

    let result = tokio::time::timeout(std::time::Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_event_loop_stops_on_cancel() {
    let h = Harness::new(|| Reply::Text("unused"), StubClipboard::default());
    let (_tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = tokio_util::sync::CancellationToken::new();
    let handle = tokio::spawn(event_loop(h.ctx.clone(), rx, cancel.clone()));

    cancel.cancel();

    let result = tokio::time::timeout(std::time::Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_event_loop_dispatches_copy() {
    let h = Harness::new(|| Reply::Text("hello"), StubClipboard::default())
        .with_capture(4, 4)
        .await;
    let (tx, rx) = kanal::unbounded_async();
    let cancel = tokio_util::sync::CancellationToken::new();
    tokio::spawn(event_loop(h.ctx.clone(), rx, cancel.clone()));

    tx.send(AppEvent::Copy {
        target: CopyTarget::Text,
        language: OcrLanguage::English,
    })
    .await
    .unwrap();

    assert!(matches!(h.next().await, AppEvent::Busy(true)));
    assert!(matches!(h.next().await, AppEvent::Busy(false)));
    let (kind, _) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Info);
    assert_eq!(*h.clipboard.texts.lock().unwrap(), vec!["hello".to_string()]);
    cancel.cancel();
}

#[tokio::test]
async fn test_clipboard_text_failure_is_not_an_ocr_error() {
    let clipboard = StubClipboard {
        text_fails: true,
        ..StubClipboard::default()
    };
    let h = Harness::new(|| Reply::Text("hello"), clipboard)
        .with_capture(20, 10)
        .await;

    handle_copy(h.ctx.clone(), CopyTarget::Text, OcrLanguage::English).await;

    h.next().await;
    h.next().await;
    let (kind, message) = expect_notice(h.next().await);
    assert_eq!(kind, NoticeKind::Error);
    assert!(message.starts_with("Failed to copy text to clipboard"));
    assert!(message.contains("owner went away"));
}
