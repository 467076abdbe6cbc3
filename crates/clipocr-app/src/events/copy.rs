use std::sync::Arc;
use std::sync::atomic::Ordering;

use clipocr_core::cleanup::clean_ocr_text;
use clipocr_core::texts::{UiTexts, format_message};
use clipocr_io::ClipboardError;
use clipocr_ocr::OcrError;
use clipocr_types::{AppEvent, CopyTarget, NoticeKind, OcrLanguage};
use image::RgbaImage;

use crate::context::AppContext;

pub async fn handle_copy(ctx: AppContext, target: CopyTarget, language: OcrLanguage) {
    if ctx.state.busy.swap(true, Ordering::AcqRel) {
        tracing::debug!(">>> [COPY] Already working, click ignored");
        return;
    }
    ctx.send(AppEvent::Busy(true)).await;

    let texts = ctx.state.texts().await;
    let (kind, message) = match current_capture(&ctx).await {
        None => (NoticeKind::Warning, texts.warning_no_screenshot.to_string()),
        Some(image) => match target {
            CopyTarget::Text => copy_text(&ctx, texts, image, language).await,
            CopyTarget::Image => copy_image(&ctx, texts, image).await,
        },
    };

    ctx.state.busy.store(false, Ordering::Release);
    ctx.send(AppEvent::Busy(false)).await;
    ctx.notice(kind, message).await;
}

async fn current_capture(ctx: &AppContext) -> Option<Arc<RgbaImage>> {
    let session = ctx.state.session.lock().await;
    match session.require() {
        Ok(capture) => Some(capture.image.clone()),
        Err(e) => {
            tracing::debug!(">>> [COPY] {}", e);
            None
        }
    }
}

pub async fn copy_text(
    ctx: &AppContext,
    texts: &UiTexts,
    image: Arc<RgbaImage>,
    language: OcrLanguage,
) -> (NoticeKind, String) {
    let recognizer = {
        let config = ctx.state.config.read().await;
        (ctx.state.recognizer)(&config)
    };
    tracing::info!(">>> [OCR] {} with language {}", recognizer.name(), language.code());

    let raw = match recognizer.recognize(image, language).await {
        Ok(raw) => raw,
        Err(OcrError::NotFound(path)) => {
            tracing::error!(">>> [OCR] Tesseract not found at {}", path);
            return (NoticeKind::Error, texts.error_tesseract_not_found.to_string());
        }
        Err(e) => {
            tracing::error!(">>> [OCR] Recognition failed: {}", e);
            return (NoticeKind::Error, format_message(texts.error_ocr, e));
        }
    };

    let text = clean_ocr_text(&raw);
    tracing::debug!(">>> [OCR] Got text: {} chars", text.chars().count());
    if text.is_empty() {
        return (NoticeKind::Info, texts.info_no_text.to_string());
    }

    let clipboard = ctx.state.clipboard.clone();
    let result = tokio::task::spawn_blocking(move || clipboard.set_text(&text)).await;
    match result {
        Ok(Ok(())) => (NoticeKind::Info, texts.info_text_copied.to_string()),
        Ok(Err(e)) => {
            tracing::error!(">>> [COPY] Clipboard text write failed: {}", e);
            (NoticeKind::Error, format_message(texts.error_copy_text_failed, e))
        }
        Err(e) => {
            tracing::error!(">>> [COPY] Clipboard task panicked: {}", e);
            (NoticeKind::Error, format_message(texts.error_copy_text_failed, e))
        }
    }
}

pub async fn copy_image(
    ctx: &AppContext,
    texts: &UiTexts,
    image: Arc<RgbaImage>,
) -> (NoticeKind, String) {
    let clipboard = ctx.state.clipboard.clone();
    let result = tokio::task::spawn_blocking(move || clipboard.set_image(&image)).await;
    match result {
        Ok(Ok(())) => (NoticeKind::Info, texts.info_image_copied.to_string()),
        Ok(Err(ClipboardError::ImageUnsupported)) => {
            tracing::warn!(">>> [COPY] Image clipboard not supported here");
            (NoticeKind::Info, texts.info_copy_not_supported.to_string())
        }
        Ok(Err(e)) => {
            tracing::error!(">>> [COPY] Clipboard image write failed: {}", e);
            (NoticeKind::Error, format_message(texts.error_copy_image_failed, e))
        }
        Err(e) => {
            tracing::error!(">>> [COPY] Clipboard task panicked: {}", e);
            (NoticeKind::Error, format_message(texts.error_copy_image_failed, e))
        }
    }
}
