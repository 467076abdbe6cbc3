use clipocr_core::texts::{UiTexts, format_message};
use clipocr_ocr::OcrError;
use clipocr_types::{AppEvent, InterfaceLanguage, NoticeKind, OcrLanguage};

use crate::context::AppContext;

/// Run the settings dialog check off the async workers
pub async fn check_tesseract(path: String, texts: &UiTexts) -> (bool, String) {
    let result = tokio::task::spawn_blocking(move || clipocr_ocr::validate_path(&path)).await;
    match result {
        Ok(Ok(version)) => (true, format_message(texts.config_validation_success, version)),
        Ok(Err(OcrError::NoPath)) => (false, texts.config_no_path.to_string()),
        Ok(Err(OcrError::InvalidPath(path))) => {
            tracing::debug!(">>> [SETTINGS] No file at {}", path);
            (false, texts.config_invalid_path.to_string())
        }
        Ok(Err(e)) => (false, format_message(texts.config_validation_error, e)),
        Err(e) => (false, format_message(texts.config_validation_error, e)),
    }
}

pub async fn handle_validate(ctx: &AppContext, path: String) {
    let texts = ctx.state.texts().await;
    let (ok, message) = check_tesseract(path, texts).await;
    ctx.send(AppEvent::ValidationResult { ok, message }).await;
}

/// Persist a new Tesseract path, but only one that passes validation
pub async fn handle_save_settings(ctx: &AppContext, tesseract_path: String) {
    let texts = ctx.state.texts().await;
    let tesseract_path = tesseract_path.trim().to_string();
    let (ok, message) = check_tesseract(tesseract_path.clone(), texts).await;
    ctx.send(AppEvent::ValidationResult { ok, message }).await;

    if !ok {
        ctx.notice(NoticeKind::Warning, texts.config_invalid_config_message)
            .await;
        return;
    }

    let path = tesseract_path.clone();
    if let Err(e) = ctx
        .state
        .update_config(|config| config.set_tesseract_path(path))
        .await
    {
        tracing::error!(">>> [SETTINGS] Failed to save: {}", e);
        ctx.notice(NoticeKind::Error, format_message(texts.config_save_failed, e))
            .await;
        return;
    }

    tracing::info!(">>> [SETTINGS] Tesseract path set to {}", tesseract_path);
    ctx.send(AppEvent::SettingsSaved { tesseract_path }).await;
}

pub async fn handle_interface_language(ctx: &AppContext, language: InterfaceLanguage) {
    let result = ctx
        .state
        .update_config(|config| config.interface_language = language)
        .await;

    // The switch applies for this run even when it could not be stored
    ctx.send(AppEvent::InterfaceLanguageChanged(language)).await;

    if let Err(e) = result {
        tracing::error!(">>> [SETTINGS] Failed to save language: {}", e);
        let texts = UiTexts::for_language(language);
        ctx.notice(NoticeKind::Error, format_message(texts.config_save_failed, e))
            .await;
    }
}

/// Remember the toolbar choices for the next start
pub async fn handle_preferences(ctx: &AppContext, language: OcrLanguage, delay_secs: u64) {
    let result = ctx
        .state
        .update_config(|config| {
            config.ocr_language = language;
            config.capture_delay_secs = delay_secs;
        })
        .await;

    if let Err(e) = result {
        tracing::warn!(">>> [SETTINGS] Failed to save preferences: {}", e);
    }
}
