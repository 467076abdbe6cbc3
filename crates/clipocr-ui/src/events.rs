use clipocr_types::AppEvent;
use slint::ComponentHandle;

use crate::preview::frame_to_image;
use crate::state::UiContext;

pub fn handle_events(ctx: &UiContext, event: AppEvent) {
    match event {
        AppEvent::HideMainWindow => {
            ctx.main.set_notice_visible(false);
            if let Err(e) = ctx.main.hide() {
                tracing::warn!("[UI] Failed to hide main window: {}", e);
            }
        }
        AppEvent::ShowOverlay(frame) => {
            tracing::debug!("[UI] Overlay over {}x{} frame", frame.width, frame.height);
            ctx.overlay.set_frame(frame_to_image(&frame));
            ctx.overlay.set_selecting(false);
            ctx.overlay.set_sel_width(0.0);
            ctx.overlay.set_sel_height(0.0);
            ctx.overlay.window().set_fullscreen(true);
            if let Err(e) = ctx.overlay.show() {
                tracing::error!("[UI] Failed to show overlay: {}", e);
                ctx.show_main();
            }
        }
        AppEvent::CaptureReady(frame) => {
            tracing::debug!("[UI] Capture ready: {}x{}", frame.width, frame.height);
            *ctx.capture.borrow_mut() = Some(frame);
            ctx.main.set_has_capture(true);
            ctx.refresh_preview();
        }
        AppEvent::RestoreMainWindow => {
            let _ = ctx.overlay.hide();
            ctx.show_main();
            // Layout may have changed while hidden
            ctx.refresh_preview();
        }
        AppEvent::Notice { kind, message } => {
            ctx.show_notice(kind, &message);
        }
        AppEvent::ValidationResult { ok, message } => {
            ctx.settings.set_validation_ok(ok);
            ctx.settings.set_validation_text(message.into());
        }
        AppEvent::SettingsSaved { tesseract_path } => {
            *ctx.tesseract_path.borrow_mut() = tesseract_path;
            let _ = ctx.settings.hide();
        }
        AppEvent::InterfaceLanguageChanged(language) => {
            tracing::debug!("[UI] Interface language: {}", language.code());
            ctx.apply_texts(language);
        }
        AppEvent::Busy(busy) => {
            ctx.main.set_busy(busy);
            let t = ctx.texts();
            let status = if busy { t.status_working } else { t.status_ready };
            ctx.main.set_status(status.into());
        }
        // Requests travel the other way
        AppEvent::StartCapture { .. }
        | AppEvent::RegionSelected { .. }
        | AppEvent::SelectionCancelled
        | AppEvent::Copy { .. }
        | AppEvent::ValidateTesseract(_)
        | AppEvent::SaveSettings { .. }
        | AppEvent::SwitchInterfaceLanguage(_)
        | AppEvent::PreferencesChanged { .. }
        | AppEvent::Shutdown => {}
    }
}
