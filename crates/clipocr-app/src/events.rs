use clipocr_types::AppEvent;
use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

pub mod copy;
pub mod region_selected;
pub mod settings;
pub mod start_capture;

use copy::handle_copy;
use region_selected::{handle_region_selected, handle_selection_cancelled};
use settings::{
    handle_interface_language, handle_preferences, handle_save_settings, handle_validate,
};
use start_capture::handle_start_capture;

/// App's main loop
pub async fn event_loop(
    ctx: AppContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => {
                    tracing::info!("[EVENT_LOOP] UI channel closed");
                    break;
                }
            },
        };

        if matches!(event, AppEvent::Shutdown) {
            tracing::info!("[EVENT_LOOP] Shutdown requested");
            break;
        }
        handle_events(&ctx, event).await;
    }
    Ok(())
}

/// Dispatch one request from the UI.
///
/// Capture and copy work runs in its own task so the loop keeps answering
/// settings requests while Tesseract is busy.
pub async fn handle_events(ctx: &AppContext, event: AppEvent) {
    tracing::debug!("[EVENT_LOOP] {:?}", std::mem::discriminant(&event));
    match event {
        AppEvent::StartCapture { delay_secs } => {
            tokio::spawn(handle_start_capture(ctx.clone(), delay_secs));
        }
        AppEvent::RegionSelected {
            selection,
            view_width,
            view_height,
        } => {
            handle_region_selected(ctx, selection, (view_width, view_height)).await;
        }
        AppEvent::SelectionCancelled => handle_selection_cancelled(ctx).await,
        AppEvent::Copy { target, language } => {
            tokio::spawn(handle_copy(ctx.clone(), target, language));
        }
        AppEvent::ValidateTesseract(path) => handle_validate(ctx, path).await,
        AppEvent::SaveSettings { tesseract_path } => {
            handle_save_settings(ctx, tesseract_path).await;
        }
        AppEvent::SwitchInterfaceLanguage(language) => {
            handle_interface_language(ctx, language).await;
        }
        AppEvent::PreferencesChanged {
            language,
            delay_secs,
        } => handle_preferences(ctx, language, delay_secs).await,

        // Backend to UI traffic, never sent this way
        AppEvent::Shutdown
        | AppEvent::HideMainWindow
        | AppEvent::ShowOverlay(_)
        | AppEvent::CaptureReady(_)
        | AppEvent::RestoreMainWindow
        | AppEvent::Notice { .. }
        | AppEvent::ValidationResult { .. }
        | AppEvent::SettingsSaved { .. }
        | AppEvent::InterfaceLanguageChanged(_)
        | AppEvent::Busy(_) => {
            tracing::warn!("[EVENT_LOOP] Ignoring UI-bound event");
        }
    }
}
