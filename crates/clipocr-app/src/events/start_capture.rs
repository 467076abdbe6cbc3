use std::sync::Arc;
use std::time::Duration;

use clipocr_config::MAX_DELAY_SECS;
use clipocr_types::{AppEvent, Frame, NoticeKind};

use crate::context::AppContext;

/// Time the compositor needs to take the main window off screen
const HIDE_DELAY: Duration = Duration::from_millis(50);

pub async fn handle_start_capture(ctx: AppContext, delay_secs: u64) {
    ctx.send(AppEvent::HideMainWindow).await;

    let delay = Duration::from_secs(delay_secs.min(MAX_DELAY_SECS)).max(HIDE_DELAY);
    tracing::debug!(">>> [CAPTURE] Waiting {:?} before grabbing the screen", delay);
    tokio::time::sleep(delay).await;

    let frames = ctx.state.frames.clone();
    let result = tokio::task::spawn_blocking(move || frames.capture_frame()).await;

    let frame = match result {
        Ok(Ok(frame)) => frame,
        Ok(Err(e)) => {
            tracing::error!(">>> [CAPTURE] Screen capture failed: {:#}", e);
            return capture_failed(&ctx).await;
        }
        Err(e) => {
            tracing::error!(">>> [CAPTURE] Capture task panicked: {}", e);
            return capture_failed(&ctx).await;
        }
    };

    tracing::info!(">>> [CAPTURE] Frozen frame {}x{}", frame.width(), frame.height());
    let shown = Frame::new(frame.width(), frame.height(), frame.as_raw().clone());
    *ctx.state.pending_frame.lock().await = Some(Arc::new(frame));
    ctx.send(AppEvent::ShowOverlay(shown)).await;
}

async fn capture_failed(ctx: &AppContext) {
    let texts = ctx.state.texts().await;
    ctx.notice(NoticeKind::Warning, texts.warning_screenshot_failed)
        .await;
    ctx.send(AppEvent::RestoreMainWindow).await;
}
