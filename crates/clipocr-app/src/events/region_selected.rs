use clipocr_core::region::scale_to_frame;
use clipocr_types::{AppEvent, CaptureRegion, Frame, NoticeKind};

use crate::context::AppContext;

/// Turn an overlay selection into the session's capture
pub async fn handle_region_selected(
    ctx: &AppContext,
    selection: CaptureRegion,
    view_size: (f32, f32),
) {
    let Some(frame) = ctx.state.pending_frame.lock().await.take() else {
        tracing::warn!(">>> [CAPTURE] Selection arrived without a frozen frame");
        ctx.send(AppEvent::RestoreMainWindow).await;
        return;
    };

    let cropped = scale_to_frame(selection, view_size, frame.dimensions())
        .and_then(|region| {
            tracing::debug!(">>> [CAPTURE] Selection {} maps to {}", selection, region);
            clipocr_ocr::crop(&frame, region)
        });

    match cropped {
        Some(image) => {
            let preview = Frame::new(image.width(), image.height(), image.as_raw().clone());
            ctx.state.session.lock().await.replace(image);
            ctx.send(AppEvent::CaptureReady(preview)).await;
        }
        None => {
            tracing::warn!(">>> [CAPTURE] Empty selection {}", selection);
            let texts = ctx.state.texts().await;
            ctx.notice(NoticeKind::Warning, texts.warning_screenshot_failed)
                .await;
        }
    }

    ctx.send(AppEvent::RestoreMainWindow).await;
}

pub async fn handle_selection_cancelled(ctx: &AppContext) {
    if ctx.state.pending_frame.lock().await.take().is_some() {
        tracing::debug!(">>> [CAPTURE] Selection cancelled, frame dropped");
    }
}
