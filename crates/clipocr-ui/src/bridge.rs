use std::rc::Weak;

use clipocr_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};

use crate::events::handle_events;
use crate::state::UiContext;

/// UI side of the channel pair to the async backend
#[derive(Clone)]
pub struct UiBridge {
    to_app: AsyncSender<AppEvent>,
}

impl UiBridge {
    pub fn new(to_app: AsyncSender<AppEvent>) -> Self {
        Self { to_app }
    }

    /// Send from a UI callback; never blocks the event loop
    pub fn emit(&self, event: AppEvent) {
        match self.to_app.try_send(event) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("[UI] Backend queue full, event dropped"),
            Err(e) => tracing::error!("[UI] Backend channel closed: {}", e),
        }
    }
}

/// Drain backend events on the slint event loop
pub fn forward_from_backend(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ctx: Weak<UiContext>,
) -> Result<(), slint::EventLoopError> {
    slint::spawn_local(async move {
        while let Ok(event) = app_to_ui_rx.recv().await {
            let Some(ctx) = ctx.upgrade() else {
                break;
            };
            handle_events(&ctx, event);
        }
        tracing::debug!("[UI] Backend channel closed, forwarder stopping");
    })?;
    Ok(())
}
