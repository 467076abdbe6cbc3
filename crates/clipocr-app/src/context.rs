use std::sync::Arc;

use clipocr_types::{AppEvent, NoticeKind};
use kanal::AsyncSender;

use crate::state::AppState;

/// Shared dependencies of the event handlers
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
}

impl AppContext {
    pub fn new(state: Arc<AppState>, event_tx: AsyncSender<AppEvent>) -> Self {
        Self { state, event_tx }
    }

    /// Send to the UI; a closed UI only gets logged since there is nobody left to tell
    pub async fn send(&self, event: AppEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            tracing::warn!("UI channel closed: {}", e);
        }
    }

    pub async fn notice(&self, kind: NoticeKind, message: impl Into<String>) {
        self.send(AppEvent::Notice {
            kind,
            message: message.into(),
        })
        .await;
    }
}
