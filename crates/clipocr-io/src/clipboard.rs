use std::borrow::Cow;
use std::thread;

use arboard::{Clipboard, ImageData};
use image::RgbaImage;
use kanal::{Receiver, Sender};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Copying images is not supported on this platform")]
    ImageUnsupported,
    #[error("{0}")]
    Failed(String),
    #[error("Clipboard worker stopped")]
    WorkerGone,
}

/// Destination for copied text and images
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
    fn set_image(&self, image: &RgbaImage) -> Result<(), ClipboardError>;
}

enum Request {
    Text(String, Sender<Result<(), ClipboardError>>),
    Image(RgbaImage, Sender<Result<(), ClipboardError>>),
}

/// OS clipboard owned by a dedicated thread.
///
/// On X11 and Wayland the copied data is served by the process that owns the
/// `arboard::Clipboard`, so it has to outlive individual copy calls.
pub struct SystemClipboard {
    requests: Sender<Request>,
}

impl SystemClipboard {
    pub fn spawn() -> Result<Self, ClipboardError> {
        let (requests, rx) = kanal::bounded::<Request>(8);
        let (ready_tx, ready_rx) = kanal::bounded::<Result<(), ClipboardError>>(1);

        thread::Builder::new()
            .name("clipboard".into())
            .spawn(move || match Clipboard::new() {
                Ok(clipboard) => {
                    let _ = ready_tx.send(Ok(()));
                    serve(clipboard, rx);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(ClipboardError::Unavailable(e.to_string())));
                }
            })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        ready_rx.recv().map_err(|_| ClipboardError::WorkerGone)??;
        tracing::debug!("Clipboard worker started");
        Ok(Self { requests })
    }

    fn call(&self, make: impl FnOnce(Sender<Result<(), ClipboardError>>) -> Request) -> Result<(), ClipboardError> {
        let (reply_tx, reply_rx) = kanal::bounded(1);
        self.requests
            .send(make(reply_tx))
            .map_err(|_| ClipboardError::WorkerGone)?;
        reply_rx.recv().map_err(|_| ClipboardError::WorkerGone)?
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        self.call(|reply| Request::Text(text, reply))
    }

    fn set_image(&self, image: &RgbaImage) -> Result<(), ClipboardError> {
        let image = image.clone();
        self.call(|reply| Request::Image(image, reply))
    }
}

fn serve(mut clipboard: Clipboard, requests: Receiver<Request>) {
    while let Ok(request) = requests.recv() {
        match request {
            Request::Text(text, reply) => {
                let result = clipboard.set_text(text).map_err(|e| map_error(e, false));
                if let Err(e) = &result {
                    tracing::error!("Failed to copy text: {e}");
                }
                let _ = reply.send(result);
            }
            Request::Image(image, reply) => {
                let (width, height) = image.dimensions();
                let data = ImageData {
                    width: width as usize,
                    height: height as usize,
                    bytes: Cow::Owned(image.into_raw()),
                };
                let result = clipboard.set_image(data).map_err(|e| map_error(e, true));
                if let Err(e) = &result {
                    tracing::error!("Failed to copy image: {e}");
                }
                let _ = reply.send(result);
            }
        }
    }
    tracing::debug!("Clipboard worker stopping");
}

fn map_error(error: arboard::Error, image: bool) -> ClipboardError {
    match error {
        arboard::Error::ClipboardNotSupported if image => ClipboardError::ImageUnsupported,
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(error.to_string()),
        other => ClipboardError::Failed(other.to_string()),
    }
}
