use std::sync::Arc;
use std::time::SystemTime;

use image::RgbaImage;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No screenshot has been captured yet")]
    NoCapture,
}

/// One captured region, kept until the next capture replaces it
#[derive(Debug, Clone)]
pub struct Capture {
    pub id: Uuid,
    pub taken_at: SystemTime,
    pub image: Arc<RgbaImage>,
}

#[derive(Debug, Default)]
pub struct CaptureSession {
    current: Option<Capture>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new capture, dropping the previous one
    pub fn replace(&mut self, image: RgbaImage) -> &Capture {
        let capture = Capture {
            id: Uuid::new_v4(),
            taken_at: SystemTime::now(),
            image: Arc::new(image),
        };
        tracing::debug!(id = %capture.id, width = capture.image.width(), height = capture.image.height(), "Capture stored");
        self.current.insert(capture)
    }

    pub fn current(&self) -> Option<&Capture> {
        self.current.as_ref()
    }

    /// The current capture, or the error every copy action reports without one
    pub fn require(&self) -> Result<&Capture, SessionError> {
        self.current.as_ref().ok_or(SessionError::NoCapture)
    }

    pub fn has_capture(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
