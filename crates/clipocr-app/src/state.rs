use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clipocr_config::{Config, ConfigError};
use clipocr_core::session::CaptureSession;
use clipocr_core::texts::UiTexts;
use clipocr_io::{ClipboardError, ClipboardSink};
use clipocr_ocr::{TesseractEngine, TextRecognizer};
use image::RgbaImage;
use tokio::sync::{Mutex, RwLock};

/// Where full-screen frames come from
pub trait FrameSource: Send + Sync {
    fn capture_frame(&self) -> anyhow::Result<RgbaImage>;
}

pub struct PrimaryScreen;

impl FrameSource for PrimaryScreen {
    fn capture_frame(&self) -> anyhow::Result<RgbaImage> {
        clipocr_ocr::capture_primary_frame()
    }
}

/// Builds a recognizer for the current settings; called per OCR request so
/// a changed Tesseract path applies to the next click
pub type RecognizerFactory = Arc<dyn Fn(&Config) -> Arc<dyn TextRecognizer> + Send + Sync>;

pub fn tesseract_factory() -> RecognizerFactory {
    Arc::new(|config: &Config| {
        Arc::new(TesseractEngine::new(config.tesseract_path.clone())) as Arc<dyn TextRecognizer>
    })
}

/// Stand-in when the OS clipboard could not be opened at startup
pub struct DisabledClipboard(pub String);

impl ClipboardSink for DisabledClipboard {
    fn set_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(self.0.clone()))
    }

    fn set_image(&self, _image: &RgbaImage) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(self.0.clone()))
    }
}

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// `None` keeps settings in memory only
    pub config_path: Option<PathBuf>,
    pub session: Mutex<CaptureSession>,
    /// Frozen full-screen frame waiting for a selection
    pub pending_frame: Mutex<Option<Arc<RgbaImage>>>,
    pub busy: AtomicBool,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub frames: Arc<dyn FrameSource>,
    pub recognizer: RecognizerFactory,
}

impl AppState {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        clipboard: Arc<dyn ClipboardSink>,
        frames: Arc<dyn FrameSource>,
        recognizer: RecognizerFactory,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
            session: Mutex::new(CaptureSession::new()),
            pending_frame: Mutex::new(None),
            busy: AtomicBool::new(false),
            clipboard,
            frames,
            recognizer,
        }
    }

    pub async fn texts(&self) -> &'static UiTexts {
        UiTexts::for_language(self.config.read().await.interface_language)
    }

    /// Apply a change to the settings and write them out
    pub async fn update_config(&self, change: impl FnOnce(&mut Config)) -> Result<(), ConfigError> {
        let snapshot = {
            let mut config = self.config.write().await;
            change(&mut config);
            config.clone()
        };

        let Some(path) = self.config_path.clone() else {
            return Ok(());
        };
        tokio::task::spawn_blocking(move || snapshot.save_to(&path))
            .await
            .map_err(|e| ConfigError::Io(std::io::Error::other(e)))?
    }
}
