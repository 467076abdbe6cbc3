//! Event flow tests against stub screen, recognizer and clipboard

mod event_flow_tests;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clipocr_config::Config;
use clipocr_io::{ClipboardError, ClipboardSink};
use clipocr_ocr::{OcrError, TextRecognizer};
use clipocr_types::{AppEvent, OcrLanguage};
use image::{Rgba, RgbaImage};
use kanal::AsyncReceiver;

use crate::context::AppContext;
use crate::state::{AppState, FrameSource, RecognizerFactory};

pub enum Reply {
    Text(&'static str),
    Missing,
    Crash,
}

pub struct StubRecognizer {
    reply: Reply,
}

#[async_trait::async_trait]
impl TextRecognizer for StubRecognizer {
    async fn recognize(&self, _image: Arc<RgbaImage>, _language: OcrLanguage) -> Result<String, OcrError> {
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Missing => Err(OcrError::NotFound("tesseract".to_string())),
            Reply::Crash => Err(OcrError::Worker("boom".to_string())),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub fn recognizer(reply: fn() -> Reply) -> RecognizerFactory {
    Arc::new(move |_config: &Config| Arc::new(StubRecognizer { reply: reply() }) as Arc<dyn TextRecognizer>)
}

#[derive(Default)]
pub struct StubClipboard {
    pub texts: Mutex<Vec<String>>,
    pub images: Mutex<Vec<(u32, u32)>>,
    pub images_unsupported: bool,
    pub text_fails: bool,
}

impl ClipboardSink for StubClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.text_fails {
            return Err(ClipboardError::Failed("owner went away".to_string()));
        }
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn set_image(&self, image: &RgbaImage) -> Result<(), ClipboardError> {
        if self.images_unsupported {
            return Err(ClipboardError::ImageUnsupported);
        }
        self.images.lock().unwrap().push(image.dimensions());
        Ok(())
    }
}

pub struct SolidScreen(pub u32, pub u32);

impl FrameSource for SolidScreen {
    fn capture_frame(&self) -> anyhow::Result<RgbaImage> {
        Ok(RgbaImage::from_pixel(self.0, self.1, Rgba([255, 255, 255, 255])))
    }
}

pub struct BrokenScreen;

impl FrameSource for BrokenScreen {
    fn capture_frame(&self) -> anyhow::Result<RgbaImage> {
        anyhow::bail!("no monitors")
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub rx: AsyncReceiver<AppEvent>,
    pub clipboard: Arc<StubClipboard>,
}

impl Harness {
    pub fn new(reply: fn() -> Reply, clipboard: StubClipboard) -> Self {
        Self::build(reply, clipboard, Arc::new(SolidScreen(400, 200)), None)
    }

    pub fn build(
        reply: fn() -> Reply,
        clipboard: StubClipboard,
        screen: Arc<dyn FrameSource>,
        config_path: Option<PathBuf>,
    ) -> Self {
        let mut config = Config::default();
        config.interface_language = clipocr_types::InterfaceLanguage::English;
        Self::custom(config, recognizer(reply), clipboard, screen, config_path)
    }

    pub fn custom(
        config: Config,
        recognizer: RecognizerFactory,
        clipboard: StubClipboard,
        screen: Arc<dyn FrameSource>,
        config_path: Option<PathBuf>,
    ) -> Self {
        let clipboard = Arc::new(clipboard);
        let state = AppState::new(config, config_path, clipboard.clone(), screen, recognizer);
        let (tx, rx) = kanal::unbounded_async();
        Self {
            ctx: AppContext::new(Arc::new(state), tx),
            rx,
            clipboard,
        }
    }

    /// Put a capture straight into the session
    pub async fn with_capture(self, width: u32, height: u32) -> Self {
        self.ctx
            .state
            .session
            .lock()
            .await
            .replace(RgbaImage::new(width, height));
        self
    }

    pub async fn next(&self) -> AppEvent {
        tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed")
    }

    pub fn drained(&self) -> bool {
        self.rx.is_empty()
    }
}

/// Unique settings file under the temp dir
pub fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("clipocr-app-{}-{}", name, std::process::id()))
        .join("config.json")
}

/// Executable that answers like Tesseract 5.3.0 and echoes what it was asked to read
#[cfg(unix)]
pub fn fake_tesseract(name: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let dir = std::env::temp_dir().join(format!("clipocr-app-fake-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let script = dir.join("tesseract");
    std::fs::write(
        &script,
        r#"#!/bin/sh
case "$1" in
  --version) echo "tesseract 5.3.0" ;;
  --list-langs) echo eng ;;
  *) cat > /dev/null; echo "fake $4 text" ;;
esac
"#,
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    // A concurrently forked test process may briefly hold the write handle
    for _ in 0..50 {
        match std::process::Command::new(&script).arg("--version").output() {
            Err(e) if e.raw_os_error() == Some(26) => std::thread::sleep(Duration::from_millis(20)),
            _ => break,
        }
    }
    script
}
