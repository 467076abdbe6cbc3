use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI -> backend
    StartCapture {
        delay_secs: u64,
    },
    /// Selection made on the overlay, in overlay view coordinates
    RegionSelected {
        selection: CaptureRegion,
        view_width: f32,
        view_height: f32,
    },
    SelectionCancelled,
    Copy {
        target: CopyTarget,
        language: OcrLanguage,
    },
    ValidateTesseract(String),
    SaveSettings {
        tesseract_path: String,
    },
    SwitchInterfaceLanguage(InterfaceLanguage),
    PreferencesChanged {
        language: OcrLanguage,
        delay_secs: u64,
    },
    Shutdown,

    // backend -> UI
    HideMainWindow,
    ShowOverlay(Frame),
    CaptureReady(Frame),
    RestoreMainWindow,
    Notice {
        kind: NoticeKind,
        message: String,
    },
    ValidationResult {
        ok: bool,
        message: String,
    },
    SettingsSaved {
        tesseract_path: String,
    },
    InterfaceLanguageChanged(InterfaceLanguage),
    Busy(bool),
}

/// Raw RGBA8 pixels shared between the backend and the UI thread
#[derive(Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanned by two drag points, in either order
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        Self {
            x,
            y,
            width: a.0.abs_diff(b.0),
            height: a.1.abs_diff(b.1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains(&self, other: &CaptureRegion) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlap of two rectangles, `None` when they do not share any pixel
    pub fn intersect(&self, other: &CaptureRegion) -> Option<CaptureRegion> {
        let left = self.x.max(other.x) as i64;
        let top = self.y.max(other.y) as i64;
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(CaptureRegion {
            x: left as i32,
            y: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

impl fmt::Display for CaptureRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Languages offered for recognition, stored as Tesseract traineddata codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OcrLanguage {
    #[default]
    #[serde(rename = "tur")]
    Turkish,
    #[serde(rename = "eng")]
    English,
    #[serde(rename = "deu")]
    German,
    #[serde(rename = "fra")]
    French,
}

impl OcrLanguage {
    pub const ALL: [OcrLanguage; 4] = [
        OcrLanguage::Turkish,
        OcrLanguage::English,
        OcrLanguage::German,
        OcrLanguage::French,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Turkish => "tur",
            Self::English => "eng",
            Self::German => "deu",
            Self::French => "fra",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|l| l == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum InterfaceLanguage {
    #[default]
    #[serde(rename = "tur")]
    Turkish,
    #[serde(rename = "eng")]
    English,
}

impl InterfaceLanguage {
    pub const ALL: [InterfaceLanguage; 2] = [InterfaceLanguage::Turkish, InterfaceLanguage::English];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Turkish => "tur",
            Self::English => "eng",
        }
    }

    /// Unknown codes fall back to Turkish
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "eng" | "en" => Self::English,
            _ => Self::Turkish,
        }
    }

    /// Name of the language written in itself, used in the language menu
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Turkish => "Türkçe",
            Self::English => "English",
        }
    }
}

/// Goes through [`InterfaceLanguage::from_code`], so an unknown code reads as Turkish
impl<'de> Deserialize<'de> for InterfaceLanguage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Text,
    Image,
}

impl std::str::FromStr for CopyTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            other => Err(format!("unknown copy target '{other}', expected text or image")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}
