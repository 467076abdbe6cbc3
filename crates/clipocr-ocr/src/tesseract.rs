use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use clipocr_types::OcrLanguage;
use thiserror::Error;

/// LSTM engine only
const ENGINE_MODE: &str = "1";
/// Assume a single uniform block of text, which suits a hand-picked screen region
const PAGE_SEG_MODE: &str = "6";

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Tesseract executable not found: {0}")]
    NotFound(String),
    #[error("Tesseract path not specified")]
    NoPath,
    #[error("Invalid path, file not found: {0}")]
    InvalidPath(String),
    #[error("Tesseract exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("Could not read a version from Tesseract output")]
    UnparseableVersion,
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("OCR worker stopped: {0}")]
    Worker(String),
}

/// Tesseract driven through its command line, as an installed executable
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
}

impl TesseractEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Recognize text in an encoded image (PNG) with the given language
    pub fn recognize_png(&self, png: &[u8], language: OcrLanguage) -> Result<String, OcrError> {
        let args = recognition_args(language);
        tracing::debug!(binary = %self.binary.display(), ?args, bytes = png.len(), "Running tesseract");

        let output = self.run(args.as_slice(), Some(png))?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Version reported by `tesseract --version`
    pub fn version(&self) -> Result<String, OcrError> {
        let output = self.run(&["--version"], None)?;
        // Tesseract 3.x printed the banner on stderr
        parse_version(&String::from_utf8_lossy(&output.stdout))
            .or_else(|| parse_version(&String::from_utf8_lossy(&output.stderr)))
            .ok_or(OcrError::UnparseableVersion)
    }

    /// Installed traineddata codes, from `tesseract --list-langs`
    pub fn available_languages(&self) -> Result<Vec<String>, OcrError> {
        let output = self.run(&["--list-langs"], None)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Ok(parse_language_list(&String::from_utf8_lossy(&output.stderr)));
        }
        Ok(parse_language_list(&stdout))
    }

    fn run<S: AsRef<str>>(&self, args: &[S], stdin: Option<&[u8]>) -> Result<Output, OcrError> {
        let mut command = Command::new(&self.binary);
        command
            .args(args.iter().map(AsRef::<str>::as_ref))
            .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        let mut child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => OcrError::NotFound(self.binary.display().to_string()),
            _ => OcrError::Io(e),
        })?;

        // Feed stdin from another thread so a chatty stderr cannot block us
        let writer = match (stdin, child.stdin.take()) {
            (Some(data), Some(mut pipe)) => {
                let data = data.to_vec();
                Some(std::thread::spawn(move || pipe.write_all(&data)))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // Tesseract closes stdin early when it fails; its exit status says why
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(OcrError::Io(e)),
                Err(_) => return Err(OcrError::Worker("stdin writer panicked".into())),
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(OcrError::Failed {
                status: output.status,
                stderr,
            });
        }

        Ok(output)
    }
}

/// Arguments for reading a PNG from stdin and writing plain text to stdout
pub fn recognition_args(language: OcrLanguage) -> Vec<String> {
    vec![
        "stdin".into(),
        "stdout".into(),
        "-l".into(),
        language.code().into(),
        "--oem".into(),
        ENGINE_MODE.into(),
        "--psm".into(),
        PAGE_SEG_MODE.into(),
    ]
}

/// Extract the version from a `--version` banner.
///
/// Handles `tesseract 5.3.0` as well as the Windows builds' `tesseract v5.3.0.20221214`.
pub fn parse_version(banner: &str) -> Option<String> {
    banner.lines().find_map(|line| {
        let mut words = line.split_whitespace();
        let name = words.next()?;
        if !name.eq_ignore_ascii_case("tesseract") {
            return None;
        }
        let version = words.next()?.trim_start_matches(['v', 'V']);
        version
            .starts_with(|c: char| c.is_ascii_digit())
            .then(|| version.to_string())
    })
}

/// Language codes listed by `--list-langs`, without the header line
pub fn parse_language_list(listing: &str) -> Vec<String> {
    let mut lines = listing.lines().map(str::trim).peekable();
    if lines
        .peek()
        .is_some_and(|first| first.starts_with("List of available languages"))
    {
        lines.next();
    }
    lines
        .filter(|l| !l.is_empty() && !l.contains(' '))
        .map(str::to_string)
        .collect()
}

/// Check a configured executable path the way the settings dialog does.
///
/// Bare command names (no directory part) are left to `PATH` lookup.
/// Returns the detected Tesseract version.
pub fn validate_path(path: &str) -> Result<String, OcrError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(OcrError::NoPath);
    }

    let candidate = Path::new(path);
    let has_dir = candidate.components().count() > 1 || candidate.is_absolute();
    if has_dir && !candidate.exists() {
        return Err(OcrError::InvalidPath(path.to_string()));
    }

    let version = TesseractEngine::new(candidate).version()?;
    tracing::info!(path, %version, "Tesseract validated");
    Ok(version)
}
