use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use clipocr_config::{Config, MAX_DELAY_SECS, config_path};
use clipocr_core::cleanup::clean_ocr_text;
use clipocr_io::{ClipboardSink, SystemClipboard};
use clipocr_ocr::{TesseractEngine, TextRecognizer};
use clipocr_types::{CaptureRegion, CopyTarget, InterfaceLanguage, OcrLanguage};

#[derive(Debug, Parser)]
#[command(name = "clipocr", version, about = "Screen region OCR to the clipboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the capture window (default)
    Gui,
    /// Capture a screen region without the window
    Capture(CaptureArgs),
    /// Inspect or change the stored settings
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Check that a Tesseract binary runs
    Validate {
        /// Defaults to the configured path
        path: Option<String>,
    },
    /// List the languages Tesseract has data for
    Langs,
}

#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Screen rectangle as x,y,width,height
    #[arg(long, value_parser = parse_region)]
    pub region: CaptureRegion,
    /// What goes to the clipboard
    #[arg(long, default_value = "text", value_parser = CopyTarget::from_str)]
    pub copy: CopyTarget,
    /// Tesseract language code, defaults to the configured one
    #[arg(long, value_parser = parse_ocr_language)]
    pub lang: Option<OcrLanguage>,
    /// Seconds to wait before capturing
    #[arg(long, default_value_t = 0)]
    pub delay: u64,
    /// Also write the captured region to this PNG file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings as JSON
    Show,
    /// Print where settings are stored
    Path,
    /// Store a new Tesseract path after validating it
    SetTesseract { path: String },
    /// Store the interface language (tur or eng)
    SetLanguage { code: String },
}

pub fn parse_region(value: &str) -> Result<CaptureRegion, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, width, height] = parts.as_slice() else {
        return Err(format!("expected x,y,width,height, got '{value}'"));
    };

    let number = |part: &str| part.parse::<i64>().map_err(|e| format!("'{part}': {e}"));
    let (x, y, width, height) = (number(x)?, number(y)?, number(width)?, number(height)?);

    let x = i32::try_from(x).map_err(|_| format!("x out of range: {x}"))?;
    let y = i32::try_from(y).map_err(|_| format!("y out of range: {y}"))?;
    let region = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(width), Ok(height)) => CaptureRegion::new(x, y, width, height),
        _ => return Err("width and height must be positive".to_string()),
    };
    if region.is_empty() {
        return Err("region is empty".to_string());
    }
    Ok(region)
}

fn parse_ocr_language(value: &str) -> Result<OcrLanguage, String> {
    OcrLanguage::from_code(value).ok_or_else(|| {
        let known: Vec<&str> = OcrLanguage::ALL.iter().map(|l| l.code()).collect();
        format!("unknown language '{value}', expected one of {}", known.join(", "))
    })
}

/// Run a headless subcommand to completion
pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Gui => bail!("the window has to run on the main thread"),
        Command::Capture(args) => capture(args).await,
        Command::Config(command) => config(command),
        Command::Validate { path } => {
            let path = path.unwrap_or_else(|| Config::new().tesseract_path);
            let version = clipocr_ocr::validate_path(&path)
                .with_context(|| format!("Tesseract at '{path}' did not validate"))?;
            println!("tesseract {version} ({path})");
            Ok(())
        }
        Command::Langs => {
            let engine = TesseractEngine::new(Config::new().tesseract_path);
            for code in engine.available_languages()? {
                let known = OcrLanguage::from_code(&code).is_some();
                println!("{}{}", code, if known { "  *" } else { "" });
            }
            Ok(())
        }
    }
}

async fn capture(args: CaptureArgs) -> anyhow::Result<()> {
    let config = Config::new();
    let language = args.lang.unwrap_or(config.ocr_language);

    if args.delay > 0 {
        let delay = Duration::from_secs(args.delay.min(MAX_DELAY_SECS));
        tracing::info!("Capturing in {:?}", delay);
        tokio::time::sleep(delay).await;
    }

    let region = args.region;
    let image = tokio::task::spawn_blocking(move || clipocr_ocr::capture_screen_region(region))
        .await?
        .with_context(|| format!("Failed to capture {region}"))?;
    tracing::info!("Captured {}x{}", image.width(), image.height());

    if let Some(path) = &args.save {
        image
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let clipboard = SystemClipboard::spawn().context("Clipboard unavailable")?;
    match args.copy {
        CopyTarget::Text => {
            let engine = TesseractEngine::new(&config.tesseract_path);
            let raw = engine.recognize(Arc::new(image), language).await?;
            let text = clean_ocr_text(&raw);
            if text.is_empty() {
                bail!("No text recognized in {region}");
            }
            clipboard.set_text(&text)?;
            println!("{text}");
        }
        CopyTarget::Image => {
            clipboard.set_image(&image)?;
            println!("Copied {}x{} image", image.width(), image.height());
        }
    }
    Ok(())
}

fn config(command: ConfigCommand) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(&Config::new())?);
        }
        ConfigCommand::Path => {
            println!("{}", config_path()?.display());
        }
        ConfigCommand::SetTesseract { path } => {
            let version = clipocr_ocr::validate_path(&path)
                .with_context(|| format!("Not saving '{path}'"))?;
            let mut config = stored_config()?;
            config.set_tesseract_path(path.trim());
            let saved = config.save()?;
            println!("tesseract {version} saved to {}", saved.display());
        }
        ConfigCommand::SetLanguage { code } => {
            let language = InterfaceLanguage::ALL
                .into_iter()
                .find(|l| l.code() == code)
                .with_context(|| format!("Unknown interface language '{code}'"))?;
            let mut config = stored_config()?;
            config.interface_language = language;
            let saved = config.save()?;
            println!("{} saved to {}", language.native_name(), saved.display());
        }
    }
    Ok(())
}

/// Settings as stored on disk, without env overrides baked in
fn stored_config() -> anyhow::Result<Config> {
    Ok(Config::load_from(&config_path()?))
}
