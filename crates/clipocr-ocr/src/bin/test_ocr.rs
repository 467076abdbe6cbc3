//! Capture + OCR smoke test - run with: cargo run -p clipocr-ocr --bin test_ocr -- [tesseract] [lang]

use std::sync::Arc;

use anyhow::Result;
use clipocr_ocr::{TesseractEngine, TextRecognizer};
use clipocr_types::{CaptureRegion, OcrLanguage};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let mut args = std::env::args().skip(1);
    let binary = args.next().unwrap_or_else(|| "tesseract".to_string());
    let language = args
        .next()
        .and_then(|code| OcrLanguage::from_code(&code))
        .unwrap_or(OcrLanguage::English);

    tracing::info!("=== OCR Test ===");

    tracing::info!("1. Monitors:");
    for monitor in clipocr_ocr::list_monitors()? {
        tracing::info!(
            "   {} {} (scale {}){}",
            monitor.name,
            monitor.region,
            monitor.scale_factor,
            if monitor.is_primary { " primary" } else { "" }
        );
    }

    let engine = TesseractEngine::new(binary);
    tracing::info!("2. Tesseract {}", engine.version()?);
    tracing::info!("   languages: {:?}", engine.available_languages()?);

    tracing::info!("3. Capturing primary screen...");
    let start = std::time::Instant::now();
    let frame = clipocr_ocr::capture_primary_frame()?;
    tracing::info!("   {}x{} in {:?}", frame.width(), frame.height(), start.elapsed());

    let top_left = clipocr_ocr::crop(&frame, CaptureRegion::new(0, 0, 800, 300))
        .unwrap_or(frame);
    top_left.save("test_capture.png")?;
    tracing::info!("   Saved to test_capture.png");

    tracing::info!("4. Running OCR ({})...", language.code());
    let start = std::time::Instant::now();
    match engine.recognize(Arc::new(top_left), language).await {
        Ok(text) => {
            tracing::info!("   {:?} - {} chars", start.elapsed(), text.len());
            for line in text.lines().filter(|l| !l.trim().is_empty()).take(5) {
                tracing::info!("   > {}", line);
            }
        }
        Err(e) => tracing::warn!("   Failed: {}", e),
    }

    tracing::info!("=== Done ===");
    Ok(())
}
