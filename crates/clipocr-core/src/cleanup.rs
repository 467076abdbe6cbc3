use unicode_normalization::UnicodeNormalization;

/// Tidy raw Tesseract output before it goes to the clipboard.
///
/// NFC-normalizes, converts CRLF, drops the page-separator form feed,
/// strips trailing whitespace on each line and blank lines around the text.
/// Inner blank lines are kept since they separate paragraphs.
pub fn clean_ocr_text(raw: &str) -> String {
    let normalized: String = raw.nfc().collect();
    let normalized = normalized.replace("\r\n", "\n").replace('\x0c', "");

    let lines: Vec<&str> = normalized.lines().map(str::trim_end).collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
