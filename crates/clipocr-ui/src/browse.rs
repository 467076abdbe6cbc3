use std::path::{Path, PathBuf};

use rfd::AsyncFileDialog;

/// File picker for the Tesseract executable, opened next to the current path
pub fn tesseract_dialog(title: &str, current: &str) -> AsyncFileDialog {
    let mut dialog = AsyncFileDialog::new().set_title(title);
    if cfg!(windows) {
        dialog = dialog.add_filter("tesseract.exe", &["exe"]);
    }
    if let Some(dir) = start_dir(current) {
        dialog = dialog.set_directory(dir);
    }
    dialog
}

/// Existing directory holding the current path, if it names one
pub fn start_dir(current: &str) -> Option<PathBuf> {
    let current = Path::new(current.trim());
    let dir = if current.is_dir() {
        current
    } else {
        current.parent()?
    };
    (!dir.as_os_str().is_empty() && dir.is_dir()).then(|| dir.to_path_buf())
}
