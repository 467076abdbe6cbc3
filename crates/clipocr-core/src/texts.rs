use clipocr_types::{InterfaceLanguage, OcrLanguage};

/// Every user-visible string of the interface, for one language
#[derive(Debug)]
pub struct UiTexts {
    pub title: &'static str,
    pub new_button: &'static str,
    pub language_label: &'static str,
    pub delay_label: &'static str,
    pub text_button: &'static str,
    pub image_button: &'static str,
    pub about_title: &'static str,
    pub about_message: &'static str,
    pub warning_no_screenshot: &'static str,
    pub info_image_copied: &'static str,
    pub info_text_copied: &'static str,
    pub info_no_text: &'static str,
    pub error_tesseract_not_found: &'static str,
    pub error_ocr: &'static str,
    pub warning_screenshot_failed: &'static str,
    pub menu_languages: &'static str,
    pub menu_configuration: &'static str,
    pub menu_about: &'static str,
    pub config_title: &'static str,
    pub config_tesseract_path: &'static str,
    pub config_validate: &'static str,
    pub config_browse: &'static str,
    pub config_save: &'static str,
    pub config_cancel: &'static str,
    pub config_no_path: &'static str,
    pub config_invalid_path: &'static str,
    pub config_validation_success: &'static str,
    pub config_validation_error: &'static str,
    pub config_invalid_config_title: &'static str,
    pub config_invalid_config_message: &'static str,
    pub config_save_failed: &'static str,
    pub error_copy_image_failed: &'static str,
    pub error_copy_text_failed: &'static str,
    pub info_copy_not_supported: &'static str,
    pub warning_title: &'static str,
    pub info_title: &'static str,
    pub error_title: &'static str,
    pub status_ready: &'static str,
    pub status_working: &'static str,
    pub placeholder: &'static str,
    ocr_languages: [&'static str; 4],
}

static TURKISH: UiTexts = UiTexts {
    title: "Ekran Kesme-Kopyalama Aracı",
    new_button: "+ Yeni",
    language_label: "OCR dili:",
    delay_label: "Gecikme (sn):",
    text_button: "Yazı",
    image_button: "Resim",
    about_title: "Hakkında",
    about_message: concat!("Ekran Alıntısı Aracı\nSürüm ", env!("CARGO_PKG_VERSION")),
    warning_no_screenshot: "Önce bir ekran görüntüsü alın.",
    info_image_copied: "Resim panoya kopyalandı.",
    info_text_copied: "Metin panoya kopyalandı.",
    info_no_text: "Seçilen alanda metin bulunamadı.",
    error_tesseract_not_found: "Tesseract OCR bulunamadı. Lütfen Tesseract'ı yükleyin veya yolunu yapılandırın.",
    error_ocr: "OCR işlemi sırasında bir hata oluştu:\n{}",
    warning_screenshot_failed: "Ekran görüntüsü alınamadı.",
    menu_languages: "Diller",
    menu_configuration: "Ayarlar",
    menu_about: "Hakkında",
    config_title: "Ayarlar",
    config_tesseract_path: "Tesseract OCR Yolu",
    config_validate: "Doğrula",
    config_browse: "Gözat...",
    config_save: "Kaydet",
    config_cancel: "İptal",
    config_no_path: "Tesseract yolu belirtilmedi!",
    config_invalid_path: "Geçersiz yol: Dosya bulunamadı!",
    config_validation_success: "Tesseract OCR {} doğrulandı ✓",
    config_validation_error: "Doğrulama hatası:\n{}",
    config_invalid_config_title: "Geçersiz Ayarlar",
    config_invalid_config_message: "Lütfen Tesseract yolunu doğrulayın ve tekrar deneyin.",
    config_save_failed: "Ayarlar kaydedilemedi:\n{}",
    error_copy_image_failed: "Resmi panoya kopyalama başarısız:\n{}",
    error_copy_text_failed: "Metni panoya kopyalama başarısız:\n{}",
    info_copy_not_supported: "Resim panoya kopyalanamıyor. Bu özellik mevcut platformda desteklenmiyor.",
    warning_title: "Uyarı",
    info_title: "Bilgi",
    error_title: "Hata",
    status_ready: "Hazır",
    status_working: "İşleniyor...",
    placeholder: "Yeni bir ekran görüntüsü için \"+ Yeni\" düğmesine basın.",
    ocr_languages: ["Türkçe", "İngilizce", "Almanca", "Fransızca"],
};

static ENGLISH: UiTexts = UiTexts {
    title: "Screen Cut-Copy Tool",
    new_button: "+ New",
    language_label: "OCR lang:",
    delay_label: "Delay (s):",
    text_button: "Text",
    image_button: "Image",
    about_title: "About",
    about_message: concat!("Screen Capture Tool\nVersion ", env!("CARGO_PKG_VERSION")),
    warning_no_screenshot: "Please capture a screenshot first.",
    info_image_copied: "Image copied to clipboard.",
    info_text_copied: "Text copied to clipboard.",
    info_no_text: "No text was found in the selected area.",
    error_tesseract_not_found: "Tesseract OCR not found. Please install Tesseract or configure its path.",
    error_ocr: "An error occurred during OCR:\n{}",
    warning_screenshot_failed: "Failed to capture the screenshot.",
    menu_languages: "Languages",
    menu_configuration: "Settings",
    menu_about: "About",
    config_title: "Settings",
    config_tesseract_path: "Tesseract OCR Path",
    config_validate: "Validate",
    config_browse: "Browse...",
    config_save: "Save",
    config_cancel: "Cancel",
    config_no_path: "Tesseract path not specified!",
    config_invalid_path: "Invalid path: File not found!",
    config_validation_success: "Tesseract OCR {} validated ✓",
    config_validation_error: "Validation error:\n{}",
    config_invalid_config_title: "Invalid Settings",
    config_invalid_config_message: "Please validate the Tesseract path and try again.",
    config_save_failed: "Failed to save settings:\n{}",
    error_copy_image_failed: "Failed to copy image to clipboard:\n{}",
    error_copy_text_failed: "Failed to copy text to clipboard:\n{}",
    info_copy_not_supported: "Cannot copy image to clipboard. This feature is not supported on the current platform.",
    warning_title: "Warning",
    info_title: "Info",
    error_title: "Error",
    status_ready: "Ready",
    status_working: "Working...",
    placeholder: "Press \"+ New\" to take a screenshot.",
    ocr_languages: ["Turkish", "English", "German", "French"],
};

impl UiTexts {
    pub fn for_language(language: InterfaceLanguage) -> &'static UiTexts {
        match language {
            InterfaceLanguage::Turkish => &TURKISH,
            InterfaceLanguage::English => &ENGLISH,
        }
    }

    /// Display name of an OCR language in this interface language
    pub fn ocr_language_name(&self, language: OcrLanguage) -> &'static str {
        self.ocr_languages[language.index()]
    }

    /// Display names in the order of [`OcrLanguage::ALL`]
    pub fn ocr_language_names(&self) -> &[&'static str] {
        &self.ocr_languages
    }

    /// Reverse lookup from a display name, used when a combo box only reports its text
    pub fn ocr_language_by_name(&self, name: &str) -> Option<OcrLanguage> {
        self.ocr_languages
            .iter()
            .position(|n| *n == name)
            .map(OcrLanguage::from_index)
    }
}

/// Substitute the `{}` placeholder of a message template
pub fn format_message(template: &str, detail: impl std::fmt::Display) -> String {
    template.replacen("{}", &detail.to_string(), 1)
}
