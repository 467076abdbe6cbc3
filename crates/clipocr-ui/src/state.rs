use std::cell::{Cell, RefCell};

use clipocr_config::{Config, DELAY_OPTIONS};
use clipocr_core::texts::UiTexts;
use clipocr_types::{Frame, InterfaceLanguage, NoticeKind};
use slint::{ComponentHandle, ModelRc, SharedString, Timer, VecModel};

use crate::bridge::UiBridge;
use crate::preview::scaled_preview;
use crate::{MainWindow, OverlayWindow, SettingsDialog};

/// UI-thread state, shared by the slint callbacks
pub struct UiContext {
    pub main: MainWindow,
    pub overlay: OverlayWindow,
    pub settings: SettingsDialog,
    pub bridge: UiBridge,
    pub language: Cell<InterfaceLanguage>,
    pub tesseract_path: RefCell<String>,
    pub capture: RefCell<Option<Frame>>,
    pub resize_timer: Timer,
}

impl UiContext {
    pub fn new(config: &Config, bridge: UiBridge) -> Result<Self, slint::PlatformError> {
        let ctx = Self {
            main: MainWindow::new()?,
            overlay: OverlayWindow::new()?,
            settings: SettingsDialog::new()?,
            bridge,
            language: Cell::new(config.interface_language),
            tesseract_path: RefCell::new(config.tesseract_path.clone()),
            capture: RefCell::new(None),
            resize_timer: Timer::default(),
        };

        let delays: Vec<SharedString> = DELAY_OPTIONS.iter().map(|d| d.to_string().into()).collect();
        ctx.main.set_delay_options(ModelRc::new(VecModel::from(delays)));
        ctx.main.set_delay_index(config.delay_index() as i32);
        ctx.main.set_ocr_language_index(config.ocr_language.index() as i32);
        ctx.apply_texts(config.interface_language);

        Ok(ctx)
    }

    pub fn texts(&self) -> &'static UiTexts {
        UiTexts::for_language(self.language.get())
    }

    /// Relabel every window for an interface language
    pub fn apply_texts(&self, language: InterfaceLanguage) {
        self.language.set(language);
        let t = self.texts();

        let main = &self.main;
        main.set_app_title(t.title.into());
        main.set_new_label(t.new_button.into());
        main.set_language_label(t.language_label.into());
        main.set_delay_label(t.delay_label.into());
        main.set_text_label(t.text_button.into());
        main.set_image_label(t.image_button.into());
        main.set_menu_languages(t.menu_languages.into());
        main.set_menu_settings(t.menu_configuration.into());
        main.set_menu_about(t.menu_about.into());
        main.set_placeholder(t.placeholder.into());
        main.set_status(t.status_ready.into());

        // Keep the selected language across the model swap
        let selected = main.get_ocr_language_index();
        let names: Vec<SharedString> = t.ocr_language_names().iter().map(|n| (*n).into()).collect();
        main.set_ocr_languages(ModelRc::new(VecModel::from(names)));
        main.set_ocr_language_index(selected);

        let settings = &self.settings;
        settings.set_dialog_title(t.config_title.into());
        settings.set_path_label(t.config_tesseract_path.into());
        settings.set_validate_label(t.config_validate.into());
        settings.set_browse_label(t.config_browse.into());
        settings.set_save_label(t.config_save.into());
        settings.set_cancel_label(t.config_cancel.into());
    }

    pub fn show_notice(&self, kind: NoticeKind, message: &str) {
        let t = self.texts();
        let (title, color) = match kind {
            NoticeKind::Info => (t.info_title, slint::Color::from_rgb_u8(0x15, 0x65, 0xc0)),
            NoticeKind::Warning => (t.warning_title, slint::Color::from_rgb_u8(0xe6, 0x8a, 0x00)),
            NoticeKind::Error => (t.error_title, slint::Color::from_rgb_u8(0xc6, 0x28, 0x28)),
        };
        self.show_dialog(title, message, color);
    }

    pub fn show_dialog(&self, title: &str, message: &str, color: slint::Color) {
        self.main.set_notice_title(title.into());
        self.main.set_notice_text(message.into());
        self.main.set_notice_color(color);
        self.main.set_notice_visible(true);
        self.main.set_status(message.lines().next().unwrap_or_default().into());
    }

    /// Rescale the stored capture to the current preview area
    pub fn refresh_preview(&self) {
        let capture = self.capture.borrow();
        let Some(frame) = capture.as_ref() else {
            return;
        };

        let scale = self.main.window().scale_factor();
        let area = (
            (self.main.get_area_width() * scale) as u32,
            (self.main.get_area_height() * scale) as u32,
        );

        if let Some((image, width, height)) = scaled_preview(frame, area, scale) {
            self.main.set_preview(image);
            self.main.set_preview_width(width);
            self.main.set_preview_height(height);
        }
    }

    pub fn show_main(&self) {
        if let Err(e) = self.main.show() {
            tracing::error!("[UI] Failed to show main window: {}", e);
        }
    }
}
