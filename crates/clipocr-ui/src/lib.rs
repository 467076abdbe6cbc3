use std::rc::Rc;
use std::time::Duration;

use clipocr_config::{Config, DELAY_OPTIONS};
use clipocr_types::{AppEvent, CaptureRegion, CopyTarget, InterfaceLanguage, OcrLanguage};
use kanal::{AsyncReceiver, AsyncSender};
use slint::{ComponentHandle, TimerMode};

mod bridge;
mod browse;
mod events;
mod preview;
mod state;

pub use bridge::UiBridge;
use state::UiContext;

slint::include_modules!();

const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Run the interface on the current thread until the main window closes.
///
/// Must be called from the main thread on macOS.
pub fn run(
    config: &Config,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let bridge = UiBridge::new(ui_to_app_tx);
    let ctx = Rc::new(UiContext::new(config, bridge.clone())?);

    wire_main_window(&ctx);
    wire_overlay(&ctx);
    wire_settings(&ctx);

    bridge::forward_from_backend(app_to_ui_rx, Rc::downgrade(&ctx))?;

    ctx.main.window().on_close_requested(|| {
        let _ = slint::quit_event_loop();
        slint::CloseRequestResponse::HideWindow
    });

    ctx.main.show()?;
    tracing::info!("[UI] Main window shown");

    // Windows get hidden during capture, so do not stop when none is visible
    slint::run_event_loop_until_quit()?;

    bridge.emit(AppEvent::Shutdown);
    tracing::info!("[UI] Event loop finished");
    Ok(())
}

fn wire_main_window(ctx: &Rc<UiContext>) {
    let main = &ctx.main;

    let weak = Rc::downgrade(ctx);
    main.on_new_capture(move || {
        let Some(ctx) = weak.upgrade() else { return };
        let index = ctx.main.get_delay_index().max(0) as usize;
        let delay_secs = DELAY_OPTIONS.get(index).copied().unwrap_or(0);
        ctx.bridge.emit(AppEvent::StartCapture { delay_secs });
    });

    let weak = Rc::downgrade(ctx);
    main.on_copy_text(move || {
        let Some(ctx) = weak.upgrade() else { return };
        let language = OcrLanguage::from_index(ctx.main.get_ocr_language_index().max(0) as usize);
        ctx.bridge.emit(AppEvent::Copy {
            target: CopyTarget::Text,
            language,
        });
    });

    let weak = Rc::downgrade(ctx);
    main.on_copy_image(move || {
        let Some(ctx) = weak.upgrade() else { return };
        let language = OcrLanguage::from_index(ctx.main.get_ocr_language_index().max(0) as usize);
        ctx.bridge.emit(AppEvent::Copy {
            target: CopyTarget::Image,
            language,
        });
    });

    let weak = Rc::downgrade(ctx);
    main.on_preferences_changed(move |language_index, delay_index| {
        let Some(ctx) = weak.upgrade() else { return };
        ctx.bridge.emit(AppEvent::PreferencesChanged {
            language: OcrLanguage::from_index(language_index.max(0) as usize),
            delay_secs: DELAY_OPTIONS
                .get(delay_index.max(0) as usize)
                .copied()
                .unwrap_or(0),
        });
    });

    let weak = Rc::downgrade(ctx);
    main.on_switch_language(move |code| {
        let Some(ctx) = weak.upgrade() else { return };
        ctx.bridge
            .emit(AppEvent::SwitchInterfaceLanguage(InterfaceLanguage::from_code(&code)));
    });

    let weak = Rc::downgrade(ctx);
    main.on_open_settings(move || {
        let Some(ctx) = weak.upgrade() else { return };
        let path = ctx.tesseract_path.borrow().clone();
        ctx.settings.set_tesseract_path(path.as_str().into());
        ctx.settings.set_validation_text("".into());
        if let Err(e) = ctx.settings.show() {
            tracing::error!("[UI] Failed to show settings: {}", e);
            return;
        }
        // Check the current path straight away
        ctx.bridge.emit(AppEvent::ValidateTesseract(path));
    });

    let weak = Rc::downgrade(ctx);
    main.on_show_about(move || {
        let Some(ctx) = weak.upgrade() else { return };
        let t = ctx.texts();
        ctx.show_dialog(t.about_title, t.about_message, slint::Color::from_rgb_u8(0x15, 0x65, 0xc0));
    });

    let weak = Rc::downgrade(ctx);
    main.on_preview_area_resized(move || {
        let Some(ctx) = weak.upgrade() else { return };
        if ctx.capture.borrow().is_none() {
            return;
        }
        let weak = Rc::downgrade(&ctx);
        ctx.resize_timer.start(TimerMode::SingleShot, RESIZE_DEBOUNCE, move || {
            if let Some(ctx) = weak.upgrade() {
                ctx.refresh_preview();
            }
        });
    });
}

fn wire_overlay(ctx: &Rc<UiContext>) {
    let weak = Rc::downgrade(ctx);
    ctx.overlay
        .on_selected(move |x, y, width, height, view_width, view_height| {
            let Some(ctx) = weak.upgrade() else { return };
            let _ = ctx.overlay.hide();

            let selection = CaptureRegion::new(
                x.round() as i32,
                y.round() as i32,
                width.round().max(0.0) as u32,
                height.round().max(0.0) as u32,
            );
            tracing::debug!("[UI] Selected {} on {}x{} view", selection, view_width, view_height);
            ctx.bridge.emit(AppEvent::RegionSelected {
                selection,
                view_width,
                view_height,
            });
        });

    let weak = Rc::downgrade(ctx);
    ctx.overlay.on_cancelled(move || {
        let Some(ctx) = weak.upgrade() else { return };
        let _ = ctx.overlay.hide();
        ctx.show_main();
        ctx.bridge.emit(AppEvent::SelectionCancelled);
    });
}

fn wire_settings(ctx: &Rc<UiContext>) {
    let weak = Rc::downgrade(ctx);
    ctx.settings.on_validate(move |path| {
        let Some(ctx) = weak.upgrade() else { return };
        ctx.bridge.emit(AppEvent::ValidateTesseract(path.to_string()));
    });

    let weak = Rc::downgrade(ctx);
    ctx.settings.on_browse(move |current| {
        let Some(ctx) = weak.upgrade() else { return };
        let dialog = browse::tesseract_dialog(ctx.texts().config_title, &current);
        let weak = Rc::downgrade(&ctx);
        let spawned = slint::spawn_local(async move {
            let Some(file) = dialog.pick_file().await else {
                tracing::debug!("[UI] Tesseract picker closed");
                return;
            };
            let Some(ctx) = weak.upgrade() else { return };
            let path = file.path().display().to_string();
            ctx.settings.set_tesseract_path(path.as_str().into());
            ctx.bridge.emit(AppEvent::ValidateTesseract(path));
        });
        if let Err(e) = spawned {
            tracing::error!("[UI] Failed to open file picker: {}", e);
        }
    });

    let weak = Rc::downgrade(ctx);
    ctx.settings.on_save(move |path| {
        let Some(ctx) = weak.upgrade() else { return };
        ctx.bridge.emit(AppEvent::SaveSettings {
            tesseract_path: path.to_string(),
        });
    });

    let weak = Rc::downgrade(ctx);
    ctx.settings.on_cancel(move || {
        let Some(ctx) = weak.upgrade() else { return };
        let _ = ctx.settings.hide();
    });
}
