//! Small browser utilities shared by the console screens.
//!
//! - **User feedback**: temporary toast notifications injected into the page.
//! - **Time**: wall-clock stamps for the activity logs.
//! - **Dirty tracking**: MD5 digests of unsaved drafts, mirrored to a global
//!   `app_dirty` flag the page can check before unloading.

use common::activity::Level;
use js_sys::{Date, Reflect};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

const TOAST_MS: u32 = 3000;

/// Shows a message at the bottom of the page for three seconds.
///
/// The text is set with `textContent`, so backend error messages are never
/// interpreted as markup.
pub fn show_toast(message: &str, level: Level) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    toast.set_class_name(&format!("toast {}", level.css_class()));

    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    let background = match level {
        Level::Info => "rgba(0, 0, 0, 0.8)",
        Level::Success => "rgba(27, 94, 32, 0.9)",
        Level::Warning => "rgba(230, 81, 0, 0.9)",
        Level::Error => "rgba(183, 28, 28, 0.9)",
    };
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", background).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Local wall-clock time, e.g. `14:03:27`.
pub fn timestamp() -> String {
    String::from(Date::new_0().to_locale_time_string("en-GB"))
}

pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}

/// `12,345`
pub fn format_count(value: u32) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Asks the operator to confirm a destructive action.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Random step of the simulated upload progress, in percent.
pub fn random_progress_increment() -> f64 {
    js_sys::Math::random() * 10.0
}
