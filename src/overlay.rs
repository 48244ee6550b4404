use crate::constants::*;
use crate::dom;
use morph_core::PlayIcon;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fade the scanning overlay out while the target is tracked.
pub fn set_scanning_faded(document: &web::Document, faded: bool) {
    if let Some(el) = document.get_element_by_id(SCANNING_OVERLAY_ID) {
        let cl = el.class_list();
        _ = if faded {
            cl.add_1(FADE_OUT_CLASS)
        } else {
            cl.remove_1(FADE_OUT_CLASS)
        };
    }
}

pub fn set_lyrics_visible(document: &web::Document, visible: bool) {
    let el = document
        .get_element_by_id(LYRICS_OVERLAY_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    if let Some(el) = el {
        let display = if visible { "flex" } else { "none" };
        // page CSS styles the overlay too; inline !important wins
        _ = el
            .style()
            .set_property_with_priority("display", display, "important");
    }
    let icon = if visible {
        ICON_LYRICS_CLOSE
    } else {
        ICON_LYRICS_SHOW
    };
    dom::set_icon(document, TOGGLE_LYRICS_ID, icon);
}

pub fn set_play_icon(document: &web::Document, icon: PlayIcon) {
    let class_name = match icon {
        PlayIcon::Play => ICON_PLAY,
        PlayIcon::Pause => ICON_PAUSE,
    };
    dom::set_icon(document, AUDIO_CONTROL_ID, class_name);
}

fn seek_bar(document: &web::Document) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(SEEK_BAR_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

pub fn set_seek_max(document: &web::Document, max_s: f64) {
    if let Some(bar) = seek_bar(document) {
        bar.set_max(&max_s.to_string());
    }
}

pub fn set_seek_value(document: &web::Document, value_s: f64) {
    if let Some(bar) = seek_bar(document) {
        bar.set_value_as_number(value_s);
    }
}

pub fn open_website() {
    if let Some(w) = web::window() {
        if let Err(e) = w.open_with_url_and_target(WEBSITE_URL, WEBSITE_TARGET) {
            log::error!("window.open failed: {:?}", e);
        }
    }
}
