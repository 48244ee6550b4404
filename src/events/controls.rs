use super::{emit, SharedBus};
use crate::constants::{AUDIO_CONTROL_ID, TOGGLE_LYRICS_ID, WEBSITE_BUTTON_ID};
use crate::dom;
use morph_core::HostEvent;
use web_sys as web;

pub fn wire_controls(bus: &SharedBus, document: &web::Document) {
    for (id, event) in [
        (AUDIO_CONTROL_ID, HostEvent::AudioControlClicked),
        (TOGGLE_LYRICS_ID, HostEvent::ToggleLyricsClicked),
        (WEBSITE_BUTTON_ID, HostEvent::WebsiteClicked),
    ] {
        let bus = bus.clone();
        dom::add_click_listener(document, id, move || emit(&bus, event.clone()));
    }
}
