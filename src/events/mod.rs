//! DOM listeners feeding [`HostEvent`]s into the shared [`EventBus`], and the
//! handlers that turn them into page updates.

use crate::audio::Transport;
use crate::constants::{CURRENT_TIME_ID, DURATION_ID};
use crate::tracking::Tracking;
use crate::{dom, overlay};
use morph_core::{EventBus, EventKind, HostEvent, UiEffect, UiState};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod controls;
mod media;
mod scene;

pub use controls::wire_controls;
pub use media::wire_media;
pub use scene::wire_scene;

pub type SharedBus = Rc<RefCell<EventBus>>;

/// Dispatch `event` now, so that playback requests stay inside the user gesture.
pub fn emit(bus: &SharedBus, event: HostEvent) {
    match bus.try_borrow_mut() {
        Ok(mut b) => {
            b.emit(event);
        }
        Err(_) => log::warn!("[events] {:?} raised during dispatch, dropped", event.kind()),
    }
}

/// One handler per event kind: tracking visibility first, then the UI state machine.
pub fn install_handlers(
    bus: &SharedBus,
    document: &web::Document,
    audio: &Transport,
    ui: Rc<RefCell<UiState>>,
    tracking: Rc<RefCell<Tracking>>,
) {
    let mut bus = bus.borrow_mut();
    for kind in EventKind::ALL {
        let document = document.clone();
        let audio = audio.clone();
        let ui = ui.clone();
        let tracking = tracking.clone();
        bus.dispatcher.on(kind, move |event| {
            match event {
                HostEvent::TargetFound => tracking.borrow_mut().set_visible(true),
                HostEvent::TargetLost => tracking.borrow_mut().set_visible(false),
                _ => {}
            }
            let effects = ui.borrow_mut().handle(event);
            for effect in effects {
                apply_effect(&document, &audio, effect);
            }
        });
    }
}

fn apply_effect(document: &web::Document, audio: &Transport, effect: UiEffect) {
    match effect {
        UiEffect::ScanningFaded(faded) => overlay::set_scanning_faded(document, faded),
        UiEffect::LyricsVisible(visible) => overlay::set_lyrics_visible(document, visible),
        UiEffect::PlayIcon(icon) => overlay::set_play_icon(document, icon),
        UiEffect::SeekMax(max_s) => overlay::set_seek_max(document, max_s),
        UiEffect::SeekValue(value_s) => overlay::set_seek_value(document, value_s),
        UiEffect::CurrentTimeText(text) => dom::set_text(document, CURRENT_TIME_ID, &text),
        UiEffect::DurationText(text) => dom::set_text(document, DURATION_ID, &text),
        UiEffect::RequestPlay => audio.play(),
        UiEffect::RequestPause => audio.pause(),
        UiEffect::SeekAudio(position_s) => audio.seek(position_s),
        UiEffect::OpenWebsite => overlay::open_website(),
    }
}
