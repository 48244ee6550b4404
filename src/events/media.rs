use super::{emit, SharedBus};
use crate::constants::SEEK_BAR_ID;
use crate::dom;
use morph_core::HostEvent;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Transport events from the audio element and the seek bar.
pub fn wire_media(bus: &SharedBus, document: &web::Document, audio: &web::HtmlAudioElement) {
    for (name, event) in [
        ("play", HostEvent::Play),
        ("pause", HostEvent::Pause),
        ("ended", HostEvent::Ended),
    ] {
        let bus = bus.clone();
        dom::add_listener(audio, name, move |_| emit(&bus, event.clone()));
    }

    {
        let bus = bus.clone();
        let el = audio.clone();
        dom::add_listener(audio, "loadedmetadata", move |_| {
            emit(
                &bus,
                HostEvent::LoadedMetadata {
                    duration_s: el.duration(),
                },
            )
        });
    }
    {
        let bus = bus.clone();
        let el = audio.clone();
        dom::add_listener(audio, "timeupdate", move |_| {
            emit(
                &bus,
                HostEvent::TimeUpdate {
                    current_s: el.current_time(),
                    duration_s: el.duration(),
                },
            )
        });
    }

    let seek_bar = document
        .get_element_by_id(SEEK_BAR_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok());
    match seek_bar {
        Some(bar) => {
            let bus = bus.clone();
            let input = bar.clone();
            dom::add_listener(&bar, "input", move |_| {
                emit(
                    &bus,
                    HostEvent::Seek {
                        position_s: input.value_as_number(),
                    },
                )
            });
        }
        None => log::warn!("[events] missing #{}", SEEK_BAR_ID),
    }
}
