use super::{emit, SharedBus};
use crate::constants::SCENE_SELECTOR;
use crate::dom;
use morph_core::HostEvent;
use web_sys as web;

/// Image-target tracking events from the AR scene element.
pub fn wire_scene(bus: &SharedBus, document: &web::Document) {
    let scene = match document.query_selector(SCENE_SELECTOR) {
        Ok(Some(scene)) => scene,
        _ => {
            log::warn!("[events] no {} element; tracking events disabled", SCENE_SELECTOR);
            return;
        }
    };
    for (name, event) in [
        ("targetFound", HostEvent::TargetFound),
        ("targetLost", HostEvent::TargetLost),
    ] {
        let bus = bus.clone();
        dom::add_listener(&scene, name, move |_| emit(&bus, event.clone()));
    }
    dom::add_listener(&scene, "error", |e| {
        log::error!("AR scene error: {:?}", e);
    });
}
