use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach `handler` to `event` on `target`. The closure lives for the page lifetime.
pub fn add_listener(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("[dom] failed to listen for {}: {:?}", event, e);
    }
    closure.forget();
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => add_listener(&el, "click", move |ev| {
            ev.prevent_default();
            ev.stop_propagation();
            handler();
        }),
        None => log::warn!("[dom] missing #{}", element_id),
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing store in step with its CSS size.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    add_listener(&window, "resize", move |_| sync_canvas_backing_size(&canvas));
}

/// Replace the class of the first `<i>` icon inside `#element_id`.
pub fn set_icon(document: &web::Document, element_id: &str, class_name: &str) {
    let icon = document
        .get_element_by_id(element_id)
        .and_then(|el| el.query_selector("i").ok().flatten());
    if let Some(icon) = icon {
        icon.set_class_name(class_name);
    }
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// `data-particle-count` on the canvas, when present and positive.
pub fn particle_count_override(canvas: &web::HtmlCanvasElement, attr: &str) -> Option<usize> {
    let raw = canvas.get_attribute(attr)?;
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            log::warn!("[dom] ignoring {}={:?}", attr, raw);
            None
        }
    }
}

/// Positive finite `radius` attribute of an A-Frame primitive.
pub fn radius_attr(el: &web::Element) -> Option<f32> {
    el.get_attribute("radius")?
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|r| r.is_finite() && *r > 0.0)
}
