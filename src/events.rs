use folio_core::{InputEvent, Subscription};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A DOM event listener that removes itself on unsubscribe.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Option<Closure<dyn FnMut(web::Event)>>,
}

impl Subscription for Listener {
    fn unsubscribe(&mut self) {
        if let Some(closure) = self.closure.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(self.kind, closure.as_ref().unchecked_ref());
        }
    }
}

/// Register `handler` for `kind` on `target`. Events that are not an `E` are
/// ignored. Non-passive listeners may call `prevent_default`.
pub fn listen<E>(
    target: &web::EventTarget,
    kind: &'static str,
    passive: bool,
    mut handler: impl FnMut(E) + 'static,
) -> anyhow::Result<Listener>
where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| anyhow::anyhow!("addEventListener({kind}) failed: {:?}", e))?;
    log::debug!("[input] listening for {kind}");
    Ok(Listener {
        target: target.clone(),
        kind,
        closure: Some(closure),
    })
}

/// Client coordinates relative to an element origin.
#[inline]
pub fn relative_point(ev: &web::MouseEvent, origin: (f32, f32)) -> (f32, f32) {
    (
        ev.client_x() as f32 - origin.0,
        ev.client_y() as f32 - origin.1,
    )
}

#[inline]
pub fn pointer_move(ev: &web::PointerEvent, origin: (f32, f32)) -> InputEvent {
    let (client_x, client_y) = relative_point(ev, origin);
    InputEvent::PointerMove { client_x, client_y }
}

#[inline]
pub fn click(ev: &web::MouseEvent, origin: (f32, f32)) -> InputEvent {
    let (client_x, client_y) = relative_point(ev, origin);
    InputEvent::Click { client_x, client_y }
}

#[inline]
pub fn wheel(ev: &web::WheelEvent) -> InputEvent {
    InputEvent::Wheel {
        delta_y: ev.delta_y() as f32,
    }
}
