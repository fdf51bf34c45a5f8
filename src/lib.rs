#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;

use folio_core::{ActivationRegistry, SharedLifecycle, Subscription};
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod events;
mod frame;
mod particles;
mod render;
mod world;

pub use particles::{activate_particle_field, ParticleFieldHandle};
pub use world::{activate_world, WorldHandle};

/// Listeners, the frame loop and DOM overlays owned by one activation.
pub(crate) type HostLifecycle = SharedLifecycle<Box<dyn Subscription>>;

thread_local! {
    // one live activation per canvas; a canvas has a single WebGPU context
    static ACTIVATIONS: RefCell<ActivationRegistry<Box<dyn Subscription>>> =
        RefCell::new(ActivationRegistry::new());
}

/// Claim `canvas_id` for a new activation.
pub(crate) fn claim_canvas(canvas_id: &str) -> anyhow::Result<HostLifecycle> {
    let lifecycle = ACTIVATIONS.with(|registry| registry.borrow_mut().claim(canvas_id))?;
    Ok(lifecycle)
}

pub(crate) fn to_js_error(e: anyhow::Error) -> JsValue {
    log::error!("activation failed: {e:#}");
    JsValue::from_str(&format!("{e:#}"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web loaded");
    Ok(())
}
