use std::cell::RefCell;
use std::rc::Rc;

use folio_core::ParticleFieldScene;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::frame::FrameLoop;
use crate::render::{GpuContext, ParticleRenderer};
use crate::{claim_canvas, dom, events, to_js_error, HostLifecycle};

/// Live particle backdrop. Call `deactivate` when the page unmounts it.
#[wasm_bindgen]
pub struct ParticleFieldHandle {
    lifecycle: HostLifecycle,
}

#[wasm_bindgen]
impl ParticleFieldHandle {
    pub fn deactivate(&mut self) {
        let mut lifecycle = self.lifecycle.borrow_mut();
        let released = lifecycle.held();
        if lifecycle.deactivate() {
            log::info!("[particles] deactivated, released {released} resources");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.lifecycle.borrow().is_active()
    }
}

#[wasm_bindgen(js_name = activateParticleField)]
pub fn activate_particle_field(canvas_id: &str) -> Result<ParticleFieldHandle, JsValue> {
    activate(canvas_id).map_err(to_js_error)
}

fn activate(canvas_id: &str) -> anyhow::Result<ParticleFieldHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas = dom::canvas_by_id(canvas_id)?;
    let shared = claim_canvas(canvas_id)?;
    let mut lifecycle = shared.borrow_mut();
    dom::sync_canvas_backing_size(&canvas);

    let scene = Rc::new(RefCell::new(ParticleFieldScene::new(
        dom::window_viewport(),
        rand::random(),
    )?));
    let renderer: Rc<RefCell<Option<ParticleRenderer>>> = Rc::new(RefCell::new(None));

    let target: &web::EventTarget = window.as_ref();
    let s = scene.clone();
    lifecycle.hold(Box::new(events::listen(
        target,
        "pointermove",
        true,
        move |ev: web::PointerEvent| {
            s.borrow_mut()
                .handle(events::pointer_move(&ev, (0.0, 0.0)), dom::page_scroll());
        },
    )?));
    let s = scene.clone();
    lifecycle.hold(Box::new(events::listen(
        target,
        "wheel",
        true,
        move |ev: web::WheelEvent| {
            // sampled before the page scrolls, so the edge test sees the pre-wheel position
            s.borrow_mut().handle(events::wheel(&ev), dom::page_scroll());
        },
    )?));

    let scene_weak = Rc::downgrade(&scene);
    let renderer_weak = Rc::downgrade(&renderer);
    let s = scene;
    lifecycle.hold(Box::new(FrameLoop::start(move || {
        let mut scene = s.borrow_mut();
        scene.tick();
        if let Some(r) = renderer.borrow_mut().as_mut() {
            r.render(&scene.frame());
        }
    })));

    spawn_local(async move {
        let pending = match GpuContext::request(&canvas).await {
            Ok(pending) => pending,
            Err(e) => {
                log::error!("[gpu] particle field init failed: {e:#}");
                return;
            }
        };
        let (Some(scene), Some(slot)) = (scene_weak.upgrade(), renderer_weak.upgrade()) else {
            log::info!("[gpu] particle field deactivated during init, discarding device");
            return;
        };
        let gpu = match pending.configure() {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("[gpu] particle field surface setup failed: {e:#}");
                return;
            }
        };
        let r = ParticleRenderer::new(gpu, scene.borrow().cloud());
        *slot.borrow_mut() = Some(r);
    });

    log::info!("[particles] activated on #{canvas_id}");
    drop(lifecycle);
    Ok(ParticleFieldHandle { lifecycle: shared })
}
