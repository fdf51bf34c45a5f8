use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{load_projects, SimplexNoise, WorldAction, WorldFrame, WorldGeometry, WorldScene};
use glam::Vec3;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::constants::LABEL_LIFT;
use crate::dom::{self, MarkerLabels};
use crate::frame::FrameLoop;
use crate::render::{GpuContext, WorldRenderer};
use crate::{claim_canvas, events, to_js_error, HostLifecycle};

/// Live project world. Call `deactivate` when the page unmounts it.
#[wasm_bindgen]
pub struct WorldHandle {
    lifecycle: HostLifecycle,
}

#[wasm_bindgen]
impl WorldHandle {
    pub fn deactivate(&mut self) {
        let mut lifecycle = self.lifecycle.borrow_mut();
        let released = lifecycle.held();
        if lifecycle.deactivate() {
            log::info!("[world] deactivated, released {released} resources");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.lifecycle.borrow().is_active()
    }
}

/// `projects` is an array of project records, a JSON string, or null.
#[wasm_bindgen(js_name = activateWorld)]
pub fn activate_world(canvas_id: &str, projects: JsValue) -> Result<WorldHandle, JsValue> {
    activate(canvas_id, &projects).map_err(to_js_error)
}

fn projects_json(projects: &JsValue) -> String {
    if projects.is_null() || projects.is_undefined() {
        return "[]".to_string();
    }
    if let Some(s) = projects.as_string() {
        return s;
    }
    match js_sys::JSON::stringify(projects) {
        Ok(s) => String::from(s),
        Err(e) => {
            log::warn!("[projects] could not serialize input: {:?}", e);
            "[]".to_string()
        }
    }
}

fn place_labels(scene: &WorldScene, frame: &WorldFrame, labels: &MarkerLabels) {
    let viewport = scene.viewport();
    for i in 0..labels.len() {
        let at = scene
            .marker_world_position(i)
            .and_then(|p| {
                frame
                    .camera
                    .world_to_screen(p + Vec3::Y * LABEL_LIFT, viewport.width, viewport.height)
            })
            .map(|px| (px.x, px.y));
        labels.place(i, at, frame.hovered == Some(i));
    }
}

fn canvas_origin(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    dom::element_viewport(canvas).1
}

fn activate(canvas_id: &str, projects: &JsValue) -> anyhow::Result<WorldHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas = dom::canvas_by_id(canvas_id)?;
    let shared = claim_canvas(canvas_id)?;
    let mut lifecycle = shared.borrow_mut();
    dom::sync_canvas_backing_size(&canvas);

    let projects = load_projects(&projects_json(projects));
    let geometry = WorldGeometry::build(&projects, &SimplexNoise::new(rand::random()))?;
    let titles: Vec<String> = geometry.markers.iter().map(|m| m.title.clone()).collect();
    let (viewport, _) = dom::element_viewport(&canvas);
    let scene = Rc::new(RefCell::new(WorldScene::new(geometry, viewport)?));
    let renderer: Rc<RefCell<Option<WorldRenderer>>> = Rc::new(RefCell::new(None));

    let window_target: &web::EventTarget = window.as_ref();
    let canvas_target: &web::EventTarget = canvas.as_ref();

    let s = scene.clone();
    let c = canvas.clone();
    lifecycle.hold(Box::new(events::listen(
        window_target,
        "pointermove",
        true,
        move |ev: web::PointerEvent| {
            let mut scene = s.borrow_mut();
            let was = scene.hovered();
            scene.handle(events::pointer_move(&ev, canvas_origin(&c)));
            if scene.hovered().is_some() != was.is_some() {
                dom::set_cursor(&c, scene.hovered().is_some());
            }
        },
    )?));
    let s = scene.clone();
    lifecycle.hold(Box::new(events::listen(
        canvas_target,
        "wheel",
        false,
        move |ev: web::WheelEvent| {
            ev.prevent_default();
            s.borrow_mut().handle(events::wheel(&ev));
        },
    )?));
    let s = scene.clone();
    let c = canvas.clone();
    lifecycle.hold(Box::new(events::listen(
        canvas_target,
        "click",
        true,
        move |ev: web::MouseEvent| {
            let action = s.borrow_mut().handle(events::click(&ev, canvas_origin(&c)));
            if let Some(WorldAction::OpenLink(url)) = action {
                dom::open_link(&url);
            }
        },
    )?));

    let labels = Rc::new(RefCell::new(MarkerLabels::create(&canvas, &titles)?));

    let scene_weak = Rc::downgrade(&scene);
    let renderer_weak = Rc::downgrade(&renderer);
    let s = scene;
    let l = labels.clone();
    let c = canvas.clone();
    lifecycle.hold(Box::new(FrameLoop::start(move || {
        let mut scene = s.borrow_mut();
        let was = scene.hovered();
        scene.tick();
        if scene.hovered().is_some() != was.is_some() {
            dom::set_cursor(&c, scene.hovered().is_some());
        }
        let frame = scene.frame();
        if let Some(r) = renderer.borrow_mut().as_mut() {
            r.render(&frame);
        }
        place_labels(&scene, &frame, &l.borrow());
    })));
    lifecycle.hold(Box::new(labels));

    spawn_local(async move {
        let pending = match GpuContext::request(&canvas).await {
            Ok(pending) => pending,
            Err(e) => {
                log::error!("[gpu] world init failed: {e:#}");
                return;
            }
        };
        let (Some(scene), Some(slot)) = (scene_weak.upgrade(), renderer_weak.upgrade()) else {
            log::info!("[gpu] world deactivated during init, discarding device");
            return;
        };
        let gpu = match pending.configure() {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("[gpu] world surface setup failed: {e:#}");
                return;
            }
        };
        let r = WorldRenderer::new(gpu, scene.borrow().geometry());
        *slot.borrow_mut() = Some(r);
    });

    log::info!("[world] activated on #{canvas_id} with {} projects", projects.len());
    drop(lifecycle);
    Ok(WorldHandle { lifecycle: shared })
}
