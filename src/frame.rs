use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::Subscription;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop that can be cancelled.
///
/// The tick closure re-arms itself each frame. Stopping cancels the pending
/// request and drops the closure, releasing everything it captured.
pub struct FrameLoop {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut() + 'static) -> Self {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let pending_clone = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_clone.set(None);
            on_frame();
            pending_clone.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));
        pending.set(request_frame(&tick));
        Self { tick, pending }
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

impl Subscription for FrameLoop {
    fn unsubscribe(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}
