use folio_core::{PageScroll, Subscription, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{LABEL_CLASS, LABEL_STYLE};

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{id} is not a canvas: {:?}", e))
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Called once per activation.
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

fn js_f32(v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f32 {
    v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
}

pub fn window_viewport() -> Viewport {
    match web::window() {
        Some(w) => Viewport::new(js_f32(w.inner_width()), js_f32(w.inner_height())),
        None => Viewport::new(0.0, 0.0),
    }
}

/// CSS-pixel viewport of an element and its top-left in client space.
pub fn element_viewport(el: &web::Element) -> (Viewport, (f32, f32)) {
    let rect = el.get_bounding_client_rect();
    (
        Viewport::new(rect.width() as f32, rect.height() as f32),
        (rect.left() as f32, rect.top() as f32),
    )
}

pub fn page_scroll() -> PageScroll {
    let Some(w) = web::window() else {
        return PageScroll::default();
    };
    let document_height = w
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(0.0);
    PageScroll {
        scroll_top: w.scroll_y().unwrap_or(0.0) as f32,
        viewport_height: js_f32(w.inner_height()),
        document_height,
    }
}

pub fn open_link(url: &str) {
    let Some(w) = web::window() else {
        return;
    };
    match w.open_with_url_and_target(url, "_blank") {
        Ok(_) => log::info!("[world] opened {url}"),
        Err(e) => log::warn!("[world] window.open failed: {:?}", e),
    }
}

pub fn set_cursor(el: &web::HtmlElement, pointer: bool) {
    _ = el
        .style()
        .set_property("cursor", if pointer { "pointer" } else { "default" });
}

/// Absolutely positioned text labels, one per project marker.
pub struct MarkerLabels {
    elements: Vec<web::HtmlElement>,
}

impl MarkerLabels {
    /// Labels are appended to the canvas parent so they overlay the canvas.
    pub fn create(canvas: &web::HtmlCanvasElement, titles: &[String]) -> anyhow::Result<Self> {
        let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let parent = canvas
            .parent_element()
            .ok_or_else(|| anyhow::anyhow!("canvas has no parent"))?;
        let mut elements = Vec::with_capacity(titles.len());
        for title in titles {
            let el = document
                .create_element("div")
                .map_err(|e| anyhow::anyhow!("{:?}", e))?
                .dyn_into::<web::HtmlElement>()
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el.set_class_name(LABEL_CLASS);
            _ = el.set_attribute("style", LABEL_STYLE);
            el.set_text_content(Some(title));
            parent
                .append_child(&el)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            elements.push(el);
        }
        Ok(Self { elements })
    }

    /// Place label `i` at canvas-relative CSS pixels, or hide it.
    pub fn place(&self, i: usize, at: Option<(f32, f32)>, highlighted: bool) {
        let Some(el) = self.elements.get(i) else {
            return;
        };
        let style = el.style();
        match at {
            Some((x, y)) => {
                _ = style.set_property("display", "block");
                _ = style.set_property(
                    "transform",
                    &format!("translate(-50%, -100%) translate({x:.1}px, {y:.1}px)"),
                );
                _ = style.set_property("opacity", if highlighted { "1" } else { "0.75" });
            }
            None => {
                _ = style.set_property("display", "none");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn remove_all(&mut self) {
        for el in self.elements.drain(..) {
            el.remove();
        }
    }
}

impl Subscription for MarkerLabels {
    fn unsubscribe(&mut self) {
        self.remove_all();
    }
}
