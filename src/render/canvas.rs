use crate::animation::FrameScheduler;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::surface::Surface;
use crate::wave::WavePath;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_element_id(id: &str) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::surface("No global window exists"))?;
        let document = window
            .document()
            .ok_or_else(|| Error::surface("Window should have a document"))?;

        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| Error::surface(format!("Canvas element with id '{}' not found", id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::surface(format!("Element '{}' is not a canvas", id)))?;

        Self::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| Error::surface("Canvas should have 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::surface("Context is not a CanvasRenderingContext2d"))?;

        Ok(Self { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) -> Result<()> {
        let (width, height) = self.dimensions();
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
        Ok(())
    }

    fn fill(&mut self, color: Color) -> Result<()> {
        let (width, height) = self.dimensions();
        self.context.set_fill_style(&JsValue::from_str(&color.to_string()));
        self.context.fill_rect(0.0, 0.0, width as f64, height as f64);
        Ok(())
    }

    fn fill_path(&mut self, path: &WavePath, color: Color, alpha: f64) -> Result<()> {
        let mut points = path.points().iter();

        self.context.begin_path();

        if let Some(&(x, y)) = points.next() {
            self.context.move_to(x, y);
        }

        for &(x, y) in points {
            self.context.line_to(x, y);
        }

        self.context.set_fill_style(&JsValue::from_str(&color.to_string()));
        self.context.set_global_alpha(alpha);
        self.context.fill();
        self.context.set_global_alpha(1.0);

        Ok(())
    }
}

/// `requestAnimationFrame` bound to a single callback.
pub struct RafScheduler {
    window: Window,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl RafScheduler {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::scheduler("No global window exists"))?;

        Ok(Self {
            window,
            callback: None,
        })
    }

    /// Sets the closure invoked with the frame timestamp.
    pub fn bind(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32> {
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| Error::scheduler("No frame callback bound"))?;

        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| Error::scheduler(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, handle: i32) -> Result<()> {
        self.window
            .cancel_animation_frame(handle)
            .map_err(|e| Error::scheduler(format!("{:?}", e)))
    }
}
