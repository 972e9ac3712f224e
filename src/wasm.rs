use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::animation::WaveCanvas;
use crate::error::Result;
use crate::gallery::Gallery;
use crate::layer::WaveCanvasConfig;
use crate::render::{CanvasSurface, RafScheduler};

type SharedCanvas = Rc<RefCell<WaveCanvas<CanvasSurface, RafScheduler>>>;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: crate::error::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Animated waves bound to one `<canvas>` element.
#[wasm_bindgen]
pub struct WaveWidget {
    inner: Option<SharedCanvas>,
}

#[wasm_bindgen]
impl WaveWidget {
    /// Starts animating the canvas with the given id.
    ///
    /// A missing canvas or 2D context leaves the widget idle instead of
    /// failing; only a malformed config is reported.
    #[wasm_bindgen]
    pub fn mount(canvas_id: &str, config_json: &str) -> std::result::Result<WaveWidget, JsValue> {
        init_panic_hook();

        let config = WaveCanvasConfig::from_json(config_json).map_err(to_js)?;

        let inner = match attach(canvas_id, config) {
            Ok(inner) => Some(inner),
            Err(err) => {
                console::warn_1(&format!("Waves not started on '{}': {}", canvas_id, err).into());
                None
            }
        };

        Ok(WaveWidget { inner })
    }

    #[wasm_bindgen]
    pub fn set_config(&mut self, config_json: &str) -> std::result::Result<(), JsValue> {
        let config = WaveCanvasConfig::from_json(config_json).map_err(to_js)?;

        if let Some(inner) = &self.inner {
            inner.borrow_mut().set_config(config).map_err(to_js)?;
        }

        Ok(())
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) -> std::result::Result<(), JsValue> {
        if let Some(inner) = &self.inner {
            inner.borrow_mut().stop().map_err(to_js)?;
        }

        Ok(())
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.inner
            .as_ref()
            .map(|inner| inner.borrow().is_running())
            .unwrap_or(false)
    }
}

fn attach(canvas_id: &str, config: WaveCanvasConfig) -> Result<SharedCanvas> {
    let surface = CanvasSurface::from_element_id(canvas_id)?;
    let scheduler = RafScheduler::new()?;
    let inner = Rc::new(RefCell::new(WaveCanvas::new(surface, scheduler, config)));

    let weak = Rc::downgrade(&inner);
    let callback = Closure::wrap(Box::new(move |timestamp: f64| {
        if let Some(inner) = weak.upgrade() {
            if let Err(err) = inner.borrow_mut().on_frame(timestamp) {
                console::error_1(&format!("Wave frame failed: {}", err).into());
            }
        }
    }) as Box<dyn FnMut(f64)>);

    inner.borrow_mut().scheduler_mut().bind(callback);
    inner.borrow_mut().start()?;

    Ok(inner)
}

/// The sample wave sets as a JSON array of canvas configs.
#[wasm_bindgen]
pub fn example_configs() -> std::result::Result<String, JsValue> {
    serde_json::to_string(&Gallery::examples().configs).map_err(|e| JsValue::from_str(&e.to_string()))
}
