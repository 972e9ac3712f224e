pub mod events;

#[cfg(feature = "image")]
pub mod image_surface;

#[cfg(feature = "image")]
pub mod image_renderer;

#[cfg(feature = "sdl2")]
pub mod sdl_renderer;

#[cfg(feature = "wasm")]
pub mod canvas;

pub use events::RenderEvent;

#[cfg(feature = "image")]
pub use image_renderer::ImageRenderer;
#[cfg(feature = "image")]
pub use image_surface::ImageSurface;

#[cfg(feature = "sdl2")]
pub use sdl_renderer::{SdlConfig, SdlRenderer};

#[cfg(feature = "wasm")]
pub use canvas::{CanvasSurface, RafScheduler};

#[cfg(feature = "image")]
use crate::error::Result;

/// Sink for composed frames
#[cfg(feature = "image")]
pub trait Renderer {
    /// Initialize the renderer with the size of every frame it will receive
    fn initialize(&mut self, size: (u32, u32)) -> Result<()>;

    /// Handle a render event
    fn handle_event(&mut self, _event: &RenderEvent) -> Result<()> {
        Ok(())
    }

    /// Show or store one composed frame
    fn present(&mut self, frame: &image::RgbaImage) -> Result<()>;

    /// Check if the user wants to quit (for interactive renderers)
    fn should_quit(&mut self) -> bool {
        false
    }

    /// Finalize rendering (e.g., save to file)
    fn finalize(&mut self) -> Result<()>;
}
