use crate::color::Color;
use crate::error::Result;
use crate::wave::WavePath;

/// A drawing target of fixed pixel size.
pub trait Surface {
    /// Sets the backing buffer to exactly `width` x `height` pixels.
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    fn dimensions(&self) -> (u32, u32);

    /// Resets every pixel to transparent.
    fn clear(&mut self) -> Result<()>;

    /// Paints the whole surface with an opaque color.
    fn fill(&mut self, color: Color) -> Result<()>;

    /// Composites the closed path over the current contents. `alpha` only
    /// applies to this call.
    fn fill_path(&mut self, path: &WavePath, color: Color, alpha: f64) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        (**self).resize(width, height)
    }

    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn fill(&mut self, color: Color) -> Result<()> {
        (**self).fill(color)
    }

    fn fill_path(&mut self, path: &WavePath, color: Color, alpha: f64) -> Result<()> {
        (**self).fill_path(path, color, alpha)
    }
}
