use log::trace;

use crate::color::Color;
use crate::error::Result;
use crate::layer::WaveCanvasConfig;
use crate::surface::Surface;
use crate::wave::{LayerParams, WavePath};

/// Opacity every layer is filled with.
pub const LAYER_ALPHA: f64 = 0.5;

pub const BACKGROUND: Color = Color::WHITE;

/// Builds the closed path of every layer, in paint order.
pub fn layer_paths(config: &WaveCanvasConfig, elapsed: f64) -> Vec<(Color, WavePath)> {
    config
        .waves
        .iter()
        .enumerate()
        .map(|(index, layer)| {
            let params = LayerParams::resolve(config, layer, index);
            let path = WavePath::build(&params, config.width, config.height, elapsed);

            (layer.color, path)
        })
        .collect()
}

/// Repaints the whole surface for `elapsed` milliseconds into the animation.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    config: &WaveCanvasConfig,
    elapsed: f64,
) -> Result<()> {
    trace!("drawing {} layers at {:.1}ms", config.waves.len(), elapsed);

    surface.clear()?;
    surface.fill(BACKGROUND)?;

    for (color, path) in layer_paths(config, elapsed) {
        surface.fill_path(&path, color, LAYER_ALPHA)?;
    }

    Ok(())
}
