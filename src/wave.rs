use std::f64::consts::TAU;

use crate::layer::{WaveCanvasConfig, WaveLayer};

/// Spatial frequency of the first layer, in radians per pixel.
pub const BASE_FREQUENCY: f64 = 0.01;
/// Added to the spatial frequency for every following layer.
pub const FREQUENCY_STEP: f64 = 0.005;
/// Converts `elapsed_ms * speed` into radians of phase.
pub const TIME_SCALE: f64 = 0.002;

pub fn frequency(index: usize) -> f64 {
    BASE_FREQUENCY + index as f64 * FREQUENCY_STEP
}

/// Spreads `count` layers evenly around one full cycle.
pub fn phase_offset(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }

    index as f64 * TAU / count as f64
}

/// Everything needed to evaluate one layer, with overrides already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerParams {
    pub baseline: f64,
    pub frequency: f64,
    pub speed: f64,
    pub amplitude: f64,
    pub phase_offset: f64,
}

impl LayerParams {
    pub fn resolve(config: &WaveCanvasConfig, layer: &WaveLayer, index: usize) -> Self {
        Self {
            baseline: layer.height,
            frequency: frequency(index),
            speed: config.speed_of(layer),
            amplitude: config.amplitude_of(layer),
            phase_offset: phase_offset(index, config.waves.len()),
        }
    }

    /// Vertical position of the wave crest line at column `x`.
    pub fn y_at(&self, x: f64, elapsed: f64) -> f64 {
        let angle = x * self.frequency + elapsed * self.speed * TIME_SCALE + self.phase_offset;

        self.baseline + angle.sin() * self.amplitude
    }
}

/// Closed polygon between a wave line and the bottom edge of the surface.
///
/// Points run bottom-left, one per column left to right, bottom-right and
/// back to bottom-left.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePath {
    points: Vec<(f64, f64)>,
}

impl WavePath {
    pub fn build(params: &LayerParams, width: u32, height: u32, elapsed: f64) -> Self {
        let (w, h) = (width as f64, height as f64);
        let mut points = Vec::with_capacity(width as usize + 3);

        points.push((0.0, h));

        for x in 0..width {
            let x = x as f64;
            points.push((x, params.y_at(x, elapsed)));
        }

        points.push((w, h));
        points.push((0.0, h));

        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// The wave line only, one point per pixel column.
    pub fn columns(&self) -> &[(f64, f64)] {
        &self.points[1..self.points.len() - 2]
    }
}
