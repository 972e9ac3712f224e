use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::Result;

pub const DEFAULT_BASE_SPEED: f64 = 0.5;
pub const DEFAULT_BASE_AMPLITUDE: f64 = 20.0;

/// One filled sine band.
///
/// `speed` and `amplitude` are overrides: an absent value falls back to the
/// canvas base value, an explicit `0.0` is honored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveLayer {
    pub color: Color,
    /// Baseline, in pixels from the top of the surface.
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f64>,
}

impl WaveLayer {
    pub fn new(color: Color, height: f64) -> Self {
        Self {
            color,
            height,
            speed: None,
            amplitude: None,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = Some(amplitude);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveCanvasConfig {
    pub width: u32,
    pub height: u32,
    pub waves: Vec<WaveLayer>,
    #[serde(default = "default_base_speed")]
    pub base_speed: f64,
    #[serde(default = "default_base_amplitude")]
    pub base_amplitude: f64,
}

fn default_base_speed() -> f64 {
    DEFAULT_BASE_SPEED
}

fn default_base_amplitude() -> f64 {
    DEFAULT_BASE_AMPLITUDE
}

impl WaveCanvasConfig {
    pub fn new(width: u32, height: u32, waves: Vec<WaveLayer>) -> Self {
        Self {
            width,
            height,
            waves,
            base_speed: DEFAULT_BASE_SPEED,
            base_amplitude: DEFAULT_BASE_AMPLITUDE,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn speed_of(&self, layer: &WaveLayer) -> f64 {
        layer.speed.unwrap_or(self.base_speed)
    }

    pub fn amplitude_of(&self, layer: &WaveLayer) -> f64 {
        layer.amplitude.unwrap_or(self.base_amplitude)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
