//! Animated multi-layer filled sine waves.
//!
//! A [`WaveCanvas`] repaints a [`Surface`] every time its [`FrameScheduler`]
//! delivers a frame: white background, then one half-transparent filled
//! sine band per [`WaveLayer`], each layer a little faster in space and
//! evenly shifted in phase.

pub mod animation;
pub mod color;
pub mod error;
pub mod frame;
pub mod gallery;
pub mod layer;
pub mod render;
pub mod surface;
pub mod wave;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use animation::{AnimationState, FixedRateScheduler, FrameScheduler, WaveCanvas};
pub use color::Color;
pub use error::{Error, Result};
pub use frame::draw_frame;
pub use gallery::Gallery;
pub use layer::{WaveCanvasConfig, WaveLayer};
pub use surface::Surface;
pub use wave::{LayerParams, WavePath};
