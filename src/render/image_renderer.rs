use super::{RenderEvent, Renderer};
use crate::error::Result;

use image::RgbaImage;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
enum Output {
    /// Keep the last frame and write it on finalize
    Snapshot(PathBuf),
    /// Write every frame as `frame_NNNNN.png` into a directory
    Sequence(PathBuf),
}

/// Image file renderer that saves frames to disk
pub struct ImageRenderer {
    output: Output,
    frame_size: (u32, u32),
    last_frame: Option<RgbaImage>,
    written: usize,
}

impl ImageRenderer {
    pub fn snapshot(path: PathBuf) -> Self {
        Self::with_output(Output::Snapshot(path))
    }

    pub fn sequence(directory: PathBuf) -> Self {
        Self::with_output(Output::Sequence(directory))
    }

    fn with_output(output: Output) -> Self {
        Self {
            output,
            frame_size: (0, 0),
            last_frame: None,
            written: 0,
        }
    }

    pub fn frame_path(directory: &Path, index: usize) -> PathBuf {
        directory.join(format!("frame_{:05}.png", index))
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl Renderer for ImageRenderer {
    fn initialize(&mut self, size: (u32, u32)) -> Result<()> {
        self.frame_size = size;
        Ok(())
    }

    fn handle_event(&mut self, event: &RenderEvent) -> Result<()> {
        if let (RenderEvent::Started, Output::Sequence(directory)) = (event, &self.output) {
            fs::create_dir_all(directory)?;
            debug!("Writing frames to {}", directory.display());
        }

        Ok(())
    }

    fn present(&mut self, frame: &RgbaImage) -> Result<()> {
        debug_assert_eq!(frame.dimensions(), self.frame_size);

        match &self.output {
            Output::Snapshot(_) => {
                self.last_frame = Some(frame.clone());
            }
            Output::Sequence(directory) => {
                frame.save(Self::frame_path(directory, self.written))?;
                self.written += 1;
            }
        }

        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        match &self.output {
            Output::Snapshot(path) => {
                if let Some(image) = self.last_frame.take() {
                    image.save(path)?;
                    self.written += 1;
                    info!("Saved {}", path.display());
                }
            }
            Output::Sequence(directory) => {
                info!("Saved {} frames to {}", self.written, directory.display());
            }
        }

        Ok(())
    }
}
