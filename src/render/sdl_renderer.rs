use super::Renderer;
use crate::error::{Error, Result};

use image::RgbaImage;
use sdl2::event::Event;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture};
use sdl2::video::{FullscreenType, Window};
use sdl2::EventPump;

/// SDL2 window showing each composed frame as it is produced
pub struct SdlRenderer {
    canvas: Canvas<Window>,
    events: EventPump,
    texture: Option<Texture>,
    frame_size: (u32, u32),
    should_quit: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SdlConfig {
    pub window_size: (u32, u32),
    pub vsync: bool,
    pub fullscreen: bool,
}

impl SdlRenderer {
    pub fn new(config: &SdlConfig) -> Result<Self> {
        let context = sdl2::init().map_err(Error::surface)?;
        let video = context.video().map_err(Error::surface)?;

        let mut window = video
            .window("Waves", config.window_size.0, config.window_size.1)
            .position_centered()
            .build()
            .map_err(|e| Error::surface(e.to_string()))?;

        if config.fullscreen {
            window
                .set_fullscreen(FullscreenType::True)
                .map_err(Error::surface)?;
        }

        let mut builder = window.into_canvas();

        if config.vsync {
            builder = builder.present_vsync();
        }

        let canvas = builder.build().map_err(|e| Error::surface(e.to_string()))?;
        let events = context.event_pump().map_err(Error::surface)?;

        Ok(Self {
            canvas,
            events,
            texture: None,
            frame_size: config.window_size,
            should_quit: false,
        })
    }

    fn handle_events(&mut self) {
        for event in self.events.poll_iter() {
            if let Event::Quit { .. } = event {
                self.should_quit = true;
            }
        }
    }
}

impl Renderer for SdlRenderer {
    fn initialize(&mut self, size: (u32, u32)) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, size.0, size.1)
            .map_err(|e| Error::surface(e.to_string()))?;

        self.texture = Some(texture);
        self.frame_size = size;

        Ok(())
    }

    fn should_quit(&mut self) -> bool {
        self.handle_events();
        self.should_quit
    }

    fn present(&mut self, frame: &RgbaImage) -> Result<()> {
        let texture = self
            .texture
            .as_mut()
            .ok_or_else(|| Error::surface("Renderer not initialized"))?;
        let row = self.frame_size.0 as usize * 4;

        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                for (y, line) in frame.as_raw().chunks(row).enumerate() {
                    let offset = y * pitch;
                    buffer[offset..offset + row].copy_from_slice(line);
                }
            })
            .map_err(Error::surface)?;

        self.canvas.clear();
        self.canvas
            .copy(texture, None, None)
            .map_err(Error::surface)?;
        self.canvas.present();

        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if let Some(texture) = self.texture.take() {
            // not freed automatically with `unsafe_textures`
            unsafe { texture.destroy() };
        }

        Ok(())
    }
}
