use crate::cli::{AppConfig, Mode};

use wave_canvas::render::{ImageRenderer, ImageSurface, RenderEvent, Renderer};
use wave_canvas::{draw_frame, FixedRateScheduler, Gallery, Surface, WaveCanvas};

#[cfg(feature = "sdl2")]
use wave_canvas::render::{SdlConfig, SdlRenderer};

use image::RgbaImage;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::thread;
use std::time::{Duration, Instant};

type Card = WaveCanvas<ImageSurface, FixedRateScheduler>;

/// Millisecond time source driving the schedulers.
enum Clock {
    RealTime(Instant),
    Simulated(f64),
}

impl Clock {
    fn now(&self) -> f64 {
        match self {
            Clock::RealTime(epoch) => epoch.elapsed().as_secs_f64() * 1000.0,
            Clock::Simulated(now) => *now,
        }
    }

    fn advance_to(&mut self, deadline: f64) {
        match self {
            Clock::RealTime(_) => {
                let wait = deadline - self.now();

                if wait > 0.0 {
                    thread::sleep(Duration::from_secs_f64(wait / 1000.0));
                }
            }
            Clock::Simulated(now) => *now = now.max(deadline),
        }
    }
}

pub struct WaveApp {
    config: AppConfig,
}

impl WaveApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let gallery = &self.config.gallery;
        let columns = gallery.columns_for_width(self.config.viewport);

        info!("{} wave canvases in {} columns", gallery.len(), columns);

        let mut renderers = self.create_renderers(gallery, columns)?;

        for renderer in &mut renderers {
            renderer.initialize(gallery.canvas_size(columns))?;
            renderer.handle_event(&RenderEvent::Started)?;
        }

        match self.config.mode {
            Mode::Snapshot { at } => self.snapshot(gallery, columns, at, &mut renderers)?,
            Mode::Animate { frames, fps } => {
                self.animate(gallery, columns, frames, fps, &mut renderers)?
            }
        }

        for renderer in &mut renderers {
            renderer.handle_event(&RenderEvent::Completed)?;
            renderer.finalize()?;
        }

        info!("Rendering completed");
        Ok(())
    }

    fn snapshot(
        &self,
        gallery: &Gallery,
        columns: usize,
        at: f64,
        renderers: &mut [Box<dyn Renderer>],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut frames = Vec::with_capacity(gallery.len());

        for config in &gallery.configs {
            let mut surface = ImageSurface::new();
            surface.resize(config.width, config.height)?;
            draw_frame(&mut surface, config, at)?;
            frames.push(surface.into_image());
        }

        let page = gallery.compose(&frames, columns);

        present(renderers, &page, 0, at)
    }

    fn animate(
        &self,
        gallery: &Gallery,
        columns: usize,
        frames: Option<usize>,
        fps: f64,
        renderers: &mut [Box<dyn Renderer>],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut cards: Vec<Card> = gallery
            .configs
            .iter()
            .map(|config| {
                WaveCanvas::new(ImageSurface::new(), FixedRateScheduler::new(fps), config.clone())
            })
            .collect();

        for card in &mut cards {
            card.start()?;
        }

        let mut clock = if self.visual() {
            Clock::RealTime(Instant::now())
        } else {
            Clock::Simulated(0.0)
        };

        let progress = match frames {
            Some(total) => ProgressBar::new(total as u64),
            None => ProgressBar::new_spinner(),
        };
        progress.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len} {per_sec:>12}",
                )?
                .progress_chars("#>-"),
        );

        let mut index = 0;
        let mut first = None;

        loop {
            if renderers.iter_mut().any(|r| r.should_quit()) {
                debug!("Renderer asked to quit");
                break;
            }

            if frames.map_or(false, |total| index >= total) {
                break;
            }

            let now = clock.now();

            if tick(&mut cards, now)? {
                let start = *first.get_or_insert(now);
                let images: Vec<RgbaImage> = cards.iter().map(|c| c.surface().image().clone()).collect();
                let page = gallery.compose(&images, columns);

                present(renderers, &page, index, now - start)?;

                index += 1;
                progress.inc(1);
            }

            let next = cards
                .iter()
                .filter_map(|c| c.scheduler().next_due())
                .fold(f64::INFINITY, f64::min);

            if !next.is_finite() {
                break;
            }

            clock.advance_to(next);
        }

        for card in &mut cards {
            card.stop()?;
        }

        progress.finish();
        info!("{} frames rendered", index);

        Ok(())
    }

    fn visual(&self) -> bool {
        #[cfg(feature = "sdl2")]
        {
            self.config.renderer.visual
        }

        #[cfg(not(feature = "sdl2"))]
        {
            false
        }
    }

    #[cfg_attr(not(feature = "sdl2"), allow(unused_variables))]
    fn create_renderers(
        &self,
        gallery: &Gallery,
        columns: usize,
    ) -> Result<Vec<Box<dyn Renderer>>, Box<dyn std::error::Error>> {
        let mut renderers: Vec<Box<dyn Renderer>> = Vec::new();

        #[cfg(feature = "sdl2")]
        if self.config.renderer.visual {
            let sdl_config = SdlConfig {
                window_size: gallery.canvas_size(columns),
                vsync: self.config.renderer.vsync,
                fullscreen: self.config.renderer.fullscreen,
            };

            renderers.push(Box::new(SdlRenderer::new(&sdl_config)?));
        }

        if let Some(output) = &self.config.renderer.output {
            let renderer = match self.config.mode {
                Mode::Snapshot { .. } => ImageRenderer::snapshot(output.clone()),
                Mode::Animate { .. } => ImageRenderer::sequence(output.clone()),
            };

            renderers.push(Box::new(renderer));
        }

        Ok(renderers)
    }
}

fn present(
    renderers: &mut [Box<dyn Renderer>],
    page: &RgbaImage,
    index: usize,
    timestamp: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let event = RenderEvent::Frame { index, timestamp };

    for renderer in renderers.iter_mut() {
        renderer.handle_event(&event)?;
        renderer.present(page)?;
    }

    Ok(())
}

/// Delivers a frame to every card whose request is due. Reports whether
/// anything was drawn.
#[cfg(not(feature = "threaded"))]
fn tick(cards: &mut [Card], now: f64) -> wave_canvas::Result<bool> {
    let mut drawn = false;

    for card in cards {
        if card.scheduler_mut().poll(now) {
            drawn |= card.on_frame(now)?;
        }
    }

    Ok(drawn)
}

#[cfg(feature = "threaded")]
fn tick(cards: &mut [Card], now: f64) -> wave_canvas::Result<bool> {
    use rayon::prelude::*;

    let drawn = cards
        .par_iter_mut()
        .map(|card| {
            if card.scheduler_mut().poll(now) {
                card.on_frame(now)
            } else {
                Ok(false)
            }
        })
        .collect::<wave_canvas::Result<Vec<bool>>>()?;

    Ok(drawn.into_iter().any(|d| d))
}
