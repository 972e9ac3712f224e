use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::color::Color;
use crate::error::Result;
use crate::layer::{WaveCanvasConfig, WaveLayer};

/// Viewport width from which two cards share a row.
pub const MEDIUM_BREAKPOINT: u32 = 768;
/// Viewport width from which three cards share a row.
pub const LARGE_BREAKPOINT: u32 = 1024;

pub const PAGE_BACKGROUND: Color = Color::rgb(0xf9, 0xfa, 0xfb);

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Many(Vec<WaveCanvasConfig>),
    One(WaveCanvasConfig),
}

/// A grid of independent wave canvases ("cards").
#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    pub configs: Vec<WaveCanvasConfig>,
    pub gap: u32,
    pub padding: u32,
    pub background: Color,
}

impl Gallery {
    pub fn new(configs: Vec<WaveCanvasConfig>) -> Self {
        Self {
            configs,
            gap: 32,
            padding: 32,
            background: PAGE_BACKGROUND,
        }
    }

    /// Three sample sets of 3, 4 and 5 layers on 400x400 cards.
    pub fn examples() -> Self {
        let sets = vec![
            vec![
                WaveLayer::new(Color::rgb(0x60, 0xa5, 0xfa), 150.0).with_amplitude(15.0),
                WaveLayer::new(Color::rgb(0x93, 0xc5, 0xfd), 200.0).with_speed(0.6),
                WaveLayer::new(Color::rgb(0xbf, 0xdb, 0xfe), 250.0).with_amplitude(10.0),
            ],
            vec![
                WaveLayer::new(Color::rgb(0x10, 0xb9, 0x81), 80.0).with_amplitude(25.0),
                WaveLayer::new(Color::rgb(0x34, 0xd3, 0x99), 120.0).with_speed(0.8),
                WaveLayer::new(Color::rgb(0x6e, 0xe7, 0xb7), 160.0).with_amplitude(10.0),
                WaveLayer::new(Color::rgb(0xa7, 0xf3, 0xd0), 200.0).with_speed(0.4),
            ],
            vec![
                WaveLayer::new(Color::rgb(0x8b, 0x5c, 0xf6), 70.0).with_speed(0.5),
                WaveLayer::new(Color::rgb(0xa7, 0x8b, 0xfa), 140.0).with_amplitude(20.0),
                WaveLayer::new(Color::rgb(0xc4, 0xb5, 0xfd), 210.0).with_speed(0.7),
                WaveLayer::new(Color::rgb(0xdd, 0xd6, 0xfe), 280.0).with_amplitude(15.0),
                WaveLayer::new(Color::rgb(0xed, 0xe9, 0xfe), 350.0).with_speed(0.3),
            ],
        ];

        Self::new(
            sets.into_iter()
                .map(|waves| WaveCanvasConfig::new(400, 400, waves))
                .collect(),
        )
    }

    /// Parses either a single canvas config or an array of them.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self::new(match serde_json::from_str(raw)? {
            ConfigFile::Many(configs) => configs,
            ConfigFile::One(config) => vec![config],
        }))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);

        Ok(Self::new(match serde_json::from_reader(reader)? {
            ConfigFile::Many(configs) => configs,
            ConfigFile::One(config) => vec![config],
        }))
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Cards per row for a viewport of the given width.
    pub fn columns_for_width(&self, viewport: u32) -> usize {
        let columns = if viewport >= LARGE_BREAKPOINT {
            3
        } else if viewport >= MEDIUM_BREAKPOINT {
            2
        } else {
            1
        };

        columns.min(self.len()).max(1)
    }

    fn cell_width(&self) -> u32 {
        self.configs.iter().map(|c| c.width).max().unwrap_or(0)
    }

    fn row_heights(&self, columns: usize) -> Vec<u32> {
        self.configs
            .chunks(columns.max(1))
            .map(|row| row.iter().map(|c| c.height).max().unwrap_or(0))
            .collect()
    }

    /// Top-left corner of every card, in config order.
    pub fn layout(&self, columns: usize) -> Vec<(u32, u32)> {
        let columns = columns.max(1);
        let cell_width = self.cell_width();
        let mut output = Vec::with_capacity(self.len());
        let mut y = self.padding;

        for (row, height) in self.row_heights(columns).into_iter().enumerate() {
            let cards = (self.len() - row * columns).min(columns);

            for column in 0..cards {
                let x = self.padding + column as u32 * (cell_width + self.gap);
                output.push((x, y));
            }

            y += height + self.gap;
        }

        output
    }

    pub fn canvas_size(&self, columns: usize) -> (u32, u32) {
        let columns = columns.max(1).min(self.len()) as u32;
        let rows = self.row_heights(columns as usize);

        let width = columns * self.cell_width() + columns.saturating_sub(1) * self.gap;
        let height = rows.iter().sum::<u32>() + (rows.len() as u32).saturating_sub(1) * self.gap;

        (width + 2 * self.padding, height + 2 * self.padding)
    }

    /// Lays out one rendered frame per card on the page background.
    #[cfg(feature = "image")]
    pub fn compose(&self, frames: &[image::RgbaImage], columns: usize) -> image::RgbaImage {
        let (width, height) = self.canvas_size(columns);
        let mut page = image::RgbaImage::from_pixel(width, height, image::Rgba(self.background.to_rgba(1.0)));

        for (frame, (x, y)) in frames.iter().zip(self.layout(columns)) {
            image::imageops::overlay(&mut page, frame, x as i64, y as i64);
        }

        page
    }
}
