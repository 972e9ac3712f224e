use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::pixelops::interpolate;
use imageproc::point::Point;

use crate::color::Color;
use crate::error::Result;
use crate::surface::Surface;
use crate::wave::WavePath;

/// In-memory RGBA surface.
#[derive(Debug, Clone, Default)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Surface for ImageSurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }

        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) -> Result<()> {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }

        Ok(())
    }

    fn fill(&mut self, color: Color) -> Result<()> {
        let rgba = Rgba(color.to_rgba(1.0));

        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }

        Ok(())
    }

    fn fill_path(&mut self, path: &WavePath, color: Color, alpha: f64) -> Result<()> {
        let (width, height) = self.image.dimensions();
        let paint = Rgba(color.to_rgba(1.0));
        let mask = coverage(path, width, height);

        for (x, y, covered) in mask.enumerate_pixels() {
            if covered[0] == 0 {
                continue;
            }

            let under = *self.image.get_pixel(x, y);
            self.image.put_pixel(x, y, interpolate(paint, under, alpha as f32));
        }

        Ok(())
    }
}

/// Opaque mask of the area enclosed by `path`.
///
/// The region under the curve is filled one column strip at a time: each
/// strip runs from two neighbouring path points straight down to the
/// path's bottom edge and is convex.
fn coverage(path: &WavePath, width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let points = path.points();

    if points.len() < 3 {
        return mask;
    }

    let bottom = points[0].1;

    for pair in points[1..points.len() - 1].windows(2) {
        let polygon = strip(pair[0], pair[1], bottom);

        if polygon.len() >= 3 {
            draw_polygon_mut(&mut mask, &polygon, Luma([255]));
        }
    }

    mask
}

/// Integer polygon for the strip under the segment `a`-`b`, without
/// repeated vertices and left open.
fn strip(a: (f64, f64), b: (f64, f64), bottom: f64) -> Vec<Point<i32>> {
    let mut polygon: Vec<Point<i32>> = Vec::with_capacity(4);

    for (x, y) in [a, b, (b.0, bottom), (a.0, bottom)] {
        let point = Point::new(x.round() as i32, y.round() as i32);

        if polygon.last() != Some(&point) {
            polygon.push(point);
        }
    }

    if polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }

    polygon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(baseline: f64, width: u32, height: u32) -> WavePath {
        WavePath::build(
            &crate::wave::LayerParams {
                baseline,
                frequency: 0.01,
                speed: 0.0,
                amplitude: 0.0,
                phase_offset: 0.0,
            },
            width,
            height,
            0.0,
        )
    }

    #[test]
    fn flat_path_covers_rows_from_baseline() {
        let mask = coverage(&flat(2.0, 5, 5), 5, 5);

        for (x, y, covered) in mask.enumerate_pixels() {
            assert_eq!(covered[0] > 0, y >= 2, "pixel ({}, {})", x, y);
        }
    }

    #[test]
    fn path_at_bottom_edge_covers_nothing() {
        let mask = coverage(&flat(5.0, 5, 5), 5, 5);

        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn stepped_path_is_filled_without_gaps() {
        let params = crate::wave::LayerParams {
            baseline: 10.0,
            frequency: 1.3,
            speed: 0.0,
            amplitude: 6.0,
            phase_offset: 0.0,
        };
        let path = WavePath::build(&params, 40, 20, 0.0);
        let mask = coverage(&path, 40, 20);

        for (x, y) in path.columns() {
            let top = (y.round() as u32).min(19);

            assert!(mask.get_pixel(*x as u32, 19)[0] > 0);
            assert!(mask.get_pixel(*x as u32, top)[0] > 0);
        }
    }

    #[test]
    fn strip_drops_repeated_vertices() {
        assert_eq!(strip((0.0, 4.0), (1.0, 2.0), 4.0).len(), 3);
        assert_eq!(strip((0.0, 4.0), (1.0, 4.0), 4.0).len(), 2);
        assert_eq!(strip((0.0, 1.0), (1.0, 1.0), 4.0).len(), 4);
    }

    #[test]
    fn fill_blends_over_background() {
        let mut surface = ImageSurface::new();
        surface.resize(4, 4).unwrap();
        surface.fill(Color::WHITE).unwrap();

        surface.fill_path(&flat(2.0, 4, 4), Color::BLACK, 0.5).unwrap();

        assert_eq!(surface.image().get_pixel(1, 0), &Rgba([255, 255, 255, 255]));

        let covered = surface.image().get_pixel(1, 3);
        assert!((covered[0] as i32 - 127).abs() <= 1, "got {:?}", covered);
        assert_eq!(covered[3], 255);
    }

    #[test]
    fn stacked_layers_stay_opaque() {
        let violet = Color::rgb(0x8b, 0x5c, 0xf6);
        let mut surface = ImageSurface::new();
        surface.resize(8, 8).unwrap();
        surface.fill(Color::WHITE).unwrap();

        for _ in 0..5 {
            surface.fill_path(&flat(0.0, 8, 8), violet, 0.5).unwrap();
        }

        assert!(surface.image().pixels().all(|p| p[3] == 255));

        let covered = surface.image().get_pixel(4, 4);
        assert!((covered[0] as i32 - 0x8b).abs() <= 5, "got {:?}", covered);
    }

    #[test]
    fn resize_keeps_exact_dimensions() {
        let mut surface = ImageSurface::new();
        surface.resize(400, 300).unwrap();

        assert_eq!(surface.dimensions(), (400, 300));
    }
}
