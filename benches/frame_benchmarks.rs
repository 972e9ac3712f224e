use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wave_canvas::frame::layer_paths;
use wave_canvas::render::ImageSurface;
use wave_canvas::{draw_frame, Color, Gallery, Surface, WaveCanvasConfig, WaveLayer};

fn many_layers(count: usize) -> WaveCanvasConfig {
    let waves = (0..count)
        .map(|i| {
            let shade = (i * 255 / count.max(1)) as u8;
            WaveLayer::new(Color::rgb(shade, 128, 255 - shade), 40.0 + i as f64 * 20.0)
        })
        .collect();

    WaveCanvasConfig::new(400, 400, waves)
}

fn bench_layer_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("layer_paths");

    for count in [1, 5, 20] {
        let config = many_layers(count);

        group.bench_function(format!("{}_layers", count), |b| {
            b.iter(|| layer_paths(black_box(&config), black_box(1234.0)))
        });
    }

    group.finish();
}

fn bench_draw_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_frame");

    for (index, config) in Gallery::examples().configs.into_iter().enumerate() {
        let mut surface = ImageSurface::new();
        surface.resize(config.width, config.height).unwrap();

        group.bench_function(format!("example_{}", index), |b| {
            b.iter(|| draw_frame(&mut surface, black_box(&config), black_box(16.7)).unwrap())
        });
    }

    group.finish();
}

fn bench_gallery_compose(c: &mut Criterion) {
    let gallery = Gallery::examples();
    let frames: Vec<_> = gallery
        .configs
        .iter()
        .map(|config| {
            let mut surface = ImageSurface::new();
            surface.resize(config.width, config.height).unwrap();
            draw_frame(&mut surface, config, 0.0).unwrap();
            surface.into_image()
        })
        .collect();

    c.bench_function("gallery_compose", |b| {
        b.iter(|| gallery.compose(black_box(&frames), 3))
    });
}

criterion_group!(benches, bench_layer_paths, bench_draw_frame, bench_gallery_compose);
criterion_main!(benches);
