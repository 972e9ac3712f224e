use std::path::{Path, PathBuf};
use structopt::clap::Shell;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;
use wave_canvas::Gallery;

fn load_gallery(s: &str) -> Result<Gallery, wave_canvas::Error> {
    Gallery::load(Path::new(s))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Draw every card once at a fixed elapsed time
    Snapshot { at: f64 },
    /// Drive the cards' animation loops, optionally for a fixed number of frames
    Animate { frames: Option<usize>, fps: f64 },
}

#[derive(Debug)]
pub struct RendererConfig {
    pub output: Option<PathBuf>,
    #[cfg(feature = "sdl2")]
    pub visual: bool,
    #[cfg(feature = "sdl2")]
    pub vsync: bool,
    #[cfg(feature = "sdl2")]
    pub fullscreen: bool,
}

#[derive(Debug)]
pub struct AppConfig {
    pub gallery: Gallery,
    pub viewport: u32,
    pub mode: Mode,
    pub renderer: RendererConfig,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Waves",
    about = "Render animated layered waves to images or a window"
)]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(
        parse(try_from_str = load_gallery),
        help = "Wave config JSON (one canvas or an array); defaults to the sample gallery"
    )]
    input: Option<Gallery>,

    #[structopt(
        parse(from_os_str),
        short,
        long,
        help = "Output image, or output directory when rendering frames"
    )]
    output: Option<PathBuf>,

    #[structopt(long, default_value = "0", help = "Elapsed milliseconds for a single snapshot")]
    at: f64,

    #[structopt(short, long, help = "Number of frames to render")]
    frames: Option<usize>,

    #[structopt(long, default_value = "60", help = "Frames per second of the animation loop")]
    fps: f64,

    #[structopt(long, default_value = "1280", help = "Page width used to pick the grid columns")]
    viewport: u32,

    #[cfg(feature = "sdl2")]
    #[structopt(long, help = "Open a window to show the animation")]
    visual: bool,

    #[cfg(feature = "sdl2")]
    #[structopt(long, help = "Turns on vsync")]
    vsync: bool,

    #[cfg(feature = "sdl2")]
    #[structopt(long, help = "Runs the window in full screen")]
    fullscreen: bool,

    #[structopt(long, possible_values = &Shell::variants(), case_insensitive = true, help = "Generate shell completions and exit")]
    pub completions: Option<Shell>,
}

impl Opt {
    fn visual(&self) -> bool {
        #[cfg(feature = "sdl2")]
        {
            self.visual
        }

        #[cfg(not(feature = "sdl2"))]
        {
            false
        }
    }

    pub fn to_app_config(self) -> Result<AppConfig, &'static str> {
        if self.fps.is_nan() || self.fps <= 0.0 {
            return Err("fps must be positive");
        }

        let visual = self.visual();

        let mode = if self.frames.is_some() || visual {
            Mode::Animate {
                frames: self.frames,
                fps: self.fps,
            }
        } else {
            Mode::Snapshot { at: self.at }
        };

        let output = match (&mode, self.output) {
            (_, Some(path)) => Some(path),
            (Mode::Snapshot { .. }, None) => Some(PathBuf::from("waves.png")),
            (Mode::Animate { .. }, None) if !visual => Some(PathBuf::from("frames")),
            (Mode::Animate { .. }, None) => None,
        };

        Ok(AppConfig {
            gallery: self.input.unwrap_or_else(Gallery::examples),
            viewport: self.viewport,
            mode,
            renderer: RendererConfig {
                output,
                #[cfg(feature = "sdl2")]
                visual: self.visual,
                #[cfg(feature = "sdl2")]
                vsync: self.vsync,
                #[cfg(feature = "sdl2")]
                fullscreen: self.fullscreen,
            },
        })
    }
}
