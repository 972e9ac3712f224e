/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "image")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The drawing target could not be set up or drawn to.
    #[error("surface error: {0}")]
    Surface(String),

    /// The host refused to schedule or cancel a frame.
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

impl Error {
    pub fn surface<T: Into<String>>(msg: T) -> Self {
        Self::Surface(msg.into())
    }

    pub fn scheduler<T: Into<String>>(msg: T) -> Self {
        Self::Scheduler(msg.into())
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Surface(format!("{:?}", value))
    }
}
