
/// Events emitted while frames are produced that renderers can handle
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// Animation started
    Started,

    /// A composed frame is about to be presented
    Frame { index: usize, timestamp: f64 },

    /// No more frames will follow
    Completed,
}
