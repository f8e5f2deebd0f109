/// Failures of the windowed host. The gauge core itself never fails; bad
/// input is clamped or ignored.
#[derive(Debug, thiserror::Error)]
pub enum GaugeError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("font data could not be parsed")]
    InvalidFont,
}
