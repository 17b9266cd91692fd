/// Errors reported by capture sessions
pub mod error;

/// Capture backend built on the OpenCV bindings
pub mod opencv_backend;

/// Scoped ownership of a backend and its display window
pub mod session;

/// Value returned by `CaptureBackend::wait_key` when no key was pressed before the timeout.
pub const NO_KEY: i32 = -1;

pub type BackendResult<T> = Result<T, Box<dyn std::error::Error>>;

/// The operations a camera + window library must provide to drive the edge loop.
///
/// The frame buffer and the edge buffer live inside the implementation. `read` overwrites the
/// frame in place, so a frame is only valid until the next call to `read`. Releasing the device
/// and the buffers is done by dropping the implementation.
pub trait CaptureBackend {
    /// Tries to open the camera at `device_index`. Returns whether it succeeded.
    fn open(&mut self, device_index: i32) -> BackendResult<bool>;

    /// Creates a display window called `name`.
    fn create_window(&mut self, name: &str) -> BackendResult<()>;

    /// Captures the next frame into the internal buffer. Returns whether a frame was obtained.
    fn read(&mut self) -> BackendResult<bool>;

    /// Runs edge detection on the current frame and stores the result in the edge buffer.
    fn edge(&mut self) -> BackendResult<()>;

    /// Renders the edge buffer into the window called `name`.
    fn show(&mut self, name: &str) -> BackendResult<()>;

    /// Blocks for at most `delay_ms` milliseconds waiting for a key press. Returns the key code,
    /// or `NO_KEY` on timeout.
    fn wait_key(&mut self, delay_ms: i32) -> BackendResult<i32>;

    /// Releases the window called `name`.
    fn destroy_window(&mut self, name: &str) -> BackendResult<()>;
}
