use std::error::Error;
use std::fmt::{Debug, Display};

/// Enumerates the ways a capture session operation can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureErrorKind {
    /// The camera at the given device index could not be opened.
    OpenFailed { device: i32 },
    /// No frame could be obtained from the camera.
    ReadFailed,
    /// The vision library raised an exception.
    Backend,
}

/// Error returned by the operations of a `CaptureSession`.
pub struct CaptureError {
    kind: CaptureErrorKind,
    source: Option<Box<dyn Error>>,
}

impl CaptureError {
    pub fn open_failed(device: i32) -> Self {
        Self {
            kind: CaptureErrorKind::OpenFailed { device },
            source: None,
        }
    }

    pub fn read_failed() -> Self {
        Self {
            kind: CaptureErrorKind::ReadFailed,
            source: None,
        }
    }

    pub fn backend(source: Box<dyn Error>) -> Self {
        Self {
            kind: CaptureErrorKind::Backend,
            source: Some(source),
        }
    }

    pub fn kind(&self) -> CaptureErrorKind {
        self.kind
    }
}

impl Debug for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.kind, &self.source) {
            (CaptureErrorKind::OpenFailed { device }, _) => {
                write!(f, "can't open camera (device index {})", device)
            }
            (CaptureErrorKind::ReadFailed, _) => write!(f, "can't read frame"),
            (CaptureErrorKind::Backend, Some(source)) => {
                write!(f, "vision library error: {}", source)
            }
            (CaptureErrorKind::Backend, None) => write!(f, "vision library error"),
        }
    }
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for CaptureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref()
    }
}
