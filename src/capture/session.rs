use crate::capture::error::CaptureError;
use crate::capture::{CaptureBackend, NO_KEY};

/// An open camera together with its display window.
///
/// The session owns the backend. When it goes out of scope the window is destroyed (if one was
/// created) and then the backend is dropped, which releases the device. Both happen exactly once
/// no matter how the owner exits. Use `close` instead of a plain drop to observe errors raised
/// while destroying the window.
pub struct CaptureSession<B: CaptureBackend> {
    backend: B,
    window_name: String,
    device_index: Option<i32>,
    opened: bool,
    window_created: bool,
}

impl<B: CaptureBackend> CaptureSession<B> {
    pub fn new<S: Into<String>>(backend: B, window_name: S) -> Self {
        Self {
            backend,
            window_name: window_name.into(),
            device_index: None,
            opened: false,
            window_created: false,
        }
    }

    pub fn window_name(&self) -> &str {
        &self.window_name
    }

    /// Device index passed to the last `open` call, whether or not it succeeded.
    pub fn device_index(&self) -> Option<i32> {
        self.device_index
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn open(&mut self, device_index: i32) -> Result<(), CaptureError> {
        self.device_index = Some(device_index);
        self.opened = self
            .backend
            .open(device_index)
            .map_err(CaptureError::backend)?;
        if self.opened {
            log::info!("Camera {} opened.", device_index);
            Ok(())
        } else {
            Err(CaptureError::open_failed(device_index))
        }
    }

    pub fn create_window(&mut self) -> Result<(), CaptureError> {
        if self.window_created {
            return Ok(());
        }
        self.backend
            .create_window(&self.window_name)
            .map_err(CaptureError::backend)?;
        self.window_created = true;
        Ok(())
    }

    /// Captures the next frame, replacing the previous one.
    pub fn read(&mut self) -> Result<(), CaptureError> {
        if self.backend.read().map_err(CaptureError::backend)? {
            Ok(())
        } else {
            Err(CaptureError::read_failed())
        }
    }

    pub fn edge(&mut self) -> Result<(), CaptureError> {
        self.backend.edge().map_err(CaptureError::backend)
    }

    pub fn show(&mut self) -> Result<(), CaptureError> {
        self.backend
            .show(&self.window_name)
            .map_err(CaptureError::backend)
    }

    /// Waits up to `delay_ms` for a key press. `None` means the timeout elapsed.
    pub fn wait_key(&mut self, delay_ms: i32) -> Result<Option<i32>, CaptureError> {
        let key = self
            .backend
            .wait_key(delay_ms)
            .map_err(CaptureError::backend)?;
        Ok(if key == NO_KEY { None } else { Some(key) })
    }

    /// Destroys the window and releases the device.
    pub fn close(mut self) -> Result<(), CaptureError> {
        self.destroy_window()
    }

    fn destroy_window(&mut self) -> Result<(), CaptureError> {
        if !self.window_created {
            return Ok(());
        }
        // cleared first so a failing destroy is not retried by `drop`
        self.window_created = false;
        self.backend
            .destroy_window(&self.window_name)
            .map_err(CaptureError::backend)
    }
}

impl<B: CaptureBackend> Drop for CaptureSession<B> {
    fn drop(&mut self) {
        if let Err(e) = self.destroy_window() {
            log::error!("Failed to destroy window \"{}\": {}", self.window_name, e);
        }
    }
}
