use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::capture::CaptureBackend;
use crate::capture::error::{CaptureError, CaptureErrorKind};
use crate::capture::session::CaptureSession;

/// What to do when the camera cannot be opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpenFailurePolicy {
    /// Stop before creating the window and return the error without logging it, leaving the
    /// report to the caller.
    #[default]
    Abort,
    /// Log the failure and keep going. Every read will then fail until the device shows up.
    /// Covers both a device that reports itself closed and an exception raised while opening.
    Continue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopOptions {
    pub device_index: i32,
    pub window_name: String,
    /// How long to wait for a key press after each displayed frame, in milliseconds.
    pub key_delay_ms: i32,
    pub open_failure: OpenFailurePolicy,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            device_index: 0,
            window_name: "edges".to_string(),
            key_delay_ms: 30,
            open_failure: OpenFailurePolicy::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum LoopExit {
    KeyPressed { key: i32 },
    Terminated,
}

/// Outcome of one run of `edge_loop_main`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoopSummary {
    pub opened: bool,
    /// Number of read -> edge -> show cycles performed.
    pub frames_shown: usize,
    pub read_failures: usize,
    pub exit: LoopExit,
}

/// Opens the camera, then shows the edges of every captured frame until a key is pressed or
/// `termination_signal` is set.
///
/// A failed read is logged and the loop moves straight on to the next read. The window and the
/// device are released before returning, including when an error is returned.
pub fn edge_loop_main<B: CaptureBackend>(
    backend: B,
    options: &LoopOptions,
    termination_signal: Arc<AtomicBool>,
) -> Result<LoopSummary, CaptureError> {
    let mut session = CaptureSession::new(backend, options.window_name.as_str());
    if let Err(e) = session.open(options.device_index) {
        if options.open_failure == OpenFailurePolicy::Abort {
            return Err(e);
        }
        log::warn!("{}", e);
    }
    session.create_window()?;

    let mut frames_shown = 0;
    let mut read_failures = 0;
    let exit = loop {
        if termination_signal.load(Ordering::Relaxed) {
            log::info!("Termination requested.");
            break LoopExit::Terminated;
        }
        match session.read() {
            Ok(()) => {}
            Err(e) if e.kind() == CaptureErrorKind::ReadFailed => {
                log::warn!("{}", e);
                read_failures += 1;
                continue;
            }
            Err(e) => return Err(e),
        }
        session.edge()?;
        session.show()?;
        frames_shown += 1;
        if let Some(key) = session.wait_key(options.key_delay_ms)? {
            log::info!("Key {} pressed.", key);
            break LoopExit::KeyPressed { key };
        }
    };

    let summary = LoopSummary {
        opened: session.is_opened(),
        frames_shown,
        read_failures,
        exit,
    };
    session.close()?;
    log::info!(
        "Showed {} frames ({} failed reads).",
        summary.frames_shown,
        summary.read_failures
    );
    Ok(summary)
}
