#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use edge_capture::capture::{BackendResult, CaptureBackend, NO_KEY};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Open(i32),
    CreateWindow(String),
    Read,
    Edge,
    Show(String),
    WaitKey(i32),
    DestroyWindow(String),
    Release,
}

/// Backend replaying scripted read results and key codes, recording every call it receives.
pub struct ScriptedBackend {
    calls: Rc<RefCell<Vec<Call>>>,
    open_result: bool,
    /// When set, `open` raises instead of returning `open_result`.
    pub open_error: bool,
    reads: VecDeque<bool>,
    keys: VecDeque<i32>,
    /// Number of the frame currently held, counting successful reads from 1.
    pub frame: Option<usize>,
    pub frames_read: usize,
}

impl ScriptedBackend {
    pub fn new(open_result: bool, reads: &[bool], keys: &[i32]) -> (Self, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let backend = Self {
            calls: calls.clone(),
            open_result,
            open_error: false,
            reads: reads.iter().copied().collect(),
            keys: keys.iter().copied().collect(),
            frame: None,
            frames_read: 0,
        };
        (backend, calls)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl CaptureBackend for ScriptedBackend {
    fn open(&mut self, device_index: i32) -> BackendResult<bool> {
        self.record(Call::Open(device_index));
        if self.open_error {
            return Err("no video backend available".into());
        }
        Ok(self.open_result)
    }

    fn create_window(&mut self, name: &str) -> BackendResult<()> {
        self.record(Call::CreateWindow(name.to_string()));
        Ok(())
    }

    fn read(&mut self) -> BackendResult<bool> {
        self.record(Call::Read);
        let success = self.reads.pop_front().ok_or("read script exhausted")?;
        if success {
            // a new frame replaces the old one
            self.frames_read += 1;
            self.frame = Some(self.frames_read);
        }
        Ok(success)
    }

    fn edge(&mut self) -> BackendResult<()> {
        self.record(Call::Edge);
        self.frame.ok_or("edge without a frame")?;
        Ok(())
    }

    fn show(&mut self, name: &str) -> BackendResult<()> {
        self.record(Call::Show(name.to_string()));
        Ok(())
    }

    fn wait_key(&mut self, delay_ms: i32) -> BackendResult<i32> {
        self.record(Call::WaitKey(delay_ms));
        Ok(self.keys.pop_front().unwrap_or(NO_KEY))
    }

    fn destroy_window(&mut self, name: &str) -> BackendResult<()> {
        self.record(Call::DestroyWindow(name.to_string()));
        Ok(())
    }
}

impl Drop for ScriptedBackend {
    fn drop(&mut self) {
        self.record(Call::Release);
    }
}

pub fn count(calls: &[Call], call: &Call) -> usize {
    calls.iter().filter(|c| *c == call).count()
}
