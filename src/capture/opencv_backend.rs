use opencv::{
    core::{AlgorithmHint, BORDER_DEFAULT, Mat, Size},
    highgui, imgproc,
    prelude::*,
    videoio,
};

use crate::capture::{BackendResult, CaptureBackend};

/// Parameters of the grayscale -> gaussian blur -> canny pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeParams {
    /// Side length of the square gaussian kernel. Must be odd.
    pub blur_kernel: i32,
    /// Gaussian standard deviation, used for both X and Y.
    pub blur_sigma: f64,
    pub low_threshold: f64,
    pub high_threshold: f64,
    /// Aperture size of the Sobel operator inside canny.
    pub aperture: i32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_kernel: 7,
            blur_sigma: 1.5,
            low_threshold: 0.0,
            high_threshold: 30.0,
            aperture: 3,
        }
    }
}

/// Edge detector that keeps its intermediate images between calls, so that running it on a
/// stream of same-sized frames does not reallocate.
pub struct EdgeFilter {
    params: EdgeParams,
    gray: Mat,
    blurred: Mat,
}

impl EdgeFilter {
    pub fn new(params: EdgeParams) -> Self {
        Self {
            params,
            gray: Mat::default(),
            blurred: Mat::default(),
        }
    }

    pub fn params(&self) -> &EdgeParams {
        &self.params
    }

    /// Computes the edge map of a BGR `frame` into `edges` (8-bit, single channel, same size).
    pub fn apply(&mut self, frame: &Mat, edges: &mut Mat) -> opencv::Result<()> {
        imgproc::cvt_color(
            frame,
            &mut self.gray,
            imgproc::COLOR_BGR2GRAY,
            0,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;
        let kernel = self.params.blur_kernel;
        imgproc::gaussian_blur(
            &self.gray,
            &mut self.blurred,
            Size::new(kernel, kernel),
            self.params.blur_sigma,
            self.params.blur_sigma,
            BORDER_DEFAULT,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;
        imgproc::canny(
            &self.blurred,
            edges,
            self.params.low_threshold,
            self.params.high_threshold,
            self.params.aperture,
            false,
        )
    }
}

/// `CaptureBackend` on top of OpenCV's `videoio` and `highgui` modules.
pub struct OpenCvCapture {
    cam: Option<videoio::VideoCapture>,
    frame: Mat,
    edges: Mat,
    filter: EdgeFilter,
}

impl OpenCvCapture {
    pub fn new(params: EdgeParams) -> Self {
        Self {
            cam: None,
            frame: Mat::default(),
            edges: Mat::default(),
            filter: EdgeFilter::new(params),
        }
    }

    pub fn frame(&self) -> &Mat {
        &self.frame
    }

    pub fn edges(&self) -> &Mat {
        &self.edges
    }
}

impl CaptureBackend for OpenCvCapture {
    fn open(&mut self, device_index: i32) -> BackendResult<bool> {
        let cam = videoio::VideoCapture::new(device_index, videoio::CAP_ANY)?;
        let opened = cam.is_opened()?;
        // keep the handle even when closed; reads on it simply fail
        self.cam = Some(cam);
        Ok(opened)
    }

    fn create_window(&mut self, name: &str) -> BackendResult<()> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        Ok(())
    }

    fn read(&mut self) -> BackendResult<bool> {
        let Some(cam) = self.cam.as_mut() else {
            return Ok(false);
        };
        if !cam.read(&mut self.frame)? {
            return Ok(false);
        }
        Ok(!self.frame.empty())
    }

    fn edge(&mut self) -> BackendResult<()> {
        if self.frame.empty() {
            return Ok(());
        }
        self.filter.apply(&self.frame, &mut self.edges)?;
        Ok(())
    }

    fn show(&mut self, name: &str) -> BackendResult<()> {
        if self.edges.empty() {
            return Ok(());
        }
        highgui::imshow(name, &self.edges)?;
        Ok(())
    }

    fn wait_key(&mut self, delay_ms: i32) -> BackendResult<i32> {
        Ok(highgui::wait_key(delay_ms)?)
    }

    fn destroy_window(&mut self, name: &str) -> BackendResult<()> {
        highgui::destroy_window(name)?;
        Ok(())
    }
}

impl Drop for OpenCvCapture {
    fn drop(&mut self) {
        if let Some(cam) = self.cam.as_mut() {
            if let Err(e) = cam.release() {
                log::error!("Failed to release the camera: {}", e);
            }
        }
    }
}
