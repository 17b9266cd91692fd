use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

use edge_capture::capture::opencv_backend::{EdgeParams, OpenCvCapture};
use edge_capture::driver::{LoopOptions, OpenFailurePolicy, edge_loop_main};

#[derive(Parser, Debug)]
#[command(
    name = "edge-capture",
    version,
    about = "Show the edges seen by a camera.",
    long_about = r#"Show the edges seen by a camera.

Frames are read from the camera, converted to grayscale, blurred and run through the Canny edge detector. The result is displayed in a window. Press any key in the window to quit, or Ctrl-C in the terminal."#
)]
struct Args {
    /// The device index of the camera. Laptop's builtin camera is usually at index 0.
    #[arg(short, long, default_value_t = 0)]
    cam_id: i32,

    /// Name of the display window.
    #[arg(short, long, default_value_t = String::from("edges"))]
    window: String,

    /// How long to wait for a key press after each frame, in milliseconds. Must be positive,
    /// since a zero delay would block until a key is pressed.
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..))]
    delay: i32,

    /// First threshold of the Canny hysteresis procedure.
    #[arg(long, default_value_t = 0.0)]
    low_threshold: f64,

    /// Second threshold of the Canny hysteresis procedure.
    #[arg(long, default_value_t = 30.0)]
    high_threshold: f64,

    /// Keep reading even if the camera could not be opened.
    #[arg(long)]
    continue_on_open_failure: bool,

    /// Print a JSON summary of the run on exit.
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;
    let args = Args::parse();

    let termination_signal = Arc::new(AtomicBool::new(false));
    let termination_signal_clone = termination_signal.clone();
    ctrlc::set_handler(move || termination_signal_clone.store(true, Ordering::Relaxed))?;

    let options = LoopOptions {
        device_index: args.cam_id,
        window_name: args.window,
        key_delay_ms: args.delay,
        open_failure: if args.continue_on_open_failure {
            OpenFailurePolicy::Continue
        } else {
            OpenFailurePolicy::Abort
        },
    };
    let params = EdgeParams {
        low_threshold: args.low_threshold,
        high_threshold: args.high_threshold,
        ..EdgeParams::default()
    };

    let summary = edge_loop_main(OpenCvCapture::new(params), &options, termination_signal)?;
    if args.summary {
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}
