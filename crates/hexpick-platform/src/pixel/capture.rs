//! Pixel sampling through `xcap` screen capture (macOS, Linux).
//!
//! Captures the monitor containing the point and indexes the single
//! pixel out of the frame. Slower than a direct read but portable.

use crate::{PlatformError, PlatformResult};
use hexpick_core::Rgb;
use xcap::Monitor;

fn sample_failed(err: impl std::fmt::Display) -> PlatformError {
    PlatformError::SampleFailed(err.to_string())
}

/// Read the pixel at (x, y) by capturing its monitor.
pub fn get_pixel_color(x: i32, y: i32) -> PlatformResult<Rgb> {
    let monitor = Monitor::from_point(x, y).map_err(sample_failed)?;

    let mon_x = monitor.x().map_err(sample_failed)?;
    let mon_y = monitor.y().map_err(sample_failed)?;
    let mon_w = monitor.width().map_err(sample_failed)?;
    let mon_h = monitor.height().map_err(sample_failed)?;

    let image = monitor.capture_image().map_err(sample_failed)?;

    if mon_w == 0 || mon_h == 0 {
        return Err(PlatformError::SampleFailed("zero-sized monitor".into()));
    }

    // The frame is in physical pixels; scale the logical offset into it.
    let rel_x = (x - mon_x) as u32;
    let rel_y = (y - mon_y) as u32;
    let px = rel_x * image.width() / mon_w;
    let py = rel_y * image.height() / mon_h;
    if px >= image.width() || py >= image.height() {
        return Err(PlatformError::SampleFailed(format!(
            "({x}, {y}) outside captured frame"
        )));
    }

    let pixel = image.get_pixel(px, py);
    Ok(Rgb::new(pixel.0[0], pixel.0[1], pixel.0[2]))
}
