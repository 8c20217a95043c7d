//! Screen pixel sampling.
//!
//! Platform implementations:
//! - Windows: direct GDI read (`windows.rs`)
//! - elsewhere: screen capture via the `xcap` crate (`capture.rs`)

use crate::{PlatformError, PlatformResult};
use hexpick_core::{PixelSampler, Rgb, SampleError};
use tracing::debug;

#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
mod capture;

/// Read the color of the pixel at the given screen coordinates.
///
/// Fails when the coordinates fall outside every display or the capture
/// itself fails; the caller treats that as a dropped sample, never a crash.
pub fn sample_pixel(x: i32, y: i32) -> PlatformResult<Rgb> {
    #[cfg(windows)]
    {
        windows::get_pixel_color(x, y)
    }
    #[cfg(not(windows))]
    {
        capture::get_pixel_color(x, y)
    }
}

/// [`PixelSampler`] backed by the platform screen read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenSampler;

impl PixelSampler for ScreenSampler {
    fn sample(&self, x: i32, y: i32) -> Result<Rgb, SampleError> {
        sample_pixel(x, y).map_err(|err: PlatformError| {
            debug!(x, y, %err, "pixel read failed");
            SampleError { x, y }
        })
    }
}
