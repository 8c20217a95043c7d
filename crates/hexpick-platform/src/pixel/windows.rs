//! Windows implementation of pixel sampling via GDI.

use crate::{PlatformError, PlatformResult};
use hexpick_core::Rgb;
use std::ptr;
use windows_sys::Win32::Graphics::Gdi::{GetDC, GetPixel, ReleaseDC, CLR_INVALID};

/// Read the pixel at (x, y) from the screen device context.
pub fn get_pixel_color(x: i32, y: i32) -> PlatformResult<Rgb> {
    unsafe {
        // null window = entire screen
        let hdc = GetDC(ptr::null_mut());
        if hdc.is_null() {
            return Err(PlatformError::SampleFailed("GetDC returned null".into()));
        }

        let color = GetPixel(hdc, x, y);
        ReleaseDC(ptr::null_mut(), hdc);

        if color == CLR_INVALID {
            // Off-screen coordinates land here.
            return Err(PlatformError::SampleFailed(format!(
                "no pixel at ({x}, {y})"
            )));
        }

        // COLORREF is 0x00BBGGRR
        let r = (color & 0xFF) as u8;
        let g = ((color >> 8) & 0xFF) as u8;
        let b = ((color >> 16) & 0xFF) as u8;

        Ok(Rgb::new(r, g, b))
    }
}
