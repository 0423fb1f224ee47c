//! RGB frame buffers handed to the perception pipeline

use crate::error::PerceptionError;
use image::RgbImage;

/// A single camera frame in packed RGB8 layout.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Create a frame from a packed RGB8 buffer
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, PerceptionError> {
        if width == 0 || height == 0 {
            return Err(PerceptionError::Frame(format!(
                "Invalid frame dimensions {}x{}",
                width, height
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(3))
            .ok_or_else(|| {
                PerceptionError::Frame(format!("Frame dimensions {}x{} overflow", width, height))
            })?;

        if data.len() != expected {
            return Err(PerceptionError::Frame(format!(
                "Buffer length {} does not match {}x{} RGB frame ({} bytes)",
                data.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a frame filled with a single color
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, PerceptionError> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| {
                PerceptionError::Frame(format!("Frame dimensions {}x{} overflow", width, height))
            })?;
        let mut data = Vec::with_capacity(pixels * 3);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height)
    }

    /// Convert a decoded image into a frame
    pub fn from_rgb_image(img: &RgbImage) -> Result<Self, PerceptionError> {
        Self::new(img.as_raw().clone(), img.width(), img.height())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB8 bytes in row-major order
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read the pixel at (x, y). Returns None when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize * self.width as usize) + x as usize) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Overwrite a rectangular region with a color. Out-of-bounds parts are clipped.
    pub fn fill_region(&mut self, x: u32, y: u32, w: u32, h: u32, rgb: [u8; 3]) {
        let x_end = (x.saturating_add(w)).min(self.width);
        let y_end = (y.saturating_add(h)).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                let idx = ((py as usize * self.width as usize) + px as usize) * 3;
                self.data[idx] = rgb[0];
                self.data[idx + 1] = rgb[1];
                self.data[idx + 2] = rgb[2];
            }
        }
    }
}
