//! Capture condition analysis for lighting and camera shake

use crate::frame::Frame;
use saarthi_core::types::{CaptureConditions, LightingQuality};
use tracing::debug;

/// Tracks luminance across frames to detect shake and poor lighting.
pub struct ConditionMonitor {
    shake_delta: f32,
    prev_luminance: Option<f32>,
}

impl ConditionMonitor {
    /// Create a monitor with the given shake sensitivity
    pub fn new(shake_delta: f32) -> Self {
        Self {
            shake_delta,
            prev_luminance: None,
        }
    }

    /// Analyze a frame and update the running luminance history
    pub fn analyze(&mut self, frame: &Frame) -> CaptureConditions {
        let luminance = average_luminance(frame);

        let camera_stable = match self.prev_luminance {
            // First frame has nothing to compare against
            None => true,
            Some(prev) => (luminance - prev).abs() <= self.shake_delta,
        };

        if !camera_stable {
            debug!(
                "Camera shake detected: luminance jumped {:.3} -> {:.3}",
                self.prev_luminance.unwrap_or(0.0),
                luminance
            );
        }

        self.prev_luminance = Some(luminance);

        CaptureConditions {
            luminance,
            camera_stable,
            lighting: LightingQuality::from_luminance(luminance),
        }
    }

    /// Forget the luminance history, e.g. after the camera restarts
    pub fn reset(&mut self) {
        self.prev_luminance = None;
    }
}

/// Average perceptual luminance of the frame's central region, in [0, 1].
///
/// Samples the middle half of the image on a sparse pixel grid. Frames too
/// small to crop are sampled whole.
pub fn average_luminance(frame: &Frame) -> f32 {
    let w = frame.width();
    let h = frame.height();

    let (x_start, x_end, y_start, y_end) = if w >= 4 && h >= 4 {
        (w / 4, (w * 3) / 4, h / 4, (h * 3) / 4)
    } else {
        (0, w, 0, h)
    };

    const SAMPLE_STRIDE: u32 = 4;
    let mut sum = 0.0f64;
    let mut samples = 0u64;

    let mut y = y_start;
    while y < y_end {
        let mut x = x_start;
        while x < x_end {
            if let Some([r, g, b]) = frame.pixel(x, y) {
                let luma =
                    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
                sum += luma / 255.0;
                samples += 1;
            }
            x += SAMPLE_STRIDE;
        }
        y += SAMPLE_STRIDE;
    }

    if samples == 0 {
        return 0.0;
    }

    (sum / samples as f64) as f32
}
