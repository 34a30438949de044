//! A single simulated star.

use std::f64::consts::PI;

use starlit_core::SizeClass;

/// Lowest opacity a blinking star reaches.
const MIN_OPACITY: f64 = 0.5;

/// Upper bound (exclusive) of the random blink phase delay in milliseconds.
pub(crate) const MAX_PHASE_DELAY_MS: f64 = 3000.0;

/// State of one star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Size class the star was generated from.
    pub class: SizeClass,
    /// Horizontal position in surface pixels.
    pub x: f64,
    /// Vertical position in surface pixels.
    pub y: f64,
    /// Fill color string.
    pub color: String,
    /// Radius in surface pixels, fixed by the size class.
    pub radius: f64,
    /// Drift direction in degrees, `None` when the star does not move.
    pub direction: Option<f64>,
    /// Surface pixels travelled per frame.
    pub speed: f64,
    /// Blink half period in milliseconds, `0` when not blinking.
    pub blink: u32,
    /// Current opacity in `0.5..=1.0`.
    pub opacity: f64,
    /// Offset added to the clock so equal blink periods do not flash in unison.
    pub phase_delay: f64,
}

impl Star {
    /// Advance the star to `now_ms`.
    pub fn update(&mut self, now_ms: f64) {
        if self.blink > 0 {
            let phase = PI * (now_ms + self.phase_delay) / self.blink as f64;
            self.opacity = MIN_OPACITY + (1.0 - MIN_OPACITY) * phase.sin().abs();
        }

        if self.speed > 0.0 {
            if let Some(direction) = self.direction {
                // Rotate by 90 degrees so that 0 points down the screen
                let radians = (direction + 90.0) * PI / 180.0;
                self.x += radians.cos() * self.speed;
                self.y += radians.sin() * self.speed;
            }
        }
    }
}
