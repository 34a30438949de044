//! Frame loop state.
//!
//! The host calls [`FrameLoop::begin_frame`] once per display refresh. The
//! loop keeps asking for the next frame until it is cancelled, and a
//! cancelled loop never starts again.

#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
    last_timestamp: Option<f64>,
}

impl FrameLoop {
    /// A loop that is already running.
    pub fn started() -> Self {
        Self {
            running: true,
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop for good.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Timestamp of the most recent frame.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// Account for a frame at `timestamp`. Returns false once cancelled.
    pub fn begin_frame(&mut self, timestamp: f64) -> bool {
        if !self.running {
            return false;
        }
        self.frames += 1;
        self.last_timestamp = Some(timestamp);
        true
    }
}
