/// Default cap on fixed steps per frame.
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of constant-size physics
/// steps, so the simulation does not depend on the display refresh rate.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// Negative or non-finite frame times are ignored.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // Cap to prevent a spiral of death after a long stall (tab in background)
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any partial step.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
