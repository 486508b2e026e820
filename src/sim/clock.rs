/// Decides when the simulation advances, independent of how often frames arrive.
///
/// Timestamps are milliseconds, as handed to `requestAnimationFrame` callbacks.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    last_advance: Option<f64>,
    min_interval_ms: u32,
}

impl SimulationClock {
    pub fn new(min_interval_ms: u32) -> SimulationClock {
        SimulationClock {
            last_advance: None,
            min_interval_ms,
        }
    }

    pub fn last_advance(&self) -> Option<f64> {
        self.last_advance
    }

    /// Returns true if a generation should be computed at `now`, recording `now`
    /// as the new baseline when it does. The first call always advances.
    pub fn should_advance(&mut self, now: f64) -> bool {
        let due = match self.last_advance {
            None => true,
            Some(last) => now - last >= self.min_interval_ms as f64,
        };
        if due {
            self.last_advance = Some(now);
        }
        due
    }
}
