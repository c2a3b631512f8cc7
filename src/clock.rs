use std::time::{Duration, Instant};

pub const TARGET_FPS: u32 = 60;

/// Wall-clock frame timing: measures the delta between frames and decides
/// when the next frame is due.
#[derive(Debug, Clone)]
pub struct FrameClock {
	interval: Duration,
	last_frame: Instant,
	next_frame: Instant,
}

impl FrameClock {
	pub fn new(fps: u32, now: Instant) -> Self {
		Self {
			interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
			last_frame: now,
			next_frame: now,
		}
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	pub fn next_frame(&self) -> Instant {
		self.next_frame
	}

	pub fn is_due(&self, now: Instant) -> bool {
		now >= self.next_frame
	}

	/// Starts a frame at `now`, returning seconds since the previous one.
	pub fn tick(&mut self, now: Instant) -> f32 {
		let dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
		self.last_frame = now;
		self.next_frame = now + self.interval;
		dt
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tick_reports_elapsed_seconds() {
		let start = Instant::now();
		let mut clock = FrameClock::new(TARGET_FPS, start);
		let dt = clock.tick(start + Duration::from_millis(250));
		assert!((dt - 0.25).abs() < 1e-6);
		let dt = clock.tick(start + Duration::from_millis(300));
		assert!((dt - 0.05).abs() < 1e-6);
	}

	#[test]
	fn frames_are_paced_at_interval() {
		let start = Instant::now();
		let mut clock = FrameClock::new(60, start);
		assert!(clock.is_due(start));

		clock.tick(start);
		assert_eq!(clock.next_frame(), start + clock.interval());
		assert!(!clock.is_due(start + Duration::from_millis(5)));
		assert!(clock.is_due(start + clock.interval()));
	}

	#[test]
	fn late_frame_does_not_bank_time() {
		let start = Instant::now();
		let mut clock = FrameClock::new(60, start);
		clock.tick(start);
		let late = start + Duration::from_secs(1);
		clock.tick(late);
		assert_eq!(clock.next_frame(), late + clock.interval());
		assert!(!clock.is_due(late));
	}
}
