// Frame timing
//
// Measures wall-clock deltas between frames and keeps a rolling FPS figure
// for the window title. Delta clamping is the caller's concern.

use std::time::Instant;

const FPS_WINDOW: usize = 60;
const FPS_REFRESH_FRAMES: u64 = 10;

pub struct FrameClock {
    last: Instant,
    frame_count: u64,
    frame_times: Vec<f32>,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_count: 0,
            frame_times: Vec::with_capacity(FPS_WINDOW),
            fps: 0.0,
        }
    }

    /// Seconds elapsed since the previous call. Returns the raw measurement;
    /// the first call measures from construction.
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.frame_count += 1;

        if self.frame_times.len() == FPS_WINDOW {
            self.frame_times.remove(0);
        }
        self.frame_times.push(dt);

        if self.frame_count % FPS_REFRESH_FRAMES == 0 {
            let sum: f32 = self.frame_times.iter().sum();
            if sum > 0.0 {
                self.fps = self.frame_times.len() as f32 / sum;
            }
        }

        dt
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_delta_is_positive_and_counts_frames() {
        let mut clock = FrameClock::new();
        sleep(Duration::from_millis(5));
        let dt = clock.delta();
        assert!(dt > 0.0);
        assert_eq!(clock.frame_count(), 1);
        clock.delta();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_fps_updates_after_refresh_interval() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.fps(), 0.0);
        for _ in 0..FPS_REFRESH_FRAMES {
            sleep(Duration::from_millis(1));
            clock.delta();
        }
        assert!(clock.fps() > 0.0);
    }

    #[test]
    fn test_window_stays_bounded() {
        let mut clock = FrameClock::new();
        for _ in 0..(FPS_WINDOW + 20) {
            clock.delta();
        }
        assert!(clock.frame_times.len() <= FPS_WINDOW);
    }
}
