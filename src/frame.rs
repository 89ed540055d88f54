//! Frame pacing.
//!
//! The host environment owns the animation-frame primitive; the scene root
//! only pulls frames from a [`FrameScheduler`] until the scheduler declines
//! the next one. This keeps the render loop's lifetime explicit: dropping
//! the scheduler, or letting it run out of budget, ends the loop.

use instant::{Duration, Instant};

/// Paces the render loop.
pub trait FrameScheduler {
    /// Blocks or yields until the next frame should be produced. Returning
    /// `false` ends the loop.
    fn next_frame(&mut self) -> bool;
}

/// A wall-clock scheduler with a fixed frame budget and a bounded number of
/// frames. Useful for tests and headless hosts; interactive hosts will
/// usually adapt their own vsync or animation-frame callback instead.
pub struct TickScheduler {
    remaining: u64,
    frame_budget: Duration,
    last_frame: Option<Instant>,
}

impl TickScheduler {
    pub fn new(frames: u64, fps: u32) -> Self {
        Self {
            remaining: frames,
            frame_budget: Duration::from_secs(1) / fps.max(1),
            last_frame: None,
        }
    }
}

impl FrameScheduler for TickScheduler {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < self.frame_budget {
                std::thread::sleep(self.frame_budget - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
        true
    }
}
