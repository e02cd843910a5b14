/*
 *  pacer.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  Fixed-rate frame pacing
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Paces the render loop at a fixed frame rate. The next deadline is always
/// scheduled from the current instant, so a slow tick slides the schedule
/// rather than queueing catch-up frames.
pub struct Pacer {
    next_deadline: Instant,
    frame: Duration,
}

impl Pacer {
    pub fn new(target_fps: u32) -> Self {
        let frame = Duration::from_micros((1_000_000u32 / target_fps.max(1)) as u64);
        Self { next_deadline: Instant::now(), frame }
    }

    /// Seconds between ticks at the target rate.
    pub fn frame_interval_secs(&self) -> f64 {
        self.frame.as_secs_f64()
    }

    /// Wait out the remainder of the current frame, then open the next one.
    pub async fn tick(&mut self) {
        let now = Instant::now();
        if now < self.next_deadline {
            sleep_until(self.next_deadline).await;
        }
        self.next_deadline = Instant::now() + self.frame;
    }
}
