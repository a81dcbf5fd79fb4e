/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the curve. Cubic, clamped at both ends.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// A scalar animating from `from` to `to`.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    pub fn settled(value: f64) -> Self {
        Self::new(value, value, Instant::now(), Duration::ZERO, Easing::Linear)
    }

    /// Starts a new transition from wherever this one currently is.
    pub fn retarget(&mut self, to: f64, now: Instant, duration: Duration, easing: Easing) {
        if to == self.to {
            return;
        }
        *self = Transition::new(self.value_at(now), to, now, duration, easing);
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let progress = self.progress(now);
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}
