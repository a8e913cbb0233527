// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge debounce timer.
///
/// Scheduling while armed pushes the deadline out again, so only the last event in a burst
/// fires. The timer holds a deadline rather than a sleeping future; the owner waits on
/// [`sleep_until_deadline`] and calls [`Debouncer::fire`] when it wakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn schedule(&mut self) {
        self.schedule_from(Instant::now());
    }

    pub fn schedule_from(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarms and returns `true` if the deadline has passed at `now`. Fires at most once per
    /// schedule.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Sleeps until `deadline`, or forever when there is none.
pub async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::Debouncer;

    #[test]
    fn fires_once_after_the_delay() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::from_millis(500));
        debounce.schedule_from(start);

        assert!(!debounce.fire(start + Duration::from_millis(499)));
        assert!(debounce.fire(start + Duration::from_millis(500)));
        assert!(!debounce.fire(start + Duration::from_secs(5)));
        assert!(!debounce.is_armed());
    }

    #[test]
    fn rescheduling_pushes_the_deadline_out() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::from_millis(500));
        debounce.schedule_from(start);
        debounce.schedule_from(start + Duration::from_millis(400));

        assert!(!debounce.fire(start + Duration::from_millis(600)));
        assert!(debounce.fire(start + Duration::from_millis(900)));
    }

    #[test]
    fn cancel_disarms() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::from_millis(10));
        debounce.schedule_from(start);
        debounce.cancel();
        assert!(!debounce.fire(start + Duration::from_secs(1)));
        assert_eq!(debounce.deadline(), None);
    }
}
