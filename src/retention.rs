// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Hydraulic retention time, derived from the digester volume and the feed
//! rate unless the user has taken manual control of it.

use std::fmt::Display;

/// Who decides the retention time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetentionMode {
    /// Retention follows `digester_volume / feed_rate`.
    Auto,
    /// Retention was set by the user and is no longer recalculated.
    Locked,
}

impl Display for RetentionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetentionMode::Auto => write!(f, "Auto"),
            RetentionMode::Locked => write!(f, "Locked"),
        }
    }
}

/// Two-state machine holding the current retention time in days.
#[derive(Clone, Debug, PartialEq)]
pub struct RetentionControl {
    digester_volume: f64,
    mode: RetentionMode,
    days: f64,
}

impl RetentionControl {
    /// Creates a controller in [`RetentionMode::Auto`], with the retention
    /// time calculated from `feed_rate`.
    pub fn new(digester_volume: f64, feed_rate: f64) -> Self {
        Self {
            digester_volume,
            mode: RetentionMode::Auto,
            days: auto_retention_days(digester_volume, feed_rate),
        }
    }

    pub fn mode(&self) -> RetentionMode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.mode == RetentionMode::Locked
    }

    /// The current retention time in days.
    pub fn days(&self) -> f64 {
        self.days
    }

    /// Recalculates the retention time for a new feed rate.  Has no effect
    /// when locked.
    pub fn on_feed_rate_changed(&mut self, feed_rate: f64) {
        if self.mode == RetentionMode::Auto {
            self.days = auto_retention_days(self.digester_volume, feed_rate);
        }
    }

    /// Sets the retention time directly, switching to
    /// [`RetentionMode::Locked`].
    pub fn set_days(&mut self, days: f64) {
        if self.mode != RetentionMode::Locked {
            tracing::info!("Retention time locked at {days} days.");
        }
        self.mode = RetentionMode::Locked;
        self.days = days;
    }

    /// Switches back to [`RetentionMode::Auto`] and recalculates the
    /// retention time from `feed_rate`.
    pub fn unlock(&mut self, feed_rate: f64) {
        if self.mode != RetentionMode::Auto {
            tracing::info!("Retention time unlocked.");
        }
        self.mode = RetentionMode::Auto;
        self.days = auto_retention_days(self.digester_volume, feed_rate);
    }
}

/// `digester_volume / feed_rate`, or 0 when there is no feed.
pub fn auto_retention_days(digester_volume: f64, feed_rate: f64) -> f64 {
    if feed_rate > 0.0 {
        digester_volume / feed_rate
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DIGESTER_VOLUME;

    #[test]
    fn test_auto_mode() {
        let mut control = RetentionControl::new(DIGESTER_VOLUME, 45.0);
        assert_eq!(control.mode(), RetentionMode::Auto);
        assert_eq!(control.days(), 40.0);

        control.on_feed_rate_changed(60.0);
        assert_eq!(control.days(), 30.0);

        control.on_feed_rate_changed(0.0);
        assert_eq!(control.days(), 0.0);
    }

    #[test]
    fn test_lock_and_unlock() {
        let mut control = RetentionControl::new(DIGESTER_VOLUME, 45.0);

        control.set_days(25.0);
        assert!(control.is_locked());
        assert_eq!(control.days(), 25.0);

        control.on_feed_rate_changed(90.0);
        assert_eq!(control.days(), 25.0);

        control.unlock(90.0);
        assert_eq!(control.mode(), RetentionMode::Auto);
        assert_eq!(control.days(), 20.0);

        // unlocking twice is harmless
        control.unlock(36.0);
        assert_eq!(control.days(), 50.0);
        assert_eq!(control.mode().to_string(), "Auto");
    }
}
