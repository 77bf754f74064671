//! The game clock: frequency, time unit, and the tick cadence.
//!
//! # Design Principles
//!
//! - One time unit lasts `1 / frequency` seconds. Every action delay and
//!   every periodic game event is a whole number of time units.
//! - Timestamps are [`Duration`]s since the reactor started, so game
//!   logic never reads a wall clock and tests can drive time directly.
//! - The cadence carries the sub-unit remainder between ticks, so a slow
//!   or fast reactor loop neither loses nor invents time units.

use std::time::Duration;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Frequency must be strictly positive.
    #[error("frequency must be at least 1, got {0}")]
    ZeroFrequency(u32),

    /// Frequency above [`MAX_FREQUENCY`].
    #[error("frequency {frequency} exceeds the maximum of {max}")]
    FrequencyTooHigh {
        /// Requested frequency.
        frequency: u32,
        /// Upper bound.
        max: u32,
    },
}

/// Highest accepted frequency. One time unit is then a microsecond.
pub const MAX_FREQUENCY: u32 = 1_000_000;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

const fn check(frequency: u32) -> Result<u32, ClockError> {
    if frequency == 0 {
        return Err(ClockError::ZeroFrequency(frequency));
    }
    if frequency > MAX_FREQUENCY {
        return Err(ClockError::FrequencyTooHigh {
            frequency,
            max: MAX_FREQUENCY,
        });
    }
    Ok(frequency)
}

/// Frequency and derived durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    frequency: u32,
}

impl GameClock {
    /// Create a clock running at `frequency` time units per second.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::ZeroFrequency`] if `frequency` is 0 and
    /// [`ClockError::FrequencyTooHigh`] above [`MAX_FREQUENCY`].
    pub const fn new(frequency: u32) -> Result<Self, ClockError> {
        match check(frequency) {
            Ok(frequency) => Ok(Self { frequency }),
            Err(e) => Err(e),
        }
    }

    /// Time units per second.
    pub const fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Change the frequency. Only delays computed afterwards see it.
    ///
    /// # Errors
    ///
    /// Same bounds as [`GameClock::new`]. The frequency is unchanged on
    /// error.
    pub const fn set_frequency(&mut self, frequency: u32) -> Result<(), ClockError> {
        match check(frequency) {
            Ok(frequency) => {
                self.frequency = frequency;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Length of `units` time units.
    pub fn units(&self, units: u64) -> Duration {
        let nanos = u128::from(units).saturating_mul(NANOS_PER_SECOND) / u128::from(self.frequency);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Length of one time unit.
    pub fn time_unit(&self) -> Duration {
        self.units(1)
    }
}

/// Turns elapsed wall time into whole elapsed time units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cadence {
    last: Option<Duration>,
    carry: Duration,
    elapsed_units: u64,
}

impl Cadence {
    /// A cadence that starts counting at the first [`Cadence::advance`].
    pub const fn new() -> Self {
        Self {
            last: None,
            carry: Duration::ZERO,
            elapsed_units: 0,
        }
    }

    /// Time units completed since the cadence started.
    pub const fn elapsed_units(&self) -> u64 {
        self.elapsed_units
    }

    /// Record the time `now` and return the range of unit numbers that
    /// completed since the previous call. Unit numbers start at 1.
    pub fn advance(&mut self, now: Duration, unit: Duration) -> std::ops::RangeInclusive<u64> {
        let delta = self.last.map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last = Some(now);
        self.carry = self.carry.saturating_add(delta);

        let first = self.elapsed_units.saturating_add(1);
        if unit.is_zero() {
            return first..=self.elapsed_units;
        }
        let whole = self.carry.as_nanos() / unit.as_nanos();
        let whole = u64::try_from(whole).unwrap_or(u64::MAX);
        let consumed = unit.as_nanos().saturating_mul(u128::from(whole));
        let rest = self.carry.as_nanos().saturating_sub(consumed);
        self.carry = Duration::from_nanos(u64::try_from(rest).unwrap_or(0));
        self.elapsed_units = self.elapsed_units.saturating_add(whole);
        first..=self.elapsed_units
    }
}
