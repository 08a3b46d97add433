//! Typed unit-of-measure table for time durations.
//!
//! Six unit singletons built on the enumeration registry, each carrying a
//! scale factor expressed in microseconds (the base unit), so that any
//! pairwise conversion is a single multiplication and division.  Factors
//! increase strictly with declaration order.  The two finest units carry
//! no calendar-interval format; deriving a [`DateInterval`] from them is
//! an illegal-state error.

use std::fmt;
use std::thread;
use std::time::Duration as StdDuration;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::EnumError;
use crate::registry;
use crate::symbol::{ArgValue, EnumClass, Symbol};

const C0: f64 = 1.0;
const C1: f64 = 1_000.0;
const C2: f64 = 1_000_000.0;
const C3: f64 = 60_000_000.0;
const C4: f64 = 3_600_000_000.0;
const C5: f64 = 86_400_000_000.0;

// ---------------------------------------------------------------------------
// TimeUnit — per-unit payload
// ---------------------------------------------------------------------------

/// Payload of one time-unit constant: its scale factor in microseconds and
/// an optional ISO-8601 interval format.
pub struct TimeUnit {
    in_micros: f64,
    interval_format: Option<String>,
}

impl TimeUnit {
    /// Scale factor of this unit, in microseconds.
    pub fn in_micros(&self) -> f64 {
        self.in_micros
    }

    /// ISO-8601 interval format, absent for sub-second units.
    pub fn interval_format(&self) -> Option<&str> {
        self.interval_format.as_deref()
    }

    pub fn microseconds() -> Result<&'static Symbol<TimeUnit>, EnumError> {
        registry::value_of::<TimeUnit>("MICROSECONDS")
    }

    pub fn milliseconds() -> Result<&'static Symbol<TimeUnit>, EnumError> {
        registry::value_of::<TimeUnit>("MILLISECONDS")
    }

    pub fn seconds() -> Result<&'static Symbol<TimeUnit>, EnumError> {
        registry::value_of::<TimeUnit>("SECONDS")
    }

    pub fn minutes() -> Result<&'static Symbol<TimeUnit>, EnumError> {
        registry::value_of::<TimeUnit>("MINUTES")
    }

    pub fn hours() -> Result<&'static Symbol<TimeUnit>, EnumError> {
        registry::value_of::<TimeUnit>("HOURS")
    }

    pub fn days() -> Result<&'static Symbol<TimeUnit>, EnumError> {
        registry::value_of::<TimeUnit>("DAYS")
    }

    /// All units, finest to coarsest.
    pub fn values() -> Result<Vec<&'static Symbol<TimeUnit>>, EnumError> {
        registry::values::<TimeUnit>()
    }
}

impl EnumClass for TimeUnit {
    fn type_name() -> &'static str {
        "enumera::time_unit::TimeUnit"
    }

    fn declaration() -> Vec<(&'static str, Vec<ArgValue>)> {
        vec![
            ("MICROSECONDS", vec![ArgValue::Float(C0), ArgValue::Null]),
            ("MILLISECONDS", vec![ArgValue::Float(C1), ArgValue::Null]),
            (
                "SECONDS",
                vec![ArgValue::Float(C2), ArgValue::Str("PT%dS".to_string())],
            ),
            (
                "MINUTES",
                vec![ArgValue::Float(C3), ArgValue::Str("PT%dM".to_string())],
            ),
            (
                "HOURS",
                vec![ArgValue::Float(C4), ArgValue::Str("PT%dH".to_string())],
            ),
            (
                "DAYS",
                vec![ArgValue::Float(C5), ArgValue::Str("P%dD".to_string())],
            ),
        ]
    }

    fn construct(name: &str, args: &[ArgValue]) -> Result<Self, EnumError> {
        if args.len() != 2 {
            return Err(EnumError::Configuration {
                type_name: Self::type_name().to_string(),
                reason: format!(
                    "constant '{name}' requires (factor, interval format), got {} arguments",
                    args.len()
                ),
            });
        }
        let in_micros = args[0].as_f64().ok_or_else(|| EnumError::Configuration {
            type_name: Self::type_name().to_string(),
            reason: format!("constant '{name}': factor must be numeric, got {}", args[0]),
        })?;
        let interval_format = match &args[1] {
            ArgValue::Null => None,
            ArgValue::Str(fmt) => Some(fmt.clone()),
            other => {
                return Err(EnumError::Configuration {
                    type_name: Self::type_name().to_string(),
                    reason: format!(
                        "constant '{name}': interval format must be a string or null, got {other}"
                    ),
                })
            }
        };
        Ok(TimeUnit {
            in_micros,
            interval_format,
        })
    }
}

// ---------------------------------------------------------------------------
// Conversion arithmetic on the unit singletons
// ---------------------------------------------------------------------------

impl Symbol<TimeUnit> {
    /// Convert `duration`, expressed in `from`, into this unit.
    ///
    /// Computed in the microsecond domain: `duration * (from / self)`.
    /// No rounding is imposed; fractional results are legal.
    ///
    /// To convert 10 minutes to milliseconds:
    /// `TimeUnit::milliseconds()?.convert(10.0, TimeUnit::minutes()?)`.
    pub fn convert(&self, duration: f64, from: &Symbol<TimeUnit>) -> f64 {
        duration * (from.get().in_micros / self.get().in_micros)
    }

    /// Equivalent to converting into MICROSECONDS.
    pub fn to_micros(&self, duration: f64) -> f64 {
        duration * (self.get().in_micros / C0)
    }

    /// Equivalent to converting into MILLISECONDS.
    pub fn to_millis(&self, duration: f64) -> f64 {
        duration * (self.get().in_micros / C1)
    }

    /// Equivalent to converting into SECONDS.
    pub fn to_seconds(&self, duration: f64) -> f64 {
        duration * (self.get().in_micros / C2)
    }

    /// Equivalent to converting into MINUTES.
    pub fn to_minutes(&self, duration: f64) -> f64 {
        duration * (self.get().in_micros / C3)
    }

    /// Equivalent to converting into HOURS.
    pub fn to_hours(&self, duration: f64) -> f64 {
        duration * (self.get().in_micros / C4)
    }

    /// Equivalent to converting into DAYS.
    pub fn to_days(&self, duration: f64) -> f64 {
        duration * (self.get().in_micros / C5)
    }

    /// Render `amount` of this unit as a calendar interval.
    ///
    /// Fails with `EnumError::IllegalState` when this unit declares no
    /// interval format (MICROSECONDS, MILLISECONDS).
    pub fn to_date_interval(&self, amount: u64) -> Result<DateInterval, EnumError> {
        let format = self
            .get()
            .interval_format
            .as_deref()
            .ok_or_else(|| EnumError::IllegalState {
                reason: format!("[{self}] does not support to_date_interval()"),
            })?;
        DateInterval::parse(&format.replace("%d", &amount.to_string()))
    }

    /// Suspend the calling thread for `duration` expressed in this unit.
    ///
    /// The one blocking operation in the crate; no cancellation contract.
    pub fn sleep(&self, duration: f64) {
        let micros = self.to_micros(duration);
        if micros.is_finite() && micros > 0.0 {
            thread::sleep(StdDuration::from_micros(micros as u64));
        }
    }
}

// ---------------------------------------------------------------------------
// DateInterval — calendar-duration value
// ---------------------------------------------------------------------------

/// A calendar interval parsed from an ISO-8601 duration designator.
///
/// Supports the day and time designators the unit table produces
/// (`P<n>D`, `PT<n>H`, `PT<n>M`, `PT<n>S`, and combinations thereof).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DateInterval {
    /// Parse an ISO-8601 duration of the form `P[nD][T[nH][nM][nS]]`.
    pub fn parse(spec: &str) -> Result<Self, EnumError> {
        let malformed = |reason: String| EnumError::Configuration {
            type_name: "enumera::time_unit::DateInterval".to_string(),
            reason,
        };

        let body = spec
            .strip_prefix('P')
            .ok_or_else(|| malformed(format!("'{spec}' does not start with 'P'")))?;
        if body.is_empty() {
            return Err(malformed(format!("'{spec}' declares no components")));
        }

        let (date_part, time_part) = match body.split_once('T') {
            Some((d, t)) => (d, t),
            None => (body, ""),
        };

        let mut interval = DateInterval::default();
        for (segment, designators) in [(date_part, "D"), (time_part, "HMS")] {
            let mut digits = String::new();
            for c in segment.chars() {
                if c.is_ascii_digit() {
                    digits.push(c);
                    continue;
                }
                let amount: u64 = digits
                    .parse()
                    .map_err(|_| malformed(format!("missing amount before '{c}' in '{spec}'")))?;
                digits.clear();
                match c {
                    'D' if designators.contains(c) => interval.days = amount,
                    'H' if designators.contains(c) => interval.hours = amount,
                    'M' if designators.contains(c) => interval.minutes = amount,
                    'S' if designators.contains(c) => interval.seconds = amount,
                    _ => {
                        return Err(malformed(format!(
                            "unsupported designator '{c}' in '{spec}'"
                        )))
                    }
                }
            }
            if !digits.is_empty() {
                return Err(malformed(format!("trailing digits without designator in '{spec}'")));
            }
        }
        Ok(interval)
    }

    /// The interval as an exact time span.
    pub fn to_duration(&self) -> Duration {
        Duration::days(self.days as i64)
            + Duration::hours(self.hours as i64)
            + Duration::minutes(self.minutes as i64)
            + Duration::seconds(self.seconds as i64)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == DateInterval::default() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
