//! Canonical binary encoding of timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Offset, TimeZone};

use crate::error::HashError;
use crate::node::Node;
use crate::traits::StructHash;

/// Seconds from 0001-01-01T00:00:00Z to the Unix epoch.
const UNIX_TO_ABSOLUTE: i64 = 62_135_596_800;

const VERSION_MINUTES: u8 = 1;
const VERSION_SECONDS: u8 = 2;

/// An instant plus the zone offset it was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    secs: i64,
    nanos: u32,
    offset: i32,
}

impl Timestamp {
    /// Creates a timestamp from Unix seconds, sub-second nanoseconds, and
    /// the zone offset east of UTC in seconds. An offset of zero is UTC.
    pub fn new(secs: i64, nanos: u32, offset: i32) -> Self {
        Self {
            secs,
            nanos,
            offset,
        }
    }

    /// Returns `true` for the Unix epoch in any zone.
    pub fn is_zero(&self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// Encodes the timestamp.
    ///
    /// Layout: version byte, seconds since 0001-01-01 (big-endian `i64`),
    /// nanoseconds (big-endian `u32`), zone offset in minutes (big-endian
    /// `i16`, `-1` meaning UTC). Version 2 appends the leftover offset
    /// seconds as one signed byte.
    pub fn to_binary(&self) -> Result<Vec<u8>, HashError> {
        let mut version = VERSION_MINUTES;
        let mut offset_secs = 0i8;
        let offset_min: i16 = if self.offset == 0 {
            -1
        } else {
            let rem = self.offset % 60;
            if rem != 0 {
                version = VERSION_SECONDS;
                // |rem| < 60, so it always fits.
                offset_secs = rem as i8;
            }
            let minutes = self.offset / 60;
            match i16::try_from(minutes) {
                Ok(m) if m != -1 => m,
                _ => {
                    return Err(HashError::Timestamp {
                        reason: format!("unexpected zone offset {}s", self.offset),
                    })
                }
            }
        };

        let abs = self
            .secs
            .checked_add(UNIX_TO_ABSOLUTE)
            .ok_or_else(|| HashError::Timestamp {
                reason: format!("seconds out of range: {}", self.secs),
            })?;

        let mut out = Vec::with_capacity(16);
        out.push(version);
        out.extend_from_slice(&abs.to_be_bytes());
        out.extend_from_slice(&self.nanos.to_be_bytes());
        out.extend_from_slice(&offset_min.to_be_bytes());
        if version == VERSION_SECONDS {
            out.extend_from_slice(&offset_secs.to_be_bytes());
        }
        Ok(out)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => Timestamp::new(d.as_secs() as i64, d.subsec_nanos(), 0),
            Err(e) => {
                let d = e.duration();
                let secs = -(d.as_secs() as i64);
                match d.subsec_nanos() {
                    0 => Timestamp::new(secs, 0, 0),
                    n => Timestamp::new(secs - 1, 1_000_000_000 - n, 0),
                }
            }
        }
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Timestamp {
    fn from(t: &DateTime<Tz>) -> Self {
        Timestamp::new(
            t.timestamp(),
            t.timestamp_subsec_nanos(),
            t.offset().fix().local_minus_utc(),
        )
    }
}

impl StructHash for SystemTime {
    fn node(&self) -> Node<'_> {
        Node::Time(Timestamp::from(*self))
    }

    fn is_zero(&self) -> bool {
        *self == UNIX_EPOCH
    }
}

impl<Tz: TimeZone> StructHash for DateTime<Tz> {
    fn node(&self) -> Node<'_> {
        Node::Time(Timestamp::from(self))
    }

    fn is_zero(&self) -> bool {
        Timestamp::from(self).is_zero()
    }

    fn render_text(&self) -> Option<String> {
        Some(self.with_timezone(&self.offset().fix()).to_rfc3339())
    }
}
