//! Leaf `Normalize` impls for point-in-time and offset values. Neither
//! carries children, so neither participates in cycle detection.

use crate::engine::Engine;
use crate::error::NormalizeError;
use crate::node::Node;
use crate::reflect::Normalize;
use std::any::{Any, TypeId};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use valnorm_types::{RuntimeKind, RuntimeSubject, TypeDescriptor};

/// `YYYY-MM-DDTHH:MM:SS.ffffff±HH:MM` — §6's default rendering contract,
/// always six fractional digits and a signed two-digit offset (never a
/// bare `Z` for UTC).
const DEFAULT_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
);

///
/// DateTimeFormat
/// How `DateTime` values render. The default matches §6's contract
/// exactly; `Custom` is an escape hatch `NormalizerBuilder` exposes for
/// overriding only the *default* fallback rendering (not a per-value
/// transformer, which always takes priority regardless of format).
///

#[derive(Clone, Copy, Debug)]
pub enum DateTimeFormat {
    Default,
    Custom(&'static [BorrowedFormatItem<'static>]),
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self::Default
    }
}

impl DateTimeFormat {
    pub(crate) fn render(self, value: OffsetDateTime) -> String {
        let formatted = match self {
            Self::Default => value.format(DEFAULT_FORMAT),
            Self::Custom(items) => value.format(items),
        };
        formatted.unwrap_or_else(|_| value.unix_timestamp().to_string())
    }
}

///
/// DateTime
/// A point in time with a fixed offset. Normalizes to a string rendered
/// per the engine's configured `DateTimeFormat`.
///

#[derive(Clone, Copy, Debug)]
pub struct DateTime(pub OffsetDateTime);

impl From<OffsetDateTime> for DateTime {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}

impl Normalize for DateTime {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::DateTime).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::AnyObject
    }

    fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        Ok(Node::String(engine.datetime_format().render(self.0)))
    }
}

///
/// TimeZone
/// A fixed UTC offset, optionally carrying a canonical name (e.g.
/// `"Europe/Paris"`) for display in preference to the numeric offset.
///

#[derive(Clone, Copy, Debug)]
pub struct TimeZone {
    pub offset: UtcOffset,
    pub canonical_name: Option<&'static str>,
}

impl TimeZone {
    #[must_use]
    pub const fn named(offset: UtcOffset, name: &'static str) -> Self {
        Self {
            offset,
            canonical_name: Some(name),
        }
    }

    #[must_use]
    pub const fn offset_only(offset: UtcOffset) -> Self {
        Self {
            offset,
            canonical_name: None,
        }
    }

    #[must_use]
    pub fn render(self) -> String {
        self.canonical_name.map_or_else(
            || {
                let (h, m, s) = self.offset.as_hms();
                if s == 0 {
                    format!("{h:+03}:{:02}", m.abs())
                } else {
                    format!("{h:+03}:{:02}:{:02}", m.abs(), s.abs())
                }
            },
            str::to_string,
        )
    }
}

impl Normalize for TimeZone {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::TimeZone).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::AnyObject
    }

    fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        Ok(Node::String(self.render()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn date_time_renders_microsecond_precision_with_offset_by_default() {
        let registry = crate::registry::Registry::new();
        let mut engine = Engine::new(&registry, DateTimeFormat::default());
        let value = DateTime(datetime!(1971-11-08 00:00:00 +00:00));
        let node = engine.normalize(&value).unwrap();
        assert_eq!(
            node,
            Node::String("1971-11-08T00:00:00.000000+00:00".to_string())
        );
    }

    #[test]
    fn date_time_keeps_fractional_seconds_and_non_utc_offset() {
        let registry = crate::registry::Registry::new();
        let mut engine = Engine::new(&registry, DateTimeFormat::default());
        let value = DateTime(datetime!(2024-01-02 03:04:05.125 +02:00));
        let node = engine.normalize(&value).unwrap();
        assert_eq!(
            node,
            Node::String("2024-01-02T03:04:05.125000+02:00".to_string())
        );
    }

    #[test]
    fn named_time_zone_prefers_canonical_name() {
        let tz = TimeZone::named(UtcOffset::UTC, "Etc/UTC");
        assert_eq!(tz.render(), "Etc/UTC");
    }

    #[test]
    fn unnamed_time_zone_renders_numeric_offset() {
        let tz = TimeZone::offset_only(UtcOffset::from_hms(-5, -30, 0).unwrap());
        assert_eq!(tz.render(), "-05:30");
    }
}
