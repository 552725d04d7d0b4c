use crate::error::{PlannerError, Result};
use std::fmt;

// ---------------------------------------------------------------------------
// ClockTime
// ---------------------------------------------------------------------------

/// A wall-clock time parsed from a 12-hour "H:MM AM/PM" string.
///
/// The two special cases follow standard 12-hour semantics: "12:00 AM" is
/// hour 0 (midnight) and "12:00 PM" is hour 12 (noon).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn parse(s: &str) -> Result<ClockTime> {
        let invalid = || PlannerError::InvalidTimeLabel(s.to_string());

        let s = s.trim();
        let (time, meridiem) = s.rsplit_once(' ').ok_or_else(invalid)?;
        let (hour_str, minute_str) = time.split_once(':').ok_or_else(invalid)?;
        let hour12: u32 = hour_str.trim().parse().map_err(|_| invalid())?;
        let minute: u32 = minute_str.trim().parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&hour12) || minute > 59 {
            return Err(invalid());
        }

        let hour = match meridiem.trim() {
            "AM" => {
                if hour12 == 12 {
                    0
                } else {
                    hour12
                }
            }
            "PM" => {
                if hour12 == 12 {
                    12
                } else {
                    hour12 + 12
                }
            }
            _ => return Err(invalid()),
        };

        Ok(ClockTime { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    /// 24-hour "HH:MM:SS" form, the shape calendar events carry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:00", self.hour, self.minute)
    }
}

// ---------------------------------------------------------------------------
// TimeSlot
// ---------------------------------------------------------------------------

/// A named half-open interval `[start, end)` partitioning part of a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub label: String,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeSlot {
    pub fn parse(label: &str) -> Result<TimeSlot> {
        let (start_str, end_str) = label
            .split_once(" - ")
            .ok_or_else(|| PlannerError::InvalidTimeLabel(label.to_string()))?;
        Ok(TimeSlot {
            label: label.to_string(),
            start: ClockTime::parse(start_str)?,
            end: ClockTime::parse(end_str)?,
        })
    }

    /// Whether `hour` falls inside `[start.hour, end.hour)`. A boundary hour
    /// belongs to the slot whose start equals it.
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start.hour && hour < self.end.hour
    }
}

// ---------------------------------------------------------------------------
// SlotRegistry
// ---------------------------------------------------------------------------

/// The default working-day partition: seven one-hour slots.
pub const DEFAULT_SLOT_LABELS: &[&str] = &[
    "8:00 AM - 9:00 AM",
    "9:00 AM - 10:00 AM",
    "10:00 AM - 11:00 AM",
    "11:00 AM - 12:00 PM",
    "12:00 PM - 1:00 PM",
    "1:00 PM - 2:00 PM",
    "2:00 PM - 3:00 PM",
];

/// Fixed, ordered list of the day's time slots. Built once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRegistry {
    slots: Vec<TimeSlot>,
}

impl Default for SlotRegistry {
    fn default() -> Self {
        SlotRegistry::from_labels(DEFAULT_SLOT_LABELS.iter().copied())
            .expect("default slot labels are well-formed")
    }
}

impl SlotRegistry {
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let slots = labels
            .into_iter()
            .map(TimeSlot::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(SlotRegistry { slots })
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.label.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.slots.iter().any(|s| s.label == label)
    }

    pub fn get(&self, label: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.label == label)
    }

    /// First slot, in registry order, whose interval contains `hour`.
    pub fn slot_for_hour(&self, hour: u32) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.contains_hour(hour))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_hour_parsing() {
        assert_eq!(ClockTime::parse("12:00 AM").unwrap().hour, 0);
        assert_eq!(ClockTime::parse("12:00 PM").unwrap().hour, 12);
        assert_eq!(ClockTime::parse("9:00 AM").unwrap().hour, 9);
        assert_eq!(ClockTime::parse("9:00 PM").unwrap().hour, 21);
        assert_eq!(ClockTime::parse("11:30 PM").unwrap(), ClockTime { hour: 23, minute: 30 });
    }

    #[test]
    fn malformed_clock_times_rejected() {
        for bad in ["", "9:00", "13:00 AM", "0:00 PM", "9:61 AM", "9:00 XM", "nine AM"] {
            assert!(ClockTime::parse(bad).is_err(), "expected invalid: {bad}");
        }
    }

    #[test]
    fn clock_time_renders_as_24h_hms() {
        assert_eq!(ClockTime::parse("12:00 AM").unwrap().to_string(), "00:00:00");
        assert_eq!(ClockTime::parse("2:00 PM").unwrap().to_string(), "14:00:00");
        assert_eq!(ClockTime::parse("9:30 AM").unwrap().to_string(), "09:30:00");
    }

    #[test]
    fn slot_parses_both_boundaries() {
        let slot = TimeSlot::parse("11:00 AM - 12:00 PM").unwrap();
        assert_eq!(slot.start.hour, 11);
        assert_eq!(slot.end.hour, 12);
        assert_eq!(slot.label, "11:00 AM - 12:00 PM");
    }

    #[test]
    fn slot_without_separator_rejected() {
        assert!(TimeSlot::parse("9:00 AM to 10:00 AM").is_err());
    }

    #[test]
    fn default_registry_has_seven_ordered_slots() {
        let registry = SlotRegistry::default();
        assert_eq!(registry.len(), 7);
        let labels: Vec<&str> = registry.labels().collect();
        assert_eq!(labels.first(), Some(&"8:00 AM - 9:00 AM"));
        assert_eq!(labels.last(), Some(&"2:00 PM - 3:00 PM"));
    }

    #[test]
    fn slot_for_hour_uses_half_open_intervals() {
        let registry = SlotRegistry::default();
        // Boundary hour belongs to the slot that starts there.
        assert_eq!(
            registry.slot_for_hour(9).unwrap().label,
            "9:00 AM - 10:00 AM"
        );
        assert_eq!(
            registry.slot_for_hour(14).unwrap().label,
            "2:00 PM - 3:00 PM"
        );
        assert!(registry.slot_for_hour(7).is_none());
        assert!(registry.slot_for_hour(15).is_none());
    }

    #[test]
    fn custom_registry_rejects_bad_labels() {
        let err = SlotRegistry::from_labels(["9:00 AM - 10:00 AM", "garbage"]).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidTimeLabel(_)));
    }
}
