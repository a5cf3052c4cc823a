//! Booking domain types.
//!
//! The enumerated form fields (time slot, duration, channel) are closed
//! enums, so a `BookingDraft` can only hold values the booking form offers.
//! Raw form strings are parsed into these types at the edge (see `requests`).

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::services::BookingError;

/// Time-of-day slots offered by the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeSlot {
    Nine,
    Ten,
    Eleven,
    Fourteen,
    Fifteen,
    Sixteen,
    Seventeen,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 7] = [
        TimeSlot::Nine,
        TimeSlot::Ten,
        TimeSlot::Eleven,
        TimeSlot::Fourteen,
        TimeSlot::Fifteen,
        TimeSlot::Sixteen,
        TimeSlot::Seventeen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Nine => "09:00",
            TimeSlot::Ten => "10:00",
            TimeSlot::Eleven => "11:00",
            TimeSlot::Fourteen => "14:00",
            TimeSlot::Fifteen => "15:00",
            TimeSlot::Sixteen => "16:00",
            TimeSlot::Seventeen => "17:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimeSlot {
    type Error = BookingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == value)
            .ok_or_else(|| BookingError::UnknownTimeSlot(value.to_string()))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeSlot::try_from(value.as_str())
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.as_str().to_string()
    }
}

/// Session length in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SessionDuration {
    #[default]
    HalfHour,
    Hour,
    HourAndHalf,
    TwoHours,
}

impl SessionDuration {
    pub const ALL: [SessionDuration; 4] = [
        SessionDuration::HalfHour,
        SessionDuration::Hour,
        SessionDuration::HourAndHalf,
        SessionDuration::TwoHours,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            SessionDuration::HalfHour => 30,
            SessionDuration::Hour => 60,
            SessionDuration::HourAndHalf => 90,
            SessionDuration::TwoHours => 120,
        }
    }

    /// Label shown in the duration picker
    pub fn label(&self) -> &'static str {
        match self {
            SessionDuration::HalfHour => "30 minutes",
            SessionDuration::Hour => "1 heure",
            SessionDuration::HourAndHalf => "1h30",
            SessionDuration::TwoHours => "2 heures",
        }
    }
}

impl TryFrom<u32> for SessionDuration {
    type Error = BookingError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            30 => Ok(SessionDuration::HalfHour),
            60 => Ok(SessionDuration::Hour),
            90 => Ok(SessionDuration::HourAndHalf),
            120 => Ok(SessionDuration::TwoHours),
            other => Err(BookingError::InvalidDuration(other)),
        }
    }
}

impl From<SessionDuration> for u32 {
    fn from(duration: SessionDuration) -> Self {
        duration.minutes()
    }
}

/// Communication medium for the session. Does not affect price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionChannel {
    #[default]
    Video,
    Audio,
    Chat,
}

impl SessionChannel {
    pub const ALL: [SessionChannel; 3] = [
        SessionChannel::Video,
        SessionChannel::Audio,
        SessionChannel::Chat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionChannel::Video => "video",
            SessionChannel::Audio => "audio",
            SessionChannel::Chat => "chat",
        }
    }
}

impl TryFrom<&str> for SessionChannel {
    type Error = BookingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        SessionChannel::ALL
            .into_iter()
            .find(|channel| channel.as_str() == value)
            .ok_or_else(|| BookingError::UnknownChannel(value.to_string()))
    }
}

/// The translator's bookable service record, as seen by the evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorOffering {
    pub id: String,
    pub price_per_hour: f64,
}

/// In-progress booking form values.
///
/// Created fresh for every booking flow and replaced wholesale on each edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub duration: SessionDuration,
    pub channel: SessionChannel,
    pub description: String,
}

/// Price and submittability derived from a draft/offering pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BookingEvaluation {
    pub is_submittable: bool,
    pub total_price: f64,
}

/// Finalized booking handed to the reservation backend
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub reference: Uuid,
    pub translator_id: String,
    pub draft: BookingDraft,
    pub evaluation: BookingEvaluation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_parses_offered_slots() {
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::try_from(slot.as_str()).unwrap(), slot);
        }
    }

    #[test]
    fn test_time_slot_rejects_unoffered_time() {
        let err = TimeSlot::try_from("12:00").unwrap_err();
        assert!(matches!(err, BookingError::UnknownTimeSlot(t) if t == "12:00"));
    }

    #[test]
    fn test_duration_accepts_enumerated_minutes_only() {
        assert_eq!(SessionDuration::try_from(90).unwrap(), SessionDuration::HourAndHalf);
        assert!(matches!(
            SessionDuration::try_from(45),
            Err(BookingError::InvalidDuration(45))
        ));
    }

    #[test]
    fn test_draft_defaults_match_form_defaults() {
        let draft = BookingDraft::default();
        assert_eq!(draft.date, None);
        assert_eq!(draft.time, None);
        assert_eq!(draft.duration.minutes(), 30);
        assert_eq!(draft.channel, SessionChannel::Video);
        assert!(draft.description.is_empty());
    }

    #[test]
    fn test_wire_spellings() {
        let json = serde_json::to_value(BookingDraft {
            date: NaiveDate::from_ymd_opt(2025, 1, 1),
            time: Some(TimeSlot::Fourteen),
            duration: SessionDuration::TwoHours,
            channel: SessionChannel::Chat,
            description: String::new(),
        })
        .unwrap();

        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["time"], "14:00");
        assert_eq!(json["duration"], 120);
        assert_eq!(json["channel"], "chat");
    }
}
