//! Request DTOs for booking API endpoints.
//!
//! Form fields arrive exactly as the booking form posts them: strings, with
//! an empty string meaning "not chosen yet".

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

use super::models::{BookingDraft, SessionChannel, SessionDuration, TimeSlot};
use super::services::BookingError;

/// Raw booking form values
#[derive(Debug, Clone, Deserialize)]
pub struct BookingFormRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default = "default_duration", deserialize_with = "deserialize_minutes")]
    pub duration: u32,
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default)]
    pub description: String,
}

fn default_duration() -> u32 {
    SessionDuration::default().minutes()
}

/// Minutes as a JSON number or as the string a `<select>` posts
fn deserialize_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Minutes {
        Number(u32),
        Text(String),
    }

    match Minutes::deserialize(deserializer)? {
        Minutes::Number(minutes) => Ok(minutes),
        Minutes::Text(raw) => raw
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid duration {:?}", raw))),
    }
}

fn default_channel() -> String {
    SessionChannel::default().as_str().to_string()
}

impl Default for BookingFormRequest {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            duration: default_duration(),
            channel: default_channel(),
            description: String::new(),
        }
    }
}

impl BookingFormRequest {
    /// Parse the raw form into a typed draft.
    ///
    /// Blank date/time become `None`; anything else must parse.
    pub fn into_draft(self) -> Result<BookingDraft, BookingError> {
        let date = match self.date.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| BookingError::InvalidDate(raw.to_string()))?,
            ),
        };

        let time = match self.time.trim() {
            "" => None,
            raw => Some(TimeSlot::try_from(raw)?),
        };

        Ok(BookingDraft {
            date,
            time,
            duration: SessionDuration::try_from(self.duration)?,
            channel: SessionChannel::try_from(self.channel.trim())?,
            description: self.description,
        })
    }
}

/// Request for a stateless price preview
#[derive(Debug, Deserialize)]
pub struct EvaluateBookingRequest {
    pub translator_id: String,
    #[serde(flatten)]
    pub form: BookingFormRequest,
}

/// Request to open a booking flow
#[derive(Debug, Deserialize)]
pub struct OpenFlowRequest {
    pub translator_id: String,
}
