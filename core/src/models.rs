use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A stored to-do record.
///
/// The `id` is assigned by the record store on creation and never changes
/// afterwards. Every other field can be rewritten by a full update; the
/// percent and done flags also have dedicated single-field operations.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use todo_core::models::{NewToDo, ToDo};
///
/// let expiry = NaiveDate::from_ymd_opt(2026, 10, 16)
///     .unwrap()
///     .and_hms_opt(17, 0, 0)
///     .unwrap();
/// let mut todo = ToDo::from_new(7, NewToDo::new("Water the plants", expiry));
///
/// todo.mark_done();
/// assert!(todo.is_done);
/// assert!(todo.is_due_on(expiry.date()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToDo {
    /// Store-assigned primary key
    pub id: i32,
    /// Short title, 1-100 characters
    pub title: String,
    /// Optional free text, at most 500 characters
    pub description: Option<String>,
    /// Local due date and time
    #[serde(with = "expiry_format")]
    pub expiry: NaiveDateTime,
    /// Progress in percent, 0-100
    pub complete_percent: f64,
    /// Completion flag
    pub is_done: bool,
}

impl ToDo {
    /// Build a stored record from validated input and a store-assigned ID
    pub fn from_new(id: i32, new: NewToDo) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            expiry: new.expiry,
            complete_percent: new.complete_percent,
            is_done: new.is_done,
        }
    }

    /// Copy the fields a full update rewrites.
    ///
    /// `id` and `is_done` are left untouched; the done flag only changes
    /// through [`ToDo::mark_done`].
    pub fn apply_replacement(&mut self, replacement: NewToDo) {
        self.title = replacement.title;
        self.description = replacement.description;
        self.expiry = replacement.expiry;
        self.complete_percent = replacement.complete_percent;
    }

    /// Force progress to 100 percent
    pub fn complete(&mut self) {
        self.complete_percent = 100.0;
    }

    /// Set the done flag
    pub fn mark_done(&mut self) {
        self.is_done = true;
    }

    /// Calendar date of the expiry, time of day discarded
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry.date()
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.expiry_date() == date
    }

    /// Inclusive on both ends
    pub fn is_due_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let date = self.expiry_date();
        start <= date && date <= end
    }
}

/// Validated input for creating or replacing a record.
///
/// Only [`crate::validation::ToDoValidator`] produces these from client
/// input, so a `NewToDo` always satisfies the field constraints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewToDo {
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "expiry_format")]
    pub expiry: NaiveDateTime,
    pub complete_percent: f64,
    pub is_done: bool,
}

impl NewToDo {
    /// Create input with no description, zero progress and not done
    pub fn new(title: impl Into<String>, expiry: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            expiry,
            complete_percent: 0.0,
            is_done: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_complete_percent(mut self, complete_percent: f64) -> Self {
        self.complete_percent = complete_percent;
        self
    }

    pub fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }
}

/// Raw request body for create and full update.
///
/// Every field is optional so that a missing value is reported as a field
/// error by the validator instead of failing decoding. Keys are the
/// lowercase member names; callers fold incoming keys to lowercase before
/// decoding, which gives case-insensitive matching. Any `id` sent by the
/// client is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToDoPayload {
    #[serde(rename = "title")]
    pub title: Option<String>,
    #[serde(rename = "description")]
    pub description: Option<String>,
    /// Unparsed; see [`expiry_format::parse_expiry`]
    #[serde(rename = "expiry")]
    pub expiry: Option<String>,
    #[serde(rename = "completepercent")]
    pub complete_percent: Option<f64>,
    #[serde(rename = "isdone")]
    pub is_done: Option<bool>,
}

/// Wire format for `expiry`.
///
/// Written as an ISO-8601 local date-time without offset. Read leniently:
/// RFC 3339 with an offset (converted to local time), offset-less date-time
/// with `T` or space separator, or a bare date meaning midnight.
pub mod expiry_format {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn format_expiry(expiry: &NaiveDateTime) -> String {
        expiry.format(OUTPUT_FORMAT).to_string()
    }

    pub fn parse_expiry(input: &str) -> Option<NaiveDateTime> {
        let input = input.trim();

        if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
            return Some(with_offset.with_timezone(&Local).naive_local());
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Some(naive);
            }
        }

        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }

    pub fn serialize<S>(expiry: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_expiry(expiry))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_expiry(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid expiry date-time: '{raw}'")))
    }
}
