//! Enterprise calendars and their exceptions.

use std::ops::{BitOr, BitOrAssign};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::client::ProjectClient;
use crate::error::Result;
use crate::kind;
use crate::odata;
use crate::queryable::{Collection, Created, Instance};

/// An enterprise calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Calendar {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Whether this is the server's standard calendar.
    #[serde(default)]
    pub is_standard_calendar: Option<bool>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub modified: Option<DateTime<Utc>>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a calendar.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Calendar to copy from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
}

impl CalendarCreationInformation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// An exception to a base calendar, e.g. a holiday or changed shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarException {
    /// Exceptions are addressed by integer id.
    #[serde(default)]
    pub id: i32,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub finish: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "crate::odata::lenient")]
    pub recurrence_type: Option<CalendarRecurrenceType>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a calendar exception.
///
/// Shift times are minutes after midnight.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarExceptionCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_days: Option<CalendarRecurrenceDays>,

    /// Repeat every n days, weeks, months or years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_frequency: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_month: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_month_day: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_type: Option<CalendarRecurrenceType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_week: Option<CalendarRecurrenceWeek>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift1_start: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift1_finish: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift2_start: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift2_finish: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift3_start: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift3_finish: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift4_start: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift4_finish: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift5_start: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift5_finish: Option<i32>,
}

int_enum! {
    /// How a calendar exception repeats.
    pub enum CalendarRecurrenceType {
        Daily = 0,
        DailySkip = 1,
        Weekly = 2,
        Monthly = 3,
        Yearly = 4,
    }
}

int_enum! {
    /// Week of the month for monthly and yearly recurrences.
    pub enum CalendarRecurrenceWeek {
        NotSpecified = 0,
        First = 1,
        Second = 2,
        Third = 3,
        Fourth = 4,
        Last = 5,
    }
}

/// Set of weekdays a recurrence applies to.
///
/// Combine days with `|`:
///
/// ```
/// use projectserver::CalendarRecurrenceDays;
///
/// let weekend = CalendarRecurrenceDays::SATURDAY | CalendarRecurrenceDays::SUNDAY;
/// assert_eq!(weekend.bits(), 65);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarRecurrenceDays(u8);

impl CalendarRecurrenceDays {
    pub const NOT_SPECIFIED: Self = Self(0);
    pub const SUNDAY: Self = Self(1);
    pub const MONDAY: Self = Self(2);
    pub const TUESDAY: Self = Self(4);
    pub const WEDNESDAY: Self = Self(8);
    pub const THURSDAY: Self = Self(16);
    pub const FRIDAY: Self = Self(32);
    pub const SATURDAY: Self = Self(64);

    /// Monday through Friday.
    pub const WEEKDAYS: Self = Self(2 | 4 | 8 | 16 | 32);

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Build a set from its wire value; unknown bits are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x7f)
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CalendarRecurrenceDays {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CalendarRecurrenceDays {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl ProjectClient {
    /// Enterprise calendars (`Calendars`).
    pub fn calendars(&self) -> Collection<kind::Calendar> {
        Collection::root(self, "Calendars")
    }
}

impl Instance<kind::Calendar> {
    /// Exceptions defined on this calendar.
    pub fn base_calendar_exceptions(&self) -> Collection<kind::CalendarException> {
        self.collection("BaseCalendarExceptions")
    }

    /// Copy the calendar under a new name.
    ///
    /// The copy is addressed in the collection this calendar belongs to.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn copy_to(&self, name: &str) -> Result<Created<kind::Calendar>> {
        let value = self.invoke("CopyTo", Some(json!({ "name": name }))).await?;
        let calendars: Collection<kind::Calendar> = Collection::from_query(self.query().parent());
        calendars.created(value)
    }
}

impl Instance<kind::CalendarException> {
    /// The calendar the exception belongs to.
    pub fn calendar(&self) -> Instance<kind::Calendar> {
        self.navigate("Calendar")
    }
}
