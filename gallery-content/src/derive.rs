//! Filter/derivation engine
//!
//! Pure functions of `(records, selected filter, now)`. Nothing here touches
//! the network or mutates records, and the derived sequence keeps the fetch
//! order.

use crate::content::{EventStatus, Exhibition, Program, ProgramType};
use crate::record::Record;
use chrono::NaiveDateTime;
use gallery_common::time::{is_before_today, parse_calendar_date};
use serde::Serialize;

/// A page filter that selects a subset of records
pub trait ViewFilter<R> {
    fn matches(&self, record: &R, now: NaiveDateTime) -> bool;

    /// Relation id this filter selects, for relation-based filters
    fn relation_id(&self) -> Option<i64> {
        None
    }
}

/// Apply the selected filter; `None` passes every record through
pub fn derive_view<'a, R, F>(records: &'a [R], selected: Option<&F>, now: NaiveDateTime) -> Vec<&'a R>
where
    F: ViewFilter<R>,
{
    match selected {
        Some(filter) => records.iter().filter(|r| filter.matches(r, now)).collect(),
        None => records.iter().collect(),
    }
}

/// Equality filter on the record's relation id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CollectionFilter(pub i64);

impl<R: Record> ViewFilter<R> for CollectionFilter {
    fn matches(&self, record: &R, _now: NaiveDateTime) -> bool {
        record.relation().map(|rel| rel.id) == Some(self.0)
    }

    fn relation_id(&self) -> Option<i64> {
        Some(self.0)
    }
}

/// Filter type for pages without a filter control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unfiltered {}

impl<R> ViewFilter<R> for Unfiltered {
    fn matches(&self, _record: &R, _now: NaiveDateTime) -> bool {
        match *self {}
    }
}

/// Keep records whose relation id equals `selected`; `None` keeps all
pub fn filter_by_relation<R: Record>(records: &[R], selected: Option<i64>) -> Vec<&R> {
    match selected {
        Some(id) => records
            .iter()
            .filter(|r| r.relation().map(|rel| rel.id) == Some(id))
            .collect(),
        None => records.iter().collect(),
    }
}

/// True when the end date lies before today
///
/// Missing or unparseable dates never count as passed.
pub fn has_ended(end_date: &str, now: NaiveDateTime) -> bool {
    parse_calendar_date(end_date)
        .map(|end| is_before_today(end, now))
        .unwrap_or(false)
}

/// Bucket an event by explicit tag, falling back to its end date
///
/// `upcoming` and `archived` tags always win. A `current` tag, or no tag,
/// yields `Archived` once the end date has passed and `Current` otherwise.
pub fn classify_event(status: Option<EventStatus>, end_date: &str, now: NaiveDateTime) -> EventStatus {
    match status {
        Some(EventStatus::Upcoming) => EventStatus::Upcoming,
        Some(EventStatus::Archived) => EventStatus::Archived,
        Some(EventStatus::Current) | None => {
            if has_ended(end_date, now) {
                EventStatus::Archived
            } else {
                EventStatus::Current
            }
        }
    }
}

impl ViewFilter<Exhibition> for EventStatus {
    fn matches(&self, record: &Exhibition, now: NaiveDateTime) -> bool {
        classify_event(record.status, &record.end_date, now) == *self
    }
}

/// Programs of the selected type that have not ended yet
impl ViewFilter<Program> for ProgramType {
    fn matches(&self, record: &Program, now: NaiveDateTime) -> bool {
        self.is_type(&record.program_type) && !has_ended(&record.end, now)
    }
}

/// Registration closes once today reaches the scheduled date
///
/// Only the leading date token of the schedule is read and both sides are
/// truncated to the day. An unparseable schedule leaves registration open.
pub fn is_registration_closed(schedule: &str, now: NaiveDateTime) -> bool {
    parse_calendar_date(schedule)
        .map(|date| now.date() >= date)
        .unwrap_or(false)
}
