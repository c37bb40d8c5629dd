//! Raw event log loading
//!
//! Event logs are headerless comma-separated files, one row per event, in
//! ascending timestamp order:
//!
//! ```text
//! timestamp, user, site, scheme, mode, event, detail, data
//! 2017-06-12 10:41:22,ast105,blog,image21,create,enter,start,
//! 2017-06-12 10:41:37,ast105,blog,image21,login,login,success,
//! ```
//!
//! Only the rows the session pairer needs survive loading: `login` events
//! (whatever their detail) and `enter` events whose detail is `start`. The
//! site, scheme, mode and data columns are never inspected.
//!
//! # Examples
//!
//! ```
//! use loginstats_analysis::event::{self, EventKind};
//!
//! let log = "\
//! 2017-06-12 10:41:22,ast105,blog,image21,create,enter,start,
//! 2017-06-12 10:41:30,ast105,blog,image21,create,passwordSubmitted,,
//! 2017-06-12 10:41:37,ast105,blog,image21,login,login,success,
//! ";
//! let events = event::load_events(log.as_bytes())?;
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[0].kind, EventKind::SessionStart);
//! assert_eq!(events[1].detail, "success");
//! # Ok::<(), event::LoadEventsError>(())
//! ```

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;

/// Timestamp layout used by event logs (second resolution, no timezone).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TIMESTAMP_COLUMN: usize = 0;
const USER_COLUMN: usize = 1;
const EVENT_COLUMN: usize = 5;
const DETAIL_COLUMN: usize = 6;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadEventsError {
    #[display("failed to open event log {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read event log record {record}")]
    Read { record: usize, source: csv::Error },
    #[display("event log record {record} has no {column} column")]
    MissingColumn { record: usize, column: &'static str },
    #[display("event log record {record} has an invalid timestamp {value:?}")]
    InvalidTimestamp {
        record: usize,
        value: String,
        source: chrono::ParseError,
    },
}

/// The kind of a retained event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum EventKind {
    /// An `enter`/`start` row: the user began a login attempt.
    SessionStart,
    /// A `login` row: the outcome of a login attempt, carried in the detail.
    Login,
}

impl EventKind {
    /// Classifies an event/detail column pair, returning `None` for rows that
    /// take no part in session pairing.
    #[must_use]
    pub fn classify(event: &str, detail: Option<&str>) -> Option<Self> {
        match (event, detail) {
            ("login", _) => Some(Self::Login),
            ("enter", Some("start")) => Some(Self::SessionStart),
            _ => None,
        }
    }
}

/// A single event retained from the raw log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub timestamp: NaiveDateTime,
    pub user_id: String,
    pub kind: EventKind,
    /// `start` for session starts, the login result for login events.
    pub detail: String,
}

impl RawEvent {
    /// Builds an event from a raw log record.
    ///
    /// Returns `Ok(None)` for rows that are filtered out. `position` is the
    /// 1-based position of the row, used in error messages.
    pub fn from_record(
        record: &csv::StringRecord,
        position: usize,
    ) -> Result<Option<Self>, LoadEventsError> {
        let Some(event) = record.get(EVENT_COLUMN) else {
            return Ok(None);
        };
        let Some(kind) = EventKind::classify(event, record.get(DETAIL_COLUMN)) else {
            return Ok(None);
        };

        let required = |index: usize, column: &'static str| {
            record.get(index).ok_or(LoadEventsError::MissingColumn {
                record: position,
                column,
            })
        };
        let timestamp = required(TIMESTAMP_COLUMN, "timestamp")?;
        let user_id = required(USER_COLUMN, "user")?;
        let detail = required(DETAIL_COLUMN, "event detail")?;

        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(
            |source| LoadEventsError::InvalidTimestamp {
                record: position,
                value: timestamp.to_owned(),
                source,
            },
        )?;

        Ok(Some(Self {
            timestamp,
            user_id: user_id.to_owned(),
            kind,
            detail: detail.to_owned(),
        }))
    }
}

/// Reads an event log, keeping only session-start and login events in log order.
pub fn load_events<R>(reader: R) -> Result<Vec<RawEvent>, LoadEventsError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut events = vec![];
    for (idx, record) in reader.records().enumerate() {
        let position = idx + 1;
        let record = record.map_err(|source| LoadEventsError::Read {
            record: position,
            source,
        })?;
        if let Some(event) = RawEvent::from_record(&record, position)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Reads the event log stored at `path`.
pub fn load_events_file<P>(path: P) -> Result<Vec<RawEvent>, LoadEventsError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadEventsError::Open {
        path: path.to_owned(),
        source,
    })?;
    load_events(file)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 6, 12)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_keeps_starts_and_logins_in_order() {
        let log = "\
2017-06-12 10:00:00,u1,blog,image21,create,enter,start,
2017-06-12 10:00:05,u1,blog,image21,login,login,success,
2017-06-12 10:00:06,u1,blog,image21,login,enter,goodLogin,
2017-06-12 10:00:07,u2,bank,image21,login,login,failure,extra
";
        let events = load_events(log.as_bytes()).unwrap();
        assert_eq!(
            events,
            [
                RawEvent {
                    timestamp: at(10, 0, 0),
                    user_id: "u1".into(),
                    kind: EventKind::SessionStart,
                    detail: "start".into(),
                },
                RawEvent {
                    timestamp: at(10, 0, 5),
                    user_id: "u1".into(),
                    kind: EventKind::Login,
                    detail: "success".into(),
                },
                RawEvent {
                    timestamp: at(10, 0, 7),
                    user_id: "u2".into(),
                    kind: EventKind::Login,
                    detail: "failure".into(),
                },
            ]
        );
    }

    #[test]
    fn test_other_enter_details_are_dropped() {
        let log = "\
2017-06-12 10:00:00,u1,blog,image21,create,enter,create,
2017-06-12 10:00:01,u1,blog,image21,create,enter,,
2017-06-12 10:00:02,u1,blog,image21,create,passwordSubmitted,start,
";
        assert!(load_events(log.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_short_rows_are_dropped_unless_retained() {
        let log = "2017-06-12 10:00:00,u1,blog\n";
        assert!(load_events(log.as_bytes()).unwrap().is_empty());

        let log = "2017-06-12 10:00:00,u1,blog,image21,login,login\n";
        let err = load_events(log.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadEventsError::MissingColumn {
                record: 1,
                column: "event detail"
            }
        ));
    }

    #[test]
    fn test_invalid_timestamp_is_fatal_for_retained_rows() {
        let log = "\
not a time,u1,blog,image21,create,enter,create,
2017-06-12 10:00:00,u1,blog,image21,create,enter,start,
2017/06/12 10:00:05,u1,blog,image21,login,login,success,
";
        let err = load_events(log.as_bytes()).unwrap_err();
        match err {
            LoadEventsError::InvalidTimestamp { record, value, .. } => {
                assert_eq!(record, 3);
                assert_eq!(value, "2017/06/12 10:00:05");
            }
            err => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_events_file("/nonexistent/event-log.csv").unwrap_err();
        assert!(matches!(err, LoadEventsError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/event-log.csv"));
    }
}
