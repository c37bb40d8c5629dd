//! Login session reconstruction
//!
//! A login session is a session-start event followed by the login event that
//! reports its outcome. Event logs interleave users freely, so sessions are
//! recovered from *adjacency*: the [`SessionPairer`] remembers at most one
//! pending start and pairs it with the very next login event.
//!
//! # Pairing Rules
//!
//! ```text
//! event          pending      action
//! ─────────────  ───────────  ─────────────────────────────────────────
//! start(u)       any          pending := start(u)   (older start is lost)
//! login(u, r)    none         drop login
//! login(u, r)    start(u)     emit session(u, r, elapsed); clear pending
//! login(u, r)    start(v≠u)   drop login; clear pending
//! ```
//!
//! Dropped events leave no trace: there is no diagnostic and no drop count.
//!
//! # Examples
//!
//! ```
//! use loginstats_analysis::{
//!     event::load_events,
//!     session::{LoginResult, pair_sessions},
//! };
//!
//! let log = "\
//! 2017-06-12 10:00:00,alice,blog,image21,login,enter,start,
//! 2017-06-12 10:00:05,alice,blog,image21,login,login,success,
//! ";
//! let sessions = pair_sessions(load_events(log.as_bytes())?);
//! assert_eq!(sessions.len(), 1);
//! assert_eq!(sessions[0].user_id, "alice");
//! assert_eq!(sessions[0].result, LoginResult::Success);
//! assert_eq!(sessions[0].elapsed_seconds, 5.0);
//! # Ok::<(), loginstats_analysis::event::LoadEventsError>(())
//! ```

use chrono::NaiveDateTime;

use crate::event::{EventKind, RawEvent};

/// Outcome of a login attempt, taken from the login event's detail column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum LoginResult {
    #[display("success")]
    Success,
    #[display("failure")]
    Failure,
    /// Any other detail, kept verbatim. Counted as a login but neither a
    /// success nor a failure.
    #[display("{_0}")]
    Other(String),
}

impl From<String> for LoginResult {
    fn from(detail: String) -> Self {
        match detail.as_str() {
            "success" => Self::Success,
            "failure" => Self::Failure,
            _ => Self::Other(detail),
        }
    }
}

/// A reconstructed login session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub user_id: String,
    pub result: LoginResult,
    /// Time from the session start to the login event. Negative when the log
    /// clock went backwards.
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone)]
struct PendingStart {
    user_id: String,
    started_at: NaiveDateTime,
}

/// Single-slot state machine pairing session starts with login events.
///
/// Feed events in log order with [`push`](Self::push); each call returns the
/// session completed by that event, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionPairer {
    pending: Option<PendingStart>,
}

impl SessionPairer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a session start is waiting for its login event.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The user of the pending session start.
    #[must_use]
    pub fn pending_user(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.user_id.as_str())
    }

    /// Advances the state machine by one event.
    #[expect(clippy::cast_precision_loss)]
    pub fn push(&mut self, event: RawEvent) -> Option<SessionRecord> {
        let RawEvent {
            timestamp,
            user_id,
            kind,
            detail,
        } = event;

        match kind {
            EventKind::SessionStart => {
                self.pending = Some(PendingStart {
                    user_id,
                    started_at: timestamp,
                });
                None
            }
            EventKind::Login => {
                let pending = self.pending.take()?;
                if pending.user_id != user_id {
                    return None;
                }
                let elapsed = timestamp.signed_duration_since(pending.started_at);
                Some(SessionRecord {
                    user_id,
                    result: LoginResult::from(detail),
                    elapsed_seconds: elapsed.num_seconds() as f64,
                })
            }
        }
    }
}

/// Pairs a whole event sequence, returning the sessions in completion order.
pub fn pair_sessions<I>(events: I) -> Vec<SessionRecord>
where
    I: IntoIterator<Item = RawEvent>,
{
    let mut pairer = SessionPairer::new();
    events
        .into_iter()
        .filter_map(|event| pairer.push(event))
        .collect()
}
