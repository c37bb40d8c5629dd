//! Per-user login statistics
//!
//! Sessions of one scheme are grouped by user. Each user with at least one
//! session gets a [`UserStats`] row: login counts by result and the mean
//! elapsed time of successful and failed logins. A mean over zero sessions is
//! absent rather than zero, while the matching count is zero.

use std::collections::BTreeMap;

use crate::session::{LoginResult, SessionRecord};

/// Login statistics of a single user within one scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_id: String,
    pub total_logins: u32,
    pub successful_logins: u32,
    pub unsuccessful_logins: u32,
    /// Mean seconds per successful login, `None` without successes.
    pub avg_login_time_success: Option<f64>,
    /// Mean seconds per failed login, `None` without failures.
    pub avg_login_time_failed: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    count: u32,
    sum: f64,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }

    fn mean(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct UserAccumulator {
    total: u32,
    success: MeanAccumulator,
    failure: MeanAccumulator,
}

impl UserAccumulator {
    fn push(&mut self, result: &LoginResult, elapsed_seconds: f64) {
        self.total += 1;
        match result {
            LoginResult::Success => self.success.push(elapsed_seconds),
            LoginResult::Failure => self.failure.push(elapsed_seconds),
            LoginResult::Other(_) => {}
        }
    }

    fn finish(self, user_id: String) -> UserStats {
        UserStats {
            user_id,
            total_logins: self.total,
            successful_logins: self.success.count,
            unsuccessful_logins: self.failure.count,
            avg_login_time_success: self.success.mean(),
            avg_login_time_failed: self.failure.mean(),
        }
    }
}

/// Aggregates sessions into per-user statistics, ordered by user id.
///
/// # Examples
///
/// ```
/// use loginstats_analysis::{
///     aggregate::aggregate_sessions,
///     session::{LoginResult, SessionRecord},
/// };
///
/// let stats = aggregate_sessions([SessionRecord {
///     user_id: "alice".into(),
///     result: LoginResult::Success,
///     elapsed_seconds: 5.0,
/// }]);
/// assert_eq!(stats[0].total_logins, 1);
/// assert_eq!(stats[0].unsuccessful_logins, 0);
/// assert_eq!(stats[0].avg_login_time_success, Some(5.0));
/// assert_eq!(stats[0].avg_login_time_failed, None);
/// ```
pub fn aggregate_sessions<I>(sessions: I) -> Vec<UserStats>
where
    I: IntoIterator<Item = SessionRecord>,
{
    let mut users = BTreeMap::<String, UserAccumulator>::new();
    for session in sessions {
        users
            .entry(session.user_id)
            .or_default()
            .push(&session.result, session.elapsed_seconds);
    }

    users
        .into_iter()
        .map(|(user_id, acc)| acc.finish(user_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(user: &str, result: LoginResult, elapsed_seconds: f64) -> SessionRecord {
        SessionRecord {
            user_id: user.into(),
            result,
            elapsed_seconds,
        }
    }

    #[test]
    fn test_counts_and_means_per_user() {
        let stats = aggregate_sessions([
            session("bob", LoginResult::Failure, 10.0),
            session("alice", LoginResult::Success, 4.0),
            session("bob", LoginResult::Success, 7.0),
            session("alice", LoginResult::Success, 8.0),
            session("bob", LoginResult::Failure, 20.0),
        ]);

        assert_eq!(
            stats,
            [
                UserStats {
                    user_id: "alice".into(),
                    total_logins: 2,
                    successful_logins: 2,
                    unsuccessful_logins: 0,
                    avg_login_time_success: Some(6.0),
                    avg_login_time_failed: None,
                },
                UserStats {
                    user_id: "bob".into(),
                    total_logins: 3,
                    successful_logins: 1,
                    unsuccessful_logins: 2,
                    avg_login_time_success: Some(7.0),
                    avg_login_time_failed: Some(15.0),
                },
            ]
        );
    }

    #[test]
    fn test_failures_only_leaves_success_mean_absent() {
        let stats = aggregate_sessions([session("carol", LoginResult::Failure, 3.0)]);
        assert_eq!(stats[0].successful_logins, 0);
        assert_eq!(stats[0].avg_login_time_success, None);
        assert_eq!(stats[0].avg_login_time_failed, Some(3.0));
    }

    #[test]
    fn test_totals_match_result_counts() {
        let stats = aggregate_sessions(
            (0..20).map(|i| {
                let result = if i % 3 == 0 {
                    LoginResult::Failure
                } else {
                    LoginResult::Success
                };
                session(&format!("user{}", i % 4), result, f64::from(i))
            }),
        );
        assert_eq!(stats.len(), 4);
        for user in &stats {
            assert_eq!(
                user.total_logins,
                user.successful_logins + user.unsuccessful_logins
            );
        }
    }

    #[test]
    fn test_other_results_count_toward_total_only() {
        let stats = aggregate_sessions([
            session("dave", LoginResult::Other("timeout".into()), 30.0),
            session("dave", LoginResult::Success, 6.0),
        ]);
        assert_eq!(stats[0].total_logins, 2);
        assert_eq!(stats[0].successful_logins, 1);
        assert_eq!(stats[0].unsuccessful_logins, 0);
        assert_eq!(stats[0].avg_login_time_success, Some(6.0));
    }

    #[test]
    fn test_no_sessions() {
        assert!(aggregate_sessions([]).is_empty());
    }
}
