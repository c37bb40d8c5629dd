//! Numeric columns of the combined table
//!
//! Reports and charts address per-user statistics through [`Metric`], which
//! ties each statistic to its fixed column label. Metrics are summarized
//! together in [`MetricGroup`]s, one statistics file per group and scheme.

use std::fmt;

use crate::aggregate::UserStats;

/// What a metric measures, which decides how it is binned and labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum MetricKind {
    /// A number of logins.
    Count,
    /// A time in seconds.
    Duration,
}

/// A per-user statistic stored in the combined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalLogins,
    SuccessfulLogins,
    UnsuccessfulLogins,
    AvgLoginTimeSuccess,
    AvgLoginTimeFailed,
}

impl Metric {
    pub const ALL: [Self; 5] = [
        Self::TotalLogins,
        Self::SuccessfulLogins,
        Self::UnsuccessfulLogins,
        Self::AvgLoginTimeSuccess,
        Self::AvgLoginTimeFailed,
    ];

    /// The combined-table column label of this metric.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::TotalLogins => "total logins",
            Self::SuccessfulLogins => "successful logins",
            Self::UnsuccessfulLogins => "unsuccessful logins",
            Self::AvgLoginTimeSuccess => "avg login time success (s)",
            Self::AvgLoginTimeFailed => "avg login time failed (s)",
        }
    }

    #[must_use]
    pub const fn kind(self) -> MetricKind {
        match self {
            Self::TotalLogins | Self::SuccessfulLogins | Self::UnsuccessfulLogins => {
                MetricKind::Count
            }
            Self::AvgLoginTimeSuccess | Self::AvgLoginTimeFailed => MetricKind::Duration,
        }
    }

    /// Reads this metric from a user's statistics. Counts are always present.
    #[must_use]
    pub fn value(self, stats: &UserStats) -> Option<f64> {
        match self {
            Self::TotalLogins => Some(f64::from(stats.total_logins)),
            Self::SuccessfulLogins => Some(f64::from(stats.successful_logins)),
            Self::UnsuccessfulLogins => Some(f64::from(stats.unsuccessful_logins)),
            Self::AvgLoginTimeSuccess => stats.avg_login_time_success,
            Self::AvgLoginTimeFailed => stats.avg_login_time_failed,
        }
    }

    /// Collects the present values of this metric, skipping absent ones.
    pub fn present_values<'a, I>(self, rows: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a UserStats>,
    {
        rows.into_iter().filter_map(|row| self.value(row)).collect()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl serde::Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.column_name())
    }
}

/// A named set of metrics summarized into one statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricGroup {
    pub name: &'static str,
    pub metrics: &'static [Metric],
}

pub const LOGIN_COUNT_GROUP: MetricGroup = MetricGroup {
    name: "number of logins per user",
    metrics: &[
        Metric::TotalLogins,
        Metric::SuccessfulLogins,
        Metric::UnsuccessfulLogins,
    ],
};

pub const LOGIN_TIME_GROUP: MetricGroup = MetricGroup {
    name: "login time per user",
    metrics: &[Metric::AvgLoginTimeSuccess, Metric::AvgLoginTimeFailed],
};

/// Metric groups in report order.
pub const METRIC_GROUPS: [MetricGroup; 2] = [LOGIN_COUNT_GROUP, LOGIN_TIME_GROUP];
