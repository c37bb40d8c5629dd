//! Per-scheme summary statistics
//!
//! For every scheme and [`MetricGroup`] a [`SummaryTable`] lists the mean,
//! sample standard deviation and median of each metric across users. Absent
//! values (a user without failed logins has no failed-login mean) are left out
//! of the metric they belong to. A statistic that is undefined for the values
//! left, such as the standard deviation of a single user, stays absent and is
//! written as an empty field.
//!
//! # File Format
//!
//! ```text
//! ,mean,standard deviation,median
//! total logins,5.5,2.1213203435596424,5.5
//! successful logins,4.0,1.4142135623730951,4.0
//! unsuccessful logins,1.5,0.7071067811865476,1.5
//! ```

use std::{
    fs::File,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use loginstats_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::{
    aggregate::UserStats,
    combined::{CombinedTable, Scheme},
    metric::{METRIC_GROUPS, Metric, MetricGroup},
};

const HEADER: [&str; 4] = ["", "mean", "standard deviation", "median"];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SummaryWriteError {
    #[display("failed to create statistics file {}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[display("failed to write statistics table")]
    Write { source: csv::Error },
}

/// Summary statistics of one metric across the users of one scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    /// Number of users with a value for this metric.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation, absent with fewer than two values.
    pub std_dev: Option<f64>,
    pub median: Option<f64>,
}

impl MetricSummary {
    #[must_use]
    pub fn compute<'a, I>(metric: Metric, rows: I) -> Self
    where
        I: IntoIterator<Item = &'a UserStats>,
    {
        let stats = DescriptiveStats::new(metric.present_values(rows));
        Self {
            metric,
            count: stats.as_ref().map_or(0, |s| s.count),
            mean: stats.as_ref().map(|s| s.mean),
            std_dev: stats.as_ref().and_then(|s| s.std_dev),
            median: stats.as_ref().map(|s| s.median),
        }
    }
}

/// Summary statistics of one metric group for one scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub scheme: Scheme,
    pub group: &'static str,
    pub rows: Vec<MetricSummary>,
}

impl SummaryTable {
    /// Summarizes every metric of `group` over `rows`.
    ///
    /// # Examples
    ///
    /// ```
    /// use loginstats_analysis::{
    ///     aggregate::UserStats,
    ///     combined::Scheme,
    ///     metric::LOGIN_TIME_GROUP,
    ///     summary::SummaryTable,
    /// };
    ///
    /// let user = |success: f64| UserStats {
    ///     user_id: "u".into(),
    ///     total_logins: 1,
    ///     successful_logins: 1,
    ///     unsuccessful_logins: 0,
    ///     avg_login_time_success: Some(success),
    ///     avg_login_time_failed: None,
    /// };
    /// let rows = [user(4.0), user(8.0)];
    /// let table = SummaryTable::compute(Scheme::Text21, LOGIN_TIME_GROUP, &rows);
    /// assert_eq!(table.file_name(), "Text21 login time per user stats.csv");
    /// assert_eq!(table.rows[0].mean, Some(6.0));
    /// assert_eq!(table.rows[1].mean, None);
    /// ```
    #[must_use]
    pub fn compute<'a, I>(scheme: Scheme, group: MetricGroup, rows: I) -> Self
    where
        I: IntoIterator<Item = &'a UserStats>,
        I::IntoIter: Clone,
    {
        let rows = rows.into_iter();
        Self {
            scheme,
            group: group.name,
            rows: group
                .metrics
                .iter()
                .map(|&metric| MetricSummary::compute(metric, rows.clone()))
                .collect(),
        }
    }

    /// File name the table is written under, `"<scheme> <group> stats.csv"`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{} {} stats.csv", self.scheme, self.group)
    }

    pub fn write_csv<W>(&self, writer: W) -> Result<(), SummaryWriteError>
    where
        W: io::Write,
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer
            .write_record(HEADER)
            .map_err(|source| SummaryWriteError::Write { source })?;
        for row in &self.rows {
            writer
                .serialize((row.metric, row.mean, row.std_dev, row.median))
                .map_err(|source| SummaryWriteError::Write { source })?;
        }
        writer.flush().map_err(|source| SummaryWriteError::Write {
            source: source.into(),
        })
    }

    /// Writes the table into `dir` under [`file_name`](Self::file_name),
    /// returning the path written.
    pub fn write_to_dir<P>(&self, dir: P) -> Result<PathBuf, SummaryWriteError>
    where
        P: AsRef<Path>,
    {
        let path = dir.as_ref().join(self.file_name());
        let file = File::create(&path).map_err(|source| SummaryWriteError::Create {
            path: path.clone(),
            source,
        })?;
        let mut writer = io::BufWriter::new(file);
        self.write_csv(&mut writer)?;
        writer.flush().map_err(|source| SummaryWriteError::Write {
            source: source.into(),
        })?;
        Ok(path)
    }
}

/// Summarizes every scheme and metric group of the combined table.
///
/// Tables come out scheme by scheme in [`Scheme::ALL`] order, with the groups
/// of each scheme in [`METRIC_GROUPS`] order. A scheme without users still
/// gets its tables, with every statistic absent.
#[must_use]
pub fn summarize(table: &CombinedTable) -> Vec<SummaryTable> {
    Scheme::ALL
        .into_iter()
        .flat_map(|scheme| {
            METRIC_GROUPS
                .into_iter()
                .map(move |group| SummaryTable::compute(scheme, group, table.scheme_rows(scheme)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{LOGIN_COUNT_GROUP, LOGIN_TIME_GROUP};

    fn user(
        id: &str,
        success: u32,
        failure: u32,
        avg_success: Option<f64>,
        avg_failed: Option<f64>,
    ) -> UserStats {
        UserStats {
            user_id: id.into(),
            total_logins: success + failure,
            successful_logins: success,
            unsuccessful_logins: failure,
            avg_login_time_success: avg_success,
            avg_login_time_failed: avg_failed,
        }
    }

    fn combined() -> CombinedTable {
        CombinedTable::combine([
            (
                Scheme::Image21,
                vec![
                    user("a", 3, 1, Some(10.0), Some(20.0)),
                    user("b", 5, 2, Some(14.0), None),
                    user("c", 4, 0, Some(12.0), None),
                ],
            ),
            (Scheme::Text21, vec![user("a", 1, 0, Some(7.0), None)]),
        ])
    }

    #[test]
    fn test_count_group() {
        let table = combined();
        let summary = SummaryTable::compute(
            Scheme::Image21,
            LOGIN_COUNT_GROUP,
            table.scheme_rows(Scheme::Image21),
        );
        let total = &summary.rows[0];
        assert_eq!(total.metric, Metric::TotalLogins);
        assert_eq!(total.count, 3);
        assert_eq!(total.mean, Some(5.0));
        assert_eq!(total.median, Some(4.0));
        // sample variance of [4, 7, 4] is 3
        assert!((total.std_dev.unwrap() - 3.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_absent_values_are_skipped_per_metric() {
        let table = combined();
        let summary = SummaryTable::compute(
            Scheme::Image21,
            LOGIN_TIME_GROUP,
            table.scheme_rows(Scheme::Image21),
        );
        let success = &summary.rows[0];
        assert_eq!(success.count, 3);
        assert_eq!(success.mean, Some(12.0));
        assert_eq!(success.std_dev, Some(2.0));

        let failed = &summary.rows[1];
        assert_eq!(failed.count, 1);
        assert_eq!(failed.mean, Some(20.0));
        assert_eq!(failed.median, Some(20.0));
        assert_eq!(failed.std_dev, None);
    }

    #[test]
    fn test_summarize_covers_every_scheme_and_group() {
        let tables = summarize(&combined());
        let names = tables.iter().map(SummaryTable::file_name).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "Image21 number of logins per user stats.csv",
                "Image21 login time per user stats.csv",
                "Text21 number of logins per user stats.csv",
                "Text21 login time per user stats.csv",
            ]
        );

        let text_time = &tables[3];
        assert_eq!(text_time.rows[1].count, 0);
        assert_eq!(text_time.rows[1].mean, None);
        assert_eq!(text_time.rows[1].median, None);
    }

    #[test]
    fn test_written_layout() {
        let table = combined();
        let summary = SummaryTable::compute(
            Scheme::Text21,
            LOGIN_TIME_GROUP,
            table.scheme_rows(Scheme::Text21),
        );
        let mut buf = vec![];
        summary.write_csv(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            ",mean,standard deviation,median\n\
             avg login time success (s),7.0,,7.0\n\
             avg login time failed (s),,,\n"
        );
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let tables = summarize(&combined());
        let path = tables[0].write_to_dir(dir.path()).unwrap();
        assert_eq!(
            path,
            dir.path().join("Image21 number of logins per user stats.csv")
        );
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with(",mean,standard deviation,median\ntotal logins,5.0,"));
    }

    #[test]
    fn test_json_shape() {
        let tables = summarize(&CombinedTable::default());
        let json = serde_json::to_value(&tables[0]).unwrap();
        assert_eq!(json["scheme"], "Image21");
        assert_eq!(json["group"], "number of logins per user");
        assert_eq!(json["rows"][0]["metric"], "total logins");
        assert!(json["rows"][0]["mean"].is_null());
    }
}
