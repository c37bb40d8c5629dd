//! The combined per-user, per-scheme table
//!
//! Aggregated statistics of both password schemes are tagged with their
//! [`Scheme`], merged and sorted by user id into a [`CombinedTable`]. The
//! table is persisted as CSV and is the only artifact the report and chart
//! stages read.
//!
//! # File Format
//!
//! ```text
//! userid,pwd scheme,total logins,successful logins,unsuccessful logins,avg login time success (s),avg login time failed (s)
//! ast105,Image21,4,3,1,12.0,31.0
//! ast105,Text21,2,2,0,8.5,
//! ```
//!
//! An absent mean is an empty field. Count columns also accept integral
//! floating-point text such as `3.0`, which dataframe tools emit for columns
//! that once held missing values.

use std::{
    fs::File,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

use crate::{aggregate::UserStats, metric::Metric};

/// Password scheme under study.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Scheme {
    #[display("Image21")]
    Image21,
    #[display("Text21")]
    Text21,
}

impl Scheme {
    pub const ALL: [Self; 2] = [Self::Image21, Self::Text21];
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CombinedTableError {
    #[display("failed to create combined table {}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[display("failed to open combined table {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to write combined table")]
    Write { source: csv::Error },
    #[display("failed to read combined table record {record}")]
    Read { record: usize, source: csv::Error },
}

/// Per-user statistics tagged with the scheme they were measured under.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeLabeledStats {
    pub scheme: Scheme,
    pub stats: UserStats,
}

/// CSV row layout of the combined table.
#[derive(Debug, Serialize, Deserialize)]
struct CombinedRow {
    #[serde(rename = "userid")]
    user_id: String,
    #[serde(rename = "pwd scheme")]
    scheme: Scheme,
    #[serde(rename = "total logins", deserialize_with = "deserialize_count")]
    total_logins: u32,
    #[serde(rename = "successful logins", deserialize_with = "deserialize_count")]
    successful_logins: u32,
    #[serde(rename = "unsuccessful logins", deserialize_with = "deserialize_count")]
    unsuccessful_logins: u32,
    #[serde(rename = "avg login time success (s)")]
    avg_login_time_success: Option<f64>,
    #[serde(rename = "avg login time failed (s)")]
    avg_login_time_failed: Option<f64>,
}

impl From<&SchemeLabeledStats> for CombinedRow {
    fn from(row: &SchemeLabeledStats) -> Self {
        let SchemeLabeledStats { scheme, stats } = row;
        Self {
            user_id: stats.user_id.clone(),
            scheme: *scheme,
            total_logins: stats.total_logins,
            successful_logins: stats.successful_logins,
            unsuccessful_logins: stats.unsuccessful_logins,
            avg_login_time_success: stats.avg_login_time_success,
            avg_login_time_failed: stats.avg_login_time_failed,
        }
    }
}

impl From<CombinedRow> for SchemeLabeledStats {
    fn from(row: CombinedRow) -> Self {
        Self {
            scheme: row.scheme,
            stats: UserStats {
                user_id: row.user_id,
                total_logins: row.total_logins,
                successful_logins: row.successful_logins,
                unsuccessful_logins: row.unsuccessful_logins,
                avg_login_time_success: row.avg_login_time_success,
                avg_login_time_failed: row.avg_login_time_failed,
            },
        }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract().abs() > 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(D::Error::custom(format!("invalid login count {value}")));
    }
    Ok(value as u32)
}

/// Column labels of the combined table, in file order.
#[must_use]
pub fn header() -> [&'static str; 7] {
    [
        "userid",
        "pwd scheme",
        Metric::TotalLogins.column_name(),
        Metric::SuccessfulLogins.column_name(),
        Metric::UnsuccessfulLogins.column_name(),
        Metric::AvgLoginTimeSuccess.column_name(),
        Metric::AvgLoginTimeFailed.column_name(),
    ]
}

/// Merged statistics of all schemes, sorted by user id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedTable {
    rows: Vec<SchemeLabeledStats>,
}

impl CombinedTable {
    /// Tags each scheme's statistics and merges them.
    ///
    /// Rows are concatenated in the given scheme order and then stably sorted
    /// by user id, so a user measured under several schemes keeps the
    /// concatenation order among its rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use loginstats_analysis::{
    ///     aggregate::UserStats,
    ///     combined::{CombinedTable, Scheme},
    /// };
    ///
    /// let user = |id: &str| UserStats {
    ///     user_id: id.into(),
    ///     total_logins: 1,
    ///     successful_logins: 1,
    ///     unsuccessful_logins: 0,
    ///     avg_login_time_success: Some(3.0),
    ///     avg_login_time_failed: None,
    /// };
    /// let table = CombinedTable::combine([
    ///     (Scheme::Image21, vec![user("b"), user("c")]),
    ///     (Scheme::Text21, vec![user("a"), user("b")]),
    /// ]);
    /// let order = table
    ///     .rows()
    ///     .iter()
    ///     .map(|row| (row.stats.user_id.as_str(), row.scheme))
    ///     .collect::<Vec<_>>();
    /// assert_eq!(
    ///     order,
    ///     [
    ///         ("a", Scheme::Text21),
    ///         ("b", Scheme::Image21),
    ///         ("b", Scheme::Text21),
    ///         ("c", Scheme::Image21),
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn combine<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = (Scheme, Vec<UserStats>)>,
    {
        let mut rows = tables
            .into_iter()
            .flat_map(|(scheme, stats)| {
                stats
                    .into_iter()
                    .map(move |stats| SchemeLabeledStats { scheme, stats })
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| a.stats.user_id.cmp(&b.stats.user_id));
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[SchemeLabeledStats] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Statistics of the users measured under `scheme`, in table order.
    pub fn scheme_rows(&self, scheme: Scheme) -> impl Iterator<Item = &UserStats> + Clone + '_ {
        self.rows
            .iter()
            .filter(move |row| row.scheme == scheme)
            .map(|row| &row.stats)
    }

    /// Splits the table into per-scheme row lists, in [`Scheme::ALL`] order.
    #[must_use]
    pub fn split_by_scheme(&self) -> Vec<(Scheme, Vec<&UserStats>)> {
        Scheme::ALL
            .into_iter()
            .map(|scheme| (scheme, self.scheme_rows(scheme).collect()))
            .collect()
    }

    /// Writes the table as CSV, header first.
    pub fn write_csv<W>(&self, writer: W) -> Result<(), CombinedTableError>
    where
        W: io::Write,
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer
            .write_record(header())
            .map_err(|source| CombinedTableError::Write { source })?;
        for row in &self.rows {
            writer
                .serialize(CombinedRow::from(row))
                .map_err(|source| CombinedTableError::Write { source })?;
        }
        writer
            .flush()
            .map_err(|source| CombinedTableError::Write {
                source: source.into(),
            })?;
        Ok(())
    }

    /// Creates (or truncates) the file at `path` and writes the table into it.
    pub fn write_path<P>(&self, path: P) -> Result<(), CombinedTableError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| CombinedTableError::Create {
            path: path.to_owned(),
            source,
        })?;
        let mut writer = io::BufWriter::new(file);
        self.write_csv(&mut writer)?;
        writer.flush().map_err(|source| CombinedTableError::Write {
            source: source.into(),
        })
    }

    /// Reads a table written by [`write_csv`](Self::write_csv), keeping the
    /// file's row order.
    pub fn read_csv<R>(reader: R) -> Result<Self, CombinedTableError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let rows = reader
            .deserialize::<CombinedRow>()
            .enumerate()
            .map(|(idx, row)| {
                row.map(SchemeLabeledStats::from)
                    .map_err(|source| CombinedTableError::Read {
                        record: idx + 1,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    /// Reads the table stored at `path`.
    pub fn read_path<P>(path: P) -> Result<Self, CombinedTableError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CombinedTableError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::read_csv(io::BufReader::new(file))
    }
}
