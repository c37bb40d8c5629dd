//! Login-time analysis for graphical and text password schemes
//!
//! This crate turns raw authentication event logs into per-user login
//! statistics and summarizes them per password scheme.
//!
//! # Overview
//!
//! Each scheme has its own event log. The pipeline runs in stages:
//!
//! 1. **Load Events** ([`event::load_events`]): read the headerless log, keeping
//!    only session-start and login events
//! 2. **Pair Sessions** ([`session::SessionPairer`]): pair each login with the
//!    session start immediately before it and measure the elapsed time
//! 3. **Aggregate** ([`aggregate::aggregate_sessions`]): count logins by result
//!    and average their times per user
//! 4. **Combine** ([`combined::CombinedTable`]): tag rows with their
//!    [`combined::Scheme`], merge and sort by user id, and persist as CSV
//! 5. **Summarize** ([`summary::summarize`]): mean, standard deviation and median
//!    of every [`metric::Metric`] per scheme
//!
//! The combined table is the hand-off point: the reporting and charting stages
//! read it back from disk and never see the raw logs.
//!
//! # Examples
//!
//! ```
//! use loginstats_analysis::{
//!     aggregate::aggregate_sessions,
//!     combined::{CombinedTable, Scheme},
//!     event::load_events,
//!     session::pair_sessions,
//!     summary::summarize,
//! };
//!
//! let image_log = "\
//! 2017-06-12 10:00:00,ast105,blog,image21,login,enter,start,
//! 2017-06-12 10:00:12,ast105,blog,image21,login,login,success,
//! 2017-06-12 10:01:00,ast105,bank,image21,login,enter,start,
//! 2017-06-12 10:01:31,ast105,bank,image21,login,login,failure,
//! ";
//! let text_log = "\
//! 2017-06-12 11:00:00,ast105,blog,text21,login,enter,start,
//! 2017-06-12 11:00:08,ast105,blog,text21,login,login,success,
//! ";
//!
//! let image = aggregate_sessions(pair_sessions(load_events(image_log.as_bytes())?));
//! let text = aggregate_sessions(pair_sessions(load_events(text_log.as_bytes())?));
//! let table = CombinedTable::combine([(Scheme::Image21, image), (Scheme::Text21, text)]);
//! assert_eq!(table.len(), 2);
//!
//! let summaries = summarize(&table);
//! assert_eq!(summaries[1].file_name(), "Image21 login time per user stats.csv");
//! assert_eq!(summaries[1].rows[0].mean, Some(12.0));
//! assert_eq!(summaries[1].rows[1].mean, Some(31.0));
//! # Ok::<(), loginstats_analysis::event::LoadEventsError>(())
//! ```

pub mod aggregate;
pub mod combined;
pub mod event;
pub mod metric;
pub mod session;
pub mod summary;
