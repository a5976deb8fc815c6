//! `swarm-output` — simulation output writers for the rust_swarm framework.
//!
//! The CSV backend creates two files:
//!
//! | File                  | Contents                                   |
//! |-----------------------|--------------------------------------------|
//! | `agent_snapshots.csv` | Per-agent pose and mission state           |
//! | `tick_summaries.csv`  | Per-tick aggregate progress                |
//!
//! The backend implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `swarm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swarm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
