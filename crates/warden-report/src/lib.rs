//! Warden Reporting
//!
//! Turns the result tree of a conformance run into something a human can
//! read and a machine can consume:
//!
//! - [`flatten`]: preorder lines with bottom-up pass/total counts
//! - [`render`]: indented plain-text rendering with a summary line
//! - [`CheckReport`]: run id, verdict, counts, text and JSON output
//! - [`member_permission_table`]: per-member base/channel permission bits
//!
//! # Example
//!
//! ```ignore
//! use warden_report::CheckReport;
//!
//! let report = CheckReport::from_tree(&result_tree);
//! println!("{}", report.to_text());
//! ```

pub mod flatten;
pub mod member_table;
pub mod render;
pub mod report;
pub mod table;

// Re-export main types
pub use flatten::{FlatResult, flatten};
pub use member_table::{mark_from_end, mark_from_start, member_permission_table};
pub use render::{FAIL_GLYPH, PASS_GLYPH, render};
pub use report::{CheckReport, RunId};
pub use table::{Cell, TableSettings, render_table};
