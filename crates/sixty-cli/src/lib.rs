//! Library surface of the Sixty mapper CLI: logging setup, source loading
//! and the mapping report.

pub mod logging;
pub mod report;
pub mod source;
