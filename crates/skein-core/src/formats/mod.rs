//! # External Formats
//!
//! Input diagram descriptions and results-log rows.
//!
//! The CORE only defines the data shapes; reading and writing files is done
//! by the app layer.

pub mod input;
pub mod results;

pub use input::{CrossingSpec, DiagramSpec};
pub use results::ResultRecord;
