//! Library side of the `hdh-catalog` binary: logging setup and catalog
//! session handling.

pub mod catalog;
pub mod logging;
