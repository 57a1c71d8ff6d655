//! Library side of the `tabmap` command-line importer.

pub mod logging;
pub mod pipeline;
