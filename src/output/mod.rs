//! Output formatting for CLI results

pub mod list;
pub mod progress;
pub mod tree;

pub use list::{format_list, label_width, sort_by_path};
pub use progress::{StatusLine, StatusMode, StatusSignal};
pub use tree::format_hierarchy;

use std::io::{self, Write};

use crate::error::Result;

/// Write rendered output to stdout.
pub fn emit(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
