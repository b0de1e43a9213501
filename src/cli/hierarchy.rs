//! Hierarchy mode: matching groups rendered as trees

use colored::Colorize;
use log::debug;

use crate::cli::CommandContext;
use crate::error::Result;
use crate::output::{emit, format_hierarchy, sort_by_path};

/// Populate and print the full tree below every group matching `search`.
///
/// A root that fails to populate is still printed with what was fetched. A
/// cancellation stops population; the notice is printed, then the roots
/// finished so far.
pub async fn run(ctx: &mut CommandContext, search: &str) -> Result<()> {
    debug!("Running in hierarchy mode, search term: '{}'", search);
    let mut roots = ctx
        .catalog
        .groups(search, ctx.include_all)
        .await
        .map_err(|e| e.context("error getting initial groups"))?;
    ctx.status.clear().await;
    debug!("Found {} initial matching groups", roots.len());

    if roots.is_empty() {
        emit(&format!("\nNo groups found matching search term: {}\n", search))?;
        return Ok(());
    }

    sort_by_path(&mut roots);
    emit("Populating hierarchy for found groups...\n")?;

    let total = roots.len();
    let mut populated = Vec::with_capacity(total);
    let mut cancelled = false;

    for (i, mut root) in roots.into_iter().enumerate() {
        ctx.status
            .show(&format!("[{}/{}] Populating: {}", i + 1, total, root.full_path))
            .await;
        let result = ctx.catalog.populate_hierarchy(&mut root, ctx.include_all).await;
        ctx.status.clear().await;

        match result {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => {
                cancelled = true;
                break;
            }
            Err(e) => {
                eprintln!(
                    "\n{} Failed to fully populate group {} (ID: {}): {}",
                    "Warning:".yellow(),
                    root.full_path,
                    root.id,
                    e
                );
            }
        }
        populated.push(root);
    }

    if cancelled {
        emit("\nOperation cancelled during hierarchy population.\n")?;
    }

    for root in &populated {
        emit(&format_hierarchy(root))?;
    }

    Ok(())
}
