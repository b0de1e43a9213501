//! Flat listing modes: groups, projects, or both

use log::debug;

use crate::cli::CommandContext;
use crate::error::Result;
use crate::output::{emit, format_list, label_width, sort_by_path};

/// List groups matching `search`.
pub async fn run_groups(ctx: &mut CommandContext, search: &str) -> Result<()> {
    debug!("Running in groups mode, search term: '{}'", search);
    let mut groups = ctx
        .catalog
        .groups(search, ctx.include_all)
        .await
        .map_err(|e| e.context("error getting groups"))?;
    ctx.status.clear().await;
    debug!("Found {} groups", groups.len());

    if groups.is_empty() {
        emit(&format!("\nNo groups found matching search term: {}\n", search))?;
        return Ok(());
    }

    sort_by_path(&mut groups);
    emit(&format_list(&groups, 0))?;
    Ok(())
}

/// List projects matching `search`.
pub async fn run_projects(ctx: &mut CommandContext, search: &str) -> Result<()> {
    debug!("Running in projects mode, search term: '{}'", search);
    let mut projects = ctx
        .catalog
        .projects(search, ctx.include_all)
        .await
        .map_err(|e| e.context("error getting projects"))?;
    ctx.status.clear().await;
    debug!("Found {} projects", projects.len());

    if projects.is_empty() {
        emit(&format!("\nNo projects found matching search term: {}\n", search))?;
        return Ok(());
    }

    sort_by_path(&mut projects);
    emit(&format_list(&projects, 0))?;
    Ok(())
}

/// List groups, then projects, with aligned ID columns.
pub async fn run_both(ctx: &mut CommandContext, search: &str) -> Result<()> {
    debug!("Running in both mode, search term: '{}'", search);
    let mut groups = ctx
        .catalog
        .groups(search, ctx.include_all)
        .await
        .map_err(|e| e.context("error getting groups"))?;
    debug!("Found {} groups", groups.len());

    let mut projects = ctx
        .catalog
        .projects(search, ctx.include_all)
        .await
        .map_err(|e| e.context("error getting projects"))?;
    debug!("Found {} projects", projects.len());
    ctx.status.clear().await;

    if groups.is_empty() && projects.is_empty() {
        emit(&format!("\nNo groups or projects found matching search term: {}\n", search))?;
        return Ok(());
    }

    let width = label_width(&groups).max(label_width(&projects));

    if groups.is_empty() {
        emit(&format!("\nNo groups found matching search term: {}\n", search))?;
    } else {
        emit("\nGroups:\n")?;
        sort_by_path(&mut groups);
        emit(&format_list(&groups, width))?;
    }

    if projects.is_empty() {
        emit(&format!("\nNo projects found matching search term: {}\n", search))?;
    } else {
        emit("\nProjects:\n")?;
        sort_by_path(&mut projects);
        emit(&format_list(&projects, width))?;
    }

    Ok(())
}
