//! Recursive hierarchy population

use std::future::Future;
use std::pin::Pin;

use log::{debug, warn};

use super::Catalog;
use crate::client::{Group, ListingApi};
use crate::error::{Error, Result};

type PopulateFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

impl<A: ListingApi> Catalog<A> {
    /// Fill in the direct projects and the full subgroup tree of `group`.
    ///
    /// Failures below a node are recorded and the remaining siblings are still
    /// populated; the first recorded error is returned once the walk is done.
    /// Cancellation stops the walk at once and is returned untouched.
    pub async fn populate_hierarchy(&self, group: &mut Group, include_all: bool) -> Result<()> {
        let mut ancestors = Vec::new();
        self.populate_node(group, include_all, &mut ancestors).await
    }

    fn populate_node<'a>(
        &'a self,
        group: &'a mut Group,
        include_all: bool,
        ancestors: &'a mut Vec<u64>,
    ) -> PopulateFuture<'a> {
        Box::pin(async move {
            debug!(
                "Populating group {} (ID: {}, parent: {:?})",
                group.full_path, group.id, group.parent_id
            );
            let mut first_error = None;

            match self.group_projects(group.id, include_all).await {
                Ok(projects) => group.projects = projects,
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    debug!("Fetching projects for {} failed: {}", group.full_path, e);
                    record(&mut first_error, e);
                }
            }

            let subgroups = match self.subgroups(group.id, include_all).await {
                Ok(subgroups) => subgroups,
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    debug!("Fetching subgroups for {} failed: {}", group.full_path, e);
                    record(&mut first_error, e);
                    group.sort_children();
                    return first_error.map_or(Ok(()), Err);
                }
            };

            ancestors.push(group.id);
            let mut populated = Vec::with_capacity(subgroups.len());

            for mut child in subgroups {
                if ancestors.contains(&child.id) {
                    warn!(
                        "Group {} (ID: {}) is its own ancestor; not descending into it",
                        child.full_path, child.id
                    );
                    record(
                        &mut first_error,
                        Error::Other(format!(
                            "group hierarchy loops back to {} (ID: {})",
                            child.full_path, child.id
                        )),
                    );
                    populated.push(child);
                    continue;
                }

                match self.populate_node(&mut child, include_all, ancestors).await {
                    Ok(()) => {}
                    Err(e) if e.is_cancelled() => return Err(e),
                    Err(e) => {
                        warn!("Failed to populate subgroup {}: {}", child.full_path, e);
                        record(
                            &mut first_error,
                            e.context(format!("failed to populate subgroup {}", child.full_path)),
                        );
                    }
                }
                populated.push(child);
            }

            ancestors.pop();
            group.subgroups = populated;
            group.sort_children();

            first_error.map_or(Ok(()), Err)
        })
    }
}

/// Keep the first error seen.
fn record(slot: &mut Option<Error>, error: Error) {
    if slot.is_none() {
        *slot = Some(error);
    }
}
