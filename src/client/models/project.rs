//! Project models

use serde::{Deserialize, Serialize};

/// Project resource (a leaf of the group tree)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID
    pub id: u64,

    /// Full path including every parent namespace, e.g. `platform/infra/terraform`
    pub path_with_namespace: String,

    /// Display name
    pub name: String,
}
