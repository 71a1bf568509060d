//! Value-based equality for [`ResourceCollection`].
//!
//! Two collections are equal when their resource ID sets match and their `(source id, target id)`
//! relationship sets match. Order is irrelevant and duplicates collapse.

use crate::resource::{Resource, ResourceCollection};
use rustc_hash::FxHashSet;

impl ResourceCollection {
    pub fn resource_ids(&self) -> FxHashSet<&str> {
        self.resources.iter().map(|r| r.id()).collect()
    }

    pub fn relationship_id_pairs(&self) -> FxHashSet<(Option<&str>, Option<&str>)> {
        self.relationships.iter().map(|rel| rel.id_pair()).collect()
    }
}

impl PartialEq for ResourceCollection {
    fn eq(&self, other: &Self) -> bool {
        self.resource_ids() == other.resource_ids()
            && self.relationship_id_pairs() == other.relationship_id_pairs()
    }
}

impl Eq for ResourceCollection {}
