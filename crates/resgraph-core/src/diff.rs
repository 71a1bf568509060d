//! Structural differences between two resource collections.
//!
//! Resources are matched by ID. A resource whose ID exists on both sides but whose value or type
//! changed shows up as removed (old) and added (new). Relationships are matched purely by their
//! `(source id, target id)` pair, so renaming a resource never changes the relationship sets.
//!
//! Every output is built by walking the ordered resource/relationship sequences; the hash
//! indexes are only used for membership checks.

use crate::resource::{Relationship, Resource, ResourceCollection, ResourceRef};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Differences {
    pub added_by_type: IndexMap<String, Vec<ResourceRef>>,
    pub removed_by_type: IndexMap<String, Vec<ResourceRef>>,
    pub added_relationships: Vec<Relationship>,
    pub removed_relationships: Vec<Relationship>,
}

impl Differences {
    pub fn is_empty(&self) -> bool {
        self.added_by_type.is_empty()
            && self.removed_by_type.is_empty()
            && self.added_relationships.is_empty()
            && self.removed_relationships.is_empty()
    }

    /// Human-readable listing of the differences.
    ///
    /// Resource groups follow `types` first; types not listed there follow in the order they were
    /// first seen.
    pub fn report<'a>(&'a self, types: &[&'a str]) -> DiffReport<'a> {
        let mut ordered: Vec<&'a str> = Vec::new();
        let seen = types
            .iter()
            .copied()
            .chain(self.removed_by_type.keys().map(String::as_str))
            .chain(self.added_by_type.keys().map(String::as_str));
        for ty in seen {
            if !ordered.contains(&ty) {
                ordered.push(ty);
            }
        }
        DiffReport {
            diff: self,
            types: ordered,
        }
    }
}

/// Computes what changed from `a` to `b`.
pub fn find_differences(a: &ResourceCollection, b: &ResourceCollection) -> Differences {
    let a_index = index_by_id(a);
    let b_index = index_by_id(b);

    let added_by_type = unmatched_by_type(&b.resources, &a_index);
    let removed_by_type = unmatched_by_type(&a.resources, &b_index);

    let a_pairs = a.relationship_id_pairs();
    let b_pairs = b.relationship_id_pairs();

    let added_relationships: Vec<Relationship> = b
        .relationships
        .iter()
        .filter(|rel| !a_pairs.contains(&rel.id_pair()))
        .cloned()
        .collect();
    let removed_relationships: Vec<Relationship> = a
        .relationships
        .iter()
        .filter(|rel| !b_pairs.contains(&rel.id_pair()))
        .cloned()
        .collect();

    tracing::debug!(
        added_types = added_by_type.len(),
        removed_types = removed_by_type.len(),
        added_relationships = added_relationships.len(),
        removed_relationships = removed_relationships.len(),
        "computed resource differences"
    );

    Differences {
        added_by_type,
        removed_by_type,
        added_relationships,
        removed_relationships,
    }
}

fn index_by_id(rc: &ResourceCollection) -> FxHashMap<&str, &ResourceRef> {
    let mut index = FxHashMap::default();
    for resource in &rc.resources {
        index.entry(resource.id()).or_insert(resource);
    }
    index
}

fn unmatched_by_type(
    resources: &[ResourceRef],
    other: &FxHashMap<&str, &ResourceRef>,
) -> IndexMap<String, Vec<ResourceRef>> {
    let mut out: IndexMap<String, Vec<ResourceRef>> = IndexMap::new();
    for resource in resources {
        if let Some(counterpart) = other.get(resource.id()) {
            if counterpart.value() == resource.value()
                && counterpart.resource_type() == resource.resource_type()
            {
                continue;
            }
        }
        out.entry(resource.resource_type().to_string())
            .or_default()
            .push(resource.clone());
    }
    out
}

pub struct DiffReport<'a> {
    diff: &'a Differences,
    types: Vec<&'a str>,
}

impl fmt::Display for DiffReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.diff.is_empty() {
            return writeln!(f, "no differences");
        }

        for ty in &self.types {
            let removed = self.diff.removed_by_type.get(*ty);
            let added = self.diff.added_by_type.get(*ty);
            if removed.is_none_or(Vec::is_empty) && added.is_none_or(Vec::is_empty) {
                continue;
            }
            writeln!(f, "{ty}:")?;
            for resource in removed.into_iter().flatten() {
                writeln!(f, "  - {} ({})", resource.value(), resource.id())?;
            }
            for resource in added.into_iter().flatten() {
                writeln!(f, "  + {} ({})", resource.value(), resource.id())?;
            }
        }

        if !self.diff.removed_relationships.is_empty() || !self.diff.added_relationships.is_empty()
        {
            writeln!(f, "relationships:")?;
            for rel in &self.diff.removed_relationships {
                writeln!(f, "  - {}", RelationshipLabel(rel))?;
            }
            for rel in &self.diff.added_relationships {
                writeln!(f, "  + {}", RelationshipLabel(rel))?;
            }
        }
        Ok(())
    }
}

struct RelationshipLabel<'a>(&'a Relationship);

impl fmt::Display for RelationshipLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |r: &Option<ResourceRef>| r.as_deref().map_or("?", |r| r.value()).to_owned();
        write!(f, "{} -> {}", side(&self.0.source), side(&self.0.target))
    }
}
