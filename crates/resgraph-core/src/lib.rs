#![forbid(unsafe_code)]

//! Resource graph model for infrastructure diagrams (headless).
//!
//! Design goals:
//! - a small, dependency-light model that every renderer shares
//! - deterministic outputs: anything ordered is built from the ordered resource and
//!   relationship sequences, never from hash map iteration
//! - tolerant inputs: missing endpoints and dangling references are valid states

pub mod diff;
pub mod equal;
pub mod error;
pub mod factory;
pub mod resource;
pub mod style;

pub use diff::{DiffReport, Differences, find_differences};
pub use error::{Error, Result};
pub use factory::ResourceFactory;
pub use resource::{GenericResource, Relationship, Resource, ResourceCollection, ResourceRef};
pub use style::{NodeColors, Style, StyleSheet, render_key, resolve_edge_color, resolve_node_color};

#[cfg(test)]
mod tests;
