//! Membership graph built from a directory snapshot
//!
//! Each entry contributes one vertex keyed by its distinguished name, with
//! edges to the groups it is directly a member of. The graph is immutable
//! once built; a new snapshot needs a new graph.


use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::error::{MembershipError, Result};
use crate::types::DirectoryEntry;

/// Read-only adjacency map from identity to immediate parent identities
///
/// Keys keep the order in which entries appeared in the snapshot. The type is
/// `Send + Sync` and safe to share across threads without locking, since no
/// method takes `&mut self`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipGraph {
    adjacency: IndexMap<String, Vec<String>>,
}

/// Builds a graph from every entry in a snapshot
///
/// Fails with [`MembershipError::DuplicateIdentity`] on the first repeated
/// identity. Parent references are not validated.
pub fn build<'a, I>(entries: I) -> Result<MembershipGraph>
where
    I: IntoIterator<Item = &'a DirectoryEntry>,
{
    let mut adjacency = IndexMap::new();
    insert_entries(&mut adjacency, entries)?;
    Ok(MembershipGraph::finish(adjacency))
}

/// Builds a graph from separately fetched group and user entries
///
/// Groups are inserted first. A duplicate identity within or across the two
/// lists fails the build.
pub fn build_from_directory(
    groups: &[DirectoryEntry],
    users: &[DirectoryEntry],
) -> Result<MembershipGraph> {
    let mut adjacency = IndexMap::with_capacity(groups.len() + users.len());
    insert_entries(&mut adjacency, groups)?;
    insert_entries(&mut adjacency, users)?;
    Ok(MembershipGraph::finish(adjacency))
}

fn insert_entries<'a, I>(adjacency: &mut IndexMap<String, Vec<String>>, entries: I) -> Result<()>
where
    I: IntoIterator<Item = &'a DirectoryEntry>,
{
    for entry in entries {
        match adjacency.entry(entry.identity.clone()) {
            Entry::Occupied(_) => {
                return Err(MembershipError::DuplicateIdentity {
                    identity: entry.identity.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(entry.immediate_parents.clone());
            }
        }
    }
    Ok(())
}

impl MembershipGraph {
    /// Same as [`build`]
    pub fn build(entries: &[DirectoryEntry]) -> Result<Self> {
        build(entries)
    }

    fn finish(adjacency: IndexMap<String, Vec<String>>) -> Self {
        let graph = Self { adjacency };

        debug!(
            entries = graph.len(),
            edges = graph.edge_count(),
            "built membership graph"
        );

        let dangling = graph.dangling_references();
        if !dangling.is_empty() {
            warn!(
                count = dangling.len(),
                "membership graph references identities missing from the snapshot"
            );
        }

        graph
    }

    /// Immediate parents of `identity`, or `None` if it is not a vertex
    pub fn parents_of(&self, identity: &str) -> Option<&[String]> {
        self.adjacency.get(identity).map(Vec::as_slice)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.adjacency.contains_key(identity)
    }

    /// Vertex identities in snapshot order
    pub fn identities(&self) -> impl Iterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }

    /// Returns the number of vertices
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Total number of parent edges, counting repeats
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Parent identities that never appear as a vertex, sorted and deduplicated
    pub fn dangling_references(&self) -> Vec<&str> {
        self.adjacency
            .values()
            .flatten()
            .filter(|parent| !self.adjacency.contains_key(parent.as_str()))
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
