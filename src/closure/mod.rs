//! # Closure Resolution
//!
//! Computes nested group membership from a [`MembershipGraph`]:
//! - **Lazy**: depth-first walk per query, O(V + E)
//! - **Eager**: every vertex's closure cached at construction, queries union
//!   the cached closures of the principal's immediate parents
//!
//! Both strategies return the same sets. Cycles and dangling parent
//! references are resolved during the walk and never reported as errors.
//!
//! [`MembershipGraph`]: crate::graph::MembershipGraph

mod resolver;
mod traversal;

pub use resolver::{ClosureResolver, ResolutionStrategy, ResolverConfig, ResolverStats};
pub use traversal::transitive_parents;

use std::collections::HashSet;

use crate::types::DirectoryEntry;

/// Function form of [`ClosureResolver::resolve_closure`]
pub fn resolve_closure(resolver: &ClosureResolver, principal: &DirectoryEntry) -> HashSet<String> {
    resolver.resolve_closure(principal)
}
