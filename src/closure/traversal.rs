//! Cycle-safe transitive walk over a membership graph

use std::collections::HashSet;

use crate::graph::MembershipGraph;

/// Collects every identity reachable from `seeds` by following parent edges
///
/// The seeds themselves are part of the result. Uses an explicit stack, so
/// deep hierarchies cannot exhaust the call stack. An identity is pushed only
/// when it is first inserted into the visited set, which bounds the walk to
/// O(V + E) whatever cycles the data contains. Identities with no vertex in
/// the graph are kept but contribute no further parents.
pub fn transitive_parents<'s, I>(graph: &MembershipGraph, seeds: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'s str>,
{
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack: Vec<&str> = Vec::new();

    for seed in seeds {
        if visited.insert(seed.to_string()) {
            stack.push(seed);
        }
    }

    while let Some(current) = stack.pop() {
        let Some(parents) = graph.parents_of(current) else {
            continue;
        };

        for parent in parents {
            if !visited.contains(parent.as_str()) {
                visited.insert(parent.clone());
                stack.push(parent.as_str());
            }
        }
    }

    visited
}
