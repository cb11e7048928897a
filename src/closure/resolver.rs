//! Closure resolution with a construction-time strategy

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, trace};

use super::traversal::transitive_parents;
use crate::error::Result;
use crate::graph::MembershipGraph;
use crate::types::DirectoryEntry;

/// How closures are computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStrategy {
    /// Walk the graph on every query
    #[default]
    Lazy,

    /// Precompute every vertex's closure when the resolver is built
    Eager,
}

/// Configuration for the closure resolver
///
/// Deserializes from either `{"strategy": "lazy" | "eager"}` or the
/// `{"eager": true | false}` shorthand. Unknown keys are rejected, as is a
/// document giving both keys with conflicting values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResolverConfigFile")]
pub struct ResolverConfig {
    /// Resolution strategy
    pub strategy: ResolutionStrategy,
}

/// On-disk shape of [`ResolverConfig`]
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ResolverConfigFile {
    strategy: Option<ResolutionStrategy>,
    eager: Option<bool>,
}

impl TryFrom<ResolverConfigFile> for ResolverConfig {
    type Error = String;

    fn try_from(file: ResolverConfigFile) -> std::result::Result<Self, Self::Error> {
        let from_flag = file.eager.map(|eager| Self::from_eager_flag(eager).strategy);

        let strategy = match (file.strategy, from_flag) {
            (Some(strategy), Some(flag)) if strategy != flag => {
                return Err(format!(
                    "conflicting resolver settings: strategy {strategy:?} but eager = {}",
                    flag == ResolutionStrategy::Eager
                ));
            }
            (Some(strategy), _) | (None, Some(strategy)) => strategy,
            (None, None) => ResolutionStrategy::default(),
        };

        Ok(Self { strategy })
    }
}

impl ResolverConfig {
    pub fn lazy() -> Self {
        Self {
            strategy: ResolutionStrategy::Lazy,
        }
    }

    pub fn eager() -> Self {
        Self {
            strategy: ResolutionStrategy::Eager,
        }
    }

    /// Maps an `eager: true|false` setting onto a strategy
    pub fn from_eager_flag(eager: bool) -> Self {
        if eager {
            Self::eager()
        } else {
            Self::lazy()
        }
    }
}

/// Resolver statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct ResolverStats {
    /// Closure queries served
    pub queries: u64,

    /// Closures held in the precomputed cache (zero for lazy resolvers)
    pub cached_closures: usize,

    /// Parent lookups answered from the cache
    pub hit_count: u64,

    /// Parent lookups with no cached closure (dangling parents)
    pub miss_count: u64,

    /// Fraction of parent lookups answered from the cache
    pub hit_rate: f64,
}

/// Resolves transitive group membership over one directory snapshot
///
/// # Thread Safety
///
/// Nothing is mutated after construction apart from the statistics counters,
/// which are atomics. A resolver can be shared behind `Arc` and queried from
/// any number of threads. It is never rebuilt in place: build a new one from
/// a fresh snapshot instead.
///
/// # Examples
///
/// ```
/// use nested_groups::{ClosureResolver, DirectoryEntry, ResolverConfig};
///
/// let groups = vec![
///     DirectoryEntry::group("cn=eng", ["cn=staff"]),
///     DirectoryEntry::group("cn=staff", Vec::<String>::new()),
/// ];
/// let resolver = ClosureResolver::from_entries(&groups, ResolverConfig::eager()).unwrap();
///
/// let alice = DirectoryEntry::user("uid=alice", ["cn=eng"]);
/// let groups = resolver.resolve_closure(&alice);
/// assert_eq!(groups.len(), 2);
/// assert!(groups.contains("cn=staff"));
/// ```
#[derive(Debug)]
pub struct ClosureResolver {
    graph: MembershipGraph,
    config: ResolverConfig,
    closure_cache: Option<HashMap<String, HashSet<String>>>,
    query_count: AtomicU64,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl ClosureResolver {
    /// Creates a resolver over `graph`
    ///
    /// With [`ResolutionStrategy::Eager`] this walks the graph once per vertex
    /// before returning.
    pub fn new(graph: MembershipGraph, config: ResolverConfig) -> Self {
        let closure_cache = match config.strategy {
            ResolutionStrategy::Lazy => None,
            ResolutionStrategy::Eager => Some(precompute_closures(&graph)),
        };

        info!(
            strategy = ?config.strategy,
            vertices = graph.len(),
            cached_closures = closure_cache.as_ref().map_or(0, HashMap::len),
            "closure resolver ready"
        );

        Self {
            graph,
            config,
            closure_cache,
            query_count: AtomicU64::new(0),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// Builds the graph from `entries` and wraps it in a resolver
    pub fn from_entries(entries: &[DirectoryEntry], config: ResolverConfig) -> Result<Self> {
        let graph = MembershipGraph::build(entries)?;
        Ok(Self::new(graph, config))
    }

    /// Returns every group `principal` belongs to, directly or through nesting
    ///
    /// The principal does not need to be part of the snapshot; only its
    /// immediate parents are used. Its own identity appears in the result only
    /// when a cycle leads back to it.
    pub fn resolve_closure(&self, principal: &DirectoryEntry) -> HashSet<String> {
        trace!(
            principal = %principal.identity,
            user = principal.is_user(),
            "resolving closure"
        );
        self.resolve_parents(&principal.immediate_parents)
    }

    /// Returns the closure seeded from an explicit list of immediate parents
    pub fn resolve_parents(&self, immediate_parents: &[String]) -> HashSet<String> {
        self.query_count.fetch_add(1, Ordering::Relaxed);

        match &self.closure_cache {
            None => transitive_parents(&self.graph, immediate_parents.iter().map(String::as_str)),
            Some(cache) => self.union_cached(cache, immediate_parents),
        }
    }

    /// Returns the closure of a vertex already present in the graph
    ///
    /// Returns `None` if `identity` is not a vertex.
    pub fn closure_of(&self, identity: &str) -> Option<HashSet<String>> {
        let parents = self.graph.parents_of(identity)?;
        self.query_count.fetch_add(1, Ordering::Relaxed);

        let closure = match &self.closure_cache {
            Some(cache) => cache.get(identity).cloned().unwrap_or_default(),
            None => transitive_parents(&self.graph, parents.iter().map(String::as_str)),
        };
        Some(closure)
    }

    /// Resolves many principals against the same snapshot
    ///
    /// Results are keyed by principal identity; if an identity is repeated
    /// the last entry wins.
    pub fn resolve_many<'a, I>(&self, principals: I) -> HashMap<String, HashSet<String>>
    where
        I: IntoIterator<Item = &'a DirectoryEntry>,
    {
        principals
            .into_iter()
            .map(|principal| (principal.identity.clone(), self.resolve_closure(principal)))
            .collect()
    }

    /// Checks whether `principal` is a direct or nested member of `group`
    pub fn is_member_of(&self, principal: &DirectoryEntry, group: &str) -> bool {
        self.resolve_closure(principal).contains(group)
    }

    pub fn strategy(&self) -> ResolutionStrategy {
        self.config.strategy
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn graph(&self) -> &MembershipGraph {
        &self.graph
    }

    /// Returns resolver statistics
    pub fn get_stats(&self) -> ResolverStats {
        let hit_count = self.hit_count.load(Ordering::Relaxed);
        let miss_count = self.miss_count.load(Ordering::Relaxed);
        let total = hit_count + miss_count;
        let hit_rate = if total > 0 {
            hit_count as f64 / total as f64
        } else {
            0.0
        };

        ResolverStats {
            queries: self.query_count.load(Ordering::Relaxed),
            cached_closures: self.closure_cache.as_ref().map_or(0, HashMap::len),
            hit_count,
            miss_count,
            hit_rate,
        }
    }

    fn union_cached(
        &self,
        cache: &HashMap<String, HashSet<String>>,
        immediate_parents: &[String],
    ) -> HashSet<String> {
        let mut result = HashSet::new();

        for parent in immediate_parents {
            result.insert(parent.clone());

            match cache.get(parent) {
                Some(closure) => {
                    self.hit_count.fetch_add(1, Ordering::Relaxed);
                    result.extend(closure.iter().cloned());
                }
                None => {
                    self.miss_count.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        result
    }
}

/// Runs the walk once per vertex, seeded from that vertex's own parents
fn precompute_closures(graph: &MembershipGraph) -> HashMap<String, HashSet<String>> {
    let mut cache = HashMap::with_capacity(graph.len());

    for identity in graph.identities() {
        let parents = graph.parents_of(identity).unwrap_or_default();
        let closure = transitive_parents(graph, parents.iter().map(String::as_str));
        cache.insert(identity.to_string(), closure);
    }

    cache
}
