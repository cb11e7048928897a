//! # Nested Group Resolution (nested-groups)
//!
//! Directory services report only direct `memberOf` edges. This crate turns a
//! snapshot of those edges into the full set of groups a user or group belongs
//! to, with support for:
//! - Cycle-safe traversal (self-loops, mutual membership, longer rings)
//! - Dangling parent references to groups outside the snapshot
//! - Lazy per-query walks or closures precomputed at construction
//! - Thread-safe concurrent reads of one immutable snapshot
//!
//! ## Example
//!
//! ```rust
//! use nested_groups::{ClosureResolver, DirectoryEntry, MembershipGraph, ResolverConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let groups = vec![
//!     DirectoryEntry::group("cn=eng", ["cn=staff"]),
//!     DirectoryEntry::group("cn=staff", ["cn=everyone"]),
//!     DirectoryEntry::group("cn=everyone", Vec::<String>::new()),
//! ];
//!
//! let graph = MembershipGraph::build(&groups)?;
//! let resolver = ClosureResolver::new(graph, ResolverConfig::eager());
//!
//! let alice = DirectoryEntry::user("uid=alice", ["cn=eng"]);
//! assert_eq!(resolver.resolve_closure(&alice).len(), 3);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod closure;
pub mod error;
pub mod graph;
pub mod snapshot;
pub mod types;

pub use closure::{resolve_closure, ClosureResolver, ResolutionStrategy, ResolverConfig, ResolverStats};
pub use error::{MembershipError, Result};
pub use graph::{build, build_from_directory, MembershipGraph};
pub use types::{DirectoryEntry, EntryKind};
