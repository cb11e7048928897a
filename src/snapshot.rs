//! Decoding of exported directory snapshots
//!
//! A snapshot is a JSON array of entries, as written by a directory export or
//! kept as a test fixture. LDAP attribute names are accepted:
//!
//! ```json
//! [
//!   {"distinguishedName": "cn=eng,ou=groups", "memberOf": ["cn=staff,ou=groups"]},
//!   {"distinguishedName": "uid=alice,ou=people", "memberOf": ["cn=eng,ou=groups"], "kind": "user"}
//! ]
//! ```

use std::io::Read;

use crate::error::Result;
use crate::types::DirectoryEntry;

/// Parses a JSON snapshot held in memory
pub fn parse_entries(json: &str) -> Result<Vec<DirectoryEntry>> {
    let entries: Vec<DirectoryEntry> = serde_json::from_str(json)?;
    tracing::debug!(entries = entries.len(), "decoded directory snapshot");
    Ok(entries)
}

/// Reads a JSON snapshot from any reader
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<DirectoryEntry>> {
    let entries: Vec<DirectoryEntry> = serde_json::from_reader(reader)?;
    tracing::debug!(entries = entries.len(), "decoded directory snapshot");
    Ok(entries)
}
