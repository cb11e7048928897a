use serde::{Deserialize, Serialize};

/// Whether a directory entry is a user or a group
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    User,
    #[default]
    Group,
}

/// A user or group as fetched from a directory
///
/// Only the distinguished name and the direct `memberOf` values matter for
/// resolution. Parents may repeat and may name entries outside the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Distinguished name, unique within a snapshot
    #[serde(alias = "distinguishedName")]
    pub identity: String,

    /// Groups this entry is directly a member of
    #[serde(default, alias = "memberOf")]
    pub immediate_parents: Vec<String>,

    /// User or group; informational only
    #[serde(default)]
    pub kind: EntryKind,
}

impl DirectoryEntry {
    /// Creates an entry from its parts
    pub fn new(
        identity: impl Into<String>,
        immediate_parents: Vec<String>,
        kind: EntryKind,
    ) -> Self {
        Self {
            identity: identity.into(),
            immediate_parents,
            kind,
        }
    }

    /// Creates a group entry
    pub fn group<I, S>(identity: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            identity,
            parents.into_iter().map(Into::into).collect(),
            EntryKind::Group,
        )
    }

    /// Creates a user entry
    pub fn user<I, S>(identity: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            identity,
            parents.into_iter().map(Into::into).collect(),
            EntryKind::User,
        )
    }

    /// Returns true for user entries
    pub fn is_user(&self) -> bool {
        self.kind == EntryKind::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_constructor() {
        let entry = DirectoryEntry::group("cn=eng", ["cn=staff", "cn=all"]);
        assert_eq!(entry.identity, "cn=eng");
        assert_eq!(entry.immediate_parents, vec!["cn=staff", "cn=all"]);
        assert_eq!(entry.kind, EntryKind::Group);
        assert!(!entry.is_user());
    }

    #[test]
    fn test_user_constructor_keeps_parent_order_and_duplicates() {
        let entry = DirectoryEntry::user("uid=alice", ["cn=b", "cn=a", "cn=b"]);
        assert!(entry.is_user());
        assert_eq!(entry.immediate_parents, vec!["cn=b", "cn=a", "cn=b"]);
    }

    #[test]
    fn test_deserialize_ldap_attribute_names() {
        let json = r#"{"distinguishedName": "uid=bob", "memberOf": ["cn=ops"], "kind": "user"}"#;
        let entry: DirectoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, DirectoryEntry::user("uid=bob", ["cn=ops"]));
    }

    #[test]
    fn test_deserialize_defaults() {
        let entry: DirectoryEntry = serde_json::from_str(r#"{"identity": "cn=root"}"#).unwrap();
        assert!(entry.immediate_parents.is_empty());
        assert_eq!(entry.kind, EntryKind::Group);
    }
}
