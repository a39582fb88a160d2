use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One package's metadata entry in an index snapshot.
///
/// Only `hash`, `name`, `size` and `version` take part in equality and
/// hashing. The remaining fields are informational and may be absent.
/// Fields that never appeared in the stanza keep their zero values.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Opaque content checksum (`C:`).
    pub hash: String,
    /// Package identifier (`P:`).
    pub name: String,
    /// Artifact size in bytes (`S:`).
    pub size: u64,
    /// Opaque version string (`V:`).
    pub version: String,
    /// Target architecture (`A:`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    /// One-line description (`T:`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Origin (source) package (`o:`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl PackageRecord {
    /// Create a record from the four matching fields.
    pub fn new(
        hash: impl Into<String>,
        name: impl Into<String>,
        size: u64,
        version: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            name: name.into(),
            size,
            version: version.into(),
            ..Default::default()
        }
    }

    /// The borrowed full tuple used for exact matching.
    pub fn key(&self) -> RecordKey<'_> {
        RecordKey {
            hash: &self.hash,
            name: &self.name,
            size: self.size,
            version: &self.version,
        }
    }

    /// The `.apk` file name for this package: `<name>-<version>.apk`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.apk", self.name, self.version)
    }

    /// Assign a tagged field value.
    ///
    /// Fails only when a size value is not a base-10 integer.
    pub fn set_field(&mut self, tag: FieldTag, value: &str) -> Result<(), TypeError> {
        match tag {
            FieldTag::Hash => self.hash = value.to_string(),
            FieldTag::Name => self.name = value.to_string(),
            FieldTag::Size => {
                self.size = value
                    .parse()
                    .map_err(|_| TypeError::InvalidSize(value.to_string()))?;
            }
            FieldTag::Version => self.version = value.to_string(),
            FieldTag::Arch => self.arch = Some(value.to_string()),
            FieldTag::Description => self.description = Some(value.to_string()),
            FieldTag::Origin => self.origin = Some(value.to_string()),
        }
        Ok(())
    }
}

impl PartialEq for PackageRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PackageRecord {}

impl Hash for PackageRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

/// The `(hash, name, size, version)` tuple of a record, borrowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey<'a> {
    pub hash: &'a str,
    pub name: &'a str,
    pub size: u64,
    pub version: &'a str,
}

/// A recognized single-letter stanza tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldTag {
    Hash,
    Name,
    Size,
    Version,
    Arch,
    Description,
    Origin,
}

impl FieldTag {
    /// Map a tag byte to a field. Unknown tags yield `None`.
    pub fn from_byte(tag: u8) -> Option<Self> {
        match tag {
            b'C' => Some(Self::Hash),
            b'P' => Some(Self::Name),
            b'S' => Some(Self::Size),
            b'V' => Some(Self::Version),
            b'A' => Some(Self::Arch),
            b'T' => Some(Self::Description),
            b'o' => Some(Self::Origin),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn equality_ignores_informational_fields() {
        let mut a = PackageRecord::new("Q1abc=", "musl", 383_000, "1.2.4-r2");
        let b = a.clone();
        a.arch = Some("x86_64".into());
        a.description = Some("the musl c library".into());
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn any_tuple_field_breaks_equality() {
        let base = PackageRecord::new("h", "n", 1, "v");
        assert_ne!(base, PackageRecord::new("x", "n", 1, "v"));
        assert_ne!(base, PackageRecord::new("h", "x", 1, "v"));
        assert_ne!(base, PackageRecord::new("h", "n", 2, "v"));
        assert_ne!(base, PackageRecord::new("h", "n", 1, "x"));
    }

    #[test]
    fn set_field_assigns_each_tag() {
        let mut rec = PackageRecord::default();
        rec.set_field(FieldTag::Hash, "Q1oHg4kAnVFve7dHe30IKgyaCykSg=").unwrap();
        rec.set_field(FieldTag::Name, "postfix-openrc").unwrap();
        rec.set_field(FieldTag::Version, "3.6.4-r0").unwrap();
        rec.set_field(FieldTag::Size, "2518").unwrap();
        rec.set_field(FieldTag::Origin, "postfix").unwrap();

        assert_eq!(rec.hash, "Q1oHg4kAnVFve7dHe30IKgyaCykSg=");
        assert_eq!(rec.name, "postfix-openrc");
        assert_eq!(rec.version, "3.6.4-r0");
        assert_eq!(rec.size, 2518);
        assert_eq!(rec.origin.as_deref(), Some("postfix"));
        assert_eq!(rec.to_string(), "postfix-openrc-3.6.4-r0");
    }

    #[test]
    fn bad_size_is_rejected() {
        let mut rec = PackageRecord::default();
        let err = rec.set_field(FieldTag::Size, "notanumber").unwrap_err();
        assert_eq!(err, TypeError::InvalidSize("notanumber".into()));
        assert_eq!(rec.size, 0);
    }

    #[test]
    fn unknown_tags_are_none() {
        assert_eq!(FieldTag::from_byte(b'C'), Some(FieldTag::Hash));
        assert_eq!(FieldTag::from_byte(b'o'), Some(FieldTag::Origin));
        assert_eq!(FieldTag::from_byte(b'D'), None);
        assert_eq!(FieldTag::from_byte(b'c'), None);
    }

    #[test]
    fn serde_skips_absent_optional_fields() {
        let rec = PackageRecord::new("h", "busybox", 10, "1.36.1-r5");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["name"], "busybox");
        assert!(json.get("arch").is_none());
    }

    proptest! {
        #[test]
        fn size_accepts_any_u64(n in any::<u64>()) {
            let mut rec = PackageRecord::default();
            rec.set_field(FieldTag::Size, &n.to_string()).unwrap();
            prop_assert_eq!(rec.size, n);
        }
    }
}
