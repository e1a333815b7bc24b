//! A versioned enum: a named collection of versioned values sharing one bound
//! version

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::version::error::{ConstructionError, ResolveError};
use crate::version::pep440::{ALL, Version, default_bound};
use crate::version::value::{ValueRecord, VersionedValue};

/// Members keyed by their uppercased key, in insertion order.
///
/// Binding the enum binds every member, so all members always report the
/// enum's own bound version.
///
/// ```
/// use versioned_enum::{AliasSource, Version, VersionedEnum, VersionedValue, aliases};
///
/// let flags = VersionedEnum::new([
///     VersionedValue::new(
///         "true",
///         AliasSource::versioned([("1.0", aliases!["TRUE"]), ("2.0", aliases!["True", "yes"])]),
///     )
///     .unwrap(),
///     VersionedValue::new(
///         "false",
///         AliasSource::versioned([("1.0", aliases!["FALSE"]), ("2.0", aliases!["False", "no"])]),
///     )
///     .unwrap(),
/// ]);
///
/// let v2 = flags.as_version(Version::parse("2.0").unwrap());
/// assert_eq!(v2.get("yes").unwrap().get_name(), "true");
/// assert!(v2.member("FALSE").unwrap() == "no");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EnumRecord", into = "EnumSnapshot")]
pub struct VersionedEnum {
    members: IndexMap<String, VersionedValue>,
    version: Option<Version>,
}

/// Case folding shared by member keys and catalog names
pub(crate) fn normalize_key(name: &str) -> String {
    name.to_uppercase()
}

impl VersionedEnum {
    /// Create an enum bound to [`ALL`]
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<VersionedValue>,
    {
        Self::with_default_version(values, Some(ALL))
    }

    /// Create an enum whose members start unbound
    pub fn unbound<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<VersionedValue>,
    {
        Self::with_default_version(values, None)
    }

    pub fn with_default_version<I, V>(values: I, default_version: Option<Version>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<VersionedValue>,
    {
        let mut members = IndexMap::new();
        for value in values {
            let mut value: VersionedValue = value.into();
            value.set_version(default_version.clone());

            let key = normalize_key(value.get_name());
            if members.insert(key.clone(), value).is_some() {
                warn!("Duplicate enum member {}, keeping the last definition", key);
            }
        }

        Self {
            members,
            version: default_version,
        }
    }

    /// Bind the enum and every member to `version`
    pub fn bind_to_version(&mut self, version: Version) {
        debug!("Binding versioned enum to {}", version);
        for member in self.members.values_mut() {
            member.bind_to_version(version.clone());
        }
        self.version = Some(version);
    }

    /// Return an independent copy bound to `version`
    pub fn as_version(&self, version: Version) -> Self {
        let mut bound = self.clone();
        bound.bind_to_version(version);
        bound
    }

    pub fn is_bound(&self) -> bool {
        self.version.is_some()
    }

    pub fn get_bound_version(&self) -> Option<String> {
        self.version.as_ref().map(ToString::to_string)
    }

    /// Member whose key matches `name`, ignoring case
    pub fn member(&self, name: &str) -> Option<&VersionedValue> {
        self.members.get(&normalize_key(name))
    }

    /// Member whose key matches `key`, ignoring case
    pub fn lookup(&self, key: &str) -> Result<&VersionedValue, ResolveError> {
        self.member(key).ok_or_else(|| ResolveError::MemberNotFound {
            key: key.to_string(),
        })
    }

    /// Member sharing the key of `value`
    pub fn lookup_value(&self, value: &VersionedValue) -> Result<&VersionedValue, ResolveError> {
        self.lookup(value.get_name())
    }

    /// First member equal to `value`.
    ///
    /// Fails if the enum is unbound or no member answers to `value`.
    pub fn get<T>(&self, value: &T) -> Result<&VersionedValue, ResolveError>
    where
        T: fmt::Display + ?Sized,
        VersionedValue: PartialEq<T>,
    {
        if !self.is_bound() {
            return Err(ResolveError::EnumUnbound);
        }

        trace!("Looking up enum member for {}", value);
        self.members
            .values()
            .find(|member| *member == value)
            .ok_or_else(|| ResolveError::NoMatchingMember {
                value: value.to_string(),
            })
    }

    /// Whether any member is equal to `value`
    pub fn contains<T>(&self, value: &T) -> bool
    where
        T: ?Sized,
        VersionedValue: PartialEq<T>,
    {
        self.members.values().any(|member| member == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionedValue> {
        self.members.values()
    }

    /// Normalized member keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a VersionedEnum {
    type Item = &'a VersionedValue;
    type IntoIter = indexmap::map::Values<'a, String, VersionedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.values()
    }
}

impl PartialEq for VersionedEnum {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.members == other.members
    }
}

impl fmt::Display for VersionedEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, member) in self.members.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", member)?;
        }
        f.write_str("]")
    }
}

/// Serialized form of a [`VersionedEnum`] as read.
///
/// Members stay loosely typed until conversion so a bad member definition
/// reports its own construction error.
#[derive(Debug, Deserialize)]
struct EnumRecord {
    #[serde(default = "default_bound")]
    version: Option<Version>,
    members: Vec<serde_json::Value>,
}

/// Serialized form of a [`VersionedEnum`] as written
#[derive(Debug, Serialize)]
struct EnumSnapshot {
    version: Option<Version>,
    members: Vec<VersionedValue>,
}

/// A member is either a raw name or a full value definition
fn member_from_json(member: serde_json::Value) -> Result<VersionedValue, ConstructionError> {
    match member {
        serde_json::Value::String(name) => Ok(VersionedValue::named(name)),
        serde_json::Value::Object(_) => {
            let record: ValueRecord = serde_json::from_value(member).map_err(|e| {
                ConstructionError::InvalidMember {
                    reason: e.to_string(),
                }
            })?;
            VersionedValue::try_from(record)
        }
        other => Err(ConstructionError::InvalidMember {
            reason: format!("expected a member name or a value definition, got {}", other),
        }),
    }
}

impl TryFrom<EnumRecord> for VersionedEnum {
    type Error = ConstructionError;

    fn try_from(record: EnumRecord) -> Result<Self, Self::Error> {
        let values = record
            .members
            .into_iter()
            .map(member_from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(VersionedEnum::with_default_version(values, record.version))
    }
}

impl From<VersionedEnum> for EnumSnapshot {
    fn from(group: VersionedEnum) -> Self {
        Self {
            version: group.version,
            members: group.members.into_values().collect(),
        }
    }
}
