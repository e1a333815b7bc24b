//! A value whose aliases change with the version it is bound to

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::alias::{Alias, AliasSource, normalize_alias};
use crate::version::error::{ConstructionError, ResolveError};
use crate::version::pep440::{ALL, Version, default_bound};

/// How aliases are compared during equality checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matching {
    /// Compare normalized (lowercased) aliases
    #[default]
    CaseInsensitive,
    /// Compare aliases as written
    Exact,
}

/// A set of aliases scoped to version ranges.
///
/// Each entry of the alias map is effective from its version up to the next
/// higher entry. A bound value resolves to the entry with the greatest version
/// less than or equal to the bound version.
///
/// ```
/// use versioned_enum::{AliasSource, Version, VersionedValue, aliases};
///
/// let avg = VersionedValue::new(
///     "avg",
///     AliasSource::versioned([
///         ("1.0", aliases!["avg", "AVG"]),
///         ("2.0", aliases!["Average", "AVERAGE"]),
///     ]),
/// )
/// .unwrap();
///
/// assert!(avg.as_version(Version::parse("1.0").unwrap()) == "avg");
/// assert!(avg.as_version(Version::parse("2.0").unwrap()) == "Average");
/// assert!(avg.as_version(Version::parse("2.0").unwrap()) != "avg");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ValueRecord", into = "ValueRecord")]
pub struct VersionedValue {
    key: String,
    aliases: BTreeMap<Version, Vec<Alias>>,
    version: Option<Version>,
    matching: Matching,
}

impl VersionedValue {
    /// Create a value bound to [`ALL`]
    pub fn new(
        key: impl Into<String>,
        source: impl Into<AliasSource>,
    ) -> Result<Self, ConstructionError> {
        Self::with_default_version(key, source, Some(ALL))
    }

    /// Create a value that must be bound before its aliases can be resolved
    pub fn unbound(
        key: impl Into<String>,
        source: impl Into<AliasSource>,
    ) -> Result<Self, ConstructionError> {
        Self::with_default_version(key, source, None)
    }

    pub fn with_default_version(
        key: impl Into<String>,
        source: impl Into<AliasSource>,
        default_version: Option<Version>,
    ) -> Result<Self, ConstructionError> {
        let aliases = match source.into() {
            AliasSource::Flat(list) => BTreeMap::from([(ALL, list)]),
            AliasSource::Versioned(map) => map
                .into_iter()
                .map(|(version, list)| Ok((Version::parse(&version)?, list)))
                .collect::<Result<BTreeMap<_, _>, ConstructionError>>()?,
        };

        Ok(Self {
            key: key.into(),
            aliases,
            version: default_version,
            matching: Matching::default(),
        })
    }

    /// Create a value whose only alias is its own key
    pub fn named(key: impl Into<String>) -> Self {
        Self::with_aliases(key, Vec::<Alias>::new())
    }

    /// Create a non-versioned value whose aliases are its key followed by
    /// `aliases`
    pub fn with_aliases<I, A>(key: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Alias>,
    {
        let key = key.into();
        let list = std::iter::once(Alias::Text(key.clone()))
            .chain(aliases.into_iter().map(Into::into))
            .collect();

        Self {
            key,
            aliases: BTreeMap::from([(ALL, list)]),
            version: Some(ALL),
            matching: Matching::default(),
        }
    }

    /// Create a non-versioned value that also answers to every alias the
    /// given values currently resolve to
    pub fn aliasing<'a, I>(key: impl Into<String>, others: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = &'a VersionedValue>,
    {
        let mut inherited = Vec::new();
        for other in others {
            inherited.extend_from_slice(other.get_values()?);
        }
        Ok(Self::with_aliases(key, inherited))
    }

    /// Switch the matching policy used by equality checks
    pub fn with_matching(mut self, matching: Matching) -> Self {
        self.matching = matching;
        self
    }

    pub fn matching(&self) -> Matching {
        self.matching
    }

    /// The key as given at construction
    pub fn get_name(&self) -> &str {
        &self.key
    }

    pub fn bind_to_version(&mut self, version: Version) {
        self.version = Some(version);
    }

    pub(crate) fn set_version(&mut self, version: Option<Version>) {
        self.version = version;
    }

    /// Return a copy bound to `version`, leaving `self` untouched
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

    pub fn bound_version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Resolve the alias list effective at the bound version
    pub fn resolve_aliases(&self) -> Result<&[Alias], ResolveError> {
        let Some(bound) = &self.version else {
            return Err(ResolveError::Unbound {
                key: self.key.clone(),
            });
        };

        self.lookup(bound)
            .ok_or_else(|| ResolveError::NoMatchingVersion {
                key: self.key.clone(),
                version: bound.to_string(),
            })
    }

    pub fn get_values(&self) -> Result<&[Alias], ResolveError> {
        self.resolve_aliases()
    }

    /// First alias effective at the bound version
    pub fn get_value(&self) -> Result<&Alias, ResolveError> {
        self.get_values()?
            .first()
            .ok_or_else(|| ResolveError::EmptyValue {
                key: self.key.clone(),
                version: self.get_bound_version().unwrap_or_default(),
            })
    }

    /// Greatest entry not above `bound`
    fn lookup(&self, bound: &Version) -> Option<&[Alias]> {
        self.aliases
            .range::<Version, _>(..=bound)
            .next_back()
            .map(|(_, list)| list.as_slice())
    }

    /// Resolution used by equality: unresolvable versions yield no aliases
    fn values_or_empty(&self) -> &[Alias] {
        self.version
            .as_ref()
            .and_then(|bound| self.lookup(bound))
            .unwrap_or_default()
    }

    fn matches(&self, other: &[Alias], matching: Matching) -> bool {
        let ours = self.values_or_empty();

        match matching {
            Matching::CaseInsensitive => {
                let ours: Vec<String> = ours.iter().map(normalize_alias).collect();
                let theirs: Vec<String> = other.iter().map(normalize_alias).collect();

                // Identical lists stay equal even when empty
                if ours == theirs {
                    return true;
                }

                let ours: HashSet<&String> = ours.iter().collect();
                theirs.iter().any(|token| ours.contains(token))
            }
            // `1` and `"1"` are different aliases here
            Matching::Exact => ours == other || other.iter().any(|alias| ours.contains(alias)),
        }
    }

    fn matches_alias(&self, alias: &Alias) -> bool {
        self.is_bound() && self.matches(std::slice::from_ref(alias), self.matching)
    }
}

fn stricter(a: Matching, b: Matching) -> Matching {
    if a == Matching::Exact || b == Matching::Exact {
        Matching::Exact
    } else {
        Matching::CaseInsensitive
    }
}

impl PartialEq for VersionedValue {
    fn eq(&self, other: &Self) -> bool {
        if !self.is_bound() || !other.is_bound() {
            return false;
        }
        self.matches(other.values_or_empty(), stricter(self.matching, other.matching))
    }
}

impl PartialEq<Alias> for VersionedValue {
    fn eq(&self, other: &Alias) -> bool {
        self.matches_alias(other)
    }
}

impl PartialEq<str> for VersionedValue {
    fn eq(&self, other: &str) -> bool {
        self.matches_alias(&Alias::from(other))
    }
}

impl PartialEq<&str> for VersionedValue {
    fn eq(&self, other: &&str) -> bool {
        self.matches_alias(&Alias::from(*other))
    }
}

impl PartialEq<String> for VersionedValue {
    fn eq(&self, other: &String) -> bool {
        self.matches_alias(&Alias::from(other.as_str()))
    }
}

impl PartialEq<i64> for VersionedValue {
    fn eq(&self, other: &i64) -> bool {
        self.matches_alias(&Alias::from(*other))
    }
}

impl PartialEq<f64> for VersionedValue {
    fn eq(&self, other: &f64) -> bool {
        Alias::float(*other).is_some_and(|alias| self.matches_alias(&alias))
    }
}

impl PartialEq<VersionedValue> for Alias {
    fn eq(&self, other: &VersionedValue) -> bool {
        other == self
    }
}

impl PartialEq<VersionedValue> for str {
    fn eq(&self, other: &VersionedValue) -> bool {
        other == self
    }
}

impl PartialEq<VersionedValue> for &str {
    fn eq(&self, other: &VersionedValue) -> bool {
        other == *self
    }
}

impl PartialEq<VersionedValue> for i64 {
    fn eq(&self, other: &VersionedValue) -> bool {
        other == self
    }
}

impl PartialEq<VersionedValue> for f64 {
    fn eq(&self, other: &VersionedValue) -> bool {
        other == self
    }
}

impl fmt::Display for VersionedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key.to_uppercase())
    }
}

impl From<&str> for VersionedValue {
    fn from(key: &str) -> Self {
        Self::named(key)
    }
}

impl From<String> for VersionedValue {
    fn from(key: String) -> Self {
        Self::named(key)
    }
}

/// Serialized form of a [`VersionedValue`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ValueRecord {
    key: String,
    aliases: AliasSource,
    #[serde(default = "default_bound")]
    version: Option<Version>,
    #[serde(default)]
    matching: Matching,
}

impl TryFrom<ValueRecord> for VersionedValue {
    type Error = ConstructionError;

    fn try_from(record: ValueRecord) -> Result<Self, Self::Error> {
        Ok(VersionedValue::with_default_version(record.key, record.aliases, record.version)?
            .with_matching(record.matching))
    }
}

impl From<VersionedValue> for ValueRecord {
    fn from(value: VersionedValue) -> Self {
        let source = match value.aliases.get(&ALL) {
            Some(list) if value.aliases.len() == 1 => AliasSource::Flat(list.clone()),
            _ => AliasSource::versioned(
                value
                    .aliases
                    .iter()
                    .map(|(version, list)| (version.to_string(), list.clone())),
            ),
        };

        Self {
            key: value.key,
            aliases: source,
            version: value.version,
            matching: value.matching,
        }
    }
}
