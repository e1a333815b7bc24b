//! Named collection of versioned enums loaded from a JSON file

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::version::error::CatalogError;
use crate::version::group::{VersionedEnum, normalize_key};
use crate::version::pep440::Version;

/// Enums by name, in file order
///
/// The file is a JSON object whose values use the serialized enum form:
///
/// ```json
/// {
///   "aggregate": {
///     "version": "2.0",
///     "members": [
///       "sum",
///       {"key": "avg", "aliases": {"1.0": ["avg", "AVG"], "2.0": ["Average"]}}
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    enums: IndexMap<String, VersionedEnum>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        info!("Loading catalog from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;

        debug!("Loaded {} enums", catalog.enums.len());
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, group: VersionedEnum) {
        self.enums.insert(name.into(), group);
    }

    /// Enum registered under `name`, ignoring case the same way member keys do
    pub fn get(&self, name: &str) -> Option<&VersionedEnum> {
        let wanted = normalize_key(name);
        self.enums
            .iter()
            .find(|(key, _)| normalize_key(key) == wanted)
            .map(|(_, group)| group)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.enums.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionedEnum)> {
        self.enums.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Copy of the catalog with every enum bound to `version`
    pub fn as_version(&self, version: &Version) -> Self {
        Self {
            enums: self
                .enums
                .iter()
                .map(|(name, group)| (name.clone(), group.as_version(version.clone())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::alias::Alias;

    const CATALOG: &str = r#"{
        "aggregate": {
            "members": [
                "sum",
                {"key": "avg", "aliases": {"1.0": ["avg", "AVG"], "2.0": ["Average", "AVERAGE"]}}
            ]
        },
        "Flags": {
            "version": null,
            "members": ["yes", "no"]
        }
    }"#;

    #[test]
    fn from_json_keeps_file_order() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["aggregate", "Flags"]);
    }

    #[test]
    fn get_ignores_case() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        assert!(catalog.get("AGGREGATE").is_some());
        assert!(catalog.get("flags").is_some());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn get_folds_unicode_case_like_member_keys() {
        let catalog = Catalog::from_json(r#"{"ärger": {"members": ["grund"]}}"#).unwrap();

        let group = catalog.get("ÄRGER").unwrap();
        assert!(group.member("GRUND").is_some());
    }

    #[test]
    fn enum_version_defaults_to_all_and_null_means_unbound() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        assert_eq!(
            catalog.get("aggregate").unwrap().get_bound_version(),
            Some("all".to_string())
        );
        assert!(!catalog.get("flags").unwrap().is_bound());
    }

    #[test]
    fn as_version_rebinds_every_enum() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let bound = catalog.as_version(&Version::parse("2.0").unwrap());

        for (_, group) in bound.iter() {
            assert_eq!(group.get_bound_version(), Some("2.0".to_string()));
        }
        let avg = bound.get("aggregate").unwrap().member("avg").unwrap();
        assert_eq!(avg.get_value().unwrap(), &Alias::from("Average"));
        assert!(!catalog.get("flags").unwrap().is_bound());
    }

    #[test]
    fn from_json_rejects_invalid_alias_source() {
        let err = Catalog::from_json(r#"{"bad": {"members": [{"key": "x", "aliases": 3}]}}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn from_json_rejects_invalid_version() {
        let err = Catalog::from_json(r#"{"bad": {"version": "v?", "members": []}}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid version 'v?'"));
    }

    #[test]
    fn from_json_reports_invalid_member_version() {
        let err = Catalog::from_json(
            r#"{"bad": {"members": [{"key": "x", "aliases": {"v?": ["x"]}}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().contains("Invalid version 'v?'"), "{err}");
    }
}
