//! Alias tokens and the sources a versioned value is built from

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::version::error::ConstructionError;

/// A single spelling of a value, as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Alias {
    Number(Number),
    Text(String),
}

impl Alias {
    /// Numeric alias from a float; `None` for NaN and infinities
    pub fn float(f: f64) -> Option<Self> {
        Number::from_f64(f).map(Alias::Number)
    }
}

/// Normalize an alias for comparison.
///
/// Text is lowercased and numbers are rendered in their JSON form, so `1` and
/// `"1"` normalize to the same token.
pub fn normalize_alias(alias: &Alias) -> String {
    match alias {
        Alias::Number(n) => n.to_string(),
        Alias::Text(s) => s.to_lowercase(),
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alias::Number(n) => write!(f, "{}", n),
            Alias::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Alias {
    fn from(s: &str) -> Self {
        Alias::Text(s.to_string())
    }
}

impl From<String> for Alias {
    fn from(s: String) -> Self {
        Alias::Text(s)
    }
}

impl From<i64> for Alias {
    fn from(i: i64) -> Self {
        Alias::Number(Number::from(i))
    }
}

impl From<i32> for Alias {
    fn from(i: i32) -> Self {
        Alias::Number(Number::from(i))
    }
}

impl From<u64> for Alias {
    fn from(u: u64) -> Self {
        Alias::Number(Number::from(u))
    }
}

/// Build a `Vec<Alias>` from mixed text and integer literals
///
/// ```
/// use versioned_enum::{Alias, aliases};
///
/// assert_eq!(aliases!["1", 1], vec![Alias::from("1"), Alias::from(1)]);
/// ```
#[macro_export]
macro_rules! aliases {
    ($($alias:expr),* $(,)?) => {
        vec![$($crate::version::alias::Alias::from($alias)),*]
    };
}

const ALIAS_SOURCE_SHAPE: &str =
    "invalid alias source: expected a list of aliases or a mapping of version to aliases";

/// Where a versioned value gets its aliases from
///
/// Either a flat list, implicitly valid for every version, or a mapping from
/// version string to the aliases effective from that version onward.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AliasSource {
    Flat(Vec<Alias>),
    Versioned(IndexMap<String, Vec<Alias>>),
}

impl<'de> Deserialize<'de> for AliasSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Flat(Vec<Alias>),
            Versioned(IndexMap<String, Vec<Alias>>),
        }

        match Shape::deserialize(deserializer) {
            Ok(Shape::Flat(list)) => Ok(AliasSource::Flat(list)),
            Ok(Shape::Versioned(map)) => Ok(AliasSource::Versioned(map)),
            Err(_) => Err(serde::de::Error::custom(ALIAS_SOURCE_SHAPE)),
        }
    }
}

impl AliasSource {
    pub fn flat<I, A>(aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Alias>,
    {
        AliasSource::Flat(aliases.into_iter().map(Into::into).collect())
    }

    pub fn versioned<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<Alias>)>,
        K: Into<String>,
    {
        AliasSource::Versioned(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Interpret loosely typed JSON as an alias source.
    ///
    /// Arrays become flat sources and objects become versioned sources; any
    /// other shape is rejected.
    pub fn from_json(key: &str, value: serde_json::Value) -> Result<Self, ConstructionError> {
        serde_json::from_value(value).map_err(|_| ConstructionError::InvalidAliasSource {
            key: key.to_string(),
        })
    }
}

impl<A: Into<Alias>> From<Vec<A>> for AliasSource {
    fn from(aliases: Vec<A>) -> Self {
        AliasSource::flat(aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Alias::from("AVERAGE"), "average")]
    #[case(Alias::from("Average"), "average")]
    #[case(Alias::from("1"), "1")]
    #[case(Alias::from(1), "1")]
    #[case(Alias::from(-42), "-42")]
    #[case(Alias::from(u64::MAX), "18446744073709551615")]
    #[case(Alias::float(0.5).unwrap(), "0.5")]
    fn normalize_alias_returns_expected(#[case] alias: Alias, #[case] expected: &str) {
        assert_eq!(normalize_alias(&alias), expected);
    }

    #[test]
    fn aliases_macro_mixes_text_and_integers() {
        assert_eq!(
            aliases!["1", 1, "One"],
            vec![
                Alias::Text("1".to_string()),
                Alias::Number(Number::from(1)),
                Alias::Text("One".to_string())
            ]
        );
    }

    #[test]
    fn from_json_accepts_list() {
        let source = AliasSource::from_json("avg", json!(["avg", "AVG"])).unwrap();
        assert_eq!(source, AliasSource::flat(["avg", "AVG"]));
    }

    #[test]
    fn from_json_accepts_mapping() {
        let source =
            AliasSource::from_json("one", json!({"1.0": ["One"], "2.0": ["1", 1, "One"]}))
                .unwrap();
        assert_eq!(
            source,
            AliasSource::versioned([("1.0", aliases!["One"]), ("2.0", aliases!["1", 1, "One"])])
        );
    }

    #[test]
    fn from_json_accepts_fractional_and_large_numbers() {
        let source =
            AliasSource::from_json("half", json!(["half", 0.5, 18446744073709551615u64])).unwrap();
        assert_eq!(
            source,
            AliasSource::Flat(vec![
                Alias::from("half"),
                Alias::float(0.5).unwrap(),
                Alias::from(u64::MAX)
            ])
        );
    }

    #[test]
    fn float_rejects_nan() {
        assert_eq!(Alias::float(f64::NAN), None);
    }

    #[rstest]
    #[case(json!("avg"))]
    #[case(json!(42))]
    #[case(json!(null))]
    #[case(json!({"1.0": "avg"}))]
    fn from_json_rejects_other_shapes(#[case] value: serde_json::Value) {
        let err = AliasSource::from_json("avg", value).unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidAliasSource { ref key } if key == "avg"));
    }
}
