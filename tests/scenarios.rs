use versioned_enum::{
    Alias, AliasSource, LATEST, Matching, ResolveError, Version, VersionedEnum, VersionedValue,
    aliases,
};

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn flat_value_matches_its_aliases() {
    let avg = VersionedValue::new("avg", vec!["avg", "Average", "AVG"]).unwrap();

    assert_eq!(avg.get_bound_version(), Some("all".to_string()));
    assert!(avg == "AVG");
    assert!(avg != "median");

    let exact = avg.clone().with_matching(Matching::Exact);
    assert!(exact == "AVG");
    assert!(exact != "AVERAGE");
}

#[test]
fn versioned_value_changes_aliases_between_versions() {
    let avg = VersionedValue::new(
        "avg",
        AliasSource::versioned([
            ("1.0", aliases!["avg", "AVG"]),
            ("2.0", aliases!["Average", "AVERAGE"]),
        ]),
    )
    .unwrap();

    assert!(avg.as_version(v("1.0")) == "avg");
    assert!(avg.as_version(v("2.0")) == "Average");
    assert!(avg.as_version(v("2.0")) != "avg");
}

#[test]
fn as_version_round_trips_bound_version() {
    let avg = VersionedValue::unbound("avg", AliasSource::versioned([("1.0", aliases!["avg"])]))
        .unwrap();

    for version in ["0.5", "1.0", "1.0.0", "3.2.1", "latest", "all"] {
        assert_eq!(
            avg.as_version(v(version)).get_bound_version(),
            Some(version.to_string())
        );
    }
    assert!(!avg.is_bound());
}

#[test]
fn bound_exactly_at_entry_uses_that_entry() {
    let value = VersionedValue::new(
        "x",
        AliasSource::versioned([("1.0", aliases!["a"]), ("1.5", aliases!["b"])]),
    )
    .unwrap();

    assert_eq!(value.as_version(v("1.5")).get_value().unwrap(), &Alias::from("b"));
    assert_eq!(value.as_version(v("1.4.9")).get_value().unwrap(), &Alias::from("a"));
}

#[test]
fn enum_members_follow_enum_version() {
    let numbers = VersionedEnum::new([
        VersionedValue::new(
            "one",
            AliasSource::versioned([("1.0", aliases!["One"]), ("2.0", aliases!["1", 1, "One"])]),
        )
        .unwrap(),
        VersionedValue::new("two", AliasSource::versioned([("2.0", aliases!["2", 2, "Two"])]))
            .unwrap(),
    ]);

    assert_eq!(
        numbers.as_version(v("2.0")).member("one").unwrap().get_values().unwrap(),
        aliases!["1", 1, "One"].as_slice()
    );
    assert!(matches!(
        numbers.as_version(v("1.0")).member("two").unwrap().get_value(),
        Err(ResolveError::NoMatchingVersion { .. })
    ));
    assert_eq!(
        numbers.as_version(LATEST).get("two").unwrap().get_name(),
        "two"
    );
}

#[test]
fn enum_get_matches_aliases_case_insensitively() {
    let group = VersionedEnum::new([
        VersionedValue::named("String"),
        VersionedValue::with_aliases("value", ["FIRST_ALIAS"]),
    ]);

    assert!(matches!(
        group.get("illegal"),
        Err(ResolveError::NoMatchingMember { .. })
    ));
    assert_eq!(group.get("VALUE").unwrap().get_name(), "value");
    assert_eq!(group.get("first_alias").unwrap().to_string(), "VALUE");
}
