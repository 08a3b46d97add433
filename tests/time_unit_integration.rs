//! End-to-end coverage of the time-unit table: pairwise conversion
//! consistency, calendar-interval derivation, and registry integration.

use enumera::{ordering, registry, EnumError, TimeUnit};

#[test]
fn six_units_finest_to_coarsest() {
    let units = TimeUnit::values().unwrap();
    let names: Vec<&str> = units.iter().map(|u| u.name()).collect();
    assert_eq!(
        names,
        vec![
            "MICROSECONDS",
            "MILLISECONDS",
            "SECONDS",
            "MINUTES",
            "HOURS",
            "DAYS"
        ]
    );
    assert!(ordering::ordinal_order::<TimeUnit>().is_ordered(&units));
}

#[test]
fn conversion_is_inverse_consistent_for_every_pair() {
    let units = TimeUnit::values().unwrap();
    for a in &units {
        for b in &units {
            let there = b.convert(10.0, a);
            let back = a.convert(there, b);
            assert!(
                (back - 10.0).abs() < 1e-9,
                "{} -> {} -> {} drifted to {back}",
                a.name(),
                b.name(),
                a.name()
            );
        }
    }
}

#[test]
fn coarsest_down_to_finest_and_back() {
    let days = TimeUnit::days().unwrap();
    let micros = TimeUnit::microseconds().unwrap();
    let as_micros = micros.convert(10.0, days);
    assert_eq!(as_micros, 864_000_000_000.0);
    assert_eq!(days.convert(as_micros, micros), 10.0);
}

#[test]
fn documented_conversion_examples() {
    let minutes = TimeUnit::minutes().unwrap();
    let seconds = TimeUnit::seconds().unwrap();
    assert_eq!(minutes.convert(120.0, seconds), 2.0);

    let millis = TimeUnit::milliseconds().unwrap();
    assert_eq!(millis.convert(10.0, minutes), 600_000.0);
}

#[test]
fn interval_derivation_requires_a_format() {
    for unit in ["MICROSECONDS", "MILLISECONDS"] {
        let unit = registry::value_of::<TimeUnit>(unit).unwrap();
        assert!(matches!(
            unit.to_date_interval(1),
            Err(EnumError::IllegalState { .. })
        ));
    }
    for (unit, expected) in [
        ("SECONDS", "PT45S"),
        ("MINUTES", "PT45M"),
        ("HOURS", "PT45H"),
        ("DAYS", "P45D"),
    ] {
        let unit = registry::value_of::<TimeUnit>(unit).unwrap();
        assert_eq!(unit.to_date_interval(45).unwrap().to_string(), expected);
    }
}

#[test]
fn unit_singletons_survive_serialization() {
    let hours = TimeUnit::hours().unwrap();
    let wire = serde_json::to_string(hours).unwrap();
    assert_eq!(
        wire,
        r#"{"type":"enumera::time_unit::TimeUnit","name":"HOURS"}"#
    );
    let restored: &'static enumera::Symbol<TimeUnit> = serde_json::from_str(&wire).unwrap();
    assert!(std::ptr::eq(hours, restored));
}
