use super::*;

fn survey() -> ObservationSet {
    ObservationSet::from_triplets(&[
        (-5.0, 0.0, 10.0),
        (0.0, 1.0, 11.0),
        (2.5, 2.0, 12.0),
        (5.0, 3.0, 13.0),
        (7.0, 4.0, 14.0),
    ])
    .unwrap()
}

#[test]
fn test_new_rejects_non_finite_value() {
    let err = ObservationSet::new(vec![
        Observation::new(0.0, 0.0, 1.0),
        Observation::new(1.0, 0.0, f64::NAN),
    ])
    .unwrap_err();

    match err {
        Error::NonFinite { location, .. } => assert_eq!(location, "Record 2, field 'value'"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_filter_is_inclusive_and_order_preserving() {
    let set = survey();
    let filtered = set.filter_x_range(CoordRange::new(0.0, 5.0));

    let xs: Vec<f64> = filtered.iter().map(|o| o.x).collect();
    assert_eq!(xs, vec![0.0, 2.5, 5.0]);
    assert_eq!(filtered.records()[1], Observation::new(2.5, 2.0, 12.0));
}

#[test]
fn test_filter_keeps_exactly_the_records_in_range() {
    let set = survey();
    let range = CoordRange::new(-1.0, 6.0);
    let filtered = set.filter_x_range(range);

    assert!(filtered.iter().all(|o| range.contains(o.x)));
    let expected = set.iter().filter(|o| (-1.0..=6.0).contains(&o.x)).count();
    assert_eq!(filtered.len(), expected);
}

#[test]
fn test_inverted_range_selects_nothing() {
    let filtered = survey().filter_x_range(CoordRange::new(5.0, 0.0));
    assert!(filtered.is_empty());
    assert!(filtered.extent().is_none());
}

#[test]
fn test_extent_and_value_range() {
    let set = survey();
    let extent = set.extent().unwrap();
    assert_eq!((extent.x_min, extent.x_max), (-5.0, 7.0));
    assert_eq!((extent.y_min, extent.y_max), (0.0, 4.0));
    assert_eq!(set.value_range(), Some((10.0, 14.0)));
    assert_eq!(ObservationSet::default().value_range(), None);
}

#[test]
fn test_coord_range_deserializes_from_yaml() {
    let range: CoordRange = serde_yml::from_str("min: -2.5\nmax: 4\n").unwrap();
    assert_eq!(range, CoordRange::new(-2.5, 4.0));
}
