use crate::column::{CoordinateColumns, GeometryColumn, Header, Role};
use crate::config::ColumnNames;
use crate::error::ConfigError;

use std::str::FromStr;

#[test_log::test]
fn resolves_geometry_layout() {
    let header = Header::new(["id", "geom", "timestamp"]);
    let map = header
        .resolve_geometry(&ColumnNames::default())
        .expect("all columns are present");

    assert_eq!(map.id, 0);
    assert_eq!(map.shape, GeometryColumn(1));
    assert_eq!(map.time, Some(2));
}

#[test_log::test]
fn resolves_coordinate_layout_in_any_order() {
    let header = Header::new(["y", "speed", "x", "timestamp", "id"]);
    let map = header
        .resolve_coordinates(&ColumnNames::default())
        .expect("all columns are present");

    assert_eq!(map.id, 4);
    assert_eq!(map.shape, CoordinateColumns { x: 2, y: 0 });
    assert_eq!(map.time, Some(3));
}

#[test_log::test]
fn missing_mandatory_column_names_role() {
    let header = Header::new(["id", "x", "timestamp"]);
    let result = header.resolve_coordinates(&ColumnNames::default());

    match result {
        Err(ConfigError::MissingColumn { role, name }) => {
            assert_eq!(role, Role::Y);
            assert_eq!(name, "y");
        }
        other => panic!("Expected missing y column, got {other:?}"),
    }
}

#[test_log::test]
fn missing_id_is_reported_before_geometry() {
    let header = Header::new(["track", "shape"]);
    let result = header.resolve_geometry(&ColumnNames::default());

    assert!(matches!(
        result,
        Err(ConfigError::MissingColumn { role: Role::Id, .. })
    ));
}

#[test_log::test]
fn missing_time_column_is_not_an_error() {
    let header = Header::new(["id", "geom"]);
    let map = header
        .resolve_geometry(&ColumnNames::default())
        .expect("time column is optional");

    assert_eq!(map.time, None);
    assert!(!map.has_time());
}

#[test_log::test]
fn duplicate_names_bind_left_most() {
    let header = Header::new(["id", "x", "y", "x", "id"]);
    let map = header
        .resolve_coordinates(&ColumnNames::default())
        .expect("all columns are present");

    assert_eq!(map.id, 0);
    assert_eq!(map.shape.x, 1);
}

#[test]
fn custom_role_names() {
    let names = ColumnNames {
        id: "vehicle".to_string(),
        x: "lon".to_string(),
        y: "lat".to_string(),
        timestamp: "t".to_string(),
        ..ColumnNames::default()
    };

    let header = Header::new(["t", "lat", "lon", "vehicle"]);
    let map = header
        .resolve_coordinates(&names)
        .expect("renamed columns are present");

    assert_eq!((map.id, map.shape.x, map.shape.y, map.time), (3, 2, 1, Some(0)));
}

#[test]
fn roles_parse_from_names() {
    assert_eq!(Role::from_str("time"), Ok(Role::Time));
    assert_eq!(Role::Geometry.to_string(), "geometry");
    assert!(Role::X.is_mandatory());
    assert!(!Role::Time.is_mandatory());
}
