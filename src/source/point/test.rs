use crate::config::{ColumnNames, DecodePolicy, ReadOptions};
use crate::error::{DecodeError, ReaderError};
use crate::source::point::PointSource;
use crate::source::{TemporalSource, TrajectorySource};
use crate::trajectory::Trajectory;

use geo::{Coord, wkt};
use std::io::Cursor as IoCursor;

type Source = PointSource<IoCursor<Vec<u8>>>;

fn open_with(data: &str, policy: DecodePolicy) -> Source {
    let options = ReadOptions {
        policy,
        ..ReadOptions::default()
    };

    PointSource::new(
        IoCursor::new(data.as_bytes().to_vec()),
        &ColumnNames::default(),
        options,
    )
    .expect("source must open")
}

fn open(data: &str) -> Source {
    open_with(data, DecodePolicy::Abort)
}

/// Builds a point stream from identifiers, each row placed at (row, -row).
fn stream(ids: &[i64]) -> String {
    let rows = ids
        .iter()
        .enumerate()
        .map(|(row, id)| format!("{id};{row}.0;-{row}.0;{}\n", row * 10))
        .collect::<String>();

    format!("id;x;y;timestamp\n{rows}")
}

fn point_counts(trajectories: &[Trajectory]) -> Vec<(i64, usize)> {
    trajectories.iter().map(|t| (t.id, t.len())).collect()
}

#[test_log::test]
fn single_distinct_id_is_one_group() {
    let mut source = open(&stream(&[9, 9, 9]));
    let trajectories = source.read_all().expect("stream is well formed");

    assert_eq!(point_counts(&trajectories), vec![(9, 3)]);
}

#[test_log::test]
fn single_row_is_one_point_group() {
    let mut source = open(&stream(&[7]));
    let trajectories = source.read_all().expect("stream is well formed");

    assert_eq!(point_counts(&trajectories), vec![(7, 1)]);
}

#[test_log::test]
fn groups_contiguous_runs_only() {
    let mut source = open(&stream(&[1, 1, 2, 2, 1]));
    let trajectories = source.read_all().expect("stream is well formed");

    assert_eq!(point_counts(&trajectories), vec![(1, 2), (2, 2), (1, 1)]);
}

#[test_log::test]
fn distinct_ids_give_single_point_groups() {
    let mut source = open(&stream(&[4, 5, 6, 7]));
    let trajectories = source.read_all().expect("stream is well formed");

    assert_eq!(
        point_counts(&trajectories),
        vec![(4, 1), (5, 1), (6, 1), (7, 1)]
    );
}

#[test_log::test]
fn final_group_is_flushed_without_pending_record() {
    let mut source = open(&stream(&[3, 3, 8, 8]));

    let first = source.read_next().expect("first group");
    assert_eq!((first.id, first.len()), (3, 2));
    assert!(source.cursor().is_pending());

    let last = source.read_next().expect("last group");
    assert_eq!((last.id, last.len()), (8, 2));
    assert!(!source.cursor().is_pending());
    assert!(source.cursor().is_exhausted());
    assert!(!source.has_next());
}

#[test_log::test]
fn groups_preserve_every_point_in_order() {
    let ids = [1, 1, 1, 2, 3, 3, 2, 2, 5, 1];
    let mut source = open(&stream(&ids));
    let trajectories = source.read_all().expect("stream is well formed");

    let points = trajectories
        .iter()
        .flat_map(|t| t.path.0.iter().copied())
        .collect::<Vec<_>>();

    let expected = (0..ids.len())
        .map(|row| Coord {
            x: row as f64,
            y: -(row as f64),
        })
        .collect::<Vec<_>>();

    assert_eq!(points, expected);
    assert_eq!(trajectories.len(), 6);
}

#[test_log::test]
fn boundary_row_opens_next_group_exactly_once() {
    let data = "id;x;y\n1;0;0\n1;1;1\n2;5;6\n2;7;8\n";
    let mut source = open(data);

    let first = source.read_next().expect("first group");
    assert_eq!(first.path, wkt! { LINESTRING (0.0 0.0, 1.0 1.0) });

    let second = source.read_next().expect("second group");
    assert_eq!(second.id, 2);
    assert_eq!(second.path, wkt! { LINESTRING (5.0 6.0, 7.0 8.0) });

    let boundary = Coord { x: 5.0, y: 6.0 };
    let occurrences = [&first, &second]
        .iter()
        .flat_map(|t| t.path.0.iter())
        .filter(|c| **c == boundary)
        .count();
    assert_eq!(occurrences, 1);
}

#[test_log::test]
fn reads_timestamps_when_time_column_is_present() {
    let mut source = open(&stream(&[1, 1, 2]));
    assert!(source.has_time_stamp());

    let first = source.read_next_temporal().expect("first group");
    assert_eq!(first.timestamps(), &[0.0, 10.0]);

    let second = source.read_next_temporal().expect("second group");
    assert_eq!(second.timestamps(), &[20.0]);
}

#[test_log::test]
fn missing_time_column_gives_empty_timestamps() {
    let data = "id;x;y\n1;0;0\n1;1;1\n";
    let mut source = open(data);

    assert!(!source.has_time_stamp());
    assert!(matches!(
        source.require_timestamps(),
        Err(ReaderError::TimestampsUnavailable)
    ));

    let trajectory = source.read_next_temporal().expect("group");
    assert!(trajectory.timestamps().is_empty());
    assert_eq!(trajectory.len(), 2);
}

#[test_log::test]
fn reset_reproduces_fresh_read() {
    let data = stream(&[1, 1, 2, 2, 1, 6]);

    let fresh = open(&data).read_all().expect("stream is well formed");

    let mut source = open(&data);
    let partial = source.read_next_n(2).expect("first groups");
    assert_eq!(partial.len(), 2);

    source.reset().expect("source must rewind");
    let again = source.read_all().expect("stream is well formed");

    assert_eq!(again, fresh);

    source.reset().expect("source must rewind");
    assert_eq!(source.read_all().expect("stream is well formed"), fresh);
}

#[test_log::test]
fn read_next_n_stops_at_exhaustion() {
    let mut source = open(&stream(&[1, 2, 3]));

    assert_eq!(source.read_next_n(2).expect("groups").len(), 2);
    assert_eq!(source.read_next_n(5).expect("groups").len(), 1);
    assert!(source.read_next_n(5).expect("no groups").is_empty());
}

#[test_log::test]
fn reading_past_the_end_is_reported() {
    let mut source = open(&stream(&[1]));
    source.read_next().expect("only group");

    assert!(!source.has_next());
    assert!(matches!(source.read_next(), Err(ReaderError::Exhausted)));
}

#[test_log::test]
fn header_only_stream_is_empty() {
    let mut source = open("id;x;y\n");

    assert!(!source.has_next());
    assert!(source.read_all().expect("empty stream").is_empty());
}

#[test_log::test]
fn missing_coordinate_column_fails_construction() {
    let result = PointSource::new(
        IoCursor::new(b"id;x;timestamp\n1;0;0\n".to_vec()),
        &ColumnNames::default(),
        ReadOptions::default(),
    );

    assert!(matches!(result, Err(ReaderError::Configuration(_))));
}

const MALFORMED: &str = "id;x;y\n1;0;0\n1;east;1\n1;2;2\n2;3;3\n";

#[test_log::test]
fn abort_ends_group_and_reports_on_next_read() {
    let mut source = open_with(MALFORMED, DecodePolicy::Abort);

    let first = source.read_next().expect("group before malformed row");
    assert_eq!((first.id, first.len()), (1, 1));

    assert!(source.has_next());
    match source.read_next() {
        Err(ReaderError::Decode(err @ DecodeError::Coordinate { .. })) => {
            assert_eq!(err.line(), Some(3));
        }
        other => panic!("Expected coordinate error, got {other:?}"),
    }

    let rest = source.read_all().expect("rows after malformed row");
    assert_eq!(point_counts(&rest), vec![(1, 1), (2, 1)]);
}

#[test_log::test]
fn abort_on_first_row_fails_directly() {
    let mut source = open_with("id;x;y\nx1;0;0\n2;1;1\n", DecodePolicy::Abort);

    assert!(matches!(
        source.read_next(),
        Err(ReaderError::Decode(DecodeError::Identifier { line: 2, .. }))
    ));

    let rest = source.read_all().expect("rows after malformed row");
    assert_eq!(point_counts(&rest), vec![(2, 1)]);
}

#[test_log::test]
fn skip_drops_only_malformed_rows() {
    let mut source = open_with(MALFORMED, DecodePolicy::Skip);
    let trajectories = source.read_all().expect("malformed rows are skipped");

    assert_eq!(point_counts(&trajectories), vec![(1, 2), (2, 1)]);
}

#[test_log::test]
fn skip_with_trailing_malformed_rows_ends_cleanly() {
    let data = "id;x;y\n1;0;0\n2;bad;0\n3;0;bad\n";
    let mut source = open_with(data, DecodePolicy::Skip);

    let only = source.read_next().expect("single well formed group");
    assert_eq!((only.id, only.len()), (1, 1));
    assert!(!source.has_next());
}

#[test_log::test]
fn iterator_yields_each_group() {
    let mut source = open(&stream(&[1, 2, 2]));
    let ids = source
        .trajectories()
        .map(|t| t.map(|t| t.id))
        .collect::<Result<Vec<_>, _>>()
        .expect("stream is well formed");

    assert_eq!(ids, vec![1, 2]);
}

#[test_log::test]
fn batch_read_keeps_groups_before_malformed_row() {
    let data = "id;x;y\n5;0;0\n5;1;1\n6;2;2\n6;bad;3\n7;4;4\n";
    let mut source = open_with(data, DecodePolicy::Abort);

    let before = source.read_all().expect("groups before the malformed row");
    assert_eq!(point_counts(&before), vec![(5, 2), (6, 1)]);

    assert!(source.has_next());
    assert!(matches!(
        source.read_all(),
        Err(ReaderError::Decode(DecodeError::Coordinate { line: 5, .. }))
    ));

    let after = source.read_all().expect("groups after the malformed row");
    assert_eq!(point_counts(&after), vec![(7, 1)]);
    assert!(!source.has_next());
}

#[test_log::test]
fn temporal_batch_stops_at_malformed_row() {
    let data = "id;x;y;timestamp\n1;0;0;0\n2;1;1;5\n2;2;2;later\n3;3;3;9\n";
    let mut source = open_with(data, DecodePolicy::Abort);

    let before = source.read_next_n_temporal(5).expect("groups before the malformed row");
    let ids = before.iter().map(|t| t.id()).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(before[1].timestamps(), &[5.0]);

    assert!(source.read_next_n_temporal(5).is_err());
    assert_eq!(
        source.read_all_temporal().expect("remaining groups")[0].id(),
        3
    );
}
