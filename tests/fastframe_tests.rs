// tests/fastframe_tests.rs
mod common;

use common::{open_bytes, SyntheticFrame, WfmBuilder};
use tekwfm_rs::*;

/// N = 2 additional segments, 3 frames total, 100 samples each, with
/// values that identify which curve slice they came from.
fn three_frame_builder() -> WfmBuilder {
    WfmBuilder::new().fast_frame(vec![
        SyntheticFrame::new((0..100).map(|i| 1000.0 + i as f64).collect()).at(1_600_000_000, 0.25),
        SyntheticFrame::new((0..100).map(|i| 2000.0 + i as f64).collect()).at(1_600_000_001, 0.5),
        SyntheticFrame::new((0..100).map(|i| 3000.0 + i as f64).collect()).at(1_600_000_002, 0.75),
    ])
}

#[test]
fn test_frame_count_invariant() {
    let reader = open_bytes(&three_frame_builder()).unwrap();
    assert_eq!(reader.header().fast_frame_count, 2);
    assert_eq!(reader.frame_count(), 3);
    assert!(reader.metadata().is_fast_frame);
}

#[test]
fn test_second_frame_comes_from_second_slice() {
    let mut reader = open_bytes(&three_frame_builder()).unwrap();
    let frame = reader.read_frame_default(2).unwrap();
    assert_eq!(frame.len(), 100);
    assert_eq!(frame.samples[0], 2000.0);
    assert_eq!(frame.samples[99], 2099.0);
    // neither the first nor the third slice leaked in
    assert!(frame.samples.iter().all(|&v| (2000.0..2100.0).contains(&v)));
}

#[test]
fn test_boundary_frame_indices() {
    let mut reader = open_bytes(&three_frame_builder()).unwrap();

    assert!(reader.read_frame_default(1).is_ok());
    assert!(reader.read_frame_default(3).is_ok());

    assert!(matches!(
        reader.read_frame_default(0),
        Err(WfmError::FrameOutOfRange {
            frame: 0,
            frame_count: 3
        })
    ));
    assert!(matches!(
        reader.read_frame_default(4),
        Err(WfmError::FrameOutOfRange {
            frame: 4,
            frame_count: 3
        })
    ));

    // out-of-range failures are scoped to the call
    assert_eq!(reader.read_frame_default(1).unwrap().samples[0], 1000.0);
}

#[test]
fn test_lazy_iteration_yields_every_frame_once() {
    let mut reader = open_bytes(&three_frame_builder()).unwrap();

    let mut iter = reader.iter_frames();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.remaining(), 3);

    let first = iter.next().unwrap().unwrap();
    assert_eq!(first.index, 1);
    assert_eq!(iter.remaining(), 2);

    let rest: Vec<_> = iter.map(Result::unwrap).collect();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].index, 2);
    assert_eq!(rest[1].index, 3);
    assert_eq!(rest[0].samples[0], 2000.0);
    assert_eq!(rest[1].samples[0], 3000.0);
}

#[test]
fn test_iteration_is_finite_and_fused() {
    let mut reader = open_bytes(&three_frame_builder()).unwrap();
    let mut iter = reader.iter_frames();
    for _ in 0..3 {
        assert!(iter.next().is_some());
    }
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
    assert_eq!(iter.remaining(), 0);
}

#[test]
fn test_per_frame_timestamps() {
    let mut reader = open_bytes(&three_frame_builder()).unwrap();
    let stamps: Vec<f64> = reader
        .iter_frames()
        .map(|f| f.unwrap().timestamp.seconds())
        .collect();
    assert_eq!(
        stamps,
        vec![1_600_000_000.25, 1_600_000_001.5, 1_600_000_002.75]
    );
    assert!(stamps.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_sub_range_selection() {
    // start_index=5, step=2, datapoints=3 against 20 stored samples:
    // 1-based raw indices 5, 7, 9
    let mut b = WfmBuilder::new();
    b.t_offset = 1e-6;
    b.t_scale = 1e-9;
    b.frames = vec![SyntheticFrame::new((1..=20).map(f64::from).collect())];
    let mut reader = open_bytes(&b).unwrap();

    let options = ReadOptions::new()
        .with_start_index(5)
        .with_step(2)
        .with_datapoints(3);
    let frame = reader.read_frame(1, &options).unwrap();

    assert_eq!(frame.samples, vec![5.0, 7.0, 9.0]);
    assert!(frame.truncation.is_none());
    // index axis follows the same selection
    assert_eq!(
        frame.time,
        vec![1e-6 + 4.0 * 1e-9, 1e-6 + 6.0 * 1e-9, 1e-6 + 8.0 * 1e-9]
    );
}

#[test]
fn test_clamping_reports_truncation() {
    let mut b = WfmBuilder::new();
    b.frames = vec![SyntheticFrame::new((0..20).map(f64::from).collect())];
    let mut reader = open_bytes(&b).unwrap();

    // floor(20 / 3) = 6 possible; asking for 10 clamps to 6
    let options = ReadOptions::new().with_step(3).with_datapoints(10);
    let frame = reader.read_frame(1, &options).unwrap();
    assert_eq!(frame.len(), 6);
    assert_eq!(
        frame.truncation,
        Some(Truncation {
            requested: 10,
            actual: 6
        })
    );
    assert_eq!(frame.samples, vec![0.0, 3.0, 6.0, 9.0, 12.0, 15.0]);
}

#[test]
fn test_exact_request_is_not_truncated() {
    let mut b = WfmBuilder::new();
    b.frames = vec![SyntheticFrame::new((0..20).map(f64::from).collect())];
    let mut reader = open_bytes(&b).unwrap();

    let options = ReadOptions::new().with_datapoints(20);
    let frame = reader.read_frame(1, &options).unwrap();
    assert_eq!(frame.len(), 20);
    assert!(frame.truncation.is_none());
}

#[test]
fn test_start_index_past_record_yields_empty_frame() {
    let mut b = WfmBuilder::new();
    b.frames = vec![SyntheticFrame::new((0..10).map(f64::from).collect())];
    let mut reader = open_bytes(&b).unwrap();

    let options = ReadOptions::new().with_start_index(11).with_datapoints(4);
    let frame = reader.read_frame(1, &options).unwrap();
    assert!(frame.is_empty());
    assert_eq!(
        frame.truncation,
        Some(Truncation {
            requested: 4,
            actual: 0
        })
    );
}

#[test]
fn test_iter_frames_with_options() {
    let mut reader = open_bytes(&three_frame_builder()).unwrap();
    let options = ReadOptions::new().with_step(10);
    let lengths: Vec<usize> = reader
        .iter_frames_with(options)
        .map(|f| f.unwrap().len())
        .collect();
    assert_eq!(lengths, vec![10, 10, 10]);
}

#[test]
fn test_precharge_padding_is_skipped() {
    let mut b = WfmBuilder::new();
    b.pre_pad = 16;
    b.post_pad = 6;
    b.fast_frame = true;
    b.frames = vec![
        SyntheticFrame::new(vec![11.0, 12.0, 13.0]),
        SyntheticFrame::new(vec![21.0, 22.0, 23.0]),
    ];
    let mut reader = open_bytes(&b).unwrap();

    let f1 = reader.read_frame_default(1).unwrap();
    let f2 = reader.read_frame_default(2).unwrap();
    assert_eq!(f1.samples, vec![11.0, 12.0, 13.0]);
    assert_eq!(f2.samples, vec![21.0, 22.0, 23.0]);
}

#[test]
fn test_frame_reads_are_order_independent() {
    let mut reader = open_bytes(&three_frame_builder()).unwrap();
    let f3 = reader.read_frame_default(3).unwrap();
    let f1 = reader.read_frame_default(1).unwrap();
    let f2 = reader.read_frame_default(2).unwrap();
    assert_eq!(f1.samples[0], 1000.0);
    assert_eq!(f2.samples[0], 2000.0);
    assert_eq!(f3.samples[0], 3000.0);
}
