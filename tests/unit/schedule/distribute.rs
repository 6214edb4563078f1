use super::*;

#[test]
fn sums_exactly_to_requested_frames() {
    for frames in [1u64, 7, 30, 31, 100, 257] {
        let counts = distribute_frames(&[1.0, 0.5, 2.25], &[1.0, 3.0, 0.0], frames).unwrap();
        assert_eq!(counts.total(), frames, "frames={frames}");
    }
}

#[test]
fn largest_remainders_get_the_leftover_frames() {
    let counts = distribute_frames(&[2.0, 2.0, 2.0], &[5.0, 5.0, 5.0], 31).unwrap();
    assert_eq!(counts.static_lengths, vec![3, 3, 3]);
    assert_eq!(counts.transition_lengths, vec![8, 7, 7]);
}

#[test]
fn zero_lengths_stay_zero() {
    let counts = distribute_frames(&[1.0, 1.0], &[1.0, 0.0], 30).unwrap();
    assert_eq!(counts.transition_lengths[1], 0);
    assert_eq!(counts.static_lengths, vec![10, 10]);
    assert_eq!(counts.transition_lengths, vec![10, 0]);
}

#[test]
fn rejects_degenerate_lengths() {
    assert!(distribute_frames(&[0.0, 0.0], &[0.0, 0.0], 10).is_err());
    assert!(distribute_frames(&[-1.0, 2.0], &[1.0, 1.0], 10).is_err());
    assert!(distribute_frames(&[f64::NAN, 2.0], &[1.0, 1.0], 10).is_err());
    assert!(distribute_frames(&[1.0], &[1.0, 1.0], 10).is_err());
}
