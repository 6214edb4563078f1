use super::*;

fn levels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn static_frames_hold_every_label() {
    let labels = frame_labels(&levels(&["a", "b"]), &[2, 1], &[0, 0], 3);
    assert_eq!(labels.len(), 3);
    assert!(labels.iter().all(|l| !l.transitioning));
    assert_eq!(labels[1].previous, "a");
    assert_eq!(labels[1].next, "a");
    assert_eq!(labels[2].closest, "b");
}

#[test]
fn closest_switches_halfway_through_a_transition() {
    let labels = frame_labels(&levels(&["a", "b"]), &[0, 0], &[4, 0], 4);
    let closest = labels.iter().map(|l| l.closest.as_str()).collect::<Vec<_>>();
    assert_eq!(closest, vec!["a", "b", "b", "b"]);
    assert!(labels.iter().all(|l| l.previous == "a" && l.next == "b"));
}

#[test]
fn last_transition_wraps_and_is_truncated() {
    let labels = frame_labels(&levels(&["a", "b"]), &[1, 1], &[1, 2], 4);
    assert_eq!(labels.len(), 4);
    assert_eq!(labels[3].previous, "b");
    assert_eq!(labels[3].next, "a");
    assert!(labels[3].transitioning);
}

#[test]
fn frame_info_exposes_variables_and_renders_templates() {
    let names = frame_labels(&levels(&["low", "high"]), &[1, 1], &[1, 0], 3);
    let exprs = frame_labels(&levels(&["x < 5", "x >= 5"]), &[1, 1], &[1, 0], 3);
    let info = zip_tracks(names, exprs);
    assert_eq!(info.len(), 3);
    assert_eq!(info[2].frame, 3);
    assert_eq!(info[2].nframes, 3);
    assert_eq!(info[2].progress, 1.0);
    assert!(info[1].transitioning());

    let vars = info[0].variables();
    assert_eq!(vars["closest_filter"], "low");
    assert_eq!(vars["next_filter_expression"], "x < 5");
    assert_eq!(vars["transitioning"], "false");

    assert_eq!(
        info[2].render_label("{closest_filter}: {closest_filter_expression} ({frame}/{nframes})"),
        "high: x >= 5 (3/3)"
    );
    assert_eq!(info[0].render_label("{unknown} {frame"), "{unknown} {frame");
}
