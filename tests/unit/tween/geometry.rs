use super::*;
use crate::foundation::core::PanelId;
use crate::tween::effect::Effect;

fn vertex(group: u64, x: f64, y: f64) -> Row {
    Row::new(PanelId(1), Group::Id(group))
        .with("x", x)
        .with("y", y)
}

fn xs(rows: &[Row]) -> Vec<f64> {
    rows.iter().filter_map(|r| r.num("x")).collect()
}

#[test]
fn geometry_tags_parse_with_aliases() {
    assert_eq!("point".parse::<Geometry>().unwrap(), Geometry::Point);
    assert_eq!("text".parse::<Geometry>().unwrap(), Geometry::Point);
    assert_eq!("line".parse::<Geometry>().unwrap(), Geometry::Path);
    assert_eq!("area".parse::<Geometry>().unwrap(), Geometry::Polygon);
    assert_eq!("sf".parse::<Geometry>().unwrap(), Geometry::Spatial);
    assert!(matches!(
        "violin".parse::<Geometry>(),
        Err(FramesError::UnsupportedGeometry(tag)) if tag == "violin"
    ));
    let g: Geometry = serde_json::from_str("\"polygon\"").unwrap();
    assert_eq!(g, Geometry::Polygon);
    assert!(Geometry::Point.is_point_like());
    assert!(!Geometry::Path.is_point_like());
}

#[test]
fn point_tracks_count_occurrences_per_group() {
    let rows = vec![
        vertex(1, 0.0, 0.0),
        vertex(2, 1.0, 0.0),
        vertex(1, 2.0, 0.0),
    ];
    let keys = PointTween
        .key(&rows)
        .unwrap()
        .into_iter()
        .map(|t| t.key)
        .collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec![(Group::Id(1), 0), (Group::Id(2), 0), (Group::Id(1), 1)]
    );
}

#[test]
fn path_tracks_group_vertices_and_align_proportionally() {
    let rows = vec![
        vertex(1, 0.0, 0.0),
        vertex(2, 5.0, 5.0),
        vertex(1, 1.0, 0.0),
    ];
    let tracks = PathTween.key(&rows).unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(xs(&tracks[0].rows), vec![0.0, 1.0]);

    let from = vec![vertex(1, 0.0, 0.0), vertex(1, 10.0, 0.0)];
    let to = vec![
        vertex(1, 0.0, 1.0),
        vertex(1, 4.0, 1.0),
        vertex(1, 6.0, 1.0),
        vertex(1, 10.0, 1.0),
    ];
    let (a, b) = PathTween.align(&from, &to);
    assert_eq!(a.len(), 4);
    assert_eq!(xs(&a), vec![0.0, 0.0, 10.0, 10.0]);
    assert_eq!(b, to);

    let mid = PathTween.interpolate(&a, &b, 0.5);
    assert_eq!(xs(&mid), vec![0.0, 2.0, 8.0, 10.0]);
}

#[test]
fn polygon_target_is_rotated_to_the_nearest_start() {
    let from = vec![
        vertex(1, 0.0, 0.0),
        vertex(1, 1.0, 0.0),
        vertex(1, 1.0, 1.0),
    ];
    let to = vec![
        vertex(1, 1.0, 1.0),
        vertex(1, 0.1, 0.0),
        vertex(1, 1.0, 0.0),
    ];
    let (_, b) = PolygonTween.align(&from, &to);
    assert_eq!(xs(&b), vec![0.1, 1.0, 1.0]);
}

#[test]
fn spatial_rows_need_shapes_and_pad_missing_rings() {
    let bare = vec![vertex(1, 0.0, 0.0)];
    assert!(matches!(
        SpatialTween.key(&bare),
        Err(FramesError::Validation(_))
    ));

    let one = Shape::ring(vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);
    let two = Shape {
        rings: vec![
            vec![Point::new(2.0, 0.0), Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            vec![Point::new(5.0, 5.0)],
        ],
    };
    let a = vec![Row::new(PanelId(1), Group::Id(1)).with_shape(one)];
    let b = vec![Row::new(PanelId(1), Group::Id(1)).with_shape(two)];
    let (a, b) = SpatialTween.align(&a, &b);
    let (sa, sb) = (a[0].shape.as_ref().unwrap(), b[0].shape.as_ref().unwrap());
    assert_eq!(sa.rings.len(), 2);
    assert_eq!(sa.rings[0].len(), 3);
    assert_eq!(sb.rings[0][0], Point::new(0.0, 0.0));
    // The padded ring collapses onto the target's centroid.
    assert!(sa.rings[1].iter().all(|p| *p == Point::new(2.0, 1.5)));
    assert_eq!(sb.rings[1], vec![Point::new(5.0, 5.0)]);
}

#[test]
fn enter_and_exit_use_the_supplied_effect() {
    let rows = vec![vertex(1, 0.0, 0.0).with("alpha", 1.0)];
    assert!(PointTween.enter(&rows, None).is_none());
    let faded = PointTween.exit(&rows, Some(&Effect::Fade)).unwrap();
    assert_eq!(faded[0].num("alpha"), Some(0.0));
}

#[test]
fn every_geometry_maps_to_a_tween() {
    for g in [
        Geometry::Point,
        Geometry::Path,
        Geometry::Polygon,
        Geometry::Spatial,
    ] {
        let rows = vec![Row::new(PanelId(1), Group::Id(1)).with_shape(Shape::default())];
        assert_eq!(g.tween().key(&rows).unwrap().len(), 1, "{g}");
    }
}
