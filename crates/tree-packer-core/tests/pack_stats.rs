use tree_packer_core::prelude::*;

#[test]
fn stats_for_perfectly_filled_atlases() {
    let cfg = PackerConfig::builder().with_max_dimensions(256, 256).build();
    let items = vec![
        ("a", 128, 200),
        ("b", 128, 200),
        ("c", 128, 200),
        ("d", 128, 200),
    ];
    let results = pack(items, &cfg).expect("pack");
    let stats = PackStats::from_results(&results);

    assert_eq!(stats.num_atlases, 2);
    assert_eq!(stats.num_items, 4);
    assert_eq!(stats.num_rotated, 0);
    assert_eq!(stats.used_area, 4 * 128 * 200);
    assert_eq!(stats.total_area, 2 * 256 * 200);
    assert!((stats.occupancy - 1.0).abs() < f64::EPSILON);
    assert_eq!(stats.wasted_area(), 0);
}

#[test]
fn stats_count_rotations_and_waste() {
    let cfg = PackerConfig::builder().with_max_dimensions(100, 100).build();
    let results = pack(vec![("wide", 40, 10), ("sq", 20, 20)], &cfg).expect("pack");
    let stats = PackStats::from_results(&results);

    assert_eq!(stats.num_atlases, 1);
    assert_eq!(stats.num_rotated, 1);
    // the column under the upright 10x40 strip is too narrow for sq
    assert_eq!(results[0].rect("sq"), Some(Rect::new(10, 0, 20, 20)));
    assert_eq!(results[0].bounding_rect, Rect::new(0, 0, 30, 40));
    assert_eq!(stats.used_area, 400 + 400);
    assert_eq!(stats.wasted_area(), 30 * 40 - 800);
    assert!(stats.summary().contains("Rotated: 1"));
}

#[test]
fn stats_of_nothing() {
    let stats = PackStats::from_results(&[]);
    assert_eq!(stats.num_atlases, 0);
    assert_eq!(stats.occupancy, 0.0);
}
