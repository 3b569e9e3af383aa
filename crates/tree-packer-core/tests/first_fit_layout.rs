use rand::SeedableRng;
use rand::seq::SliceRandom;
use tree_packer_core::model::Rect;
use tree_packer_core::{PackerConfig, pack};

fn sample() -> Vec<(String, u32, u32)> {
    vec![
        ("A".into(), 100, 120),
        ("B".into(), 60, 80),
        ("C".into(), 50, 30),
        ("D".into(), 20, 20),
    ]
}

#[test]
fn layout_follows_left_biased_first_fit() {
    let cfg = PackerConfig::builder().with_max_dimensions(256, 256).build();
    let results = pack(sample(), &cfg).expect("pack");
    assert_eq!(results.len(), 1);
    let r = &results[0];

    assert_eq!(r.rect("A"), Some(Rect::new(0, 0, 100, 120)));
    // strip under A is searched before the right column
    assert_eq!(r.rect("B"), Some(Rect::new(0, 120, 60, 80)));
    // C is rotated to 30x50 and lands under B
    assert_eq!(r.rect("C"), Some(Rect::new(0, 200, 30, 50)));
    assert!(r.is_rotated("C"));
    assert_eq!(r.rect("D"), Some(Rect::new(30, 200, 20, 20)));
    assert!(!r.is_rotated("D"));

    assert_eq!(r.bounding_rect, Rect::new(0, 0, 100, 250));
}

#[test]
fn equal_heights_are_ordered_by_id() {
    let cfg = PackerConfig::builder().with_max_dimensions(100, 100).build();
    let results = pack(vec![("b", 30, 40), ("a", 30, 40)], &cfg).expect("pack");
    let r = &results[0];
    assert_eq!(r.rect("a"), Some(Rect::new(0, 0, 30, 40)));
    assert_eq!(r.rect("b"), Some(Rect::new(0, 40, 30, 40)));
}

#[test]
fn input_order_does_not_change_layout() {
    let cfg = PackerConfig::builder().with_max_dimensions(128, 128).build();
    let mut items: Vec<(String, u32, u32)> = (0..60u32)
        .map(|i| (format!("r{i}"), 8 + (i * 7) % 40, 8 + (i * 13) % 40))
        .collect();
    let baseline = pack(items.clone(), &cfg).expect("pack");

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..5 {
        items.shuffle(&mut rng);
        let again = pack(items.clone(), &cfg).expect("pack");
        assert_eq!(again, baseline);
    }
}
