use tree_packer_core::export::{FrameRecord, atlas_names, frame_records, to_json_meta};
use tree_packer_core::{PackerConfig, pack};

#[test]
fn meta_json_lists_frames_per_atlas() {
    let cfg = PackerConfig::builder().with_max_dimensions(64, 64).build();
    let results = pack(vec![("a.png", 64, 40), ("b.png", 30, 64)], &cfg).expect("pack");
    assert_eq!(results.len(), 2);

    let names = atlas_names(results.len(), "txatlas");
    assert_eq!(names, vec!["txatlas_0.png", "txatlas_1.png"]);

    let v = to_json_meta(&results, &names);
    let obj = v.as_object().expect("object");
    assert_eq!(obj.len(), 2);

    // a.png is rotated to 40x64 and packed first; b.png opens the second atlas
    let first = obj["txatlas_0.png"].as_array().expect("array");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0]["fileId"], "a.png");
    assert_eq!(first[0]["x"], 0);
    assert_eq!(first[0]["y"], 0);
    assert_eq!(first[0]["width"], 40);
    assert_eq!(first[0]["height"], 64);
    assert_eq!(first[0]["rotate"], true);

    let second = obj["txatlas_1.png"].as_array().expect("array");
    assert_eq!(second[0]["fileId"], "b.png");
    assert_eq!(second[0]["rotate"], false);
}

#[test]
fn frame_records_round_trip_through_serde() {
    let cfg = PackerConfig::builder().with_max_dimensions(128, 128).build();
    let results = pack(vec![("x", 10, 20), ("y", 20, 10)], &cfg).expect("pack");
    let records = frame_records(&results[0]);
    let text = serde_json::to_string(&records).expect("serialize");
    assert!(text.contains("\"fileId\":\"x\""));
    let back: Vec<FrameRecord> = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, records);
}
