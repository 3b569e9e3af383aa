use crate::model::AtlasResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One placed item as written to `meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub file_id: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rotate: bool,
}

/// Frames of one atlas, ordered by id.
pub fn frame_records(result: &AtlasResult) -> Vec<FrameRecord> {
    result
        .rects
        .iter()
        .map(|(id, r)| FrameRecord {
            file_id: id.clone(),
            x: r.x,
            y: r.y,
            width: r.w,
            height: r.h,
            rotate: result.is_rotated(id),
        })
        .collect()
}

/// `{base}_0.png`, `{base}_1.png`, ...
pub fn atlas_names(count: usize, base: &str) -> Vec<String> {
    (0..count).map(|i| format!("{base}_{i}.png")).collect()
}

/// Metadata object keyed by atlas name; each value is that atlas' frame list.
/// Shape: `{ "<name>": [ { fileId, x, y, width, height, rotate } ] }`.
///
/// Atlases without a matching entry in `names` are named `atlas_<index>.png`.
pub fn to_json_meta<'a, I>(results: I, names: &[String]) -> Value
where
    I: IntoIterator<Item = &'a AtlasResult>,
{
    let mut obj = Map::new();
    for (i, result) in results.into_iter().enumerate() {
        let name = names
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("atlas_{}.png", result.index));
        let frames = frame_records(result)
            .into_iter()
            .map(|f| {
                json!({
                    "fileId": f.file_id,
                    "x": f.x,
                    "y": f.y,
                    "width": f.width,
                    "height": f.height,
                    "rotate": f.rotate,
                })
            })
            .collect();
        obj.insert(name, Value::Array(frames));
    }
    Value::Object(obj)
}
