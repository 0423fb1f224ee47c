//! Label vocabularies used when fusing detector output
//!
//! The whole-frame classifier emits free-form labels, so its output is
//! filtered against a vocabulary of everyday indoor objects and normalized
//! through a synonym table. Box detector output is filtered the other way,
//! against an exclusion list of outdoor-only classes that are noise indoors.

/// Everyday indoor objects the classifier is allowed to report.
pub const EVERYDAY_KEYWORDS: &[&str] = &[
    "laptop", "keyboard", "mouse", "monitor", "lamp", "pen", "pencil", "bottle", "cup", "glass",
    "book", "phone", "remote", "clock", "door", "table", "desk", "chair", "bed", "couch", "shelf",
    "bag", "backpack", "plant", "sink", "towel", "window",
];

/// Classifier labels mapped onto their everyday keyword.
pub const LABEL_SYNONYMS: &[(&str, &str)] = &[
    ("notebook computer", "laptop"),
    ("coffee mug", "cup"),
    ("cell phone", "phone"),
    ("mobile phone", "phone"),
    ("remote control", "remote"),
    ("sofa", "couch"),
    ("armchair", "chair"),
    ("dining table", "table"),
    ("water bottle", "bottle"),
    ("wall clock", "clock"),
    ("table lamp", "lamp"),
    ("computer screen", "monitor"),
    ("pot plant", "plant"),
    ("houseplant", "plant"),
    ("handbag", "bag"),
    ("wine glass", "glass"),
];

/// Box detector classes suppressed indoors.
pub const OUTDOOR_EXCLUSIONS: &[&str] = &[
    "car",
    "truck",
    "bus",
    "train",
    "airplane",
    "boat",
    "motorcycle",
    "bicycle",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "bird",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "frisbee",
];

/// Map a raw classifier label onto its everyday keyword.
///
/// The label is lowercased, passed through the synonym table, and then
/// matched against the keyword list by substring containment. Returns the
/// matched keyword so fused labels stay canonical, or None when the label
/// is not an everyday object.
pub fn canonical_everyday_label(raw: &str) -> Option<&'static str> {
    let lowered = raw.trim().to_lowercase();

    let normalized = LABEL_SYNONYMS
        .iter()
        .find(|(from, _)| *from == lowered)
        .map(|(_, to)| *to)
        .unwrap_or(lowered.as_str());

    EVERYDAY_KEYWORDS
        .iter()
        .find(|keyword| normalized.contains(*keyword))
        .copied()
}

/// Whether a box detector class is on the outdoor exclusion list.
pub fn is_excluded(label: &str) -> bool {
    let lowered = label.trim().to_lowercase();
    OUTDOOR_EXCLUSIONS.iter().any(|excl| *excl == lowered)
}
