use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref FRAMERATE: Regex = Regex::new(r"a=framerate:(\d+)").unwrap();
}

/// Vendor markers in priority order, first hit wins.
const VENDOR_MARKERS: &[&str] = &["H264DVR", "Dahua", "Hikvision", "Sony", "Axis", "Bosch"];

const CODEC_MARKERS: &[(&str, &str)] = &[("H264/", "H264"), ("H265/", "H265")];

const PATH_MARKERS: &[(&str, &str)] = &[("/live", "live"), ("/cam", "cam"), ("/media", "media")];

/// Short tag set describing a stream, rendered as `"Hikvision, H264, 30fps"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    tags: Vec<String>,
}

impl Fingerprint {
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_unknown(&self) -> bool {
        self.tags.is_empty()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            f.write_str("unknown")
        } else {
            f.write_str(&self.tags.join(", "))
        }
    }
}

/// Derive vendor and media tags from a raw DESCRIBE response and the stream URL.
pub fn extract(response: &str, url: &str) -> Fingerprint {
    let mut tags = Vec::new();

    if let Some(vendor) = VENDOR_MARKERS.iter().find(|m| response.contains(*m)) {
        tags.push(vendor.to_string());
    }

    for (marker, tag) in CODEC_MARKERS {
        if response.contains(marker) {
            tags.push(tag.to_string());
        }
    }
    if response.contains("m=audio") {
        tags.push("audio".to_string());
    }
    if response.contains("multicast") {
        tags.push("multicast".to_string());
    }

    if let Some(caps) = FRAMERATE.captures(response) {
        tags.push(format!("{}fps", &caps[1]));
    }

    if let Some((_, tag)) = PATH_MARKERS.iter().find(|(marker, _)| url.contains(marker)) {
        tags.push(tag.to_string());
    }

    Fingerprint { tags }
}
