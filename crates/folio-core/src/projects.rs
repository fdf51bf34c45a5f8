use glam::Vec3;
use serde::Deserialize;

use crate::constants::{MARKER_HEIGHT, PROJECT_SPACING, WORLD_MARGIN};
use crate::error::Result;

/// One entry of the externally supplied project list.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Project {
    /// Strict parse: any malformed record fails the whole list.
    pub fn parse_list(json: &str) -> Result<Vec<Project>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Lenient parse used by the host. Anything that is not a JSON array yields an
/// empty list; malformed records are skipped.
pub fn load_projects(json: &str) -> Vec<Project> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(json) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(serde_json::Value::Null) => Vec::new(),
        Ok(_) => {
            log::warn!("[projects] expected an array, rendering an empty world");
            Vec::new()
        }
        Err(e) => {
            log::warn!("[projects] unreadable list ({e}), rendering an empty world");
            Vec::new()
        }
    };
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match serde_json::from_value::<Project>(v) {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("[projects] skipping record {i}: {e}");
                None
            }
        })
        .collect()
}

/// Path length for `count` projects plus the fixed margin.
#[inline]
pub fn world_size(count: usize) -> f32 {
    count as f32 * PROJECT_SPACING + WORLD_MARGIN
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectMarker {
    pub title: String,
    pub link: String,
    pub world_position: Vec3,
}

/// Markers step away from the camera along -Z, one spacing apart.
pub fn layout_markers(projects: &[Project]) -> Vec<ProjectMarker> {
    projects
        .iter()
        .enumerate()
        .map(|(i, p)| ProjectMarker {
            title: p.title.clone(),
            link: p.link.clone(),
            world_position: Vec3::new(0.0, MARKER_HEIGHT, -((i + 1) as f32) * PROJECT_SPACING),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"title": "synth", "description": "music", "link": "https://example.com/synth",
         "homepage": "https://synth.example.com", "languages": ["Rust"], "createdAt": "2024-01-02T00:00:00Z"},
        {"title": "tiny", "description": "", "link": "https://example.com/tiny", "createdAt": "2023-05-06T00:00:00Z"}
    ]"#;

    #[test]
    fn parses_optional_fields() {
        let list = Project::parse_list(SAMPLE).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].homepage.as_deref(), Some("https://synth.example.com"));
        assert_eq!(list[0].languages, vec!["Rust".to_string()]);
        assert_eq!(list[1].homepage, None);
        assert!(list[1].languages.is_empty());
        assert_eq!(list[1].created_at, "2023-05-06T00:00:00Z");
    }

    #[test]
    fn strict_parse_rejects_garbage() {
        assert!(Project::parse_list("{not json").is_err());
        assert!(Project::parse_list(r#"[{"description": "no title"}]"#).is_err());
    }

    #[test]
    fn lenient_parse_degrades_to_empty() {
        assert!(load_projects("").is_empty());
        assert!(load_projects("null").is_empty());
        assert!(load_projects(r#"{"title": "x"}"#).is_empty());
    }

    #[test]
    fn lenient_parse_skips_bad_records() {
        let json = r#"[{"title": "ok", "link": "https://a"}, {"oops": 1}, 42]"#;
        let list = load_projects(json);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "ok");
    }

    #[test]
    fn markers_step_along_negative_z() {
        let list = Project::parse_list(SAMPLE).unwrap();
        let markers = layout_markers(&list);
        assert_eq!(markers[0].world_position.z, -10.0);
        assert_eq!(markers[1].world_position.z, -20.0);
        assert_eq!(world_size(list.len()), 120.0);
    }
}
