use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ConsoleError;
use crate::model::{parse_id, EntityKind, Id, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Success,
    Building,
    Failed,
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Building => write!(f, "building"),
            BuildStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for BuildStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(BuildStatus::Success),
            "building" => Ok(BuildStatus::Building),
            "failed" => Ok(BuildStatus::Failed),
            _ => Err(format!("Unknown build status: {}", s)),
        }
    }
}

/// Build manifest. Only `version` is mandatory; every other key the builder
/// emits, `status` and `timestamp` included, is kept as-is in `extra` and read
/// back through the typed accessors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildManifest {
    #[serde(default)]
    pub version: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl BuildManifest {
    pub const STATUS_KEY: &'static str = "status";
    pub const TIMESTAMP_KEY: &'static str = "timestamp";

    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            extra: HashMap::new(),
        }
    }

    pub fn with_status(mut self, status: BuildStatus) -> Self {
        self.extra
            .insert(Self::STATUS_KEY.to_string(), status.to_string().into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.extra
            .insert(Self::TIMESTAMP_KEY.to_string(), timestamp.to_rfc3339().into());
        self
    }

    /// Raw status text as the builder reported it
    pub fn status_label(&self) -> Option<&str> {
        self.extra.get(Self::STATUS_KEY).and_then(|v| v.as_str())
    }

    /// Status when it is one the dashboards know how to count
    pub fn status(&self) -> Option<BuildStatus> {
        self.status_label().and_then(|s| s.parse().ok())
    }

    /// RFC 3339 timestamps, or a bare `YYYY-MM-DD` read as midnight UTC
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.extra.get(Self::TIMESTAMP_KEY)?.as_str()?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: Id,
    pub image_id: Id,
    pub name: String,
    pub manifest: BuildManifest,
}

impl Build {
    pub fn status(&self) -> Option<BuildStatus> {
        self.manifest.status()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBuild {
    pub image_id: Id,
    pub name: String,
    pub manifest: BuildManifest,
}

impl Record for Build {
    type Draft = NewBuild;

    const KIND: EntityKind = EntityKind::Build;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: NewBuild) -> Self {
        Self {
            id,
            image_id: draft.image_id,
            name: draft.name,
            manifest: draft.manifest,
        }
    }

    fn to_draft(&self) -> NewBuild {
        NewBuild {
            image_id: self.image_id,
            name: self.name.clone(),
            manifest: self.manifest.clone(),
        }
    }

    fn apply_draft(&mut self, draft: NewBuild) {
        *self = Self::from_draft(self.id, draft);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn matches_filter(&self, key: &str, value: &str) -> Result<bool, ConsoleError> {
        match key {
            "image_id" => Ok(parse_id(key, value)? == self.image_id),
            // any label a builder reports is a valid filter value
            "status" => Ok(self
                .manifest
                .status_label()
                .is_some_and(|label| label.eq_ignore_ascii_case(value))),
            _ => Err(ConsoleError::invalid_filter(key, value)),
        }
    }

    fn required_fields(draft: &NewBuild) -> Vec<(&'static str, &str)> {
        vec![
            ("name", draft.name.as_str()),
            ("manifest.version", draft.manifest.version.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_manifest_keeps_unknown_keys() {
        let manifest: BuildManifest = serde_json::from_value(json!({
            "version": "1.0.0",
            "status": "success",
            "timestamp": "2024-03-15T10:30:00Z",
            "packer_version": "1.9.4"
        }))
        .unwrap();

        assert_eq!(manifest.status(), Some(BuildStatus::Success));
        assert_eq!(
            manifest.timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).single()
        );
        assert_eq!(manifest.extra.get("packer_version"), Some(&json!("1.9.4")));

        let back = serde_json::to_value(&manifest).unwrap();
        assert_eq!(back["packer_version"], json!("1.9.4"));
        assert_eq!(back["version"], json!("1.0.0"));
    }

    #[test]
    fn test_build_filters() {
        let build = Build {
            id: 1,
            image_id: 1,
            name: "Build 1".to_string(),
            manifest: BuildManifest::new("1.0.0").with_status(BuildStatus::Failed),
        };
        assert_eq!(build.matches_filter("image_id", "1"), Ok(true));
        assert_eq!(build.matches_filter("image_id", "2"), Ok(false));
        assert_eq!(build.matches_filter("status", "failed"), Ok(true));
        assert_eq!(build.matches_filter("status", "success"), Ok(false));
    }

    #[test]
    fn test_manifest_accepts_statuses_and_dates_outside_the_known_set() {
        let manifest: BuildManifest = serde_json::from_value(json!({
            "version": "2.0.0",
            "status": "queued",
            "timestamp": "2024-03-17"
        }))
        .unwrap();

        assert_eq!(manifest.status_label(), Some("queued"));
        assert_eq!(manifest.status(), None);
        assert_eq!(
            manifest.timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 17, 0, 0, 0).single()
        );

        let back = serde_json::to_value(&manifest).unwrap();
        assert_eq!(back["status"], json!("queued"));
        assert_eq!(back["timestamp"], json!("2024-03-17"));

        let build = Build::from_draft(
            3,
            NewBuild {
                image_id: 2,
                name: "Build 3".to_string(),
                manifest,
            },
        );
        assert_eq!(build.matches_filter("status", "queued"), Ok(true));
        assert_eq!(build.matches_filter("status", "success"), Ok(false));
    }

    #[test]
    fn test_non_string_status_is_kept_but_not_counted() {
        let manifest: BuildManifest =
            serde_json::from_value(json!({ "version": "1.0.0", "status": 3 })).unwrap();
        assert_eq!(manifest.status_label(), None);
        assert_eq!(manifest.extra.get("status"), Some(&json!(3)));
    }
}
