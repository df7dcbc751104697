use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;
use crate::model::common::is_present;
use crate::model::{parse_flag, EntityKind, Id, Record};

/// Machine image configuration built by the factory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: Id,
    pub os_version: String,
    pub technical_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami_source_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami_image_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_source_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_official_image_url: Option<String>,
    pub ansible_playbook_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_playbook: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Ami,
    Docker,
}

impl std::str::FromStr for ImageSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ami" => Ok(ImageSource::Ami),
            "docker" => Ok(ImageSource::Docker),
            _ => Err(format!("Unknown image source: {}", s)),
        }
    }
}

impl Image {
    pub fn has_source(&self, source: ImageSource) -> bool {
        match source {
            ImageSource::Ami => is_present(&self.ami_source_image),
            ImageSource::Docker => is_present(&self.docker_source_image),
        }
    }

    /// Both source kinds populated at once. Allowed, but logged on save.
    pub fn has_conflicting_sources(&self) -> bool {
        self.has_source(ImageSource::Ami) && self.has_source(ImageSource::Docker)
    }
}

/// Input model for the add/edit image form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewImage {
    pub os_version: String,
    pub technical_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ami_source_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ami_image_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_source_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_official_image_url: Option<String>,
    pub ansible_playbook_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansible_playbook: Option<String>,
    pub enabled: bool,
}

impl Default for NewImage {
    fn default() -> Self {
        Self {
            os_version: String::new(),
            technical_name: String::new(),
            ami_source_image: None,
            ami_image_owner: None,
            docker_source_image: None,
            docker_official_image_url: None,
            ansible_playbook_enabled: true,
            ansible_playbook: None,
            enabled: true,
        }
    }
}

impl Record for Image {
    type Draft = NewImage;

    const KIND: EntityKind = EntityKind::Image;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: NewImage) -> Self {
        Self {
            id,
            os_version: draft.os_version,
            technical_name: draft.technical_name,
            ami_source_image: draft.ami_source_image,
            ami_image_owner: draft.ami_image_owner,
            docker_source_image: draft.docker_source_image,
            docker_official_image_url: draft.docker_official_image_url,
            ansible_playbook_enabled: draft.ansible_playbook_enabled,
            ansible_playbook: draft.ansible_playbook,
            enabled: draft.enabled,
        }
    }

    fn to_draft(&self) -> NewImage {
        NewImage {
            os_version: self.os_version.clone(),
            technical_name: self.technical_name.clone(),
            ami_source_image: self.ami_source_image.clone(),
            ami_image_owner: self.ami_image_owner.clone(),
            docker_source_image: self.docker_source_image.clone(),
            docker_official_image_url: self.docker_official_image_url.clone(),
            ansible_playbook_enabled: self.ansible_playbook_enabled,
            ansible_playbook: self.ansible_playbook.clone(),
            enabled: self.enabled,
        }
    }

    fn apply_draft(&mut self, draft: NewImage) {
        *self = Self::from_draft(self.id, draft);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.technical_name.as_str(), self.os_version.as_str()]
    }

    fn matches_filter(&self, key: &str, value: &str) -> Result<bool, ConsoleError> {
        match key {
            "type" => {
                let source: ImageSource = value
                    .parse()
                    .map_err(|_| ConsoleError::invalid_filter(key, value))?;
                Ok(self.has_source(source))
            }
            "status" => Ok(parse_flag(key, value, "enabled", "disabled")? == self.enabled),
            _ => Err(ConsoleError::invalid_filter(key, value)),
        }
    }

    fn required_fields(draft: &NewImage) -> Vec<(&'static str, &str)> {
        vec![
            ("technical_name", draft.technical_name.as_str()),
            ("os_version", draft.os_version.as_str()),
        ]
    }

    fn normalize_draft(draft: &mut NewImage) {
        if !draft.ansible_playbook_enabled {
            draft.ansible_playbook = None;
        }
    }

    fn warnings(&self) -> Vec<String> {
        if self.has_conflicting_sources() {
            vec!["both AMI and Docker sources are set".to_string()]
        } else {
            Vec::new()
        }
    }
}
