use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;
use crate::model::{EntityKind, Id, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Aws,
    Gcp,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProviderKind::Aws => write!(f, "aws"),
            ProviderKind::Gcp => write!(f, "gcp"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(ProviderKind::Aws),
            "gcp" => Ok(ProviderKind::Gcp),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmiConfig {
    pub source_image: String,
    pub image_owner: String,
    pub vpc_region: String,
    pub instance_type: String,
    pub ssh_tmp_key: String,
}

impl Default for AmiConfig {
    fn default() -> Self {
        Self {
            source_image: String::new(),
            image_owner: String::new(),
            vpc_region: "eu-west-1".to_string(),
            instance_type: "t3.small".to_string(),
            ssh_tmp_key: "ssh-rsa AAAAB3m".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    pub official_image_url: String,
    pub source_image: String,
}

/// Cloud account the factory builds images in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: Id,
    pub provider: ProviderKind,
    pub region: String,
    pub role_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami_config: Option<AmiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_config: Option<DockerConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProvider {
    pub provider: ProviderKind,
    pub region: String,
    pub role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ami_config: Option<AmiConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_config: Option<DockerConfig>,
}

impl Default for NewProvider {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Aws,
            region: String::new(),
            role_name: String::new(),
            ami_config: Some(AmiConfig::default()),
            docker_config: Some(DockerConfig::default()),
        }
    }
}

impl Record for Provider {
    type Draft = NewProvider;

    const KIND: EntityKind = EntityKind::Provider;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: NewProvider) -> Self {
        Self {
            id,
            provider: draft.provider,
            region: draft.region,
            role_name: draft.role_name,
            ami_config: draft.ami_config,
            docker_config: draft.docker_config,
        }
    }

    fn to_draft(&self) -> NewProvider {
        NewProvider {
            provider: self.provider,
            region: self.region.clone(),
            role_name: self.role_name.clone(),
            ami_config: self.ami_config.clone(),
            docker_config: self.docker_config.clone(),
        }
    }

    fn apply_draft(&mut self, draft: NewProvider) {
        *self = Self::from_draft(self.id, draft);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.role_name.as_str(), self.region.as_str()]
    }

    fn matches_filter(&self, key: &str, value: &str) -> Result<bool, ConsoleError> {
        match key {
            "provider" => {
                let kind: ProviderKind = value
                    .parse()
                    .map_err(|_| ConsoleError::invalid_filter(key, value))?;
                Ok(self.provider == kind)
            }
            "region" => Ok(self.region == value),
            _ => Err(ConsoleError::invalid_filter(key, value)),
        }
    }

    fn required_fields(draft: &NewProvider) -> Vec<(&'static str, &str)> {
        vec![
            ("region", draft.region.as_str()),
            ("role_name", draft.role_name.as_str()),
        ]
    }

    // AWS accounts carry the AMI sub-config, GCP ones the Docker sub-config.
    fn normalize_draft(draft: &mut NewProvider) {
        match draft.provider {
            ProviderKind::Aws => draft.docker_config = None,
            ProviderKind::Gcp => draft.ami_config = None,
        }
    }
}
