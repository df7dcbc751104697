use crate::model::{
    AmiConfig, Build, BuildManifest, BuildStatus, DockerConfig, Image, OperatingSystem,
    OsArchitecture, OsBuilder, OsFamily, OsNature, Provider, ProviderKind,
};
use chrono::{DateTime, TimeZone, Utc};

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).single()
}

fn manifest(version: &str, status: BuildStatus, at: Option<DateTime<Utc>>) -> BuildManifest {
    let manifest = BuildManifest::new(version).with_status(status);
    match at {
        Some(at) => manifest.with_timestamp(at),
        None => manifest,
    }
}

pub fn images() -> Vec<Image> {
    vec![
        Image {
            id: 1,
            os_version: "22.04".to_string(),
            technical_name: "ubuntu-base".to_string(),
            ami_source_image: Some("ami-0123456789abcdef0".to_string()),
            ami_image_owner: Some("self".to_string()),
            docker_source_image: None,
            docker_official_image_url: None,
            ansible_playbook_enabled: true,
            ansible_playbook: Some("playbooks/base.yml".to_string()),
            enabled: true,
        },
        Image {
            id: 2,
            os_version: "latest".to_string(),
            technical_name: "nodejs-dev".to_string(),
            ami_source_image: None,
            ami_image_owner: None,
            docker_source_image: Some("node:18-alpine".to_string()),
            docker_official_image_url: Some("https://hub.docker.com/_/node".to_string()),
            ansible_playbook_enabled: true,
            ansible_playbook: Some("playbooks/nodejs.yml".to_string()),
            enabled: false,
        },
    ]
}

pub fn os_families() -> Vec<OsFamily> {
    vec![
        OsFamily {
            id: 1,
            name: "Ubuntu".to_string(),
            nature: OsNature::Linux,
            image_count: 12,
        },
        OsFamily {
            id: 2,
            name: "Windows".to_string(),
            nature: OsNature::Windows,
            image_count: 8,
        },
        OsFamily {
            id: 3,
            name: "Redhat".to_string(),
            nature: OsNature::Linux,
            image_count: 0,
        },
    ]
}

pub fn operating_systems() -> Vec<OperatingSystem> {
    vec![OperatingSystem {
        id: 1,
        name: "Ubuntu 22.04".to_string(),
        os_family_id: 1,
        os_architecture_id: 1,
        os_builder_id: 1,
        run_test: true,
    }]
}

pub fn providers() -> Vec<Provider> {
    vec![
        Provider {
            id: 1,
            provider: ProviderKind::Aws,
            region: "us-east-1".to_string(),
            role_name: "my-aws-role".to_string(),
            ami_config: Some(AmiConfig {
                source_image: "ami-0123456789abcdef0".to_string(),
                image_owner: "self".to_string(),
                vpc_region: "eu-west-1".to_string(),
                instance_type: "t3.small".to_string(),
                ssh_tmp_key: "ssh-rsa AAAAB3m".to_string(),
            }),
            docker_config: None,
        },
        Provider {
            id: 2,
            provider: ProviderKind::Gcp,
            region: "us-central1".to_string(),
            role_name: "my-gcp-role".to_string(),
            ami_config: None,
            docker_config: Some(DockerConfig {
                official_image_url: "https://hub.docker.com/_/ubuntu".to_string(),
                source_image: "ubuntu:22.04".to_string(),
            }),
        },
    ]
}

pub fn os_architectures() -> Vec<OsArchitecture> {
    vec![
        OsArchitecture {
            id: 1,
            name: "amd64".to_string(),
        },
        OsArchitecture {
            id: 2,
            name: "arm64".to_string(),
        },
    ]
}

pub fn os_builders() -> Vec<OsBuilder> {
    vec![
        OsBuilder {
            id: 1,
            name: "ami".to_string(),
        },
        OsBuilder {
            id: 2,
            name: "docker".to_string(),
        },
    ]
}

pub fn builds() -> Vec<Build> {
    vec![
        Build {
            id: 1,
            image_id: 1,
            name: "Build 1".to_string(),
            manifest: manifest("1.0.0", BuildStatus::Success, timestamp(2024, 3, 15, 10, 30)),
        },
        Build {
            id: 2,
            image_id: 1,
            name: "Build 2".to_string(),
            manifest: manifest("1.1.0", BuildStatus::Success, timestamp(2024, 3, 16, 14, 45)),
        },
    ]
}
