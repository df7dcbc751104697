use itertools::Itertools;
use serde::Serialize;
use std::cmp::Reverse;

use crate::model::{Build, BuildStatus, Image, OsFamily, OsNature, Provider};

/// Number of builds listed on the public status page
pub const RECENT_BUILDS_LIMIT: usize = 5;

/// Image totals shown above the OS family list, summed from each family's
/// denormalized `image_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyImageStats {
    pub total_images: u32,
    pub linux_images: u32,
    pub windows_images: u32,
}

impl FamilyImageStats {
    pub fn from_families(families: &[OsFamily]) -> Self {
        let sum_for = |nature: OsNature| {
            families
                .iter()
                .filter(|f| f.nature == nature)
                .map(|f| f.image_count)
                .sum::<u32>()
        };

        Self {
            total_images: families.iter().map(|f| f.image_count).sum(),
            linux_images: sum_for(OsNature::Linux),
            windows_images: sum_for(OsNature::Windows),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub total_images: usize,
    pub enabled_images: usize,
    pub active_providers: usize,
    pub total_builds: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub providers: Vec<Provider>,
    pub images: Vec<Image>,
    pub builds: Vec<Build>,
}

impl AdminDashboard {
    pub fn build(providers: Vec<Provider>, images: Vec<Image>, builds: Vec<Build>) -> Self {
        let stats = AdminStats {
            total_images: images.len(),
            enabled_images: images.iter().filter(|i| i.enabled).count(),
            active_providers: providers.len(),
            total_builds: builds.len(),
        };

        Self {
            stats,
            providers,
            images,
            builds,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildCounts {
    pub success: usize,
    pub building: usize,
    pub failed: usize,
    /// Builds whose manifest carries no status, or one outside the known set
    pub unknown: usize,
}

impl BuildCounts {
    pub fn from_builds(builds: &[Build]) -> Self {
        let by_status = builds.iter().counts_by(|b| b.status());
        let count = |status: Option<BuildStatus>| by_status.get(&status).copied().unwrap_or(0);

        Self {
            success: count(Some(BuildStatus::Success)),
            building: count(Some(BuildStatus::Building)),
            failed: count(Some(BuildStatus::Failed)),
            unknown: count(None),
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.building + self.failed + self.unknown
    }

    /// Percentage of builds that succeeded, one decimal; 0 with no builds
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let rate = self.success as f64 * 100.0 / total as f64;
        (rate * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilySlice {
    pub name: String,
    pub value: u32,
}

/// Read-only status page served at the site root
#[derive(Debug, Clone, Serialize)]
pub struct PublicStatus {
    pub total_images: usize,
    pub enabled_images: usize,
    pub builds: BuildCounts,
    pub success_rate: f64,
    pub images_by_family: Vec<FamilySlice>,
    pub recent_builds: Vec<Build>,
    pub generated_at: String,
}

impl PublicStatus {
    pub fn build(images: &[Image], families: &[OsFamily], builds: &[Build]) -> Self {
        let counts = BuildCounts::from_builds(builds);

        let images_by_family = families
            .iter()
            .sorted_by_key(|f| Reverse(f.image_count))
            .map(|f| FamilySlice {
                name: f.name.clone(),
                value: f.image_count,
            })
            .collect();

        // Newest first; builds without a timestamp sink to the bottom
        let recent_builds = builds
            .iter()
            .sorted_by_key(|b| Reverse(b.manifest.timestamp()))
            .take(RECENT_BUILDS_LIMIT)
            .cloned()
            .collect();

        Self {
            total_images: images.len(),
            enabled_images: images.iter().filter(|i| i.enabled).count(),
            success_rate: counts.success_rate(),
            builds: counts,
            images_by_family,
            recent_builds,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildManifest, Id};
    use crate::seed;
    use serde_json::json;

    fn build(id: Id, status: Option<BuildStatus>, timestamp: Option<&str>) -> Build {
        let mut manifest = BuildManifest::new("1.0.0");
        if let Some(status) = status {
            manifest = manifest.with_status(status);
        }
        if let Some(timestamp) = timestamp {
            manifest.extra.insert("timestamp".to_string(), json!(timestamp));
        }

        Build {
            id,
            image_id: 1,
            name: format!("Build {}", id),
            manifest,
        }
    }

    #[test]
    fn test_family_stats_from_seed() {
        let stats = FamilyImageStats::from_families(&seed::os_families());
        assert_eq!(
            stats,
            FamilyImageStats {
                total_images: 20,
                linux_images: 12,
                windows_images: 8,
            }
        );
    }

    #[test]
    fn test_admin_stats_count_enabled_images() {
        let dashboard = AdminDashboard::build(seed::providers(), seed::images(), seed::builds());
        assert_eq!(dashboard.stats.total_images, 2);
        assert_eq!(dashboard.stats.enabled_images, 1);
        assert_eq!(dashboard.stats.active_providers, 2);
        assert_eq!(dashboard.stats.total_builds, 2);
    }

    #[test]
    fn test_build_counts_and_success_rate() {
        let builds = vec![
            build(1, Some(BuildStatus::Success), None),
            build(2, Some(BuildStatus::Success), None),
            build(3, Some(BuildStatus::Failed), None),
            build(4, None, None),
        ];
        let counts = BuildCounts::from_builds(&builds);
        assert_eq!(counts.success, 2);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.success_rate(), 50.0);

        assert_eq!(BuildCounts::default().success_rate(), 0.0);
    }

    #[test]
    fn test_unrecognized_status_counts_as_unknown() {
        let mut queued = build(2, None, Some("2024-03-17"));
        queued.manifest.extra.insert("status".to_string(), json!("queued"));
        let builds = vec![build(1, Some(BuildStatus::Success), None), queued];

        let counts = BuildCounts::from_builds(&builds);
        assert_eq!(counts.success, 1);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.success_rate(), 50.0);

        let status = PublicStatus::build(&[], &[], &builds);
        assert_eq!(status.recent_builds[0].id, 2);
    }

    #[test]
    fn test_public_status_orders_recent_builds() {
        let builds = vec![
            build(1, Some(BuildStatus::Success), Some("2024-03-15T10:30:00Z")),
            build(2, Some(BuildStatus::Building), None),
            build(3, Some(BuildStatus::Success), Some("2024-03-16T14:45:00Z")),
        ];
        let status = PublicStatus::build(&seed::images(), &seed::os_families(), &builds);

        let order: Vec<Id> = status.recent_builds.iter().map(|b| b.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(status.images_by_family[0].name, "Ubuntu");
        assert_eq!(status.images_by_family[0].value, 12);
        assert_eq!(status.success_rate, 66.7);
    }
}
