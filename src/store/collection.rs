use parking_lot::RwLock;

use crate::error::ConsoleError;
use crate::logic::ListFilterEvaluator;
use crate::model::{Id, Image, ListQuery, Record};

#[derive(Debug)]
struct CollectionState<R> {
    records: Vec<R>,
    /// Next identifier to hand out. Only ever grows, so an id freed by a
    /// delete is never given to a later add.
    next_id: Id,
}

/// Ordered, in-memory collection for one entity kind
#[derive(Debug)]
pub struct EntityCollection<R: Record> {
    state: RwLock<CollectionState<R>>,
}

impl<R: Record> EntityCollection<R> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start from a fixed seed; new ids continue after the highest seeded one
    pub fn seeded(records: Vec<R>) -> Self {
        let next_id = records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        Self {
            state: RwLock::new(CollectionState { records, next_id }),
        }
    }

    pub fn list(&self) -> Vec<R> {
        self.state.read().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: Id) -> Option<R> {
        self.state.read().records.iter().find(|r| r.id() == id).cloned()
    }

    /// Visible subset for a list view, recomputed from the full collection
    pub fn query(&self, query: &ListQuery) -> Result<Vec<R>, ConsoleError> {
        let state = self.state.read();
        ListFilterEvaluator::filter_records(&state.records, query)
    }

    /// Append a record built from a submitted draft
    pub fn add(&self, draft: R::Draft) -> R {
        let mut state = self.state.write();
        let id = state.next_id;
        state.next_id += 1;

        let record = R::from_draft(id, draft);
        state.records.push(record.clone());
        log::info!("Added {} {}", R::KIND, id);
        log_warnings(&record);
        record
    }

    /// Replace the editable fields of one record in place
    pub fn edit(&self, id: Id, draft: R::Draft) -> Option<R> {
        self.edit_with(id, |_| Ok(draft)).ok()
    }

    /// Derive the replacement draft from the current record and apply it under
    /// one write lock. A toggle or edit racing with this one is never overwritten
    /// with stale fields.
    pub fn edit_with<F>(&self, id: Id, build_draft: F) -> Result<R, ConsoleError>
    where
        F: FnOnce(&R) -> Result<R::Draft, ConsoleError>,
    {
        let updated = {
            let mut state = self.state.write();
            let record = state
                .records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(ConsoleError::NotFound { kind: R::KIND, id })?;
            let draft = build_draft(record)?;
            record.apply_draft(draft);
            record.clone()
        };

        log::info!("Updated {} {}", R::KIND, id);
        log_warnings(&updated);
        Ok(updated)
    }

    pub fn update_with<F>(&self, id: Id, update: F) -> Option<R>
    where
        F: FnOnce(&mut R),
    {
        let mut state = self.state.write();
        let record = state.records.iter_mut().find(|r| r.id() == id)?;
        update(record);
        Some(record.clone())
    }

    /// Remove one record; the others keep their order and ids
    pub fn delete(&self, id: Id) -> Option<R> {
        let mut state = self.state.write();
        let position = state.records.iter().position(|r| r.id() == id)?;
        let removed = state.records.remove(position);
        log::info!("Deleted {} {}", R::KIND, id);
        Some(removed)
    }

    pub fn require(&self, id: Id) -> Result<R, ConsoleError> {
        self.get(id).ok_or(ConsoleError::NotFound { kind: R::KIND, id })
    }
}

fn log_warnings<R: Record>(record: &R) {
    for warning in record.warnings() {
        log::warn!("{} {}: {}", R::KIND, record.id(), warning);
    }
}

impl<R: Record> Default for EntityCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityCollection<Image> {
    /// Flip the enabled flag of one image
    pub fn toggle_enabled(&self, id: Id) -> Option<Image> {
        let image = self.update_with(id, |image| image.enabled = !image.enabled)?;
        log::info!(
            "Image {} is now {}",
            id,
            if image.enabled { "enabled" } else { "disabled" }
        );
        Some(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::FormDraft;
    use crate::model::{NewImage, NewLookup, NewOsFamily, OsArchitecture, OsFamily, OsNature};
    use crate::seed;
    use serde_json::json;

    fn families() -> EntityCollection<OsFamily> {
        EntityCollection::seeded(seed::os_families())
    }

    fn ids<R: Record>(collection: &EntityCollection<R>) -> Vec<Id> {
        collection.list().iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_add_family_to_seed() {
        let families = families();
        assert_eq!(families.len(), 3);

        let added = families.add(NewOsFamily {
            name: "Debian".to_string(),
            nature: OsNature::Linux,
        });

        assert_eq!(families.len(), 4);
        assert_eq!(added.id, 4);
        assert_eq!(added.image_count, 0);
        assert_eq!(families.list().last(), Some(&added));
    }

    #[test]
    fn test_add_then_search_finds_exactly_one() {
        let images = EntityCollection::seeded(seed::images());
        images.add(NewImage {
            technical_name: "rocky-hardened".to_string(),
            os_version: "9.3".to_string(),
            ..NewImage::default()
        });

        let found = images.query(&ListQuery::new().search("rocky-hardened")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 3);
    }

    #[test]
    fn test_edit_preserves_length_and_order() {
        let families = families();
        let before = families.list();

        let updated = families
            .edit(
                2,
                NewOsFamily {
                    name: "Windows Server".to_string(),
                    nature: OsNature::Windows,
                },
            )
            .unwrap();
        assert_eq!(updated.image_count, 8);

        let after = families.list();
        assert_eq!(after.len(), before.len());
        assert_eq!(ids(&families), vec![1, 2, 3]);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].name, "Windows Server");
    }

    #[test]
    fn test_edit_unknown_id_is_noop() {
        let families = families();
        let before = families.list();
        assert!(families.edit(42, NewOsFamily::default()).is_none());
        assert_eq!(families.list(), before);
    }

    #[test]
    fn test_delete_removes_exactly_target() {
        let families = families();
        let removed = families.delete(2).unwrap();
        assert_eq!(removed.name, "Windows");
        assert_eq!(families.len(), 2);
        assert_eq!(ids(&families), vec![1, 3]);
        assert!(families.delete(2).is_none());
        assert_eq!(families.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let architectures = EntityCollection::seeded(seed::os_architectures());
        architectures.delete(1);
        let added = architectures.add(NewLookup {
            name: "riscv64".to_string(),
        });
        assert_eq!(added.id, 3);

        assert_eq!(ids(&architectures), vec![2, 3]);
    }

    #[test]
    fn test_empty_collection_starts_at_one() {
        let architectures: EntityCollection<OsArchitecture> = EntityCollection::new();
        assert!(architectures.is_empty());
        let added = architectures.add(NewLookup {
            name: "amd64".to_string(),
        });
        assert_eq!(added.id, 1);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let images = EntityCollection::seeded(seed::images());
        assert!(images.get(1).unwrap().enabled);

        assert!(!images.toggle_enabled(1).unwrap().enabled);
        assert!(!images.get(1).unwrap().enabled);
        assert!(images.toggle_enabled(1).unwrap().enabled);
        assert!(images.toggle_enabled(99).is_none());
    }

    #[test]
    fn test_require_reports_kind() {
        let families = families();
        assert_eq!(
            families.require(9).unwrap_err(),
            ConsoleError::NotFound {
                kind: crate::model::EntityKind::OsFamily,
                id: 9,
            }
        );
    }

    #[test]
    fn test_edit_with_merges_over_current_record() {
        let images = EntityCollection::seeded(seed::images());
        images.toggle_enabled(1);

        let updated = images
            .edit_with(1, |image| {
                let mut form = FormDraft::edit(image);
                form.set_field("os_version", json!("24.04"))?;
                form.submit()
            })
            .unwrap();
        assert_eq!(updated.os_version, "24.04");
        assert!(!updated.enabled);
        assert_eq!(updated.technical_name, "ubuntu-base");
    }

    #[test]
    fn test_edit_with_failure_leaves_record_untouched() {
        let families = families();
        let before = families.list();

        let err = families
            .edit_with(1, |family| {
                let mut form = FormDraft::edit(family);
                form.set_field("name", json!(""))?;
                form.submit()
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::MissingField { field: "name", .. }));
        assert_eq!(families.list(), before);

        assert_eq!(
            families.edit_with(9, |_| Ok(NewOsFamily::default())).unwrap_err(),
            ConsoleError::NotFound {
                kind: crate::model::EntityKind::OsFamily,
                id: 9,
            }
        );
    }

    #[test]
    fn test_concurrent_edits_keep_every_toggle() {
        let images = EntityCollection::seeded(seed::images());

        std::thread::scope(|scope| {
            for worker in 0..4 {
                let images = &images;
                scope.spawn(move || {
                    for round in 0..50 {
                        images.toggle_enabled(1);
                        images
                            .edit_with(1, |image| {
                                let mut form = FormDraft::edit(image);
                                form.set_field("os_version", json!(format!("22.04.{}.{}", worker, round)))?;
                                form.submit()
                            })
                            .unwrap();
                    }
                });
            }
        });

        // 200 toggles, so the flag is back where the seed left it
        assert!(images.get(1).unwrap().enabled);
    }
}
