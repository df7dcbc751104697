use crate::model::{Build, Image, OperatingSystem, OsArchitecture, OsBuilder, OsFamily, Provider};
use crate::seed;
use crate::store::{EntityCollection, RecordStore};

/// Process-wide store: one collection per entity kind, nothing persisted
#[derive(Debug, Default)]
pub struct InMemoryStore {
    images: EntityCollection<Image>,
    os_families: EntityCollection<OsFamily>,
    operating_systems: EntityCollection<OperatingSystem>,
    providers: EntityCollection<Provider>,
    os_architectures: EntityCollection<OsArchitecture>,
    os_builders: EntityCollection<OsBuilder>,
    builds: EntityCollection<Build>,
}

impl InMemoryStore {
    /// Empty collections
    pub fn new() -> Self {
        Self::default()
    }

    /// Collections filled with the built-in demonstration data
    pub fn seeded() -> Self {
        Self {
            images: EntityCollection::seeded(seed::images()),
            os_families: EntityCollection::seeded(seed::os_families()),
            operating_systems: EntityCollection::seeded(seed::operating_systems()),
            providers: EntityCollection::seeded(seed::providers()),
            os_architectures: EntityCollection::seeded(seed::os_architectures()),
            os_builders: EntityCollection::seeded(seed::os_builders()),
            builds: EntityCollection::seeded(seed::builds()),
        }
    }
}

macro_rules! record_store {
    ($record:ty, $field:ident) => {
        impl RecordStore<$record> for InMemoryStore {
            fn collection(&self) -> &EntityCollection<$record> {
                &self.$field
            }
        }
    };
}

record_store!(Image, images);
record_store!(OsFamily, os_families);
record_store!(OperatingSystem, operating_systems);
record_store!(Provider, providers);
record_store!(OsArchitecture, os_architectures);
record_store!(OsBuilder, os_builders);
record_store!(Build, builds);
