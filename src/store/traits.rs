use crate::model::{Build, Image, OperatingSystem, OsArchitecture, OsBuilder, OsFamily, Provider, Record};
use crate::store::EntityCollection;

/// Access to the collection holding one entity kind
pub trait RecordStore<R: Record>: Send + Sync {
    fn collection(&self) -> &EntityCollection<R>;
}

pub trait Store:
    RecordStore<Image>
    + RecordStore<OsFamily>
    + RecordStore<OperatingSystem>
    + RecordStore<Provider>
    + RecordStore<OsArchitecture>
    + RecordStore<OsBuilder>
    + RecordStore<Build>
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: RecordStore<Image>
        + RecordStore<OsFamily>
        + RecordStore<OperatingSystem>
        + RecordStore<Provider>
        + RecordStore<OsArchitecture>
        + RecordStore<OsBuilder>
        + RecordStore<Build>
        + Send
        + Sync
{
}

/// Pick the collection for `R` out of a store implementing several kinds
pub fn collection_of<R: Record, S: RecordStore<R> + ?Sized>(store: &S) -> &EntityCollection<R> {
    store.collection()
}
