use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;
use crate::model::{parse_flag, parse_id, EntityKind, Id, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OsNature {
    #[default]
    Linux,
    Windows,
}

impl std::fmt::Display for OsNature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OsNature::Linux => write!(f, "linux"),
            OsNature::Windows => write!(f, "windows"),
        }
    }
}

impl std::str::FromStr for OsNature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(OsNature::Linux),
            "windows" => Ok(OsNature::Windows),
            _ => Err(format!("Unknown OS nature: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsFamily {
    pub id: Id,
    pub name: String,
    pub nature: OsNature,
    /// Denormalized; never recomputed from the image collection
    pub image_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewOsFamily {
    pub name: String,
    pub nature: OsNature,
}

impl Record for OsFamily {
    type Draft = NewOsFamily;

    const KIND: EntityKind = EntityKind::OsFamily;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: NewOsFamily) -> Self {
        Self {
            id,
            name: draft.name,
            nature: draft.nature,
            image_count: 0,
        }
    }

    fn to_draft(&self) -> NewOsFamily {
        NewOsFamily {
            name: self.name.clone(),
            nature: self.nature,
        }
    }

    fn apply_draft(&mut self, draft: NewOsFamily) {
        self.name = draft.name;
        self.nature = draft.nature;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn matches_filter(&self, key: &str, value: &str) -> Result<bool, ConsoleError> {
        match key {
            "nature" => {
                let nature: OsNature = value
                    .parse()
                    .map_err(|_| ConsoleError::invalid_filter(key, value))?;
                Ok(self.nature == nature)
            }
            _ => Err(ConsoleError::invalid_filter(key, value)),
        }
    }

    fn required_fields(draft: &NewOsFamily) -> Vec<(&'static str, &str)> {
        vec![("name", draft.name.as_str())]
    }
}

/// An operating system release, wired to its family, architecture and builder by id.
/// The references are not checked against their collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingSystem {
    pub id: Id,
    pub name: String,
    pub os_family_id: Id,
    pub os_architecture_id: Id,
    pub os_builder_id: Id,
    pub run_test: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewOperatingSystem {
    pub name: String,
    pub os_family_id: Id,
    pub os_architecture_id: Id,
    pub os_builder_id: Id,
    pub run_test: bool,
}

impl Default for NewOperatingSystem {
    fn default() -> Self {
        Self {
            name: String::new(),
            os_family_id: 1,
            os_architecture_id: 1,
            os_builder_id: 1,
            run_test: false,
        }
    }
}

impl Record for OperatingSystem {
    type Draft = NewOperatingSystem;

    const KIND: EntityKind = EntityKind::OperatingSystem;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: NewOperatingSystem) -> Self {
        Self {
            id,
            name: draft.name,
            os_family_id: draft.os_family_id,
            os_architecture_id: draft.os_architecture_id,
            os_builder_id: draft.os_builder_id,
            run_test: draft.run_test,
        }
    }

    fn to_draft(&self) -> NewOperatingSystem {
        NewOperatingSystem {
            name: self.name.clone(),
            os_family_id: self.os_family_id,
            os_architecture_id: self.os_architecture_id,
            os_builder_id: self.os_builder_id,
            run_test: self.run_test,
        }
    }

    fn apply_draft(&mut self, draft: NewOperatingSystem) {
        *self = Self::from_draft(self.id, draft);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn matches_filter(&self, key: &str, value: &str) -> Result<bool, ConsoleError> {
        match key {
            "run_test" => Ok(parse_flag(key, value, "yes", "no")? == self.run_test),
            "family" => Ok(parse_id(key, value)? == self.os_family_id),
            _ => Err(ConsoleError::invalid_filter(key, value)),
        }
    }

    fn required_fields(draft: &NewOperatingSystem) -> Vec<(&'static str, &str)> {
        vec![("name", draft.name.as_str())]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsArchitecture {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsBuilder {
    pub id: Id,
    pub name: String,
}

/// Form for the name-only lookup tables (architectures, builders)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewLookup {
    pub name: String,
}

macro_rules! lookup_record {
    ($record:ident, $kind:expr) => {
        impl Record for $record {
            type Draft = NewLookup;

            const KIND: EntityKind = $kind;

            fn id(&self) -> Id {
                self.id
            }

            fn from_draft(id: Id, draft: NewLookup) -> Self {
                Self {
                    id,
                    name: draft.name,
                }
            }

            fn to_draft(&self) -> NewLookup {
                NewLookup {
                    name: self.name.clone(),
                }
            }

            fn apply_draft(&mut self, draft: NewLookup) {
                self.name = draft.name;
            }

            fn search_fields(&self) -> Vec<&str> {
                vec![self.name.as_str()]
            }

            fn required_fields(draft: &NewLookup) -> Vec<(&'static str, &str)> {
                vec![("name", draft.name.as_str())]
            }
        }
    };
}

lookup_record!(OsArchitecture, EntityKind::OsArchitecture);
lookup_record!(OsBuilder, EntityKind::OsBuilder);
