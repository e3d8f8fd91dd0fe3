use std::collections::BTreeMap;

use serde::Serialize;

/// The three small enumerations specimen rows reference by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LookupKind {
    TissueType,
    AutopsyType,
    NeuropathologicalDiagnosis,
}

impl LookupKind {
    pub const ALL: [LookupKind; 3] = [
        LookupKind::TissueType,
        LookupKind::AutopsyType,
        LookupKind::NeuropathologicalDiagnosis,
    ];

    /// Column name used in uploads and API payloads.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::TissueType => "tissue_type",
            Self::AutopsyType => "autopsy_type",
            Self::NeuropathologicalDiagnosis => "neuropathology_diagnosis",
        }
    }
}

/// Resolves lookup names to row ids.
///
/// The importer only talks to this trait, so it can run against an
/// in-memory catalogue in tests and a database-backed one in the server.
pub trait LookupService: Send + Sync {
    /// Exact, case-sensitive match. `None` when no row carries `name`.
    fn resolve(&self, kind: LookupKind, name: &str) -> Option<i32>;
}

/// Snapshot of all lookup tables, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct LookupCatalog {
    tissue_types: BTreeMap<String, i32>,
    autopsy_types: BTreeMap<String, i32>,
    diagnoses: BTreeMap<String, i32>,
}

/// Select-box options, each list sorted ascending by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct SelectOptions {
    pub neuropathology_diagnosis: Vec<String>,
    pub autopsy_type: Vec<String>,
    pub tissue_type: Vec<String>,
}

impl LookupCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: LookupKind) -> &BTreeMap<String, i32> {
        match kind {
            LookupKind::TissueType => &self.tissue_types,
            LookupKind::AutopsyType => &self.autopsy_types,
            LookupKind::NeuropathologicalDiagnosis => &self.diagnoses,
        }
    }

    fn table_mut(&mut self, kind: LookupKind) -> &mut BTreeMap<String, i32> {
        match kind {
            LookupKind::TissueType => &mut self.tissue_types,
            LookupKind::AutopsyType => &mut self.autopsy_types,
            LookupKind::NeuropathologicalDiagnosis => &mut self.diagnoses,
        }
    }

    pub fn insert(&mut self, kind: LookupKind, name: impl Into<String>, id: i32) {
        self.table_mut(kind).insert(name.into(), id);
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, kind: LookupKind, name: impl Into<String>, id: i32) -> Self {
        self.insert(kind, name, id);
        self
    }

    /// Reverse lookup, used when rendering stored rows.
    pub fn name_of(&self, kind: LookupKind, id: i32) -> Option<&str> {
        self.table(kind)
            .iter()
            .find(|(_, row_id)| **row_id == id)
            .map(|(name, _)| name.as_str())
    }

    /// Names of one table in ascending order.
    pub fn names(&self, kind: LookupKind) -> Vec<String> {
        self.table(kind).keys().cloned().collect()
    }

    pub fn select_options(&self) -> SelectOptions {
        SelectOptions {
            neuropathology_diagnosis: self.names(LookupKind::NeuropathologicalDiagnosis),
            autopsy_type: self.names(LookupKind::AutopsyType),
            tissue_type: self.names(LookupKind::TissueType),
        }
    }
}

impl LookupService for LookupCatalog {
    fn resolve(&self, kind: LookupKind, name: &str) -> Option<i32> {
        self.table(kind).get(name).copied()
    }
}
