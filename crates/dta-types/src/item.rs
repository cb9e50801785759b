use serde::Serialize;

/// Entry from the `TNAM` table: a tile id and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub id: u16,
    pub name: String,
}
