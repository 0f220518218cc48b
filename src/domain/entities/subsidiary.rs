//! Subsidiary entity representing a single row of the status table.

use serde::{Deserialize, Serialize};

/// A subsidiary and its current operational status.
///
/// Rows are seeded once at first boot and never modified by the service;
/// the status is free text (e.g. `"Operational"`, `"Maintenance"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subsidiary {
    pub id: i64,
    pub name: String,
    pub status: String,
}

impl Subsidiary {
    /// Creates a new Subsidiary instance.
    pub fn new(id: i64, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: status.into(),
        }
    }
}

/// Input data for seeding a subsidiary. The id is assigned by the database.
#[derive(Debug, Clone, Copy)]
pub struct NewSubsidiary {
    pub name: &'static str,
    pub status: &'static str,
}

/// Rows inserted into an empty `subsidiaries` table on first boot.
pub const SEED_SUBSIDIARIES: [NewSubsidiary; 3] = [
    NewSubsidiary {
        name: "Subsidiary A",
        status: "Operational",
    },
    NewSubsidiary {
        name: "Subsidiary B",
        status: "Maintenance",
    },
    NewSubsidiary {
        name: "Subsidiary C",
        status: "Operational",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsidiary_serializes_flat() {
        let subsidiary = Subsidiary::new(1, "Subsidiary A", "Operational");

        let json = serde_json::to_value(&subsidiary).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "name": "Subsidiary A", "status": "Operational" })
        );
    }

    #[test]
    fn test_seed_rows_have_unique_names() {
        let mut names: Vec<_> = SEED_SUBSIDIARIES.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), SEED_SUBSIDIARIES.len());
    }
}
