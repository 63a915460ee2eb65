//! Row model for the `shows` table.

use matinee_core::store::Show;
use matinee_core::types::Timestamp;
use sqlx::FromRow;
use uuid::Uuid;

/// A show row as stored.
#[derive(Debug, Clone, FromRow)]
pub struct ShowRow {
    pub id: Uuid,
    pub name: String,
    pub screen: String,
    pub starts_at: Timestamp,
    pub is_active: bool,
}

impl From<ShowRow> for Show {
    fn from(row: ShowRow) -> Self {
        Show {
            id: row.id,
            name: row.name,
            screen: row.screen,
            starts_at: row.starts_at,
            is_active: row.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn row_converts_to_entity() {
        let row = ShowRow {
            id: Uuid::new_v4(),
            name: "Night Show".into(),
            screen: "Screen 1".into(),
            starts_at: Utc::now(),
            is_active: true,
        };
        let show: Show = row.clone().into();
        assert_eq!(show.id, row.id);
        assert_eq!(show.name, "Night Show");
        assert!(show.is_active);
    }
}
