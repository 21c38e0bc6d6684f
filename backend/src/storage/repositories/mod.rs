// Repository modules
pub mod animal_product_repository;
pub mod animal_repository;
pub mod catalog_repository;
pub mod delivery_repository;
pub mod ledger_repository;
pub mod product_repository;
pub mod schedule_repository;

// Re-export repository types
pub use animal_product_repository::AnimalProductRepository;
pub use animal_repository::AnimalRepository;
pub use catalog_repository::CatalogRepository;
pub use delivery_repository::DeliveryRepository;
pub use ledger_repository::LedgerRepository;
pub use product_repository::ProductRepository;
pub use schedule_repository::ScheduleRepository;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::EatableCategory;

/// Read a stored category, treating unknown values as corruption
pub(crate) fn parse_category(raw: String) -> FarmResult<EatableCategory> {
    raw.parse()
        .map_err(|_| FarmError::CorruptColumn { column: "category", value: raw })
}

/// `%value%` pattern for case-insensitive substring filters. Wildcards in
/// `value` are escaped so they match literally.
pub(crate) fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Append `AND <column> LIKE %value%` with backslash as the escape character
pub(crate) fn push_like(query: &mut QueryBuilder<'_, Sqlite>, column: &str, value: &str) {
    query
        .push(format!(" AND {column} LIKE "))
        .push_bind(like_pattern(value))
        .push(" ESCAPE '\\'");
}

/// Timestamp written into `deleted_at`
pub(crate) fn deletion_mark() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) fn to_count(total: i64) -> u64 {
    u64::try_from(total).unwrap_or_default()
}
