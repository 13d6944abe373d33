//! Entity trait shared by every persisted record type

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all entities in the system.
///
/// All entities have:
/// - id: Unique identifier
/// - created_at: Creation timestamp, assigned by the store
/// - updated_at: Last modification timestamp, refreshed on every save
pub trait Entity: Clone + Send + Sync + 'static {
    /// The singular display name used in messages (e.g., "Customer")
    fn display_name() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Refresh `updated_at` before a save
    fn touch(&mut self);
}

/// Parse a GraphQL/string identifier into a [`Uuid`].
///
/// Identifiers that are not UUIDs cannot match any record, so callers treat
/// `None` exactly like a missing row.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
