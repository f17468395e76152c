use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A dining event with finite seating.
///
/// `current_attendees` never exceeds `max_attendees` after a committed
/// confirmation; the bound is enforced by the conditional increment in the
/// reservation store, not by readers of this struct.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub description: Option<String>,
    pub host: String,
    pub price: i64,
    pub max_attendees: i32,
    pub current_attendees: i32,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Seats still open at the time this row was read. Advisory only.
    pub fn seats_remaining(&self) -> i32 {
        self.max_attendees - self.current_attendees
    }
}
