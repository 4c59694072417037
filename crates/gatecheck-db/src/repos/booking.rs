use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const BOOKING_COLUMNS: &str = "booking_id, user_id, event_id, status, booked_at";

/// Booking row from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub status: String,
    pub booked_at: DateTime<Utc>,
}

/// Repository for booking lifecycle operations
pub struct BookingRepo;

impl BookingRepo {
    /// Create a new booking in status 'booked'
    pub async fn create(pool: &PgPool, user_id: Uuid, event_id: Uuid) -> Result<BookingRow> {
        let booking_id = Uuid::new_v4();

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            INSERT INTO bookings (booking_id, user_id, event_id)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(booking_id)
        .bind(user_id)
        .bind(event_id)
        .fetch_one(pool)
        .await
        .context("Failed to create booking")?;

        Ok(row)
    }

    /// Get booking by ID
    pub async fn get(pool: &PgPool, booking_id: Uuid) -> Result<Option<BookingRow>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE booking_id = $1",
            BOOKING_COLUMNS
        ))
        .bind(booking_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get booking by ID")?;

        Ok(row)
    }

    /// List all bookings owned by a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<BookingRow>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY booked_at DESC",
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
        .context("Failed to list bookings for user")?;

        Ok(rows)
    }

    /// Delete a booking regardless of status, returning the deleted row if
    /// it existed
    pub async fn delete(pool: &PgPool, booking_id: Uuid) -> Result<Option<BookingRow>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "DELETE FROM bookings WHERE booking_id = $1 RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(booking_id)
        .fetch_optional(pool)
        .await
        .context("Failed to delete booking")?;

        Ok(row)
    }

    /// Transition a booking from 'booked' to 'validated'.
    ///
    /// The status check and the write are a single conditional UPDATE, so
    /// two concurrent calls for the same booking can never both succeed:
    /// the loser matches zero rows and gets None. None also covers a
    /// booking that does not exist; callers that need to distinguish the
    /// two cases read the row first.
    pub async fn validate_if_booked(pool: &PgPool, booking_id: Uuid) -> Result<Option<BookingRow>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            UPDATE bookings
            SET status = 'validated'
            WHERE booking_id = $1 AND status = 'booked'
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(booking_id)
        .fetch_optional(pool)
        .await
        .context("Failed to validate booking")?;

        Ok(row)
    }
}
