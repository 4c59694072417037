use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const EVENT_COLUMNS: &str =
    "event_id, name, event_date, event_time, area, latitude, longitude, radius_km, price, created_at";

/// Event row from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    pub event_id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub area: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Partial update for an event; None fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub area: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub price: Option<f64>,
}

/// Repository for event operations
pub struct EventRepo;

impl EventRepo {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        name: &str,
        event_date: NaiveDate,
        event_time: &str,
        area: &str,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        price: f64,
    ) -> Result<EventRow> {
        let event_id = Uuid::new_v4();

        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            INSERT INTO events (event_id, name, event_date, event_time, area, latitude, longitude, radius_km, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(event_id)
        .bind(name)
        .bind(event_date)
        .bind(event_time)
        .bind(area)
        .bind(latitude)
        .bind(longitude)
        .bind(radius_km)
        .bind(price)
        .fetch_one(pool)
        .await
        .context("Failed to create event")?;

        Ok(row)
    }

    /// Get event by ID
    pub async fn get(pool: &PgPool, event_id: Uuid) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events WHERE event_id = $1",
            EVENT_COLUMNS
        ))
        .bind(event_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get event by ID")?;

        Ok(row)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events ORDER BY event_date, event_time",
            EVENT_COLUMNS
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list events")?;

        Ok(rows)
    }

    /// Find an event scheduled at exactly this date and time, used to keep
    /// the (date, time) pair unique across events
    pub async fn find_by_schedule(
        pool: &PgPool,
        event_date: NaiveDate,
        event_time: &str,
    ) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events WHERE event_date = $1 AND event_time = $2",
            EVENT_COLUMNS
        ))
        .bind(event_date)
        .bind(event_time)
        .fetch_optional(pool)
        .await
        .context("Failed to find event by schedule")?;

        Ok(row)
    }

    /// Apply a partial update, returning the updated row if the event exists
    pub async fn update(
        pool: &PgPool,
        event_id: Uuid,
        update: UpdateEvent,
    ) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET name = COALESCE($2, name),
                event_date = COALESCE($3, event_date),
                event_time = COALESCE($4, event_time),
                area = COALESCE($5, area),
                latitude = COALESCE($6, latitude),
                longitude = COALESCE($7, longitude),
                radius_km = COALESCE($8, radius_km),
                price = COALESCE($9, price)
            WHERE event_id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(event_id)
        .bind(update.name)
        .bind(update.event_date)
        .bind(update.event_time)
        .bind(update.area)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(update.radius_km)
        .bind(update.price)
        .fetch_optional(pool)
        .await
        .context("Failed to update event")?;

        Ok(row)
    }

    /// Delete an event, returning the deleted row if it existed
    pub async fn delete(pool: &PgPool, event_id: Uuid) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "DELETE FROM events WHERE event_id = $1 RETURNING {}",
            EVENT_COLUMNS
        ))
        .bind(event_id)
        .fetch_optional(pool)
        .await
        .context("Failed to delete event")?;

        Ok(row)
    }
}
