pub mod pool;
pub mod repos;

// Re-export commonly used items
pub use pool::{PoolSettings, create_pool, run_migrations};
pub use repos::booking::{BookingRepo, BookingRow};
pub use repos::event::{EventRepo, EventRow, UpdateEvent};
pub use repos::user::{UserRepo, UserRow};
