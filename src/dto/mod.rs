//! Request and response shapes exposed over the REST surface.

use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Game request/response types.
pub mod game;
/// Health check response types.
pub mod health;
/// Player request/response types.
pub mod player;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
