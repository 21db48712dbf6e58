//! Demo content driven by the page's buttons

use adrelay_core::{SourceDescriptor, TvMode};
use chrono::{DateTime, NaiveDate, Utc};

/// How far the "jump forward" button seeks
pub const JUMP_STEP_MS: f64 = 2000.0;

/// Demo TV program video
pub const DEMO_URI: &str = "https://firebasestorage.googleapis.com/v0/b/tivio-production-input-admin/o/organizations%2Fl0Q4o9TigUUTNe6TYAqR%2Fchannels%2FhL1LtUhcsZuygmi1HjJI%2Fsections%2FNQlUj81wIf0Ev6qQzRIs%2Fvideos%2F2hAoiSigTZ6Q4QyAsWAi.mp4?alt=media&token=041e129c-c034-42c5-8db0-9fb13c0e8d4e";

/// Channel the demo program aired on. Supported: Prima, Prima COOL,
/// Prima Love, Prima MAX, Prima Krimi, Prima Star (any casing).
pub const DEMO_CHANNEL: &str = "Prima Love";

fn epg_time(hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(2022, 1, 10)?
        .and_hms_opt(hour, minute, 0)
        .map(|t| t.and_utc())
}

/// Timeshifted demo program; the EPG window lets the SDK load ad markers
pub fn demo_source() -> SourceDescriptor {
    let source = SourceDescriptor::tv_program(DEMO_URI)
        .with_mode(TvMode::Timeshift)
        .with_channel(DEMO_CHANNEL)
        .with_start_position_ms(0.0);

    match (epg_time(12, 0), epg_time(13, 40)) {
        (Some(from), Some(to)) => source.with_time_window(from, to),
        _ => source,
    }
}
