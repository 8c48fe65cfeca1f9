//! Outbound wire message formatting.
//!
//! The consumer speaks a plain delimited `KEY::value` text protocol. The
//! exact shapes below predate this codebase and are relied on by deployed
//! consumers, so they are preserved byte-for-byte.

use crate::provider::Position;

/// `PLAYER_NAME::<name>` identity announcement.
pub fn player_name(name: &str) -> String {
    format!("PLAYER_NAME::{name}")
}

/// `PLAYER_MAP_ID::<id>` zone-change ping.
pub fn player_map_id(zone_id: u32) -> String {
    format!("PLAYER_MAP_ID::{zone_id}")
}

/// `PLAYER_POSITION::<x>,<y>,<z>,<direction-degrees>` position update.
pub fn player_position(position: &Position, heading_radians: f64) -> String {
    let direction = heading_degrees(heading_radians);
    format!(
        "PLAYER_POSITION::{},{},{},{}",
        position.x, position.y, position.z, direction
    )
}

/// Remaps a raw signed-radian heading into the consumer's forward-facing
/// degree convention: `|heading * (180/π) - 180|`.
///
/// This is a deliberate, slightly unusual transform (raw 0 maps to 180°,
/// π maps to 0°) that existing consumers depend on. Do not "fix" it.
pub fn heading_degrees(heading_radians: f64) -> f64 {
    (heading_radians * (180.0 / std::f64::consts::PI) - 180.0).abs()
}
