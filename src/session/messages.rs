//! Message types for driving a clip session
//!
//! Hosts translate their UI events into these and hand them to
//! `handlers::handle_msg`.

use serde::Deserialize;

/// Pointer events in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerMsg {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
}

/// Region collection and working-list edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionMsg {
    /// Delete the region at this position in the collection
    Delete { index: usize },
    /// Delete every region
    ClearAll,
    /// Drop the working points without committing
    ClearPoints,
}

/// Everything a session reacts to synchronously
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Msg {
    Pointer(PointerMsg),
    Region(RegionMsg),
}
