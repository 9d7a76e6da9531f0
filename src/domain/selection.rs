//! Selection types for the polygon point editor

/// Mode of the point editor
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    /// Dragging the point at this index of the working list
    Dragging(usize),
}

/// Cursor the host should show over the page
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Clicking adds a new point
    #[default]
    Crosshair,
    /// Hovering an existing point; pressing starts a drag
    Grab,
    /// A point is being dragged
    Grabbing,
}
