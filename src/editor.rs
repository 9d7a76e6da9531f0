//! Working polygon editor
//!
//! Owns the in-progress point list and the click/drag state machine. All
//! positions are in source-pixel space, so the hit radius means the same
//! thing whatever the display scale.

use crate::domain::{CursorHint, EditorState, Point};

/// Default hit-test radius in source pixels
pub const HIT_RADIUS: f32 = 20.0;

#[derive(Clone, Debug)]
pub struct PointSetEditor {
    points: Vec<Point>,
    state: EditorState,
    hovered: Option<usize>,
    hit_radius: f32,
}

impl Default for PointSetEditor {
    fn default() -> Self {
        Self::new(HIT_RADIUS)
    }
}

impl PointSetEditor {
    pub fn new(hit_radius: f32) -> Self {
        Self {
            points: Vec::new(),
            state: EditorState::Idle,
            hovered: None,
            hit_radius,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hit_radius(&self) -> f32 {
        self.hit_radius
    }

    /// Copy of the working list, detached from later edits
    pub fn snapshot(&self) -> Vec<Point> {
        self.points.clone()
    }

    /// Nearest point strictly closer than the hit radius, lowest index on ties
    pub fn hit_test(&self, pos: Point) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.distance(pos);
            if d >= self.hit_radius {
                continue;
            }
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    pub fn on_pointer_down(&mut self, pos: Point) {
        if self.state == EditorState::Idle
            && let Some(index) = self.hit_test(pos)
        {
            log::debug!("Drag started on point {index}");
            self.state = EditorState::Dragging(index);
            self.hovered = Some(index);
            return;
        }

        self.points.push(pos);
        self.state = EditorState::Idle;
        self.hovered = Some(self.points.len() - 1);
        log::debug!(
            "Point {} added at ({:.1}, {:.1})",
            self.points.len() - 1,
            pos.x,
            pos.y
        );
    }

    pub fn on_pointer_move(&mut self, pos: Point) {
        match self.state {
            EditorState::Dragging(index) => {
                if let Some(point) = self.points.get_mut(index) {
                    *point = pos;
                }
            }
            EditorState::Idle => {
                self.hovered = self.hit_test(pos);
            }
        }
    }

    pub fn on_pointer_up(&mut self) {
        if let EditorState::Dragging(index) = self.state {
            log::debug!("Drag ended on point {index}");
        }
        self.state = EditorState::Idle;
    }

    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
        self.hovered = None;
    }

    /// Empty the working list
    pub fn clear_all(&mut self) {
        self.points.clear();
        self.state = EditorState::Idle;
        self.hovered = None;
    }

    pub fn cursor(&self) -> CursorHint {
        match (self.state, self.hovered) {
            (EditorState::Dragging(_), _) => CursorHint::Grabbing,
            (EditorState::Idle, Some(_)) => CursorHint::Grab,
            (EditorState::Idle, None) => CursorHint::Crosshair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(points: &[(f32, f32)]) -> PointSetEditor {
        let mut editor = PointSetEditor::default();
        for &(x, y) in points {
            editor.on_pointer_down(Point::new(x, y));
            editor.on_pointer_up();
        }
        editor
    }

    #[test]
    fn test_pointer_down_adds_points_in_order() {
        let editor = editor_with(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        assert_eq!(
            editor.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0)
            ]
        );
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_pointer_down_just_inside_radius_starts_drag() {
        let mut editor = editor_with(&[(50.0, 50.0)]);
        editor.on_pointer_down(Point::new(50.0 + 19.99, 50.0));
        assert_eq!(editor.state(), EditorState::Dragging(0));
        assert_eq!(editor.points().len(), 1);
    }

    #[test]
    fn test_pointer_down_just_outside_radius_adds_point() {
        let mut editor = editor_with(&[(50.0, 50.0)]);
        editor.on_pointer_down(Point::new(50.0, 50.0 + 20.01));
        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.points().len(), 2);
    }

    #[test]
    fn test_pointer_down_at_exact_radius_adds_point() {
        let mut editor = editor_with(&[(0.0, 0.0)]);
        editor.on_pointer_down(Point::new(12.0, 16.0));
        assert_eq!(editor.points().len(), 2);
    }

    #[test]
    fn test_hit_test_prefers_nearest_then_lowest_index() {
        let mut editor = PointSetEditor::default();
        editor.points = vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 0.0),
        ];
        assert_eq!(editor.hit_test(Point::new(20.0, 0.0)), Some(1));
        assert_eq!(editor.hit_test(Point::new(15.0, 0.0)), Some(0));
        assert_eq!(editor.hit_test(Point::new(100.0, 100.0)), None);
    }

    #[test]
    fn test_drag_moves_only_the_grabbed_point() {
        let mut editor = editor_with(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        editor.on_pointer_down(Point::new(98.0, 3.0));
        assert_eq!(editor.state(), EditorState::Dragging(1));

        editor.on_pointer_move(Point::new(150.0, 20.0));
        editor.on_pointer_move(Point::new(160.0, 25.0));
        editor.on_pointer_up();

        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(
            editor.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(160.0, 25.0),
                Point::new(100.0, 100.0)
            ]
        );
    }

    #[test]
    fn test_idle_move_only_updates_hover() {
        let mut editor = editor_with(&[(10.0, 10.0)]);
        editor.on_pointer_leave();
        assert_eq!(editor.cursor(), CursorHint::Crosshair);

        editor.on_pointer_move(Point::new(15.0, 10.0));
        assert_eq!(editor.hovered(), Some(0));
        assert_eq!(editor.cursor(), CursorHint::Grab);
        assert_eq!(editor.points(), &[Point::new(10.0, 10.0)]);

        editor.on_pointer_move(Point::new(200.0, 10.0));
        assert_eq!(editor.hovered(), None);
    }

    #[test]
    fn test_pointer_leave_ends_drag_and_keeps_position() {
        let mut editor = editor_with(&[(10.0, 10.0)]);
        editor.on_pointer_down(Point::new(10.0, 10.0));
        assert_eq!(editor.cursor(), CursorHint::Grabbing);
        editor.on_pointer_move(Point::new(40.0, 40.0));
        editor.on_pointer_leave();

        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.points(), &[Point::new(40.0, 40.0)]);

        // Later moves no longer drag
        editor.on_pointer_move(Point::new(90.0, 90.0));
        assert_eq!(editor.points(), &[Point::new(40.0, 40.0)]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut editor = editor_with(&[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)]);
        let snapshot = editor.snapshot();
        editor.on_pointer_down(Point::new(0.0, 0.0));
        editor.on_pointer_move(Point::new(5.0, 5.0));
        assert_eq!(snapshot[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_clear_all() {
        let mut editor = editor_with(&[(0.0, 0.0), (50.0, 0.0)]);
        editor.on_pointer_down(Point::new(50.0, 0.0));
        editor.clear_all();
        assert!(editor.points().is_empty());
        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.cursor(), CursorHint::Crosshair);
    }
}
