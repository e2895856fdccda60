use std::slice;

use crate::cell::{Cell, CellSize, Color, GeometryError, Position};
use crate::input::Direction;

/// Ordered chain of cells, head first and tail last.
///
/// The chain is never empty and never shrinks. Every cell shares the body's
/// size and colour.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Body {
    cells: Vec<Cell>,
    size: CellSize,
    color: Color,
}

impl Body {
    /// Creates a one-cell body with its head at `start`.
    #[must_use]
    pub fn new(start: Position, size: CellSize, color: Color) -> Self {
        Self {
            cells: vec![Cell::new(start, size, color)],
            size,
            color,
        }
    }

    /// Creates a body from explicit positions (first is head).
    pub fn from_positions(
        positions: impl IntoIterator<Item = Position>,
        size: CellSize,
        color: Color,
    ) -> Result<Self, GeometryError> {
        let cells: Vec<Cell> = positions
            .into_iter()
            .map(|position| Cell::new(position, size, color))
            .collect();

        if cells.is_empty() {
            return Err(GeometryError::EmptyBody);
        }

        Ok(Self { cells, size, color })
    }

    /// Advances the head one cell along `direction`; the rest of the chain
    /// follows, each cell taking its predecessor's pre-move position.
    pub fn step(&mut self, direction: Direction) {
        let next_head = self.head_position().offset(direction, self.size);

        // Tail first, so every read sees the predecessor before it moves.
        for index in (1..self.cells.len()).rev() {
            let ahead = self.cells[index - 1].position();
            self.cells[index].set_position(ahead);
        }

        self.cells[0].set_position(next_head);
    }

    pub fn move_up(&mut self) {
        self.step(Direction::Up);
    }

    pub fn move_down(&mut self) {
        self.step(Direction::Down);
    }

    pub fn move_left(&mut self) {
        self.step(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.step(Direction::Right);
    }

    /// Appends a cell on top of the current tail.
    ///
    /// The new cell is pulled into a trailing slot by the next [`Body::step`].
    pub fn grow(&mut self) {
        let tail = self.tail().position();
        self.cells.push(Cell::new(tail, self.size, self.color));
    }

    /// Returns true when the head sits inside the box spanned by
    /// `top_left`..=`bottom_right`.
    ///
    /// The far edge of the head is checked against the box *span*
    /// (`bottom_right - top_left`), not against `bottom_right` itself. The two
    /// agree only when `top_left` is the origin.
    #[must_use]
    pub fn inside_bounds(&self, top_left: Position, bottom_right: Position) -> bool {
        let head = self.head_position();
        let (x, y) = (i64::from(head.x), i64::from(head.y));
        let (left, top) = (i64::from(top_left.x), i64::from(top_left.y));
        let (right, bottom) = (i64::from(bottom_right.x), i64::from(bottom_right.y));

        let corner_inside = left <= x && x <= right && top <= y && y <= bottom;
        let span_fits = x + i64::from(self.size.width()) <= right - left
            && y + i64::from(self.size.height()) <= bottom - top;

        corner_inside && span_fits
    }

    /// Returns true if any cell sits exactly on `food_position`.
    ///
    /// Point equality only: `_food_size` does not take part in the test.
    #[must_use]
    pub fn check_collision(&self, food_position: Position, _food_size: CellSize) -> bool {
        self.cells.iter().any(|cell| cell.position() == food_position)
    }

    /// Returns true if the head sits exactly on `food_position`.
    ///
    /// Point equality only: `_food_size` does not take part in the test.
    #[must_use]
    pub fn check_collision_with_fruit(
        &self,
        food_position: Position,
        _food_size: CellSize,
    ) -> bool {
        self.head_position() == food_position
    }

    /// Returns true if the head shares its position with any other cell.
    #[must_use]
    pub fn check_collision_with_self(&self) -> bool {
        let head = self.head_position();
        self.cells.iter().skip(1).any(|cell| cell.position() == head)
    }

    #[must_use]
    pub fn head_position(&self) -> Position {
        self.cells[0].position()
    }

    #[must_use]
    pub fn head(&self) -> &Cell {
        &self.cells[0]
    }

    #[must_use]
    pub fn tail(&self) -> &Cell {
        &self.cells[self.cells.len() - 1]
    }

    #[must_use]
    pub fn size(&self) -> CellSize {
        self.size
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns current cell count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over cells from head to tail. Each call starts at the head.
    pub fn cells(&self) -> slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Iterates over cell positions from head to tail.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(Cell::position)
    }
}

impl<'a> IntoIterator for &'a Body {
    type Item = &'a Cell;
    type IntoIter = slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells()
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::{CellSize, Color, GeometryError, Position};
    use crate::input::Direction;

    use super::Body;

    const GREEN: Color = Color::rgb(0, 255, 0);

    fn size() -> CellSize {
        CellSize::square(10).expect("valid size")
    }

    fn line_body() -> Body {
        Body::from_positions(
            [
                Position::new(30, 0),
                Position::new(20, 0),
                Position::new(10, 0),
                Position::new(0, 0),
            ],
            size(),
            GREEN,
        )
        .expect("non-empty body")
    }

    #[test]
    fn new_body_has_one_cell_at_start() {
        let body = Body::new(Position::new(40, 60), size(), GREEN);

        assert_eq!(body.len(), 1);
        assert_eq!(body.head_position(), Position::new(40, 60));
        assert_eq!(body.tail().position(), Position::new(40, 60));
        assert_eq!(body.head().color(), GREEN);
    }

    #[test]
    fn empty_position_list_is_rejected() {
        let body = Body::from_positions(Vec::<Position>::new(), size(), GREEN);
        assert_eq!(body, Err(GeometryError::EmptyBody));
    }

    #[test]
    fn head_moves_one_size_step_in_each_direction() {
        let size = CellSize::new(10, 20).expect("valid size");
        let mut body = Body::new(Position::new(100, 100), size, GREEN);

        body.move_right();
        assert_eq!(body.head_position(), Position::new(110, 100));
        body.move_down();
        assert_eq!(body.head_position(), Position::new(110, 120));
        body.move_left();
        assert_eq!(body.head_position(), Position::new(100, 120));
        body.move_up();
        assert_eq!(body.head_position(), Position::new(100, 100));
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn every_cell_takes_its_predecessors_previous_position() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let mut body = line_body();
            let before: Vec<Position> = body.positions().collect();

            body.step(direction);
            let after: Vec<Position> = body.positions().collect();

            assert_eq!(after[0], before[0].offset(direction, size()));
            for index in 1..after.len() {
                assert_eq!(after[index], before[index - 1], "{direction:?} cell {index}");
            }
        }
    }

    #[test]
    fn grown_cell_starts_on_previous_tail() {
        let mut body = line_body();
        let tail = body.tail().position();

        body.grow();

        assert_eq!(body.len(), 5);
        assert_eq!(body.tail().position(), tail);
        assert_eq!(body.head_position(), Position::new(30, 0));
    }

    #[test]
    fn grown_cell_is_pulled_behind_by_next_move() {
        let mut body = Body::new(Position::new(0, 0), size(), GREEN);

        body.grow();
        body.move_right();

        let positions: Vec<Position> = body.positions().collect();
        assert_eq!(positions, vec![Position::new(10, 0), Position::new(0, 0)]);
    }

    #[test]
    fn length_counts_every_grow_regardless_of_moves() {
        let mut body = Body::new(Position::new(200, 200), size(), GREEN);

        for round in 0..7 {
            body.grow();
            if round % 2 == 0 {
                body.move_down();
            }
            body.move_left();
        }

        assert_eq!(body.len(), 8);
    }

    #[test]
    fn bounds_use_span_of_box() {
        let top_left = Position::new(0, 0);
        let bottom_right = Position::new(100, 100);

        let edge = Body::new(Position::new(95, 95), size(), GREEN);
        assert!(!edge.inside_bounds(top_left, bottom_right));

        let centre = Body::new(Position::new(50, 50), size(), GREEN);
        assert!(centre.inside_bounds(top_left, bottom_right));

        let flush = Body::new(Position::new(90, 90), size(), GREEN);
        assert!(flush.inside_bounds(top_left, bottom_right));

        let negative = Body::new(Position::new(-10, 50), size(), GREEN);
        assert!(!negative.inside_bounds(top_left, bottom_right));
    }

    #[test]
    fn bounds_with_offset_box_compare_against_span() {
        let top_left = Position::new(50, 50);
        let bottom_right = Position::new(150, 150);

        // Inside the box corners, but 95 + 10 exceeds the 100 span.
        let body = Body::new(Position::new(95, 95), size(), GREEN);
        assert!(!body.inside_bounds(top_left, bottom_right));

        // 60 + 10 fits the span even though the box starts at 50.
        let body = Body::new(Position::new(60, 60), size(), GREEN);
        assert!(body.inside_bounds(top_left, bottom_right));

        let body = Body::new(Position::new(50, 50), size(), GREEN);
        assert!(body.inside_bounds(top_left, bottom_right));
    }

    #[test]
    fn bounds_arithmetic_does_not_overflow() {
        let body = Body::new(Position::new(i32::MAX, i32::MAX), size(), GREEN);
        assert!(!body.inside_bounds(Position::new(0, 0), Position::new(i32::MAX, i32::MAX)));
    }

    #[test]
    fn moving_past_coordinate_limit_saturates() {
        let mut body = Body::new(Position::new(i32::MAX - 5, 0), size(), GREEN);
        body.grow();

        body.move_right();

        assert_eq!(body.head_position(), Position::new(i32::MAX, 0));
        assert_eq!(body.tail().position(), Position::new(i32::MAX - 5, 0));
        assert!(!body.inside_bounds(Position::new(0, 0), Position::new(i32::MAX, 100)));
    }

    #[test]
    fn food_collision_checks_every_cell() {
        let body = line_body();

        assert!(body.check_collision(Position::new(0, 0), size()));
        assert!(body.check_collision(Position::new(30, 0), size()));
        assert!(!body.check_collision(Position::new(5, 0), size()));
    }

    #[test]
    fn fruit_collision_is_point_equality_with_head() {
        let body = Body::new(Position::new(20, 20), size(), GREEN);
        let big = CellSize::square(50).expect("valid size");

        assert!(body.check_collision_with_fruit(Position::new(20, 20), size()));
        assert!(!body.check_collision_with_fruit(Position::new(30, 20), size()));
        // Food extent is ignored even when it would overlap the head.
        assert!(!body.check_collision_with_fruit(Position::new(10, 10), big));
    }

    #[test]
    fn fruit_collision_ignores_body_cells() {
        let body = line_body();
        assert!(!body.check_collision_with_fruit(Position::new(10, 0), size()));
    }

    #[test]
    fn single_cell_never_collides_with_itself() {
        let mut body = Body::new(Position::new(0, 0), size(), GREEN);
        assert!(!body.check_collision_with_self());

        body.move_right();
        assert!(!body.check_collision_with_self());
    }

    #[test]
    fn reversing_into_neck_collides_with_self() {
        let mut body = Body::from_positions(
            [Position::new(20, 0), Position::new(10, 0), Position::new(0, 0)],
            size(),
            GREEN,
        )
        .expect("non-empty body");

        assert!(!body.check_collision_with_self());
        body.move_left();

        assert_eq!(body.head_position(), Position::new(10, 0));
        assert_eq!(body.cells().nth(2).map(|cell| cell.position()), Some(Position::new(10, 0)));
        assert!(body.check_collision_with_self());
    }

    #[test]
    fn looping_round_collides_with_self() {
        let mut body = Body::from_positions(
            [
                Position::new(10, 10),
                Position::new(0, 10),
                Position::new(0, 0),
                Position::new(10, 0),
                Position::new(20, 0),
            ],
            size(),
            GREEN,
        )
        .expect("non-empty body");

        body.move_up();

        assert!(body.check_collision_with_self());
    }

    #[test]
    fn fresh_growth_collides_only_when_cells_coincide() {
        let mut single = Body::new(Position::new(0, 0), size(), GREEN);
        single.grow();
        assert!(single.check_collision_with_self());

        single.move_down();
        assert!(!single.check_collision_with_self());

        let mut longer = line_body();
        longer.grow();
        assert!(!longer.check_collision_with_self());
    }

    #[test]
    fn traversal_restarts_from_head_each_time() {
        let body = line_body();

        let mut first = body.cells();
        assert_eq!(first.next().map(|cell| cell.position()), Some(Position::new(30, 0)));
        assert_eq!(first.next().map(|cell| cell.position()), Some(Position::new(20, 0)));

        let second: Vec<Position> = (&body).into_iter().map(|cell| cell.position()).collect();
        assert_eq!(second.len(), body.len());
        assert_eq!(second[0], Position::new(30, 0));

        assert_eq!(first.next().map(|cell| cell.position()), Some(Position::new(10, 0)));
        assert_eq!(first.next().map(|cell| cell.position()), Some(Position::new(0, 0)));
        assert!(first.next().is_none());
        assert!(first.next().is_none());
    }
}
