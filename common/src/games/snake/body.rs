use std::collections::{HashSet, VecDeque};

use super::error::SnakeError;
use super::types::{Cell, DeathReason, Direction, FieldSize};

/// The snake's occupied cells, head first, plus its heading.
///
/// Leaving the field does not pop the tail: the head is pushed a second time
/// instead, so the body stops being distinct and [`SnakeBody::is_alive`]
/// reports the wall hit through the same check as a self-bite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeBody {
    body: VecDeque<Cell>,
    direction: Direction,
    field_size: FieldSize,
}

impl SnakeBody {
    /// Lays `length` cells backwards from `head`, against `direction`.
    pub fn new(
        head: Cell,
        length: usize,
        direction: Direction,
        field_size: FieldSize,
    ) -> Result<Self, SnakeError> {
        if length == 0 {
            return Err(SnakeError::EmptySnake);
        }

        let out_of_bounds = |cell| SnakeError::CellOutOfBounds {
            cell,
            field: field_size,
        };
        let backwards = direction.opposite();
        let mut body = VecDeque::with_capacity(length.min(field_size.cell_count()));
        let mut cell = head;
        loop {
            if !field_size.contains(cell) {
                return Err(out_of_bounds(cell));
            }
            body.push_back(cell);
            if body.len() == length {
                break;
            }
            cell = cell.step(backwards).ok_or_else(|| out_of_bounds(cell))?;
        }

        Ok(Self {
            body,
            direction,
            field_size,
        })
    }

    pub fn from_cells(
        cells: impl IntoIterator<Item = Cell>,
        direction: Direction,
        field_size: FieldSize,
    ) -> Result<Self, SnakeError> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return Err(SnakeError::EmptySnake);
        }
        if let Some(&cell) = body.iter().find(|&&cell| !field_size.contains(cell)) {
            return Err(SnakeError::CellOutOfBounds {
                cell,
                field: field_size,
            });
        }

        Ok(Self {
            body,
            direction,
            field_size,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Cell the head enters next tick, or `None` when that is off the field.
    pub fn target(&self) -> Option<Cell> {
        self.head()
            .step(self.direction)
            .filter(|cell| self.field_size.contains(*cell))
    }

    /// Off the field the head is pushed again and the tail stays, so the
    /// body grows by one and is no longer distinct.
    pub fn move_forward(&mut self) {
        match self.target() {
            Some(target) => {
                self.body.push_front(target);
                self.body.pop_back();
            }
            None => self.body.push_front(self.head()),
        }
    }

    pub fn eat(&mut self) {
        let new_head = self.target().unwrap_or_else(|| self.head());
        self.body.push_front(new_head);
    }

    /// Returns whether the new heading was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if let Some(neck) = self.neck() {
            let (nx, ny) = self.head().offset_from(neck);
            let (dx, dy) = direction.delta();
            let reverses_into_neck = nx + dx == 0 && ny + dy == 0;
            if reverses_into_neck || direction.is_opposite(&self.direction) {
                return false;
            }
        }

        self.direction = direction;
        true
    }

    pub fn is_alive(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        self.body.iter().all(|cell| seen.insert(*cell))
    }

    /// Why the body stopped being distinct. A head equal to its neck is the
    /// wall-bounce signature; any other repeat is a self-bite.
    pub fn death_reason(&self) -> Option<DeathReason> {
        if self.is_alive() {
            return None;
        }
        if self.neck() == Some(self.head()) {
            Some(DeathReason::WallCollision)
        } else {
            Some(DeathReason::SelfCollision)
        }
    }
}
