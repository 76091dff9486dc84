use crate::quoridor::prelude::*;

/// The edge a player is racing towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Goal {
    Row(usize),
    Col(usize),
}

impl Goal {
    pub fn contains(&self, coord: &Coord) -> bool {
        match self {
            Goal::Row(row) => coord.row == *row,
            Goal::Col(col) => coord.col == *col,
        }
    }

    /// Every cell on the goal edge.
    pub fn cells(&self, dims: &Dimensions) -> Vec<Coord> {
        match *self {
            Goal::Row(row) => (0..dims.cols).map(|col| Coord::new(col, row)).collect(),
            Goal::Col(col) => (0..dims.rows).map(|row| Coord::new(col, row)).collect(),
        }
    }
}

/// A seated player: one pawn and a pool of unplaced fences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub seat: Seat,
    pub pawn: Coord,
    pub start: Coord,
    pub goal: Goal,
    pub fences: usize,
}

impl Player {
    /// Seats a player at the middle of their home edge, racing to the opposite edge.
    pub fn seated(seat: Seat, dims: &Dimensions, fences: usize) -> Player {
        let (first_col, last_col) = (0, dims.cols - 1);
        let (first_row, last_row) = (0, dims.rows - 1);
        let (start, goal) = match seat {
            Seat::North => (Coord::new(dims.middle_col(), first_row), Goal::Row(last_row)),
            Seat::South => (Coord::new(dims.middle_col(), last_row), Goal::Row(first_row)),
            Seat::West  => (Coord::new(first_col, dims.middle_row()), Goal::Col(last_col)),
            Seat::East  => (Coord::new(last_col, dims.middle_row()), Goal::Col(first_col)),
        };
        Player { seat, pawn: start, start, goal, fences }
    }

    pub fn goal_cells(&self, dims: &Dimensions) -> Vec<Coord> {
        self.goal.cells(dims)
    }

    pub fn has_won(&self) -> bool {
        self.goal.contains(&self.pawn)
    }

    /// Sends the pawn home and refills the fence pool.
    pub(super) fn reset(&mut self, fences: usize) {
        self.pawn = self.start;
        self.fences = fences;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_start_opposite_their_goals() {
        let dims = Dimensions::default();
        let north = Player::seated(Seat::North, &dims, 10);
        let south = Player::seated(Seat::South, &dims, 10);
        let west = Player::seated(Seat::West, &dims, 5);
        let east = Player::seated(Seat::East, &dims, 5);

        assert_eq!(north.start, Coord::new(4, 0));
        assert_eq!(north.goal, Goal::Row(8));
        assert_eq!(south.start, Coord::new(4, 8));
        assert_eq!(south.goal, Goal::Row(0));
        assert_eq!(west.start, Coord::new(0, 4));
        assert_eq!(west.goal, Goal::Col(8));
        assert_eq!(east.start, Coord::new(8, 4));
        assert_eq!(east.goal, Goal::Col(0));
    }

    #[test]
    fn winning_means_standing_anywhere_on_the_goal_edge() {
        let dims = Dimensions::default();
        let mut north = Player::seated(Seat::North, &dims, 10);
        assert!(!north.has_won());

        for cell in north.goal_cells(&dims) {
            north.pawn = cell;
            assert!(north.has_won(), "{cell}");
        }
        north.pawn = Coord::new(4, 7);
        assert!(!north.has_won());

        let mut east = Player::seated(Seat::East, &dims, 5);
        assert_eq!(east.goal_cells(&dims).len(), 9);
        east.pawn = Coord::new(0, 8);
        assert!(east.has_won());
        east.pawn = Coord::new(1, 0);
        assert!(!east.has_won());
    }
}
