use crate::quoridor::prelude::*;

/// Simple board coordinate, indexed by column first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    /// Constructs a new coord.
    pub fn new(col: usize, row: usize) -> Coord {
        Coord { col, row }
    }

    /// The taxicab distance between two coords.
    pub fn manhattan(&self, other: &Coord) -> usize {
        OffsetCoord::from(self).manhattan(OffsetCoord::from(other))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// The four ways out of a cell. Rows grow towards the bottom of the board.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
}

/// Directions in the order moves are generated and searched.
pub static DIRECTIONS: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Top, Direction::Bottom];

impl Direction {
    /// The unit offset of a step in this direction.
    pub fn offset(&self) -> OffsetCoord {
        match self {
            Direction::Left   => OffsetCoord::new(-1,  0),
            Direction::Right  => OffsetCoord::new( 1,  0),
            Direction::Top    => OffsetCoord::new( 0, -1),
            Direction::Bottom => OffsetCoord::new( 0,  1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left   => Direction::Right,
            Direction::Right  => Direction::Left,
            Direction::Top    => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }

    /// Turns a quarter counter-clockwise, as seen from above the board.
    pub fn counter_clockwise(&self) -> Direction {
        match self {
            Direction::Top    => Direction::Left,
            Direction::Left   => Direction::Bottom,
            Direction::Bottom => Direction::Right,
            Direction::Right  => Direction::Top,
        }
    }

    /// Turns a quarter clockwise, as seen from above the board.
    pub fn clockwise(&self) -> Direction {
        self.counter_clockwise().opposite()
    }
}

/// The extent of a board and everything that depends only on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
}

impl Dimensions {
    pub fn new(cols: usize, rows: usize) -> Dimensions {
        Dimensions { cols, rows }
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.cols * self.rows
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        coord.col < self.cols && coord.row < self.rows
    }

    /// Coerces an offset into a coordinate if it lies on the board.
    pub fn resolve(&self, offset: OffsetCoord) -> Option<Coord> {
        let in_bounds = 0 <= offset.cols
            && 0 <= offset.rows
            && (offset.cols as usize) < self.cols
            && (offset.rows as usize) < self.rows;
        in_bounds.then(|| offset.coerce())
    }

    /// Linear index of an on-board coordinate. Off-board coordinates are a contract violation.
    pub fn index(&self, coord: &Coord) -> usize {
        assert!(
            self.contains(coord),
            "coordinate {coord} lies outside the {}x{} board", self.cols, self.rows
        );
        coord.row * self.cols + coord.col
    }

    /// Inverse of [`Dimensions::index`].
    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index % self.cols, index / self.cols)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.area()).map(move |i| Coord::new(i % cols, i / cols))
    }

    /// The neighbour in a direction, if it is on the board.
    pub fn step(&self, coord: &Coord, direction: Direction) -> Option<Coord> {
        self.resolve(coord + direction.offset())
    }

    pub fn left(&self, coord: &Coord) -> Option<Coord> {
        self.step(coord, Direction::Left)
    }

    pub fn right(&self, coord: &Coord) -> Option<Coord> {
        self.step(coord, Direction::Right)
    }

    pub fn top(&self, coord: &Coord) -> Option<Coord> {
        self.step(coord, Direction::Top)
    }

    pub fn bottom(&self, coord: &Coord) -> Option<Coord> {
        self.step(coord, Direction::Bottom)
    }

    /// Whether the coordinate sits against the border on the given side.
    pub fn at_edge(&self, coord: &Coord, direction: Direction) -> bool {
        match direction {
            Direction::Left   => coord.col == 0,
            Direction::Right  => coord.col + 1 == self.cols,
            Direction::Top    => coord.row == 0,
            Direction::Bottom => coord.row + 1 == self.rows,
        }
    }

    pub fn middle_col(&self) -> usize {
        (self.cols - 1) / 2
    }

    pub fn middle_row(&self) -> usize {
        (self.rows - 1) / 2
    }

    /// All on-board cells within a taxicab radius of any of the seeds, without duplicates.
    pub fn within(&self, seeds: &[Coord], radius: usize) -> BTreeSet<Coord> {
        let r = radius as isize;
        seeds.iter().flat_map(|seed| {
            (-r..=r).flat_map(move |dc| {
                let reach = r - dc.abs();
                (-reach..=reach).map(move |dr| seed + OffsetCoord::new(dc, dr))
            })
        })
        .filter_map(|offset| self.resolve(offset))
        .collect()
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

// Simple offset pair that can be used to calculate neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetCoord {
    pub cols: isize,
    pub rows: isize,
}

impl OffsetCoord {
    /// Constructs a new offset coord.
    pub fn new(cols: isize, rows: isize) -> OffsetCoord {
        OffsetCoord { cols, rows }
    }

    /// Coerces the offset into a coordinate unchecked.
    pub fn coerce(&self) -> Coord {
        Coord {
            col: self.cols as usize,
            row: self.rows as usize,
        }
    }

    /// The taxicab distance between two points.
    pub fn manhattan(&self, other: OffsetCoord) -> usize {
        self.rows.abs_diff(other.rows) + self.cols.abs_diff(other.cols)
    }
}

// C -> OC

impl From<Coord> for OffsetCoord {
    fn from(value: Coord) -> Self {
        OffsetCoord {
            cols: value.col as isize,
            rows: value.row as isize,
        }
    }
}

impl From<&Coord> for OffsetCoord {
    fn from(value: &Coord) -> Self {
        OffsetCoord::from(*value)
    }
}

// OC + OC

impl Add<&OffsetCoord> for &OffsetCoord {
    type Output = OffsetCoord;
    fn add(self, rhs: &OffsetCoord) -> Self::Output {
        OffsetCoord {
            cols: self.cols + rhs.cols,
            rows: self.rows + rhs.rows,
        }
    }
}

impl Add<OffsetCoord> for OffsetCoord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &self + &rhs
    }
}

// C + OC

impl Add<OffsetCoord> for &Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &OffsetCoord::from(self) + &rhs
    }
}

impl Add<OffsetCoord> for Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &self + rhs
    }
}

// C - C

impl Sub<&Coord> for &Coord {
    type Output = OffsetCoord;
    fn sub(self, rhs: &Coord) -> Self::Output {
        OffsetCoord {
            cols: self.col as isize - rhs.col as isize,
            rows: self.row as isize - rhs.row as isize,
        }
    }
}

impl Sub<Coord> for Coord {
    type Output = OffsetCoord;
    fn sub(self, rhs: Coord) -> Self::Output {
        &self - &rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_respect_the_border() {
        let dims = Dimensions::default();
        let corner = Coord::new(0, 0);
        assert_eq!(dims.left(&corner), None);
        assert_eq!(dims.top(&corner), None);
        assert_eq!(dims.right(&corner), Some(Coord::new(1, 0)));
        assert_eq!(dims.bottom(&corner), Some(Coord::new(0, 1)));

        let far = Coord::new(8, 8);
        assert!(dims.at_edge(&far, Direction::Right));
        assert!(dims.at_edge(&far, Direction::Bottom));
        assert!(!dims.at_edge(&far, Direction::Top));
        assert_eq!(dims.right(&far), None);
    }

    #[test]
    fn turns_are_perpendicular() {
        for direction in DIRECTIONS {
            let turned = [direction.clockwise(), direction.counter_clockwise()];
            for t in turned {
                assert_ne!(t, direction);
                assert_ne!(t, direction.opposite());
            }
            assert_eq!(direction.clockwise().opposite(), direction.counter_clockwise());
        }
        assert_eq!(Direction::Top.counter_clockwise(), Direction::Left);
    }

    #[test]
    fn index_round_trips_every_cell() {
        let dims = Dimensions::new(5, 7);
        for (i, cell) in dims.cells().enumerate() {
            assert_eq!(dims.index(&cell), i);
            assert_eq!(dims.coord(i), cell);
        }
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn index_rejects_off_board_cells() {
        Dimensions::default().index(&Coord::new(9, 0));
    }

    #[test]
    fn within_is_a_clipped_diamond() {
        let dims = Dimensions::default();
        let centre = dims.within(&[Coord::new(4, 4)], 2);
        assert_eq!(centre.len(), 13);
        assert!(centre.iter().all(|c| c.manhattan(&Coord::new(4, 4)) <= 2));

        let corner = dims.within(&[Coord::new(0, 0)], 2);
        assert_eq!(corner.len(), 6);

        let both = dims.within(&[Coord::new(0, 0), Coord::new(1, 0)], 1);
        assert_eq!(both.len(), 5);
    }
}
