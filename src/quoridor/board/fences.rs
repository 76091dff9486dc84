use crate::quoridor::prelude::*;

/// A fence slot: the cell a fence is anchored on and the way it lies.
///
/// A horizontal fence at (c, r) runs along the top edges of (c, r) and (c + 1, r).
/// A vertical fence at (c, r) runs along the left edges of (c, r) and (c, r + 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fence {
    pub position: Coord,
    pub orientation: Orientation,
}

impl Fence {
    pub fn new(position: Coord, orientation: Orientation) -> Fence {
        Fence { position, orientation }
    }

    pub fn horizontal(col: usize, row: usize) -> Fence {
        Fence::new(Coord::new(col, row), Orientation::Horizontal)
    }

    pub fn vertical(col: usize, row: usize) -> Fence {
        Fence::new(Coord::new(col, row), Orientation::Vertical)
    }

    /// Whether the slot lies fully inside the board, between cells.
    pub fn in_bounds(&self, dims: &Dimensions) -> bool {
        let Coord { col, row } = self.position;
        match self.orientation {
            Orientation::Horizontal => row >= 1 && row < dims.rows && col + 1 < dims.cols,
            Orientation::Vertical   => col >= 1 && col < dims.cols && row + 1 < dims.rows,
        }
    }

    /// The slot of the second half of this fence, i.e. the cell whose edge it also covers.
    fn tail(&self) -> Coord {
        let Coord { col, row } = self.position;
        match self.orientation {
            Orientation::Horizontal => Coord::new(col + 1, row),
            Orientation::Vertical   => Coord::new(col, row + 1),
        }
    }

    /// The two cell edges this fence closes, each as (cell, side of that cell).
    pub fn edges(&self) -> [(Coord, Direction); 2] {
        let side = match self.orientation {
            Orientation::Horizontal => Direction::Top,
            Orientation::Vertical   => Direction::Left,
        };
        [(self.position, side), (self.tail(), side)]
    }

    /// The four cells on either side of this fence's edges. Only meaningful for in-bounds fences.
    pub fn touched_cells(&self) -> [Coord; 4] {
        let Coord { col, row } = self.position;
        match self.orientation {
            Orientation::Horizontal => [
                Coord::new(col, row - 1), Coord::new(col + 1, row - 1),
                Coord::new(col, row),     Coord::new(col + 1, row),
            ],
            Orientation::Vertical => [
                Coord::new(col - 1, row),     Coord::new(col, row),
                Coord::new(col - 1, row + 1), Coord::new(col, row + 1),
            ],
        }
    }

    /// The slot of the perpendicular fence that would pass through this fence's midpoint.
    pub fn crossing(&self) -> Option<Fence> {
        let Coord { col, row } = self.position;
        match self.orientation {
            Orientation::Horizontal => row.checked_sub(1).map(|r| Fence::vertical(col + 1, r)),
            Orientation::Vertical   => col.checked_sub(1).map(|c| Fence::horizontal(c, row + 1)),
        }
    }

    /// Every slot that can no longer hold a fence once this one is placed, itself included.
    pub fn conflicts(&self) -> Vec<Fence> {
        let Coord { col, row } = self.position;
        let parallel = match self.orientation {
            Orientation::Horizontal => [col.checked_sub(1).map(|c| Fence::horizontal(c, row)), Some(Fence::horizontal(col + 1, row))],
            Orientation::Vertical   => [row.checked_sub(1).map(|r| Fence::vertical(col, r)), Some(Fence::vertical(col, row + 1))],
        };
        std::iter::once(*self)
            .chain(parallel.into_iter().flatten())
            .chain(self.crossing())
            .collect()
    }
}

impl std::fmt::Display for Fence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-fence at {}", self.orientation.notate(), self.position)
    }
}

/// The fences on a board, kept as two occupancy grids of fence anchors plus the ordered record
/// of who placed what.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenceLayer {
    dims: Dimensions,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
    placed: Vec<(Fence, Seat)>,
}

impl FenceLayer {
    pub fn new(dims: Dimensions) -> FenceLayer {
        FenceLayer {
            dims,
            horizontal: vec![false; dims.area()],
            vertical: vec![false; dims.area()],
            placed: vec![],
        }
    }

    /// The committed fences in placement order, with their owners.
    pub fn placed(&self) -> &[(Fence, Seat)] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Whether a fence is anchored exactly at this slot.
    pub fn has(&self, fence: &Fence) -> bool {
        if !self.dims.contains(&fence.position) {
            return false;
        }
        let index = self.dims.index(&fence.position);
        match fence.orientation {
            Orientation::Horizontal => self.horizontal[index],
            Orientation::Vertical   => self.vertical[index],
        }
    }

    /// Whether the edge on the given side of a cell is closed, either by a fence or by the border.
    pub fn blocks(&self, coord: &Coord, direction: Direction) -> bool {
        if self.dims.at_edge(coord, direction) {
            return true;
        }
        match direction {
            Direction::Left   => self.fence_at_left(coord),
            Direction::Top    => self.fence_at_top(coord),
            Direction::Right  => self.dims.right(coord).is_some_and(|c| self.fence_at_left(&c)),
            Direction::Bottom => self.dims.bottom(coord).is_some_and(|c| self.fence_at_top(&c)),
        }
    }

    /// A vertical fence anchored here or on the cell above covers this cell's left edge.
    fn fence_at_left(&self, coord: &Coord) -> bool {
        self.has(&Fence::new(*coord, Orientation::Vertical))
            || self.dims.top(coord).is_some_and(|above| self.has(&Fence::new(above, Orientation::Vertical)))
    }

    /// A horizontal fence anchored here or on the cell to the left covers this cell's top edge.
    fn fence_at_top(&self, coord: &Coord) -> bool {
        self.has(&Fence::new(*coord, Orientation::Horizontal))
            || self.dims.left(coord).is_some_and(|left| self.has(&Fence::new(left, Orientation::Horizontal)))
    }

    /// Whether either edge the fence would cover is already covered by a parallel fence.
    pub fn overlaps(&self, fence: &Fence) -> bool {
        fence.edges().iter().any(|(cell, side)| match side {
            Direction::Left => self.fence_at_left(cell),
            _               => self.fence_at_top(cell),
        })
    }

    /// Whether a perpendicular fence already passes through this fence's midpoint.
    pub fn crosses(&self, fence: &Fence) -> bool {
        fence.crossing().is_some_and(|other| self.has(&other))
    }

    /// Bounds, overlap and crossing: everything about a fence that can be decided locally.
    pub fn is_placeable(&self, fence: &Fence) -> bool {
        fence.in_bounds(&self.dims) && !self.overlaps(fence) && !self.crosses(fence)
    }

    /// Every slot that currently passes [`FenceLayer::is_placeable`].
    pub fn placeable(&self) -> BTreeSet<Fence> {
        self.dims.cells()
            .flat_map(|c| Orientation::all().map(|o| Fence::new(c, o)))
            .filter(|f| self.is_placeable(f))
            .collect()
    }

    /// Commits a fence on behalf of its owner.
    pub(super) fn place(&mut self, fence: Fence, owner: Seat) {
        self.set(&fence, true);
        self.placed.push((fence, owner));
    }

    /// Marks a slot without recording it as placed; paired with [`FenceLayer::withdraw`].
    pub(super) fn insert_provisional(&mut self, fence: &Fence) {
        self.set(fence, true);
    }

    pub(super) fn withdraw(&mut self, fence: &Fence) {
        self.set(fence, false);
    }

    fn set(&mut self, fence: &Fence, value: bool) {
        let index = self.dims.index(&fence.position);
        match fence.orientation {
            Orientation::Horizontal => self.horizontal[index] = value,
            Orientation::Vertical   => self.vertical[index] = value,
        }
    }
}
