use crate::quoridor::prelude::*;

/// A shortest route from a pawn to its goal edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    pub start: Coord,
    pub moves: Vec<PawnMove>,
}

impl Path {
    /// The number of moves, jumps counting as one.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True when the start is already on the goal.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn first_move(&self) -> Option<&PawnMove> {
        self.moves.first()
    }

    /// The goal cell the path ends on.
    pub fn destination(&self) -> Coord {
        self.moves.last().map_or(self.start, |m| m.to)
    }

    /// Whether any move of the path crosses an edge closed by the fence.
    pub fn crosses(&self, fence: &Fence) -> bool {
        let edges = fence.edges();
        self.moves.iter().any(|m| {
            edges.iter().any(|(cell, side)| {
                let opposite = *cell + side.offset();
                let [a, b] = [OffsetCoord::from(m.from), OffsetCoord::from(m.to)];
                let [c, d] = [OffsetCoord::from(cell), opposite];
                (a == c && b == d) || (a == d && b == c)
            })
        })
    }
}

impl Board {
    /// Breadth-first search from `start` to the nearest cell in `goals`, over the cached move
    /// graph of the requested mode. Returns `None` when no goal cell can be reached.
    ///
    /// Expansion follows the cached move order, so repeated queries on an unchanged board
    /// return the same path.
    pub fn shortest_path(&self, start: &Coord, goals: &[Coord], mode: MoveMode) -> Option<Path> {
        self.probe.hit(ProbeSite::ShortestPath);
        let area = self.dims.area();
        let mut is_goal = vec![false; area];
        goals.iter().for_each(|g| is_goal[self.dims.index(g)] = true);

        let origin = self.dims.index(start);
        if is_goal[origin] {
            return Some(Path { start: *start, moves: vec![] });
        }

        let mut came_by: Vec<Option<PawnMove>> = vec![None; area];
        let mut visited = vec![false; area];
        let mut frontier = VecDeque::from([*start]);
        visited[origin] = true;

        while let Some(cell) = frontier.pop_front() {
            for mv in self.cache.moves(&cell, mode) {
                let index = self.dims.index(&mv.to);
                if visited[index] {
                    continue;
                }
                visited[index] = true;
                came_by[index] = Some(*mv);

                if is_goal[index] {
                    return Some(Path { start: *start, moves: Path::unwind(&self.dims, &came_by, mv.to) });
                }
                frontier.push_back(mv.to);
            }
        }
        None
    }

    /// Shortest pawn-blind path of a seated player to their goal edge.
    pub fn path_for(&self, seat: Seat) -> Option<Path> {
        let player = self.player(seat);
        self.shortest_path(&player.pawn, &player.goal_cells(&self.dims), MoveMode::PawnBlind)
    }

    /// Length of [`Board::path_for`], or `None` when the player is cut off.
    pub fn shortest_path_length(&self, seat: Seat) -> Option<usize> {
        self.path_for(seat).map(|p| p.len())
    }

    /// The first player, in seating order, left without any path to their goal; tests only.
    #[cfg(test)]
    pub(super) fn first_stranded(&self) -> Option<Seat> {
        self.players.iter()
            .find(|p| self.shortest_path(&p.pawn, &p.goal_cells(&self.dims), MoveMode::PawnBlind).is_none())
            .map(|p| p.seat)
    }
}

impl Path {
    fn unwind(dims: &Dimensions, came_by: &[Option<PawnMove>], end: Coord) -> Vec<PawnMove> {
        let mut moves = vec![];
        let mut cursor = end;
        while let Some(mv) = came_by[dims.index(&cursor)] {
            moves.push(mv);
            cursor = mv.from;
        }
        moves.reverse();
        moves
    }
}
