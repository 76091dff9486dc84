use crate::quoridor::prelude::*;

/// How far a change in pawn occupancy reaches: a cell's moves look at its neighbours, and past
/// an occupied neighbour at the cells beyond it (straight or diagonal), never further.
pub const PAWN_REACH: usize = 2;

/// How far a closed edge reaches: a cell's moves read its own edges, and when jumping, the edges
/// of the neighbour being jumped. Pawn-blind moves only ever read the cell's own edges.
pub const FENCE_REACH: usize = 1;

/// The legal actions of the current position, maintained incrementally as the board changes.
///
/// After every committed mutation and its matching update, the cache equals
/// [`ActionCache::build`] run on the resulting board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionCache {
    dims: Dimensions,

    /// Legal moves out of every cell, taking pawns into account.
    pawn_moves: Vec<Vec<PawnMove>>,

    /// Legal moves out of every cell as if the board held no pawns; the reachability graph.
    pawn_moves_blind: Vec<Vec<PawnMove>>,

    /// Every fence slot that passes the bounds, overlap and crossing checks.
    placeable: BTreeSet<Fence>,
}

impl ActionCache {
    /// Builds every table from scratch.
    pub fn build(board: &Board) -> ActionCache {
        let dims = board.dims;
        let moves = |mode| dims.cells().map(|c| board.legal_moves(&c, mode)).collect::<Vec<_>>();
        ActionCache {
            dims,
            pawn_moves: moves(MoveMode::Real),
            pawn_moves_blind: moves(MoveMode::PawnBlind),
            placeable: board.fences.placeable(),
        }
    }

    /// Rebuilds for a fresh round.
    pub fn initialize(&mut self, board: &Board) {
        board.probe.hit(ProbeSite::CacheInitialize);
        *self = ActionCache::build(board);
    }

    pub fn moves(&self, coord: &Coord, mode: MoveMode) -> &[PawnMove] {
        let index = self.dims.index(coord);
        match mode {
            MoveMode::Real      => &self.pawn_moves[index],
            MoveMode::PawnBlind => &self.pawn_moves_blind[index],
        }
    }

    pub fn placeable(&self) -> &BTreeSet<Fence> {
        &self.placeable
    }

    /// Refreshes the cells whose real moves depend on the occupancy of `from` or `to`.
    /// Pawn-blind moves never depend on pawns.
    pub fn after_pawn_move(&mut self, board: &Board, from: &Coord, to: &Coord) {
        board.probe.hit(ProbeSite::PawnMoveUpdate);
        let affected = self.dims.within(&[*from, *to], PAWN_REACH);
        log::trace!("pawn {from} -> {to} refreshes {} cells", affected.len());
        self.refresh(board, affected, MoveMode::Real);
    }

    /// Drops the slots the fence rules out, then refreshes the cells that read the two newly
    /// closed edges.
    pub fn after_fence_placement(&mut self, board: &Board, fence: &Fence) {
        board.probe.hit(ProbeSite::FenceUpdate);
        for conflict in fence.conflicts() {
            self.placeable.remove(&conflict);
        }

        let touched = fence.touched_cells();
        let affected = self.dims.within(&touched, FENCE_REACH);
        log::trace!("{fence} refreshes {} cells", affected.len());
        self.refresh(board, affected, MoveMode::Real);
        self.refresh(board, touched, MoveMode::PawnBlind);
    }

    /// Recomputes the pawn-blind moves of the cells beside a fence that was inserted or withdrawn
    /// without being committed.
    pub(super) fn refresh_blind_around(&mut self, board: &Board, fence: &Fence) {
        self.refresh(board, fence.touched_cells(), MoveMode::PawnBlind);
    }

    fn refresh(&mut self, board: &Board, cells: impl IntoIterator<Item = Coord>, mode: MoveMode) {
        for cell in cells {
            let index = self.dims.index(&cell);
            let moves = board.legal_moves(&cell, mode);
            match mode {
                MoveMode::Real      => self.pawn_moves[index] = moves,
                MoveMode::PawnBlind => self.pawn_moves_blind[index] = moves,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fresh(board: &Board) {
        assert_eq!(board.cache, ActionCache::build(board));
    }

    #[test]
    fn new_board_starts_fresh() {
        let board = Board::new(BoardConfig { players: 4, ..BoardConfig::default() }).unwrap();
        assert_fresh(&board);
        assert_eq!(board.placeable_fences().len(), 128);
    }

    #[test]
    fn pawn_moves_keep_the_cache_fresh() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        let route = [(Seat::North, 4, 1), (Seat::South, 4, 7), (Seat::North, 4, 2), (Seat::South, 4, 6),
                     (Seat::North, 4, 3), (Seat::South, 4, 5), (Seat::North, 4, 4)];
        for (seat, col, row) in route {
            board.place_pawn(seat, Coord::new(col, row)).unwrap();
            assert_fresh(&board);
        }
        // South now faces North head on and can jump it.
        board.place_pawn(Seat::South, Coord::new(4, 3)).unwrap();
        assert_fresh(&board);
    }

    #[test]
    fn fences_keep_the_cache_fresh() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.place_pawn(Seat::North, Coord::new(4, 1)).unwrap();
        let fences = [Fence::horizontal(3, 2), Fence::vertical(5, 1), Fence::horizontal(0, 8),
                      Fence::vertical(8, 7), Fence::horizontal(4, 1), Fence::vertical(1, 0)];
        for (i, fence) in fences.into_iter().enumerate() {
            let seat = if i % 2 == 0 { Seat::South } else { Seat::North };
            board.place_fence(seat, fence).unwrap();
            assert_fresh(&board);
        }
    }

    #[test]
    fn fence_next_to_adjacent_pawns_refreshes_the_jump() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.teleport(Seat::North, Coord::new(4, 3));
        board.teleport(Seat::South, Coord::new(4, 2));
        let before = board.legal_pawn_moves(&Coord::new(4, 3)).to_vec();

        // Closes the edge behind South, two cells away from North.
        board.place_fence(Seat::South, Fence::horizontal(4, 2)).unwrap();
        assert_fresh(&board);
        assert_ne!(board.legal_pawn_moves(&Coord::new(4, 3)), before.as_slice());
    }

    #[test]
    fn radii_are_tight() {
        // A smaller radius leaves stale entries behind for these mutations.
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.teleport(Seat::North, Coord::new(4, 4));
        board.teleport(Seat::South, Coord::new(4, 6));

        let mut stale = board.cache.clone();
        board.players[1].pawn = Coord::new(4, 5);
        let dims = board.dims;
        stale.refresh(&board, dims.within(&[Coord::new(4, 6), Coord::new(4, 5)], PAWN_REACH - 1), MoveMode::Real);
        assert_ne!(stale, ActionCache::build(&board));

        let fence = Fence::horizontal(4, 6);
        let mut stale = ActionCache::build(&board);
        board.fences.place(fence, Seat::North);
        for conflict in fence.conflicts() {
            stale.placeable.remove(&conflict);
        }
        stale.refresh(&board, fence.touched_cells(), MoveMode::Real);
        stale.refresh(&board, fence.touched_cells(), MoveMode::PawnBlind);
        assert_ne!(stale, ActionCache::build(&board));
    }
}
