use crate::quoridor::prelude::*;

/// Whether other pawns are taken into account when generating moves.
///
/// Fence validation searches the pawn-blind graph, so that wherever opponents happen to
/// stand can never make a fence look safe or unsafe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveMode {
    Real,
    PawnBlind,
}

/// Which way a diagonal jump turns off the blocked straight line, relative to the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn turn(&self, direction: Direction) -> Direction {
        match self {
            Side::Left  => direction.counter_clockwise(),
            Side::Right => direction.clockwise(),
        }
    }
}

/// How a pawn gets to its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Step,
    Jump { over: Coord },
    DiagonalJump { over: Coord, side: Side },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PawnMove {
    pub from: Coord,
    pub to: Coord,
    pub kind: MoveKind,
}

impl PawnMove {
    /// The pawn jumped over, if any.
    pub fn over(&self) -> Option<Coord> {
        match self.kind {
            MoveKind::Step                         => None,
            MoveKind::Jump { over }
            | MoveKind::DiagonalJump { over, .. }  => Some(over),
        }
    }
}

impl Board {
    /// Whether any pawn stands on the cell.
    pub fn occupied(&self, coord: &Coord) -> bool {
        self.players.iter().any(|p| p.pawn == *coord)
    }

    /// Computes the legal moves out of a cell from the current fences and pawns. The cache
    /// serves these during play; this is the single place the movement rule lives.
    pub fn legal_moves(&self, from: &Coord, mode: MoveMode) -> Vec<PawnMove> {
        assert!(
            self.dims.contains(from),
            "coordinate {from} lies outside the {}x{} board", self.dims.cols, self.dims.rows
        );
        self.probe.hit(ProbeSite::PawnMoves);
        let mut moves = vec![];
        for direction in DIRECTIONS {
            if self.fences.blocks(from, direction) {
                continue;
            }
            let Some(next) = self.dims.step(from, direction) else {
                continue;
            };

            if mode == MoveMode::PawnBlind || !self.occupied(&next) {
                moves.push(PawnMove { from: *from, to: next, kind: MoveKind::Step });
                continue;
            }

            if let Some(beyond) = self.open_neighbour(&next, direction) {
                moves.push(PawnMove { from: *from, to: beyond, kind: MoveKind::Jump { over: next } });
                continue;
            }

            for side in [Side::Left, Side::Right] {
                if let Some(to) = self.open_neighbour(&next, side.turn(direction)) {
                    moves.push(PawnMove { from: *from, to, kind: MoveKind::DiagonalJump { over: next, side } });
                }
            }
        }
        moves
    }

    /// The neighbour in a direction when the edge is open and no pawn stands there.
    fn open_neighbour(&self, coord: &Coord, direction: Direction) -> Option<Coord> {
        if self.fences.blocks(coord, direction) {
            return None;
        }
        self.dims.step(coord, direction).filter(|c| !self.occupied(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destinations(board: &Board, from: Coord, mode: MoveMode) -> BTreeSet<Coord> {
        board.legal_moves(&from, mode).into_iter().map(|m| m.to).collect()
    }

    /// A 9x9 board with North on (4, 3) and South on (4, 2).
    fn face_off() -> Board {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.teleport(Seat::North, Coord::new(4, 3));
        board.teleport(Seat::South, Coord::new(4, 2));
        board
    }

    #[test]
    fn open_cell_has_four_steps() {
        let board = Board::new(BoardConfig::default()).unwrap();
        let moves = board.legal_moves(&Coord::new(4, 4), MoveMode::Real);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.kind == MoveKind::Step && m.over().is_none()));
    }

    #[test]
    fn adjacent_pawn_is_jumped_straight() {
        let board = face_off();
        let moves = board.legal_moves(&Coord::new(4, 3), MoveMode::Real);
        let forward = moves.iter().filter(|m| m.to.row < 3).collect::<Vec<_>>();

        assert_eq!(forward.len(), 1);
        assert_eq!(forward[0].to, Coord::new(4, 1));
        assert_eq!(forward[0].kind, MoveKind::Jump { over: Coord::new(4, 2) });
        assert_eq!(
            destinations(&board, Coord::new(4, 3), MoveMode::Real),
            BTreeSet::from([Coord::new(4, 1), Coord::new(3, 3), Coord::new(5, 3), Coord::new(4, 4)])
        );
    }

    #[test]
    fn occupied_landing_falls_back_to_diagonals() {
        let mut board = Board::new(BoardConfig { players: 3, ..BoardConfig::default() }).unwrap();
        board.teleport(Seat::North, Coord::new(4, 3));
        board.teleport(Seat::South, Coord::new(4, 2));
        board.teleport(Seat::West, Coord::new(4, 1));

        let moves = board.legal_moves(&Coord::new(4, 3), MoveMode::Real);
        let forward = moves.iter().filter(|m| m.to.row < 3).map(|m| (m.to, m.kind)).collect::<Vec<_>>();
        assert_eq!(forward, vec![
            (Coord::new(3, 2), MoveKind::DiagonalJump { over: Coord::new(4, 2), side: Side::Left }),
            (Coord::new(5, 2), MoveKind::DiagonalJump { over: Coord::new(4, 2), side: Side::Right }),
        ]);
    }

    #[test]
    fn fence_behind_the_jumped_pawn_forces_diagonals() {
        let mut board = face_off();
        board.place_fence(Seat::South, Fence::horizontal(4, 2)).unwrap();

        let forward = destinations(&board, Coord::new(4, 3), MoveMode::Real)
            .into_iter().filter(|c| c.row < 3).collect::<Vec<_>>();
        assert_eq!(forward, vec![Coord::new(3, 2), Coord::new(5, 2)]);
    }

    #[test]
    fn border_behind_the_jumped_pawn_forces_diagonals() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.teleport(Seat::North, Coord::new(4, 1));
        board.teleport(Seat::South, Coord::new(4, 0));

        let forward = destinations(&board, Coord::new(4, 1), MoveMode::Real)
            .into_iter().filter(|c| c.row < 1).collect::<Vec<_>>();
        assert_eq!(forward, vec![Coord::new(3, 0), Coord::new(5, 0)]);
    }

    #[test]
    fn fenced_diagonal_is_dropped_independently() {
        let mut board = face_off();
        board.place_fence(Seat::South, Fence::horizontal(4, 2)).unwrap();
        board.place_fence(Seat::South, Fence::vertical(4, 1)).unwrap();

        let forward = destinations(&board, Coord::new(4, 3), MoveMode::Real)
            .into_iter().filter(|c| c.row < 3).collect::<Vec<_>>();
        assert_eq!(forward, vec![Coord::new(5, 2)]);
    }

    #[test]
    fn fence_is_checked_before_the_pawn() {
        let mut board = face_off();
        board.place_fence(Seat::North, Fence::horizontal(3, 3)).unwrap();

        let moves = destinations(&board, Coord::new(4, 3), MoveMode::Real);
        assert!(moves.iter().all(|c| c.row >= 3));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn moves_from_off_board_cells_are_a_contract_violation() {
        let board = Board::new(BoardConfig::default()).unwrap();
        board.legal_moves(&Coord::new(9, 0), MoveMode::Real);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn pawn_blind_moves_check_the_board_too() {
        let board = Board::new(BoardConfig { cols: 5, rows: 5, ..BoardConfig::default() }).unwrap();
        board.legal_moves(&Coord::new(2, 5), MoveMode::PawnBlind);
    }

    #[test]
    fn pawn_blind_mode_walks_through_pawns() {
        let board = face_off();
        assert_eq!(
            destinations(&board, Coord::new(4, 3), MoveMode::PawnBlind),
            BTreeSet::from([Coord::new(4, 2), Coord::new(3, 3), Coord::new(5, 3), Coord::new(4, 4)])
        );
    }
}
