pub(crate) mod cache;
pub(crate) mod fence_rules;
pub(crate) mod fences;
pub(crate) mod pawn_moves;
pub(crate) mod player;
pub(crate) mod reachability;

use std::rc::Rc;

use super::prelude::*;

/// The shape of a round: board size, how many seats are filled, and the shared fence pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub cols: usize,
    pub rows: usize,
    pub players: usize,
    /// Split evenly between the players; any remainder stays in the box.
    pub total_fences: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            players: MIN_PLAYERS,
            total_fences: DEFAULT_TOTAL_FENCES,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cols < MIN_SIDE || self.rows < MIN_SIDE {
            bail!("board must be at least {MIN_SIDE}x{MIN_SIDE}, received {}x{}", self.cols, self.rows);
        }
        if self.cols > MAX_SIDE || self.rows > MAX_SIDE {
            bail!("board must be at most {MAX_SIDE}x{MAX_SIDE}, received {}x{}", self.cols, self.rows);
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            bail!("expected {MIN_PLAYERS} to {MAX_PLAYERS} players, received {}", self.players);
        }
        Ok(())
    }

    pub fn dims(&self) -> Dimensions {
        Dimensions::new(self.cols, self.rows)
    }

    pub fn fences_per_player(&self) -> usize {
        self.total_fences / self.players
    }
}

/// A Quoridor board for one round: the fences, the seated players, and the cached legal actions.
///
/// Only [`Board::place_pawn`] and [`Board::place_fence`] commit changes, and each one brings the
/// cache up to date before returning. Queries that try a fence out restore the board exactly
/// before they return.
#[derive(Clone, Debug)]
pub struct Board {
    config: BoardConfig,
    dims: Dimensions,

    /// Every committed fence, plus at most one provisional fence while a query is running.
    fences: FenceLayer,

    /// Seated players in seat order; the only record of where the pawns stand.
    players: Vec<Player>,

    /// Legal actions of the current position, see [`ActionCache`].
    cache: ActionCache,

    /// Where call-site tallies go; ignored unless a caller injects something.
    probe: Rc<dyn Probe>,
}

impl Board {
    /// Seats the players and prepares the first round.
    pub fn new(config: BoardConfig) -> Result<Board> {
        config.validate()?;
        let dims = config.dims();
        let players = Seat::seated(config.players)
            .map(|seat| Player::seated(seat, &dims, config.fences_per_player()))
            .collect();

        let mut board = Board {
            config,
            dims,
            fences: FenceLayer::new(dims),
            players,
            cache: ActionCache::default(),
            probe: Rc::new(NullProbe),
        };
        board.initialize_cache();
        log::debug!("new {}x{} board with {} players", dims.cols, dims.rows, config.players);
        Ok(board)
    }

    /// Routes call-site tallies to the given probe.
    pub fn with_probe(mut self, probe: Rc<dyn Probe>) -> Board {
        self.probe = probe;
        self
    }

    /// Clears the fences, sends every pawn home, refills fence pools and rebuilds the cache.
    pub fn reset(&mut self) {
        let fences = self.config.fences_per_player();
        self.fences = FenceLayer::new(self.dims);
        self.players.iter_mut().for_each(|p| p.reset(fences));
        self.initialize_cache();
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn fences(&self) -> &FenceLayer {
        &self.fences
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player in a seat. Asking for an empty seat is a contract violation.
    pub fn player(&self, seat: Seat) -> &Player {
        self.players.iter().find(|p| p.seat == seat)
            .unwrap_or_else(|| panic!("seat {seat} is empty at this board"))
    }

    fn player_mut(&mut self, seat: Seat) -> &mut Player {
        self.players.iter_mut().find(|p| p.seat == seat)
            .unwrap_or_else(|| panic!("seat {seat} is empty at this board"))
    }

    pub fn cache(&self) -> &ActionCache {
        &self.cache
    }

    /// Cached legal moves out of a cell, taking pawns into account.
    pub fn legal_pawn_moves(&self, coord: &Coord) -> &[PawnMove] {
        self.cache.moves(coord, MoveMode::Real)
    }

    /// Cached fence slots that pass the local checks. Whether a slot also keeps every player's
    /// path open is decided by [`Board::is_legal_fence`].
    pub fn placeable_fences(&self) -> &BTreeSet<Fence> {
        self.cache.placeable()
    }

    pub fn is_legal_pawn_move(&self, seat: Seat, to: &Coord) -> bool {
        let from = self.player(seat).pawn;
        self.legal_pawn_moves(&from).iter().any(|m| m.to == *to)
    }

    /// Moves a pawn if the move is legal, then refreshes the cache around both cells.
    pub fn place_pawn(&mut self, seat: Seat, to: Coord) -> std::result::Result<PawnMove, RuleError> {
        let from = self.player(seat).pawn;
        let Some(mv) = self.legal_pawn_moves(&from).iter().find(|m| m.to == to).copied() else {
            return Err(RuleError::IllegalPawnMove { seat, from, to });
        };

        self.player_mut(seat).pawn = to;
        self.with_cache(|cache, board| cache.after_pawn_move(board, &from, &to));
        log::debug!("{seat} moved {from} -> {to} ({:?})", mv.kind);
        Ok(mv)
    }

    /// Places one of the seat's fences if it is legal, then refreshes the cache around it.
    pub fn place_fence(&mut self, seat: Seat, fence: Fence) -> std::result::Result<(), RuleError> {
        if self.player(seat).fences == 0 {
            return Err(RuleError::NoFencesLeft(seat));
        }
        self.check_fence(&fence)?;

        self.fences.place(fence, seat);
        self.player_mut(seat).fences -= 1;
        self.with_cache(|cache, board| cache.after_fence_placement(board, &fence));
        log::debug!("{seat} placed {fence}, {} left", self.player(seat).fences);
        Ok(())
    }

    /// Whether the seated player stands on their goal edge.
    pub fn has_won(&self, seat: Seat) -> bool {
        self.player(seat).has_won()
    }

    /// The first seated player standing on their goal edge, if any.
    pub fn winner(&self) -> Option<Seat> {
        self.players.iter().find(|p| p.has_won()).map(|p| p.seat)
    }

    fn initialize_cache(&mut self) {
        self.with_cache(|cache, board| cache.initialize(board));
    }

    /// Lends the cache out mutably alongside a view of the rest of the board.
    fn with_cache(&mut self, update: impl FnOnce(&mut ActionCache, &Board)) {
        let mut cache = std::mem::take(&mut self.cache);
        update(&mut cache, self);
        self.cache = cache;
    }

    /// Rebuilds the whole cache after fields were changed behind its back; tests only.
    #[cfg(test)]
    pub(crate) fn rebuild_cache(&mut self) {
        self.cache = ActionCache::build(self);
    }

    /// Puts a pawn anywhere, ignoring the movement rules; tests only.
    #[cfg(test)]
    pub(crate) fn teleport(&mut self, seat: Seat, to: Coord) {
        self.player_mut(seat).pawn = to;
        self.rebuild_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_validated() {
        assert!(Board::new(BoardConfig { cols: 2, ..BoardConfig::default() }).is_err());
        assert!(Board::new(BoardConfig { players: 1, ..BoardConfig::default() }).is_err());
        assert!(Board::new(BoardConfig { rows: 27, ..BoardConfig::default() }).is_err());
        assert!(Board::new(BoardConfig { players: 5, ..BoardConfig::default() }).is_err());
        assert!(Board::new(BoardConfig { cols: 3, rows: 5, players: 4, total_fences: 0 }).is_ok());
    }

    #[test]
    fn fences_are_shared_evenly() {
        let board = Board::new(BoardConfig { players: 3, ..BoardConfig::default() }).unwrap();
        assert!(board.players().iter().all(|p| p.fences == 6));
        assert_eq!(board.players().iter().map(|p| p.seat).collect::<Vec<_>>(), vec![Seat::North, Seat::South, Seat::West]);
    }

    #[test]
    fn illegal_pawn_move_changes_nothing() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        let before = board.cache.clone();
        let err = board.place_pawn(Seat::North, Coord::new(4, 2)).unwrap_err();
        assert_eq!(err, RuleError::IllegalPawnMove { seat: Seat::North, from: Coord::new(4, 0), to: Coord::new(4, 2) });
        assert_eq!(board.player(Seat::North).pawn, Coord::new(4, 0));
        assert_eq!(board.cache, before);
    }

    #[test]
    fn fence_pool_runs_out() {
        let mut board = Board::new(BoardConfig { total_fences: 2, ..BoardConfig::default() }).unwrap();
        board.place_fence(Seat::North, Fence::horizontal(0, 4)).unwrap();
        assert_eq!(board.player(Seat::North).fences, 0);
        assert_eq!(board.place_fence(Seat::North, Fence::horizontal(4, 4)), Err(RuleError::NoFencesLeft(Seat::North)));
        assert_eq!(board.fences().len(), 1);
        assert_eq!(board.fences().placed(), &[(Fence::horizontal(0, 4), Seat::North)]);
    }

    #[test]
    fn reaching_the_far_row_wins() {
        let mut board = Board::new(BoardConfig { cols: 3, rows: 3, players: 2, total_fences: 0 }).unwrap();
        assert_eq!(board.winner(), None);

        // North (1, 0) steps aside; South (1, 2) walks up; North walks down.
        board.place_pawn(Seat::North, Coord::new(0, 0)).unwrap();
        board.place_pawn(Seat::South, Coord::new(1, 1)).unwrap();
        board.place_pawn(Seat::North, Coord::new(0, 1)).unwrap();
        assert!(!board.has_won(Seat::North));
        board.place_pawn(Seat::South, Coord::new(1, 0)).unwrap();
        assert!(board.has_won(Seat::South));
        assert!(!board.has_won(Seat::North));
        assert_eq!(board.winner(), Some(Seat::South));
    }

    #[test]
    fn reset_restores_the_opening() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        let opening = board.cache.clone();
        board.place_pawn(Seat::North, Coord::new(4, 1)).unwrap();
        board.place_fence(Seat::South, Fence::vertical(4, 4)).unwrap();

        board.reset();
        assert!(board.fences().is_empty());
        assert_eq!(board.player(Seat::North).pawn, Coord::new(4, 0));
        assert_eq!(board.player(Seat::South).fences, 10);
        assert_eq!(board.cache, opening);
    }

    #[test]
    #[should_panic(expected = "empty")]
    fn empty_seat_is_a_contract_violation() {
        let board = Board::new(BoardConfig::default()).unwrap();
        board.player(Seat::East);
    }
}
