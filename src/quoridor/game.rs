use crate::quoridor::prelude::*;

/// One turn's worth of decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Coord),
    Fence(Fence),
    Resign,
}

/// The state of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(Seat),
    Resigned(Seat),
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        *self != Outcome::InProgress
    }
}

/// Drives rounds on a board: whose turn it is, when a round ends, and who has won how often.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    round: usize,
    /// Index into the seated players of the one who opened this round.
    opener: usize,
    to_move: usize,
    outcome: Outcome,
    scores: BTreeMap<Seat, usize>,
}

impl Game {
    pub fn new(config: BoardConfig) -> Result<Game> {
        let board = Board::new(config)?;
        let scores = board.players().iter().map(|p| (p.seat, 0)).collect();
        Ok(Game { board, round: 1, opener: 0, to_move: 0, outcome: Outcome::InProgress, scores })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for queries that try fences out; they restore the board before returning.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn scores(&self) -> &BTreeMap<Seat, usize> {
        &self.scores
    }

    /// The seat whose turn it is.
    pub fn to_move(&self) -> Seat {
        self.board.players()[self.to_move].seat
    }

    /// Pawn moves of the player to move, then every legal fence if they have any left.
    /// Empty once the round is over.
    pub fn legal_actions(&mut self) -> Vec<Action> {
        if self.outcome.is_over() {
            return vec![];
        }
        let player = self.board.player(self.to_move());
        let has_fences = player.fences > 0;
        let mut actions = self.board.legal_pawn_moves(&player.pawn).iter()
            .map(|m| Action::Move(m.to))
            .collect::<Vec<_>>();
        if has_fences {
            actions.extend(self.board.legal_fence_placements().into_iter().map(Action::Fence));
        }
        actions
    }

    /// Plays an action for the player to move and passes the turn on. A refused action leaves
    /// the game as it was.
    pub fn play(&mut self, action: Action) -> Result<Outcome> {
        if self.outcome.is_over() {
            bail!("round {} is over, start a new one", self.round);
        }
        let seat = self.to_move();
        match action {
            Action::Move(to) => {
                self.board.place_pawn(seat, to)?;
                if self.board.has_won(seat) {
                    self.outcome = Outcome::Won(seat);
                    *self.scores.entry(seat).or_default() += 1;
                    log::info!("{seat} won round {}", self.round);
                }
            }
            Action::Fence(fence) => self.board.place_fence(seat, fence)?,
            Action::Resign => {
                self.outcome = Outcome::Resigned(seat);
                log::info!("{seat} resigned round {}", self.round);
            }
        }
        self.to_move = (self.to_move + 1) % self.board.players().len();
        Ok(self.outcome)
    }

    /// Clears the board for another round, opened by the next seat in turn.
    pub fn new_round(&mut self) {
        self.board.reset();
        self.round += 1;
        self.opener = (self.opener + 1) % self.board.players().len();
        self.to_move = self.opener;
        self.outcome = Outcome::InProgress;
        log::debug!("round {} opened by {}", self.round, self.to_move());
    }
}
