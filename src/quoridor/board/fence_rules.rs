use std::ops::Deref;

use thiserror::Error;

use crate::quoridor::prelude::*;

/// Why the board refused an action. Refusals never change the board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("{0} is out of bounds, overlaps a fence or crosses one")]
    NotPlaceable(Fence),

    #[error("{fence} would leave {seat} without a path to their goal")]
    PathObstructed { seat: Seat, fence: Fence },

    #[error("{seat} cannot move from {from} to {to}")]
    IllegalPawnMove { seat: Seat, from: Coord, to: Coord },

    #[error("{0} has no fences left")]
    NoFencesLeft(Seat),
}

/// Signed change in shortest path length per seat if a fence were placed.
pub type FenceImpact = BTreeMap<Seat, isize>;

/// A fence inserted for the duration of a query. The pawn-blind moves beside it are refreshed on
/// insertion, and both the fence and those moves are restored when the guard drops.
pub(super) struct ProvisionalFence<'a> {
    board: &'a mut Board,
    fence: Fence,
}

impl<'a> ProvisionalFence<'a> {
    /// The fence must be placeable on the board.
    pub(super) fn insert(board: &'a mut Board, fence: Fence) -> ProvisionalFence<'a> {
        board.fences.insert_provisional(&fence);
        board.with_cache(|cache, board| cache.refresh_blind_around(board, &fence));
        ProvisionalFence { board, fence }
    }
}

impl Deref for ProvisionalFence<'_> {
    type Target = Board;
    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for ProvisionalFence<'_> {
    fn drop(&mut self) {
        let fence = self.fence;
        self.board.fences.withdraw(&fence);
        self.board.with_cache(|cache, board| cache.refresh_blind_around(board, &fence));
    }
}

impl Board {
    /// Checks a fence against every placement rule, leaving the board as it found it.
    ///
    /// Bounds, overlap and crossing are read from the cache. The reachability veto only searches
    /// again for players whose current shortest path runs through one of the fence's edges; any
    /// other player keeps that path.
    pub fn check_fence(&mut self, fence: &Fence) -> std::result::Result<(), RuleError> {
        let current = self.current_paths();
        self.check_fence_against(fence, &current)
    }

    pub fn is_legal_fence(&mut self, fence: &Fence) -> bool {
        self.check_fence(fence).is_ok()
    }

    /// Every placeable fence that passes the reachability veto, in slot order.
    pub fn legal_fence_placements(&mut self) -> Vec<Fence> {
        let current = self.current_paths();
        let candidates = self.placeable_fences().iter().copied().collect::<Vec<_>>();
        candidates.into_iter()
            .filter(|f| self.check_fence_against(f, &current).is_ok())
            .collect()
    }

    /// Each seated player's shortest pawn-blind path on the committed board.
    fn current_paths(&self) -> Vec<(Seat, Option<Path>)> {
        self.players.iter().map(|p| (p.seat, self.path_for(p.seat))).collect()
    }

    /// [`Board::check_fence`] with the committed paths already searched.
    fn check_fence_against(
        &mut self,
        fence: &Fence,
        current: &[(Seat, Option<Path>)],
    ) -> std::result::Result<(), RuleError> {
        self.probe.hit(ProbeSite::FenceCheck);
        if !self.placeable_fences().contains(fence) {
            return Err(RuleError::NotPlaceable(*fence));
        }

        let threatened = current.iter()
            .filter(|(_, path)| path.as_ref().is_none_or(|path| path.crosses(fence)))
            .map(|(seat, _)| *seat)
            .collect::<Vec<_>>();
        if threatened.is_empty() {
            return Ok(());
        }

        let trial = ProvisionalFence::insert(self, *fence);
        match threatened.into_iter().find(|seat| trial.path_for(*seat).is_none()) {
            Some(seat) => {
                log::trace!("vetoed {fence}: {seat} would be cut off");
                Err(RuleError::PathObstructed { seat, fence: *fence })
            }
            None => Ok(()),
        }
    }

    /// How much longer each seated player's shortest path would get with the fence in place.
    /// Fails, leaving the board untouched, when the fence could not be placed.
    pub fn fence_impact(&mut self, fence: &Fence) -> std::result::Result<FenceImpact, RuleError> {
        self.probe.hit(ProbeSite::FenceImpact);
        if !self.placeable_fences().contains(fence) {
            return Err(RuleError::NotPlaceable(*fence));
        }

        let before = self.players.iter()
            .map(|p| (p.seat, self.shortest_path_length(p.seat)))
            .collect::<Vec<_>>();

        let trial = ProvisionalFence::insert(self, *fence);
        let mut impact = FenceImpact::new();
        for (seat, was) in before {
            let Some(now) = trial.shortest_path_length(seat) else {
                return Err(RuleError::PathObstructed { seat, fence: *fence });
            };
            let was = was.unwrap_or(now);
            impact.insert(seat, now as isize - was as isize);
        }
        Ok(impact)
    }
}
