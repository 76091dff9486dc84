/*
 *  The rules engine for Quoridor: fences, pawns, and the paths between them.
 */

pub(crate) mod board;
pub(crate) mod consts;
pub mod coords;
pub mod game;
pub mod notation;
pub mod probe;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{
            Board,
            BoardConfig,
            cache::ActionCache,
            fences::{Fence, FenceLayer},
            fence_rules::{FenceImpact, RuleError},
            pawn_moves::{MoveKind, MoveMode, PawnMove, Side},
            player::{Goal, Player},
            reachability::Path,
        },
        consts::*,
        coords::{self, *},
        game::{Action, Game, Outcome},
        probe::{Counters, NullProbe, Probe, ProbeSite},
    };
}
