use std::cell::RefCell;
use std::sync::mpsc::Sender;

use crate::quoridor::prelude::*;

/// The engine entry points a probe is told about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProbeSite {
    PawnMoves,
    ShortestPath,
    FenceCheck,
    FenceImpact,
    CacheInitialize,
    PawnMoveUpdate,
    FenceUpdate,
}

/// Receives a hit every time the board runs one of the [`ProbeSite`] entry points.
pub trait Probe: std::fmt::Debug {
    fn hit(&self, site: ProbeSite);
}

/// Ignores every hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProbe;

impl Probe for NullProbe {
    fn hit(&self, _site: ProbeSite) {}
}

/// Tallies hits per site.
#[derive(Debug, Default)]
pub struct Counters {
    tallies: RefCell<BTreeMap<ProbeSite, usize>>,
}

impl Counters {
    pub fn count(&self, site: ProbeSite) -> usize {
        self.tallies.borrow().get(&site).copied().unwrap_or(0)
    }

    /// A copy of every non-zero tally.
    pub fn snapshot(&self) -> BTreeMap<ProbeSite, usize> {
        self.tallies.borrow().clone()
    }

    pub fn clear(&self) {
        self.tallies.borrow_mut().clear();
    }
}

impl Probe for Counters {
    fn hit(&self, site: ProbeSite) {
        *self.tallies.borrow_mut().entry(site).or_default() += 1;
    }
}

/// Forwards each hit to a receiver; hits are dropped once the receiver hangs up.
impl Probe for Sender<ProbeSite> {
    fn hit(&self, site: ProbeSite) {
        self.send(site).ok();
    }
}
