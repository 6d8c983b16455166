//! Split point search
//!
//! The split point of two branch tips is the lowest common ancestor the three-way
//! merge compares both sides against. Merge commits have two parents, so ancestry
//! is followed through both edges; a walk along first parents alone would miss
//! ancestors brought in by earlier merges.
//!
//! ## Algorithm
//!
//! 1. Breadth-first search from the current tip over both parent edges, recording
//!    the shortest distance to every ancestor.
//! 2. The same from the given tip.
//! 3. Commits reached from both sides are the common ancestors. Any common ancestor
//!    that is a parent of another common ancestor is discarded: the common set is
//!    closed under ancestry, so what remains are the common ancestors that are not
//!    ancestors of another one.
//! 4. Among those, the one with the smallest combined distance wins. Ties go to
//!    the candidate closer to the current tip, then to the smaller id.
//!
//! The traversal is iterative and loads every commit at most once per side.
//!
//! ## Debug Logging
//!
//! Candidates and the chosen split point are logged at `debug` level. Building
//! with the `debug_merge` feature also dumps the full distance table.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Logging that is compiled in only with the `debug_merge` feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_CURRENT = 0b01;
        const VISITED_FROM_GIVEN = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_CURRENT.bits() | Self::VISITED_FROM_GIVEN.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::VISITED_FROM_GIVEN) {
            flags.push("GIVEN");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Per-commit bookkeeping of the two searches
#[derive(Debug, Clone)]
struct AncestorState {
    visited: VisitState,
    current_distance: usize,
    given_distance: usize,
    parents: Vec<ObjectId>,
}

impl AncestorState {
    fn new(parents: Vec<ObjectId>) -> Self {
        Self {
            visited: VisitState::NONE,
            current_distance: usize::MAX,
            given_distance: usize::MAX,
            parents,
        }
    }

    fn combined_distance(&self) -> usize {
        self.current_distance.saturating_add(self.given_distance)
    }
}

/// Finds the split point of two commits
///
/// Generic over the commit loader so that the search runs the same against the
/// object store and against in-memory graphs.
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// The split point of `current` and `given`, or `None` when their histories
    /// share no commit
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        if current == given {
            return Ok(Some(current.clone()));
        }

        let mut states = HashMap::<ObjectId, AncestorState>::new();
        self.visit_ancestors(current, VisitState::VISITED_FROM_CURRENT, &mut states)?;
        self.visit_ancestors(given, VisitState::VISITED_FROM_GIVEN, &mut states)?;

        debug_log!(table = ?Self::distance_table(&states), "split point distance table");

        let common = states
            .iter()
            .filter(|(_, state)| state.visited == VisitState::VISITED_FROM_BOTH)
            .map(|(oid, _)| oid)
            .collect::<HashSet<_>>();

        let redundant = common
            .iter()
            .flat_map(|oid| states[*oid].parents.iter())
            .collect::<HashSet<_>>();

        let split_point = common
            .iter()
            .filter(|oid| !redundant.contains(**oid))
            .map(|oid| (*oid, &states[*oid]))
            .min_by(|(left_oid, left), (right_oid, right)| {
                left.combined_distance()
                    .cmp(&right.combined_distance())
                    .then(left.current_distance.cmp(&right.current_distance))
                    .then(left_oid.cmp(right_oid))
            })
            .map(|(oid, _)| oid.clone());

        tracing::debug!(
            current_ancestors = states
                .values()
                .filter(|state| state.visited.contains(VisitState::VISITED_FROM_CURRENT))
                .count(),
            given_ancestors = states
                .values()
                .filter(|state| state.visited.contains(VisitState::VISITED_FROM_GIVEN))
                .count(),
            common_ancestors = common.len(),
            candidates = common.len() - redundant.iter().filter(|oid| common.contains(**oid)).count(),
            split_point = ?split_point.as_ref().map(ObjectId::to_short_oid),
            "searched split point"
        );

        Ok(split_point)
    }

    /// Breadth-first search over both parent edges, recording shortest distances
    fn visit_ancestors(
        &self,
        start: &ObjectId,
        side: VisitState,
        states: &mut HashMap<ObjectId, AncestorState>,
    ) -> anyhow::Result<()> {
        let mut queue = VecDeque::from([(start.clone(), 0usize)]);

        while let Some((oid, distance)) = queue.pop_front() {
            if !states.contains_key(&oid) {
                let slim_commit = (self.commit_loader)(&oid)?;
                states.insert(oid.clone(), AncestorState::new(slim_commit.parents));
            }

            let Some(state) = states.get_mut(&oid) else {
                continue;
            };
            if state.visited.contains(side) {
                continue;
            }

            state.visited |= side;
            if side == VisitState::VISITED_FROM_CURRENT {
                state.current_distance = distance;
            } else {
                state.given_distance = distance;
            }

            for parent in state.parents.clone() {
                queue.push_back((parent, distance + 1));
            }
        }

        Ok(())
    }

    #[cfg_attr(not(feature = "debug_merge"), allow(dead_code))]
    fn distance_table(states: &HashMap<ObjectId, AncestorState>) -> Vec<String> {
        let mut rows = states
            .iter()
            .map(|(oid, state)| {
                format!(
                    "{} {:?} current={} given={}",
                    oid.to_short_oid(),
                    state.visited,
                    Self::render_distance(state.current_distance),
                    Self::render_distance(state.given_distance)
                )
            })
            .collect::<Vec<_>>();
        rows.sort();
        rows
    }

    #[cfg_attr(not(feature = "debug_merge"), allow(dead_code))]
    fn render_distance(distance: usize) -> String {
        if distance == usize::MAX {
            "-".to_string()
        } else {
            distance.to_string()
        }
    }
}
