//! Strategy tree
//!
//! Every game starts with the same guess, which makes the root of the tree. The
//! score received picks the child to move to; when there is no child yet, the driver
//! does whatever work is needed to find the next guess and inserts it. As games are
//! played the tree fills in and later games replay shared prefixes without searching.
//!
//! Each node owns its children. Children are handed out as `Arc` clones so a game
//! can keep walking while other games insert siblings.
//!
//! A node remembers only the guesses played on the path to it, never a copy of the
//! guess pool; the pool is rebuilt from the universe when a guess has to be chosen.

use super::SolutionSpace;
use crate::core::{Codeword, Score};
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// One move of the strategy: the guess to play and where each score leads
#[derive(Debug)]
pub struct StrategyNode {
    guess: Codeword,
    space: SolutionSpace,
    played: Vec<Codeword>,
    children: RwLock<FxHashMap<Score, Arc<StrategyNode>>>,
}

impl StrategyNode {
    /// Create a node
    ///
    /// - `space`: candidates consistent with every score that led here
    /// - `played`: guesses played on the path from the root, ending with `guess`
    #[must_use]
    pub fn new(guess: Codeword, space: SolutionSpace, played: Vec<Codeword>) -> Self {
        Self {
            guess,
            space,
            played,
            children: RwLock::new(FxHashMap::default()),
        }
    }

    /// The guess to play at this node
    #[inline]
    #[must_use]
    pub const fn guess(&self) -> &Codeword {
        &self.guess
    }

    /// Candidates remaining when this node's guess is played
    #[inline]
    #[must_use]
    pub const fn solution_space(&self) -> &SolutionSpace {
        &self.space
    }

    /// Guesses played from the root down to and including this node's guess
    #[inline]
    #[must_use]
    pub fn played(&self) -> &[Codeword] {
        &self.played
    }

    /// Whether `code` has already been played on the path to this node
    #[must_use]
    pub fn has_played(&self, code: &Codeword) -> bool {
        self.played.contains(code)
    }

    /// The node reached by playing this node's guess and receiving `score`
    #[must_use]
    pub fn child(&self, score: Score) -> Option<Arc<Self>> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&score)
            .cloned()
    }

    /// Insert the child for `score`, unless another game got there first
    ///
    /// Returns the child now stored under `score`: `node` if it was inserted,
    /// otherwise the existing child, so every game continues down the same subtree.
    pub fn insert_child(&self, score: Score, node: Self) -> Arc<Self> {
        let mut children = self.children.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(children.entry(score).or_insert_with(|| Arc::new(node)))
    }

    /// All children, highest score first
    #[must_use]
    pub fn children(&self) -> Vec<(Score, Arc<Self>)> {
        let mut children: Vec<(Score, Arc<Self>)> = self
            .children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(&score, child)| (score, Arc::clone(child)))
            .collect();
        children.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
        children
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether this node's guess is the only candidate left
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.space.len() <= 1
    }

    /// Number of nodes in this subtree, including this one
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|(_, child)| child.node_count())
            .sum::<usize>()
    }

    /// Number of guesses on the longest path through this subtree
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|(_, child)| child.depth())
            .max()
            .unwrap_or(0)
    }
}
