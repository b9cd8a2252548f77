//! Packrat memo table.

use rustc_hash::FxHashMap;

use cxxparse_core::RuleId;

use crate::tree::Element;

/// Outcome of a rule at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Memo {
    /// `element` is `None` when the match produced no node (zero width).
    Matched { end: u32, element: Option<Element> },
    Failed,
}

#[derive(Debug, Default)]
pub(crate) struct MemoTable {
    entries: FxHashMap<u64, Memo>,
}

impl MemoTable {
    fn key(rule: RuleId, pos: u32) -> u64 {
        ((rule.index() as u64) << 32) | pos as u64
    }

    pub(crate) fn get(&self, rule: RuleId, pos: u32) -> Option<Memo> {
        self.entries.get(&Self::key(rule, pos)).copied()
    }

    pub(crate) fn insert(&mut self, rule: RuleId, pos: u32, memo: Memo) {
        self.entries.insert(Self::key(rule, pos), memo);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
