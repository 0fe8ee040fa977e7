//! Generalized suffix automaton over a round's texts.
//!
//! Texts are fed one symbol at a time and closed with a [`Symbol::Boundary`].
//! Boundaries live outside the character alphabet and carry the id of the text
//! they close, so two boundaries never compare equal and no state can stand for
//! a substring that spans two texts.

use roaring::RoaringBitmap;
use smallvec::SmallVec;

pub const ROOT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Char(char),
    Boundary(u32),
}

impl Symbol {
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(c),
            Symbol::Boundary(_) => None,
        }
    }

    pub fn is_whitespace(self) -> bool {
        matches!(self, Symbol::Char(c) if c.is_whitespace())
    }
}

#[derive(Debug, Clone, Default)]
pub struct State {
    /// Length of the longest substring in this state's class.
    pub len: usize,
    /// Suffix link; `None` only for the root.
    pub link: Option<usize>,
    /// Round-local ids of the texts containing a substring of this state.
    pub occ: RoaringBitmap,
    /// Buffer position where one occurrence of the longest substring ends.
    pub end_pos: usize,
    next: SmallVec<[(Symbol, usize); 4]>,
}

impl State {
    fn new(len: usize, end_pos: usize) -> Self {
        Self { len, end_pos, ..Default::default() }
    }

    pub fn transition(&self, sym: Symbol) -> Option<usize> {
        self.next
            .binary_search_by(|(s, _)| s.cmp(&sym))
            .ok()
            .map(|i| self.next[i].1)
    }

    fn set_transition(&mut self, sym: Symbol, target: usize) {
        match self.next.binary_search_by(|(s, _)| s.cmp(&sym)) {
            Ok(i) => self.next[i].1 = target,
            Err(i) => self.next.insert(i, (sym, target)),
        }
    }

    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.next.iter().copied()
    }

    pub fn occurrence_count(&self) -> u64 {
        self.occ.len()
    }
}

#[derive(Debug, Clone)]
pub struct GeneralizedSuffixAutomaton {
    states: Vec<State>,
    last: usize,
}

impl Default for GeneralizedSuffixAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneralizedSuffixAutomaton {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-sizes the arena for `symbols` input symbols (at most two states each).
    pub fn with_capacity(symbols: usize) -> Self {
        let mut states = Vec::with_capacity(symbols.saturating_mul(2) + 1);
        states.push(State::default());
        Self { states, last: ROOT }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, idx: usize) -> &State {
        &self.states[idx]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Appends `ch` of text `text_id`, which sits at `global_pos` in the round buffer.
    pub fn extend(&mut self, ch: char, text_id: u32, global_pos: usize) {
        self.push_symbol(Symbol::Char(ch), Some(text_id), global_pos);
    }

    /// Closes the current text with its boundary and restarts from the root.
    /// The boundary state marks no text.
    pub fn reset_with_separator(&mut self, boundary: u32, global_pos: usize) {
        self.push_symbol(Symbol::Boundary(boundary), None, global_pos);
        self.last = ROOT;
    }

    fn push_symbol(&mut self, sym: Symbol, mark: Option<u32>, global_pos: usize) {
        // A text that restarted at the root may walk a path earlier texts built.
        // Reuse that state (splitting it when it is longer) instead of adding one.
        if let Some(q) = self.states[self.last].transition(sym) {
            let next = if self.states[self.last].len + 1 == self.states[q].len {
                q
            } else {
                self.split(self.last, q, sym)
            };
            if let Some(id) = mark {
                self.states[next].occ.insert(id);
            }
            self.last = next;
            return;
        }

        let cur = self.states.len();
        let mut state = State::new(self.states[self.last].len + 1, global_pos);
        if let Some(id) = mark {
            state.occ.insert(id);
        }
        self.states.push(state);

        let mut p = Some(self.last);
        let mut hit = None;
        while let Some(pi) = p {
            if let Some(q) = self.states[pi].transition(sym) {
                hit = Some((pi, q));
                break;
            }
            self.states[pi].set_transition(sym, cur);
            p = self.states[pi].link;
        }

        let link = match hit {
            None => ROOT,
            Some((p, q)) if self.states[p].len + 1 == self.states[q].len => q,
            Some((p, q)) => self.split(p, q, sym),
        };
        self.states[cur].link = Some(link);
        self.last = cur;
    }

    /// Clones `q` at length `len(p) + 1` and redirects the `sym` edges of `p`'s
    /// suffix chain that pointed at `q`. The clone starts with no occurrences;
    /// a clone that becomes `last` is marked by the caller.
    fn split(&mut self, p: usize, q: usize, sym: Symbol) -> usize {
        let clone = self.states.len();
        let len = self.states[p].len + 1;
        let original = &self.states[q];
        let cloned = State {
            len,
            link: original.link,
            occ: RoaringBitmap::new(),
            end_pos: original.end_pos,
            next: original.next.clone(),
        };
        self.states.push(cloned);

        let mut p = Some(p);
        while let Some(pi) = p {
            if self.states[pi].transition(sym) != Some(q) {
                break;
            }
            self.states[pi].set_transition(sym, clone);
            p = self.states[pi].link;
        }
        self.states[q].link = Some(clone);
        clone
    }

    /// Pushes every state's occurrence set into its suffix-link parent, longest
    /// states first, so each set covers the whole link subtree below it.
    pub fn propagate_occurrences(&mut self) {
        for v in self.order_by_len_desc() {
            let Some(parent) = self.states[v].link else { continue };
            debug_assert!(
                self.states[parent].len < self.states[v].len,
                "suffix link {v} -> {parent} does not shorten"
            );
            let occ = std::mem::take(&mut self.states[v].occ);
            self.states[parent].occ |= &occ;
            self.states[v].occ = occ;
        }
    }

    /// Counting sort over state lengths, returned longest first.
    fn order_by_len_desc(&self) -> Vec<usize> {
        let max_len = self.states.iter().map(|s| s.len).max().unwrap_or(0);
        let mut counts = vec![0usize; max_len + 1];
        for s in &self.states {
            counts[s.len] += 1;
        }
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }
        let mut order = vec![0usize; self.states.len()];
        for (idx, s) in self.states.iter().enumerate().rev() {
            counts[s.len] -= 1;
            order[counts[s.len]] = idx;
        }
        order.reverse();
        order
    }

    /// Walks `pattern` from the root; `Some(state)` when it is a recognized substring.
    pub fn find(&self, pattern: &str) -> Option<usize> {
        pattern
            .chars()
            .try_fold(ROOT, |state, ch| self.states[state].transition(Symbol::Char(ch)))
    }
}
