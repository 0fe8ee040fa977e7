use crate::automaton::{GeneralizedSuffixAutomaton, State, Symbol, ROOT};
use ahash::AHashSet;

/// One round's automaton together with the buffer it was built from.
#[derive(Debug, Clone)]
pub struct RoundIndex {
    buffer: Vec<Symbol>,
    automaton: GeneralizedSuffixAutomaton,
}

impl RoundIndex {
    /// Builds and propagates the automaton over `texts`; a text's round-local id
    /// is its position in the iterator.
    pub fn build<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let texts: Vec<&str> = texts.into_iter().collect();
        let symbols = texts.iter().map(|t| t.chars().count() + 1).sum();
        let mut buffer = Vec::with_capacity(symbols);
        let mut automaton = GeneralizedSuffixAutomaton::with_capacity(symbols);

        for (sid, text) in texts.iter().enumerate() {
            let sid = sid as u32;
            for ch in text.chars() {
                buffer.push(Symbol::Char(ch));
                automaton.extend(ch, sid, buffer.len() - 1);
            }
            buffer.push(Symbol::Boundary(sid));
            automaton.reset_with_separator(sid, buffer.len() - 1);
        }
        automaton.propagate_occurrences();

        Self { buffer, automaton }
    }

    pub fn automaton(&self) -> &GeneralizedSuffixAutomaton {
        &self.automaton
    }

    /// The longest substring of `state`'s class, as stored in the buffer.
    pub fn span(&self, state: &State) -> &[Symbol] {
        &self.buffer[state.end_pos + 1 - state.len..=state.end_pos]
    }

    /// Every distinct trimmed key of maximal length that is at least
    /// `min_key_len` long and shared by at least `min_group_size` texts,
    /// in state discovery order. Empty when nothing qualifies.
    pub fn longest_keys(&self, min_key_len: usize, min_group_size: usize) -> Vec<String> {
        let candidates: Vec<&[Symbol]> = self
            .automaton
            .states()
            .iter()
            .enumerate()
            .filter(|(idx, st)| *idx != ROOT && st.occurrence_count() >= min_group_size as u64)
            .map(|(_, st)| trim_symbols(self.span(st)))
            .filter(|key| key.len() >= min_key_len)
            .collect();

        let Some(best) = candidates.iter().map(|key| key.len()).max() else {
            return Vec::new();
        };

        let mut seen = AHashSet::new();
        let mut keys = Vec::new();
        for key in candidates.into_iter().filter(|key| key.len() == best) {
            // Boundaries never reach a shared state; skip them if one ever does.
            let Some(text) = materialize(key) else { continue };
            if seen.insert(text.clone()) {
                keys.push(text);
            }
        }
        keys
    }
}

/// Strips leading and trailing whitespace characters from a symbol span.
pub fn trim_symbols(span: &[Symbol]) -> &[Symbol] {
    let start = span.iter().position(|s| !s.is_whitespace()).unwrap_or(span.len());
    let end = span.iter().rposition(|s| !s.is_whitespace()).map_or(start, |i| i + 1);
    &span[start..end]
}

/// Renders a span as text; `None` if it contains a boundary.
pub fn materialize(span: &[Symbol]) -> Option<String> {
    span.iter().map(|s| s.as_char()).collect()
}

/// Convenience wrapper: build a round over `texts` and extract its keys.
pub fn find_longest_keys<S: AsRef<str>>(
    texts: &[S],
    min_key_len: usize,
    min_group_size: usize,
) -> Vec<String> {
    if texts.len() < min_group_size {
        return Vec::new();
    }
    RoundIndex::build(texts.iter().map(|t| t.as_ref())).longest_keys(min_key_len, min_group_size)
}
