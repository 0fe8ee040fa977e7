use crate::error::GroupingError;
use crate::keys::RoundIndex;
use crate::result::{AutoGroupResult, Group};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingOpts {
    /// Minimum trimmed length, in chars, of a key that may found a group.
    pub min_key_len: usize,
    /// Minimum number of texts that must share a key.
    pub min_group_size: usize,
    /// Stop after this many rounds; the rest is reported ungrouped.
    pub max_rounds: Option<usize>,
}

impl Default for GroupingOpts {
    fn default() -> Self {
        Self { min_key_len: 2, min_group_size: 2, max_rounds: None }
    }
}

impl GroupingOpts {
    pub fn new(min_key_len: usize, min_group_size: usize) -> Self {
        Self { min_key_len, min_group_size, ..Default::default() }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn validate(&self) -> Result<(), GroupingError> {
        if self.min_key_len < 1 {
            return Err(GroupingError::invalid("min_key_len", self.min_key_len, "must be at least 1"));
        }
        if self.min_group_size < 2 {
            return Err(GroupingError::invalid("min_group_size", self.min_group_size, "must be at least 2"));
        }
        if self.max_rounds == Some(0) {
            return Err(GroupingError::invalid("max_rounds", 0, "must be at least 1 when set"));
        }
        Ok(())
    }
}

type Item = (usize, String);

enum Phase {
    Active { remaining: Vec<Item>, round: usize },
    Done { remaining: Vec<Item> },
}

/// Groups `sentences` by their longest shared literal substrings.
pub fn auto_group<S: AsRef<str>>(
    sentences: &[S],
    min_key_len: usize,
    min_group_size: usize,
) -> Result<AutoGroupResult, GroupingError> {
    auto_group_with_opts(sentences, &GroupingOpts::new(min_key_len, min_group_size))
}

pub fn auto_group_with_opts<S: AsRef<str>>(
    sentences: &[S],
    opts: &GroupingOpts,
) -> Result<AutoGroupResult, GroupingError> {
    opts.validate()?;
    if sentences.len() > u32::MAX as usize {
        return Err(GroupingError::invalid("sentences", sentences.len(), "too many texts for one round"));
    }
    if sentences.is_empty() {
        return Ok(AutoGroupResult::default());
    }

    let remaining: Vec<Item> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.as_ref().to_string()))
        .collect();

    let mut groups = Vec::new();
    let mut phase = Phase::Active { remaining, round: 1 };
    let remaining = loop {
        phase = match phase {
            Phase::Active { remaining, round } => run_round(remaining, round, opts, &mut groups),
            Phase::Done { remaining } => break remaining,
        };
    };

    let result = AutoGroupResult::new(groups, remaining.into_iter().collect());
    info!(
        total = sentences.len(),
        groups = result.groups().len(),
        grouped = result.grouped_count(),
        ungrouped = result.ungrouped().len(),
        "auto grouping complete"
    );
    Ok(result)
}

fn run_round(remaining: Vec<Item>, round: usize, opts: &GroupingOpts, groups: &mut Vec<Group>) -> Phase {
    if opts.max_rounds.is_some_and(|max| round > max) {
        debug!(round, "round limit reached");
        return Phase::Done { remaining };
    }
    if remaining.len() < opts.min_group_size {
        return Phase::Done { remaining };
    }

    let keys = RoundIndex::build(remaining.iter().map(|(_, text)| text.as_str()))
        .longest_keys(opts.min_key_len, opts.min_group_size);
    debug!(round, remaining = remaining.len(), keys = keys.len(), "extracted keys");
    if keys.is_empty() {
        return Phase::Done { remaining };
    }

    // Members are re-checked against the raw text; a text goes to the first
    // key of the round that matches it.
    let mut claimed = vec![false; remaining.len()];
    let mut found: Vec<(String, Vec<usize>)> = Vec::new();
    for key in keys {
        let members: Vec<usize> = remaining
            .iter()
            .enumerate()
            .filter(|(pos, (_, text))| !claimed[*pos] && text.contains(key.as_str()))
            .map(|(pos, _)| pos)
            .collect();
        if members.len() < opts.min_group_size {
            debug!(round, key = %key, members = members.len(), "key below group size");
            continue;
        }
        for &pos in &members {
            claimed[pos] = true;
        }
        found.push((key, members));
    }

    if found.is_empty() {
        return Phase::Done { remaining };
    }

    let mut slots: Vec<Option<Item>> = remaining.into_iter().map(Some).collect();
    for (key, members) in found {
        let members: BTreeMap<usize, String> = members.iter().filter_map(|&pos| slots[pos].take()).collect();
        debug!(round, key = %key, members = members.len(), "formed group");
        groups.push(Group::new(key, round, members));
    }
    let remaining: Vec<Item> = slots.into_iter().flatten().collect();

    Phase::Active { remaining, round: round + 1 }
}
