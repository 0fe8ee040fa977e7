use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Texts sharing one literal key, indexed by their position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    key: String,
    round: usize,
    members: BTreeMap<usize, String>,
}

impl Group {
    pub(crate) fn new(key: String, round: usize, members: BTreeMap<usize, String>) -> Self {
        Self { key, round, members }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 1-based round in which the group was formed.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn members(&self) -> &BTreeMap<usize, String> {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.members.contains_key(&index)
    }
}

/// Partition of the input into keyed groups and ungrouped texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoGroupResult {
    groups: Vec<Group>,
    ungrouped: BTreeMap<usize, String>,
}

impl AutoGroupResult {
    pub(crate) fn new(groups: Vec<Group>, ungrouped: BTreeMap<usize, String>) -> Self {
        Self { groups, ungrouped }
    }

    /// Groups in the order they were discovered, across all rounds.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn ungrouped(&self) -> &BTreeMap<usize, String> {
        &self.ungrouped
    }

    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }

    pub fn grouped_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Number of input texts covered by the partition.
    pub fn total(&self) -> usize {
        self.grouped_count() + self.ungrouped.len()
    }

    /// Number of rounds that produced at least one group.
    pub fn rounds(&self) -> usize {
        self.groups.last().map_or(0, |g| g.round)
    }

    /// The group holding `index`, if any.
    pub fn group_of(&self, index: usize) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains_index(index))
    }
}
