pub mod automaton;
pub mod keys;
pub mod grouping;
pub mod result;
pub mod error;
pub mod input;

pub use error::GroupingError;
pub use grouping::{auto_group, auto_group_with_opts, GroupingOpts};
pub use result::{AutoGroupResult, Group};
