pub mod source;
pub mod topic;

pub use source::{Source, TopicState};
pub use topic::Topic;
