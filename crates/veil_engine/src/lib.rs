//! Veil engine: per-document classification-and-hide pipeline.
mod agent;
mod classify;
mod dom;
mod matcher;
mod navigate;
mod patterns;
mod scan;
mod sections;
mod tags;

pub use agent::{AgentStats, CoordinatorPort, TabAgent};
pub use classify::Classifier;
pub use dom::{Document, Element, Mutation};
pub use ego_tree::NodeId;
pub use matcher::{AttrOp, AttrTest, Matcher, MatcherError};
pub use navigate::NavigationDetector;
pub use patterns::{PatternConfig, PatternError, PatternSet};
pub use scan::{should_process, MutationEngine, Phase, NAV_SETTLE, SCAN_DEBOUNCE};
pub use sections::SectionSweep;
pub use tags::NodeTags;
