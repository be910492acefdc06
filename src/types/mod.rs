//! Data records for the scoring pipeline

mod cluster;
mod neg;
mod features;
mod decision;
mod state;
mod output;
mod settings;

pub use cluster::{ClusterKind, LexicalCluster};
pub use neg::{ClusterHit, NegBundle};
pub use features::{FeatureKey, FeatureVector, SecondaryIndices};
pub use decision::{CusZone, Decision, FasZone, Mode};
pub use state::EngineState;
pub use output::FasResult;
pub use settings::{EngineConfig, Settings, Weights};
