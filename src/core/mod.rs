//! Core scoring components

pub mod tokenizer;
pub mod patterns;
pub mod cluster_scorer;
pub mod coherence;
pub mod features;
pub mod indices;
pub mod aggregator;
pub mod smoother;
pub mod classifier;
pub mod engine;
pub mod api;

pub use tokenizer::tokenize;
pub use cluster_scorer::{score_clusters, Dictionary};
pub use coherence::coherence;
pub use features::{build_features, TextStats};
pub use indices::{compute_cus, compute_eis, compute_indices, compute_ris, compute_sss};
pub use aggregator::aggregate;
pub use smoother::{hash_text, HourSource};
pub use classifier::decide;
pub use engine::FasEngine;
pub use api::{create_router, run_server, AppState};
