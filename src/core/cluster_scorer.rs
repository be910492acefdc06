//! Cluster Scorer: weighted lexical clusters → negative-affect bundle
//!
//! Patterns are compiled once when the dictionary is built. Entries that
//! fail to compile are logged and dropped, so scoring never sees them.

use std::path::Path;
use fancy_regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::core::patterns::{compile_entry, count_entry_matches, has_repetition};
use crate::error::{EngineError, Result};
use crate::types::{ClusterHit, ClusterKind, LexicalCluster, NegBundle};
use crate::{
    CRISIS_PER_MATCH, ENTRY_SCALE, INTERACTION_CAP, PHYSIO_PER_MATCH, REPETITION_BONUS,
};

/// A dictionary entry that compiled
#[derive(Debug, Clone)]
struct CompiledEntry {
    source: String,
    regex: Regex,
}

/// A cluster with its compiled entries
#[derive(Debug, Clone)]
struct CompiledCluster {
    tag: String,
    weight: f64,
    kind: ClusterKind,
    entries: Vec<CompiledEntry>,
}

/// Read-only, compiled scoring dictionary
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    clusters: Vec<CompiledCluster>,
    rejected: usize,
}

/// Accepted document shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum DictionaryDoc {
    Wrapped { clusters: Vec<LexicalCluster> },
    Bare(Vec<LexicalCluster>),
}

impl Dictionary {
    /// Compile clusters, dropping entries that are not valid patterns
    pub fn compile(clusters: Vec<LexicalCluster>) -> Self {
        let mut rejected = 0;
        let clusters = clusters
            .into_iter()
            .map(|cluster| {
                let kind = cluster.kind();
                let entries = cluster
                    .entries
                    .into_iter()
                    .filter_map(|source| match compile_entry(&source) {
                        Ok(regex) => Some(CompiledEntry { source, regex }),
                        Err(e) => {
                            warn!(tag = %cluster.tag, entry = %source, error = %e, "dropping invalid pattern");
                            rejected += 1;
                            None
                        }
                    })
                    .collect();
                CompiledCluster {
                    tag: cluster.tag,
                    weight: cluster.weight,
                    kind,
                    entries,
                }
            })
            .collect();
        Self { clusters, rejected }
    }

    /// Parse `{"clusters": [...]}` or a bare cluster array
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: DictionaryDoc = serde_json::from_str(json).map_err(|e| {
            EngineError::InvalidDictionary(format!("expected a cluster array or {{\"clusters\": [...]}}: {}", e))
        })?;
        let clusters = match doc {
            DictionaryDoc::Wrapped { clusters } => clusters,
            DictionaryDoc::Bare(clusters) => clusters,
        };
        Ok(Self::compile(clusters))
    }

    /// Read and compile a dictionary file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of usable entries across all clusters
    pub fn entry_count(&self) -> usize {
        self.clusters.iter().map(|c| c.entries.len()).sum()
    }

    /// Entries dropped at compile time
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

/// Score text against an optional dictionary.
///
/// An absent or cluster-less dictionary yields the zero bundle.
pub fn score_clusters(text: &str, dict: Option<&Dictionary>) -> NegBundle {
    let dict = match dict {
        Some(d) if !d.is_empty() => d,
        _ => return NegBundle::zero(),
    };

    let mut sum = 0.0;
    let mut physio = 0.0;
    let mut crisis = 0.0;
    let mut hits = Vec::new();

    for cluster in &dict.clusters {
        for entry in &cluster.entries {
            let count = count_entry_matches(&entry.regex, text);
            if count == 0 {
                continue;
            }
            let n = count as f64;
            let contribution = (n * cluster.weight * ENTRY_SCALE).min(1.0);
            sum += contribution;
            hits.push(ClusterHit {
                tag: cluster.tag.clone(),
                entry: entry.source.clone(),
                count,
                weight: cluster.weight,
                contribution,
            });
            match cluster.kind {
                ClusterKind::Physio => physio += (n * PHYSIO_PER_MATCH).min(1.0),
                ClusterKind::Crisis => crisis += (n * CRISIS_PER_MATCH).min(1.0),
                ClusterKind::General => {}
            }
        }
    }

    if has_repetition(text) {
        sum += REPETITION_BONUS;
    }
    sum += (physio * 0.3 + crisis * 0.3).min(INTERACTION_CAP);

    NegBundle {
        // re-centered sigmoid: sum = 0 maps to 0.5
        score: (sigmoid(sum) - 0.5 + 0.5).clamp(0.0, 1.0),
        physio: physio.clamp(0.0, 1.0),
        crisis: crisis.clamp(0.0, 1.0),
        hits,
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(tag: &str, weight: f64, entries: &[&str]) -> LexicalCluster {
        LexicalCluster::new(tag, Some(weight), entries.iter().map(|e| e.to_string()).collect())
    }

    #[test]
    fn test_absent_dictionary_is_zero() {
        assert_eq!(score_clusters("助けて", None), NegBundle::zero());
        let empty = Dictionary::compile(vec![]);
        assert_eq!(score_clusters("助けて", Some(&empty)), NegBundle::zero());
    }

    #[test]
    fn test_invalid_pattern_dropped_at_compile() {
        let dict = Dictionary::compile(vec![cluster("不安", 0.5, &["(broken", "怖い"])]);
        assert_eq!(dict.rejected(), 1);
        assert_eq!(dict.entry_count(), 1);

        let neg = score_clusters("怖い", Some(&dict));
        assert_eq!(neg.hits.len(), 1);
        assert_eq!(neg.hits[0].entry, "怖い");
    }

    #[test]
    fn test_contribution_and_sigmoid() {
        let dict = Dictionary::compile(vec![cluster("不安", 0.4, &["怖い"])]);
        let neg = score_clusters("怖い怖い", Some(&dict));
        // 2 * 0.4 * 0.5 = 0.4
        assert!((neg.hits[0].contribution - 0.4).abs() < 1e-12);
        assert!((neg.score - sigmoid(0.4)).abs() < 1e-12);
        assert_eq!(neg.physio, 0.0);
    }

    #[test]
    fn test_no_match_scores_half() {
        let dict = Dictionary::compile(vec![cluster("不安", 0.4, &["怖い"])]);
        let neg = score_clusters("平気です", Some(&dict));
        assert!(neg.hits.is_empty());
        assert!((neg.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_physio_and_crisis_subscores() {
        let dict = Dictionary::compile(vec![
            cluster("体感", 0.3, &["頭痛"]),
            cluster("希死", 0.8, &["消えたい"]),
        ]);
        let neg = score_clusters("頭痛がする。消えたい。消えたい", Some(&dict));
        assert!((neg.physio - 0.2).abs() < 1e-12);
        assert!((neg.crisis - 0.6).abs() < 1e-12);
        // sum = 0.15 + 0.8 + min(0.2, 0.06 + 0.18)
        let expected = sigmoid(0.15 + 0.8 + 0.2);
        assert!((neg.score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_lookaround_and_backreference_entries_score() {
        let dict = Dictionary::compile(vec![cluster("希死", 0.9, &["死(?!ぬほど)", r"(消えたい)\1"])]);
        assert_eq!(dict.rejected(), 0);

        let neg = score_clusters("死にたい。消えたい消えたい", Some(&dict));
        assert_eq!(neg.hits.len(), 2);
        assert!((neg.crisis - 0.6).abs() < 1e-12);
        // 0.45 + 0.45 + min(0.2, 0.18)
        assert!((neg.score - sigmoid(0.9 + 0.18)).abs() < 1e-12);

        let quiet = score_clusters("死ぬほど眠い", Some(&dict));
        assert!(quiet.hits.is_empty());
    }

    #[test]
    fn test_repetition_bonus_applied_once() {
        let dict = Dictionary::compile(vec![cluster("救援", 0.3, &["nothing-matches-this"])]);
        let two = score_clusters("助けて助けて", Some(&dict));
        let three = score_clusters("助けて助けて助けて", Some(&dict));
        let one = score_clusters("助けて", Some(&dict));
        assert!((two.score - sigmoid(0.3)).abs() < 1e-12);
        assert!((three.score - sigmoid(0.3)).abs() < 1e-12);
        assert!((one.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_json_shapes() {
        let wrapped = Dictionary::from_json_str(r#"{"clusters": [{"tag": "a", "entries": ["x"]}]}"#).unwrap();
        let bare = Dictionary::from_json_str(r#"[{"tag": "a", "weight": 0.5, "entries": ["x", "y"]}]"#).unwrap();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(bare.entry_count(), 2);
        assert!(Dictionary::from_json_str(r#"{"tags": 3}"#).is_err());
    }
}
