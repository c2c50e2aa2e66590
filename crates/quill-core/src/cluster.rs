//! TF-IDF + K-means keyword clustering.
//!
//! Keywords are vectorized as l2-normalised TF-IDF over their own tokens
//! and partitioned with K-means. Centroid seeding is farthest-point from a
//! fixed start rather than random, so identical input always yields the
//! identical clustering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keywords shorter than this (in characters, post-split) are noise.
const MIN_TOKEN_LEN: usize = 3;
const MAX_ITERATIONS: usize = 100;
/// How many top centroid terms make up a cluster's theme label.
const THEME_TERMS: usize = 3;

/// English stopwords removed before vectorization.
const STOPWORDS: &[&str] = &[
  "about", "after", "all", "also", "and", "any", "are", "because", "been",
  "before", "being", "between", "both", "but", "can", "come", "could", "did",
  "does", "doing", "down", "during", "each", "few", "for", "from", "further",
  "had", "has", "have", "having", "her", "here", "him", "his", "how", "into",
  "its", "just", "more", "most", "not", "now", "off", "once", "only", "other",
  "our", "out", "over", "own", "same", "she", "should", "some", "such", "than",
  "that", "the", "their", "them", "then", "there", "these", "they", "this",
  "those", "through", "too", "under", "until", "very", "was", "were", "what",
  "when", "where", "which", "while", "who", "whom", "why", "will", "with",
  "would", "you", "your",
];

// ─── Public types ────────────────────────────────────────────────────────────

/// One group of related keywords, labelled by its strongest terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCluster {
  pub cluster_id: usize,
  /// Top centroid terms joined with `" + "`; `"other"` for the catch-all
  /// cluster of keywords that vectorized to nothing.
  pub theme:      String,
  pub keywords:   Vec<String>,
  pub size:       usize,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Cluster `keywords` into `k` groups (heuristic `k` when `None`).
///
/// Degenerate inputs never error: an empty list returns an empty result,
/// a single keyword (or `k == 1`) returns one cluster holding everything,
/// and `k` is reduced to the number of distinct-enough keywords when it
/// exceeds them. Clusters come back sorted by size, largest first.
pub fn cluster_keywords(keywords: &[String], k: Option<usize>) -> Vec<KeywordCluster> {
  if keywords.is_empty() {
    return Vec::new();
  }

  // Split vectorizable keywords from ones whose tokens all fall away.
  let mut docs: Vec<(usize, Vec<String>)> = Vec::new();
  let mut leftover: Vec<usize> = Vec::new();
  for (i, kw) in keywords.iter().enumerate() {
    let tokens = tokenize(kw);
    if tokens.is_empty() {
      leftover.push(i);
    } else {
      docs.push((i, tokens));
    }
  }

  // K=1 is a hard guarantee: one cluster holding every input keyword,
  // vectorizable or not.
  if k == Some(1) {
    let members: Vec<usize> = (0..keywords.len()).collect();
    return vec![build_cluster(0, theme_from_tokens(&docs), &members, keywords)];
  }

  let mut clusters = if docs.len() < 2 {
    // Nothing to partition: everything vectorizable forms one cluster.
    let members: Vec<usize> = docs.iter().map(|(i, _)| *i).collect();
    if members.is_empty() {
      Vec::new()
    } else {
      let themed = theme_from_tokens(&docs);
      vec![build_cluster(0, themed, &members, keywords)]
    }
  } else {
    let (vocab, vectors) = vectorize(&docs);
    let k = effective_k(docs.len(), k);
    let (assignment, centroids) = kmeans(&vectors, k);

    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (doc_idx, label) in assignment.iter().enumerate() {
      members.entry(*label).or_default().push(docs[doc_idx].0);
    }

    members
      .into_iter()
      .map(|(label, idxs)| {
        let theme = centroid_theme(&centroids[label], &vocab);
        build_cluster(label, theme, &idxs, keywords)
      })
      .collect()
  };

  if !leftover.is_empty() {
    let next_id = clusters.iter().map(|c| c.cluster_id + 1).max().unwrap_or(0);
    clusters.push(build_cluster(next_id, "other".to_string(), &leftover, keywords));
  }

  // Largest first; id breaks ties so the order is total.
  clusters.sort_by(|a, b| b.size.cmp(&a.size).then(a.cluster_id.cmp(&b.cluster_id)));
  clusters
}

/// Heuristic cluster count: a third of the corpus, clamped to `[2, 8]`,
/// never more than the corpus itself.
fn effective_k(n: usize, requested: Option<usize>) -> usize {
  let k = requested.unwrap_or_else(|| (n / 3).clamp(2, 8));
  k.clamp(1, n)
}

fn build_cluster(
  cluster_id: usize,
  theme:      String,
  members:    &[usize],
  keywords:   &[String],
) -> KeywordCluster {
  let kws: Vec<String> = members.iter().map(|&i| keywords[i].clone()).collect();
  KeywordCluster { cluster_id, theme, size: kws.len(), keywords: kws }
}

// ─── Tokenization ────────────────────────────────────────────────────────────

/// Lowercased alphanumeric tokens, stopwords and short fragments removed.
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .split(|c: char| !c.is_alphanumeric())
    .map(str::to_lowercase)
    .filter(|t| t.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(&t.as_str()))
    .collect()
}

// ─── TF-IDF ──────────────────────────────────────────────────────────────────

/// Build the sorted vocabulary and the l2-normalised TF-IDF matrix.
fn vectorize(docs: &[(usize, Vec<String>)]) -> (Vec<String>, Vec<Vec<f64>>) {
  let n = docs.len() as f64;

  // Deterministic vocabulary order via BTreeMap.
  let mut df: BTreeMap<&str, usize> = BTreeMap::new();
  for (_, tokens) in docs {
    let mut seen: Vec<&str> = Vec::new();
    for t in tokens {
      let t = t.as_str();
      if !seen.contains(&t) {
        seen.push(t);
        *df.entry(t).or_insert(0) += 1;
      }
    }
  }

  let vocab: Vec<String> = df.keys().map(|t| (*t).to_string()).collect();
  let index: BTreeMap<&str, usize> =
    vocab.iter().enumerate().map(|(i, t)| (t.as_str(), i)).collect();
  let idf: Vec<f64> = vocab
    .iter()
    .map(|t| ((1.0 + n) / (1.0 + df[t.as_str()] as f64)).ln() + 1.0)
    .collect();

  let vectors = docs
    .iter()
    .map(|(_, tokens)| {
      let mut v = vec![0.0; vocab.len()];
      for t in tokens {
        v[index[t.as_str()]] += 1.0;
      }
      for (i, w) in v.iter_mut().enumerate() {
        *w *= idf[i];
      }
      let norm = v.iter().map(|w| w * w).sum::<f64>().sqrt();
      if norm > 0.0 {
        for w in &mut v {
          *w /= norm;
        }
      }
      v
    })
    .collect();

  (vocab, vectors)
}

// ─── K-means ─────────────────────────────────────────────────────────────────

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
  a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Deterministic K-means: farthest-point seeding from vector 0, then the
/// usual assign/update loop. Ties always resolve to the lowest index.
fn kmeans(vectors: &[Vec<f64>], k: usize) -> (Vec<usize>, Vec<Vec<f64>>) {
  let mut centroids: Vec<Vec<f64>> = vec![vectors[0].clone()];
  while centroids.len() < k {
    let mut best_idx = 0;
    let mut best_dist = -1.0;
    for (i, v) in vectors.iter().enumerate() {
      let nearest = centroids
        .iter()
        .map(|c| squared_distance(v, c))
        .fold(f64::INFINITY, f64::min);
      if nearest > best_dist {
        best_dist = nearest;
        best_idx = i;
      }
    }
    centroids.push(vectors[best_idx].clone());
  }

  let dim = vectors[0].len();
  let mut assignment = vec![0usize; vectors.len()];

  for _ in 0..MAX_ITERATIONS {
    let mut changed = false;
    for (i, v) in vectors.iter().enumerate() {
      let mut best = 0;
      let mut best_dist = f64::INFINITY;
      for (c, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(v, centroid);
        if d < best_dist {
          best_dist = d;
          best = c;
        }
      }
      if assignment[i] != best {
        assignment[i] = best;
        changed = true;
      }
    }

    if !changed {
      break;
    }

    // Recompute means; a centroid that lost every member keeps its
    // position instead of being reseeded.
    let mut sums = vec![vec![0.0; dim]; k];
    let mut counts = vec![0usize; k];
    for (i, v) in vectors.iter().enumerate() {
      counts[assignment[i]] += 1;
      for (d, w) in v.iter().enumerate() {
        sums[assignment[i]][d] += w;
      }
    }
    for c in 0..k {
      if counts[c] > 0 {
        for w in &mut sums[c] {
          *w /= counts[c] as f64;
        }
        centroids[c] = std::mem::take(&mut sums[c]);
      }
    }
  }

  (assignment, centroids)
}

// ─── Themes ──────────────────────────────────────────────────────────────────

/// Label a cluster by its strongest centroid terms.
fn centroid_theme(centroid: &[f64], vocab: &[String]) -> String {
  let mut ranked: Vec<(usize, f64)> = centroid
    .iter()
    .copied()
    .enumerate()
    .filter(|(_, w)| *w > 0.0)
    .collect();
  ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));

  let terms: Vec<&str> =
    ranked.iter().take(THEME_TERMS).map(|(i, _)| vocab[*i].as_str()).collect();
  if terms.is_empty() {
    "other".to_string()
  } else {
    terms.join(" + ")
  }
}

/// Theme for the degenerate single-cluster path: most frequent tokens.
fn theme_from_tokens(docs: &[(usize, Vec<String>)]) -> String {
  let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
  for (_, tokens) in docs {
    for t in tokens {
      *counts.entry(t.as_str()).or_insert(0) += 1;
    }
  }
  let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
  ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

  let terms: Vec<&str> = ranked.iter().take(THEME_TERMS).map(|(t, _)| *t).collect();
  if terms.is_empty() {
    "other".to_string()
  } else {
    terms.join(" + ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kws(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn empty_input_returns_empty() {
    assert!(cluster_keywords(&[], None).is_empty());
    assert!(cluster_keywords(&[], Some(5)).is_empty());
  }

  #[test]
  fn k_one_returns_single_cluster_with_everything() {
    let keywords = kws(&["vegan cookbook", "dog training", "rust programming"]);
    let clusters = cluster_keywords(&keywords, Some(1));
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].size, 3);
    assert_eq!(clusters[0].keywords, keywords);
  }

  #[test]
  fn single_keyword_is_single_cluster() {
    let keywords = kws(&["sourdough baking"]);
    let clusters = cluster_keywords(&keywords, None);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].keywords, keywords);
  }

  #[test]
  fn identical_keywords_collapse_to_one_cluster() {
    let keywords = kws(&["mystery novel", "mystery novel", "mystery novel"]);
    let clusters = cluster_keywords(&keywords, Some(3));
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].size, 3);
  }

  #[test]
  fn k_larger_than_n_is_reduced() {
    let keywords = kws(&["vegan cookbook", "dog training"]);
    let clusters = cluster_keywords(&keywords, Some(10));
    let total: usize = clusters.iter().map(|c| c.size).sum();
    assert_eq!(total, 2);
    assert!(clusters.len() <= 2);
  }

  #[test]
  fn separates_distinct_topics() {
    let keywords = kws(&[
      "vegan cookbook",
      "vegan recipes",
      "dog training",
      "dog obedience",
    ]);
    let clusters = cluster_keywords(&keywords, Some(2));
    assert_eq!(clusters.len(), 2);

    let vegan = clusters
      .iter()
      .find(|c| c.keywords.iter().any(|k| k.contains("vegan")))
      .unwrap();
    assert_eq!(vegan.size, 2);
    assert!(vegan.keywords.iter().all(|k| k.contains("vegan")));
    assert!(vegan.theme.contains("vegan"));
  }

  #[test]
  fn unvectorizable_keywords_land_in_catch_all() {
    let keywords = kws(&["vegan cookbook", "vegan recipes", "a b", "??"]);
    let clusters = cluster_keywords(&keywords, Some(2));
    let other = clusters.iter().find(|c| c.theme == "other").unwrap();
    assert_eq!(other.size, 2);

    let total: usize = clusters.iter().map(|c| c.size).sum();
    assert_eq!(total, keywords.len());
  }

  #[test]
  fn k_one_swallows_even_unvectorizable_keywords() {
    let keywords = kws(&["vegan cookbook", "??"]);
    let clusters = cluster_keywords(&keywords, Some(1));
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].size, 2);
  }

  #[test]
  fn clustering_is_deterministic() {
    let keywords = kws(&[
      "keto diet plan",
      "keto recipes for beginners",
      "woodworking projects",
      "woodworking for beginners",
      "stock market investing",
      "investing for retirement",
    ]);
    let a = cluster_keywords(&keywords, None);
    let b = cluster_keywords(&keywords, None);
    assert_eq!(a, b);
  }

  #[test]
  fn clusters_sorted_by_size_desc() {
    let keywords = kws(&[
      "vegan cookbook",
      "vegan recipes",
      "vegan meal prep",
      "dog training",
    ]);
    let clusters = cluster_keywords(&keywords, Some(2));
    for pair in clusters.windows(2) {
      assert!(pair[0].size >= pair[1].size);
    }
  }

  #[test]
  fn tokenize_strips_stopwords_and_short_tokens() {
    assert_eq!(
      tokenize("How to Train YOUR Dragon!"),
      vec!["train", "dragon"]
    );
    assert!(tokenize("a an of").is_empty());
  }
}
