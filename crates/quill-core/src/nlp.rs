//! Lightweight text helpers: phrase variations, long-tail templates,
//! n-grams, intent and pattern analysis.
//!
//! Everything here is a pure function over strings. Output order is
//! deterministic: variation lists preserve generation order and drop
//! duplicates as they appear.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cluster::tokenize;

const MAX_PHRASE_VARIATIONS: usize = 25;
const MAX_LONG_TAIL: usize = 20;
const MAX_COMMON_WORDS: usize = 10;

/// Book-market modifiers prepended to a keyword.
const PREFIXES: &[&str] =
  &["best", "top", "ultimate", "complete", "beginner", "advanced", "how to", "guide to"];
/// Book-market modifiers appended to a keyword.
const SUFFIXES: &[&str] =
  &["guide", "book", "manual", "handbook", "tutorial", "course", "tips", "secrets"];
const QUESTION_STARTERS: &[&str] = &["how to", "what is", "why is", "when to", "where to"];

const QUESTION_WORDS: &[&str] = &["how", "what", "why", "when", "where", "who", "which"];
const ACTION_WORDS: &[&str] =
  &["buy", "get", "find", "learn", "make", "create", "build", "start"];
const COMMERCIAL_WORDS: &[&str] =
  &["buy", "purchase", "price", "cost", "cheap", "discount", "deal", "sale", "order"];

// ─── Variations ──────────────────────────────────────────────────────────────

/// Word reorderings, common modifiers, and question forms of a keyword.
pub fn phrase_variations(keyword: &str) -> Vec<String> {
  let keyword = keyword.trim();
  if keyword.is_empty() {
    return Vec::new();
  }

  let mut out: Vec<String> = Vec::new();
  let mut push = |candidate: String| {
    if !out.contains(&candidate) {
      out.push(candidate);
    }
  };

  push(keyword.to_string());

  let words: Vec<&str> = keyword.split_whitespace().collect();
  if words.len() > 1 {
    push(words.iter().rev().cloned().collect::<Vec<_>>().join(" "));
    if words.len() >= 3 {
      push(format!("{} {}", words[words.len() - 1], words[..words.len() - 1].join(" ")));
      push(format!("{} {} {}", words[1], words[0], words[2..].join(" ")).trim().to_string());
    }
  }

  let lower = keyword.to_lowercase();
  for prefix in PREFIXES {
    if !lower.starts_with(prefix) {
      push(format!("{prefix} {keyword}"));
    }
  }
  for suffix in SUFFIXES {
    push(format!("{keyword} {suffix}"));
  }
  for starter in QUESTION_STARTERS {
    if !lower.starts_with(starter) {
      push(format!("{starter} {keyword}"));
    }
  }

  out.truncate(MAX_PHRASE_VARIATIONS);
  out
}

/// Templated long-tail forms aimed at book niches, plus question forms.
pub fn long_tail_variations(keyword: &str) -> Vec<String> {
  let keyword = keyword.trim();
  if keyword.is_empty() {
    return Vec::new();
  }

  let templates = [
    format!("how to {keyword}"),
    format!("best {keyword} book"),
    format!("{keyword} for beginners"),
    format!("{keyword} step by step"),
    format!("complete guide to {keyword}"),
    format!("{keyword} made easy"),
    format!("learn {keyword}"),
    format!("{keyword} secrets"),
    format!("{keyword} tips and tricks"),
    format!("ultimate {keyword} guide"),
    format!("{keyword} handbook"),
    format!("{keyword} mastery"),
    format!("beginner's guide to {keyword}"),
    format!("{keyword} for dummies"),
    format!("advanced {keyword} techniques"),
    format!("what is {keyword}"),
    format!("how does {keyword} work"),
    format!("why use {keyword}"),
    format!("when to use {keyword}"),
    format!("where to learn {keyword}"),
  ];

  let mut out: Vec<String> = Vec::new();
  for t in templates {
    if !out.contains(&t) {
      out.push(t);
    }
  }
  out.truncate(MAX_LONG_TAIL);
  out
}

/// Stopword-filtered n-grams of `text`. Too-short input yields nothing.
pub fn ngrams(text: &str, n: usize) -> Vec<String> {
  if n == 0 {
    return Vec::new();
  }
  let tokens = tokenize(text);
  if tokens.len() < n {
    return Vec::new();
  }
  tokens.windows(n).map(|w| w.join(" ")).collect()
}

// ─── Intent ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
  Informational,
  Commercial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specificity {
  General,
  Moderate,
  Specific,
  HighlySpecific,
}

/// Signals about what a searcher typing this keyword is after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordIntent {
  pub intent_type:        IntentType,
  pub commercial_signals: usize,
  pub urgency:            Urgency,
  pub specificity:        Specificity,
  pub question_based:     bool,
}

pub fn keyword_intent(keyword: &str) -> KeywordIntent {
  let lower = keyword.to_lowercase();

  let commercial_signals =
    COMMERCIAL_WORDS.iter().filter(|w| lower.contains(*w)).count();

  let question_based =
    QUESTION_WORDS.iter().any(|w| lower.starts_with(w));

  // A question form reads as informational even when it mentions price.
  let intent_type = if question_based || commercial_signals == 0 {
    IntentType::Informational
  } else {
    IntentType::Commercial
  };

  let urgency = if ["now", "today", "immediately", "urgent", "quick", "fast"]
    .iter()
    .any(|w| lower.contains(w))
  {
    Urgency::High
  } else if ["soon", "this week", "asap"].iter().any(|w| lower.contains(w)) {
    Urgency::Medium
  } else {
    Urgency::Low
  };

  let specificity = match keyword.split_whitespace().count() {
    0 | 1 => Specificity::General,
    2 => Specificity::Moderate,
    3 => Specificity::Specific,
    _ => Specificity::HighlySpecific,
  };

  KeywordIntent { intent_type, commercial_signals, urgency, specificity, question_based }
}

// ─── Patterns ────────────────────────────────────────────────────────────────

/// Aggregate shape of a keyword list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordPatterns {
  /// Mean word count per keyword.
  pub average_length:          f64,
  /// Share of keywords with three or more words, in percent.
  pub long_tail_percentage:    f64,
  pub question_keywords:       Vec<String>,
  pub action_keywords:         Vec<String>,
  /// Most frequent words (length > 2), descending.
  pub common_words:            Vec<(String, usize)>,
  pub word_count_distribution: BTreeMap<usize, usize>,
}

pub fn keyword_patterns(keywords: &[String]) -> KeywordPatterns {
  if keywords.is_empty() {
    return KeywordPatterns::default();
  }

  let lengths: Vec<usize> =
    keywords.iter().map(|k| k.split_whitespace().count()).collect();
  let average_length =
    round2(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64);

  let long_tail = lengths.iter().filter(|l| **l >= 3).count();
  let long_tail_percentage =
    round2(long_tail as f64 / keywords.len() as f64 * 100.0);

  let mut word_count_distribution = BTreeMap::new();
  for l in &lengths {
    *word_count_distribution.entry(*l).or_insert(0) += 1;
  }

  let question_keywords = keywords
    .iter()
    .filter(|k| {
      let lower = k.to_lowercase();
      QUESTION_WORDS.iter().any(|w| lower.starts_with(w))
    })
    .cloned()
    .collect();

  let action_keywords = keywords
    .iter()
    .filter(|k| {
      let lower = k.to_lowercase();
      ACTION_WORDS.iter().any(|w| lower.contains(w))
    })
    .cloned()
    .collect();

  let mut freq: BTreeMap<String, usize> = BTreeMap::new();
  for keyword in keywords {
    for word in keyword
      .split(|c: char| !c.is_alphanumeric())
      .map(str::to_lowercase)
      .filter(|w| w.len() > 2)
    {
      *freq.entry(word).or_insert(0) += 1;
    }
  }
  let mut common_words: Vec<(String, usize)> = freq.into_iter().collect();
  common_words.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
  common_words.truncate(MAX_COMMON_WORDS);

  KeywordPatterns {
    average_length,
    long_tail_percentage,
    question_keywords,
    action_keywords,
    common_words,
    word_count_distribution,
  }
}

fn round2(v: f64) -> f64 { (v * 100.0).round() / 100.0 }

// ─── Book categories ─────────────────────────────────────────────────────────

/// Genre buckets keyed off title words; first bucket with a hit wins per
/// title.
const CATEGORY_HINTS: &[(&str, &[&str])] = &[
  ("Cooking & Food", &["cookbook", "recipe", "cooking"]),
  ("Romance", &["romance", "love"]),
  ("Mystery & Thriller", &["mystery", "thriller", "crime"]),
  ("Business", &["business", "entrepreneur", "success"]),
  ("Health & Fitness", &["health", "fitness", "diet"]),
  ("Children's Books", &["children", "kids"]),
];

/// Guess coarse genre categories from competing listing titles. Order of
/// first appearance, no duplicates.
pub fn book_categories<S: AsRef<str>>(titles: &[S]) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  for title in titles {
    let lower = title.as_ref().to_lowercase();
    for (category, hints) in CATEGORY_HINTS {
      if hints.iter().any(|h| lower.contains(h)) {
        if !out.iter().any(|c| c == category) {
          out.push((*category).to_string());
        }
        break;
      }
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn variations_start_with_the_seed_and_dedupe() {
    let vars = phrase_variations("sourdough baking");
    assert_eq!(vars[0], "sourdough baking");
    assert!(vars.contains(&"best sourdough baking".to_string()));
    assert!(vars.contains(&"sourdough baking guide".to_string()));
    assert!(vars.len() <= 25);

    let mut sorted = vars.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), vars.len(), "variations must be unique");
  }

  #[test]
  fn question_prefix_is_not_doubled() {
    let vars = phrase_variations("how to knit");
    assert!(!vars.contains(&"how to how to knit".to_string()));
  }

  #[test]
  fn empty_keyword_yields_nothing() {
    assert!(phrase_variations("  ").is_empty());
    assert!(long_tail_variations("").is_empty());
  }

  #[test]
  fn long_tail_is_capped_and_templated() {
    let vars = long_tail_variations("watercolor painting");
    assert!(vars.len() <= 20);
    assert!(vars.contains(&"watercolor painting for beginners".to_string()));
    assert!(vars.contains(&"how to watercolor painting".to_string()));
  }

  #[test]
  fn ngrams_window_over_filtered_tokens() {
    let grams = ngrams("learn watercolor painting fast", 2);
    assert_eq!(grams, vec!["learn watercolor", "watercolor painting", "painting fast"]);
    assert!(ngrams("single", 2).is_empty());
    assert!(ngrams("anything", 0).is_empty());
  }

  #[test]
  fn intent_detects_commercial_and_question() {
    let buy = keyword_intent("buy cheap guitar");
    assert_eq!(buy.intent_type, IntentType::Commercial);
    assert!(buy.commercial_signals >= 2);

    let how = keyword_intent("how to play guitar");
    assert_eq!(how.intent_type, IntentType::Informational);
    assert!(how.question_based);
    assert_eq!(how.specificity, Specificity::HighlySpecific);
  }

  #[test]
  fn patterns_on_empty_input_are_default() {
    assert_eq!(keyword_patterns(&[]), KeywordPatterns::default());
  }

  #[test]
  fn book_categories_bucket_by_title_words() {
    let titles = [
      "The Ultimate Vegan Cookbook",
      "Slow Cooker Recipes",
      "A Cornish Romance",
      "Linear Algebra Done Right",
    ];
    assert_eq!(book_categories(&titles), vec!["Cooking & Food", "Romance"]);
    assert!(book_categories::<&str>(&[]).is_empty());
  }

  #[test]
  fn patterns_compute_long_tail_share() {
    let keywords: Vec<String> = ["dog", "dog training", "dog training for puppies"]
      .iter()
      .map(|s| s.to_string())
      .collect();
    let p = keyword_patterns(&keywords);
    assert_eq!(p.average_length, 2.33);
    assert_eq!(p.long_tail_percentage, 33.33);
    assert_eq!(p.word_count_distribution.get(&1), Some(&1));
    assert_eq!(p.common_words[0], ("dog".to_string(), 3));
  }
}
