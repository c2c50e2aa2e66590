//! Integration tests for `SqliteStore` against an in-memory database.

use quill_core::{
  keyword::{CompetitionSummary, KeywordResult, KeywordSignals, TrendSummary},
  session::{NewFavorite, NewSession},
  store::ResearchStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn sample_result(keyword: &str) -> KeywordResult {
  KeywordResult::from_signals(
    keyword,
    KeywordSignals {
      expanded: vec![format!("{keyword} for beginners")],
      trends: TrendSummary {
        interest_over_time: vec![10.0, 40.0, 65.0],
        average_interest:   38.3,
        related_top:        vec![format!("best {keyword}")],
        related_rising:     Vec::new(),
      },
      competition: CompetitionSummary::from_listings(4_200, Vec::new()),
    },
  )
}

fn sample_session(name: &str, keywords: &[&str]) -> NewSession {
  NewSession {
    name:    name.to_string(),
    results: keywords.iter().map(|k| sample_result(k)).collect(),
  }
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_session_roundtrips_results() {
  let s = store().await;

  let saved = s
    .save_session(sample_session("morning run", &["vegan cookbook", "dog training"]))
    .await
    .unwrap();
  assert_eq!(saved.name, "morning run");
  assert_eq!(saved.results.len(), 2);

  let fetched = s.get_session(saved.session_id).await.unwrap().unwrap();
  assert_eq!(fetched.session_id, saved.session_id);
  assert_eq!(fetched.results, saved.results);
  assert_eq!(fetched.created_at, saved.created_at);
}

#[tokio::test]
async fn get_session_missing_returns_none() {
  let s = store().await;
  let result = s.get_session(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn list_sessions_newest_first_without_blobs() {
  let s = store().await;
  s.save_session(sample_session("first", &["a keyword"])).await.unwrap();
  s.save_session(sample_session("second", &["one", "two", "three"]))
    .await
    .unwrap();

  let all = s.list_sessions(None).await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(all[0].created_at >= all[1].created_at);

  let second = all.iter().find(|l| l.name == "second").unwrap();
  assert_eq!(second.keyword_count, 3);
}

#[tokio::test]
async fn list_sessions_honors_limit() {
  let s = store().await;
  for i in 0..5 {
    s.save_session(sample_session(&format!("run {i}"), &["kw"]))
      .await
      .unwrap();
  }

  let limited = s.list_sessions(Some(2)).await.unwrap();
  assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn delete_session_removes_it() {
  let s = store().await;
  let saved = s.save_session(sample_session("doomed", &["kw"])).await.unwrap();

  s.delete_session(saved.session_id).await.unwrap();
  assert!(s.get_session(saved.session_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_session_errors() {
  let s = store().await;
  let err = s.delete_session(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, crate::Error::SessionNotFound(_)));
}

#[tokio::test]
async fn empty_session_roundtrips() {
  let s = store().await;
  let saved = s.save_session(sample_session("empty", &[])).await.unwrap();

  let fetched = s.get_session(saved.session_id).await.unwrap().unwrap();
  assert!(fetched.results.is_empty());

  let listed = s.list_sessions(None).await.unwrap();
  assert_eq!(listed[0].keyword_count, 0);
}

// ─── Favorites ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_favorites() {
  let s = store().await;

  let fav = s
    .add_favorite(NewFavorite {
      keyword:    "sourdough baking".into(),
      notes:      Some("strong niche".into()),
      session_id: None,
    })
    .await
    .unwrap();
  assert_eq!(fav.keyword, "sourdough baking");

  let all = s.list_favorites().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].notes.as_deref(), Some("strong niche"));
}

#[tokio::test]
async fn duplicate_favorite_is_a_typed_error() {
  let s = store().await;
  s.add_favorite(NewFavorite::new("keto snacks")).await.unwrap();

  let err = s.add_favorite(NewFavorite::new("keto snacks")).await.unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateFavorite(k) if k == "keto snacks"));

  // the original row is untouched
  assert_eq!(s.list_favorites().await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_favorite_by_keyword() {
  let s = store().await;
  s.add_favorite(NewFavorite::new("keto snacks")).await.unwrap();

  s.remove_favorite("keto snacks").await.unwrap();
  assert!(s.list_favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_missing_favorite_errors() {
  let s = store().await;
  let err = s.remove_favorite("never added").await.unwrap_err();
  assert!(matches!(err, crate::Error::FavoriteNotFound(k) if k == "never added"));
}

#[tokio::test]
async fn favorite_survives_deleting_its_session() {
  let s = store().await;
  let session = s.save_session(sample_session("source", &["kw"])).await.unwrap();

  s.add_favorite(NewFavorite {
    keyword:    "kw".into(),
    notes:      None,
    session_id: Some(session.session_id),
  })
  .await
  .unwrap();

  s.delete_session(session.session_id).await.unwrap();

  // the link is cleared, not the favorite
  let favs = s.list_favorites().await.unwrap();
  assert_eq!(favs.len(), 1);
  assert!(favs[0].session_id.is_none());
}
