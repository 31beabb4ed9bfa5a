/// Mock API contract tests
///
/// CRUD behaviour of the planner and forum operations over in-memory storage.
/// Run with: cargo test --test mock_api_tests

use chrono::{Duration, Utc};
use nemesia::seed::default_document;
use nemesia::{ApiConfig, InMemoryStorage, MockApi, NemesiaError, NewPlanEntry, NewPost, NewThread};
use std::collections::HashSet;
use std::sync::Arc;

fn api() -> MockApi {
    MockApi::new(Arc::new(InMemoryStorage::new()), ApiConfig::instant()).unwrap()
}

#[tokio::test]
async fn test_fresh_store_serves_seed_data() {
    let api = api();
    let seed = default_document(Utc::now());

    assert_eq!(api.get_catalogue().await.unwrap(), seed.catalogue);
    let plan = api.get_plan().await.unwrap();
    let ids: Vec<_> = plan.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2"]);
    assert_eq!(api.get_profile().await.unwrap().currency, "NOK");
}

#[tokio::test]
async fn test_get_procedure_absent_is_none() {
    let api = api();
    let found = api.get_procedure("filler-lips").await.unwrap().unwrap();
    assert_eq!(found.repeat_every_months, 9);
    assert!(api.get_procedure("does-not-exist").await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_plan_entry_inserts_once_at_front() {
    let api = api();
    let before = api.get_plan().await.unwrap();

    let created = api
        .add_plan_entry(
            NewPlanEntry::new("laser-pigment", Utc::now(), 3100.0).clinic("Demo Clinic Oslo"),
        )
        .await
        .unwrap();

    let after = api.get_plan().await.unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[0], created);
    assert_eq!(after.iter().filter(|e| e.id == created.id).count(), 1);
    assert!(before.iter().all(|e| e.id != created.id));
    assert!(created.id.starts_with("e_"));
    assert_eq!(&after[1..], &before[..]);
}

#[tokio::test]
async fn test_add_plan_entry_rejects_unstorable_cost() {
    let api = api();
    let before = api.get_plan().await.unwrap();

    for cost in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
        let err = api
            .add_plan_entry(NewPlanEntry::new("skin-needling", Utc::now(), cost))
            .await
            .unwrap_err();
        assert!(matches!(err, NemesiaError::Validation(_)), "cost {cost}: {err}");
    }

    // nothing was saved, and the stored document still parses
    assert_eq!(api.get_plan().await.unwrap(), before);
    assert!(!api.store().load().await.is_fallback());
}

#[tokio::test]
async fn test_zero_cost_entry_survives_reload() {
    let api = api();
    let created = api
        .add_plan_entry(NewPlanEntry::new("skin-needling", Utc::now(), 0.0))
        .await
        .unwrap();

    assert!(!api.store().load().await.is_fallback());
    assert_eq!(api.get_plan().await.unwrap()[0], created);
}

#[tokio::test]
async fn test_generated_ids_are_distinct() {
    let api = api();
    let mut ids = HashSet::new();
    for i in 0..25 {
        let entry = api
            .add_plan_entry(NewPlanEntry::new("skin-needling", Utc::now(), i as f64))
            .await
            .unwrap();
        assert!(ids.insert(entry.id));
    }
    let plan = api.get_plan().await.unwrap();
    let unique: HashSet<_> = plan.iter().map(|e| e.id.clone()).collect();
    assert_eq!(unique.len(), plan.len());
}

#[tokio::test]
async fn test_delete_plan_entry_is_idempotent() {
    let api = api();

    assert!(api.delete_plan_entry("e1").await.unwrap());
    let once = api.get_plan().await.unwrap();
    assert!(once.iter().all(|e| e.id != "e1"));

    assert!(api.delete_plan_entry("e1").await.unwrap());
    let twice = api.get_plan().await.unwrap();
    assert_eq!(once, twice);

    assert!(api.delete_plan_entry("never-existed").await.unwrap());
    assert_eq!(api.get_plan().await.unwrap(), twice);
}

#[tokio::test]
async fn test_create_thread_defaults() {
    let api = api();
    let created = api
        .create_thread(NewThread::new("Retinol after peel?", "Aftercare", "How long to wait?"))
        .await
        .unwrap();

    assert_eq!(created.author, "Guest");
    assert_eq!(created.likes, 0);
    assert!(created.posts.is_empty());
    assert!(created.id.starts_with("t_"));

    let threads = api.get_forum_threads().await.unwrap();
    assert_eq!(threads.len(), 3);
    assert_eq!(threads[0], created);
}

#[tokio::test]
async fn test_add_post_appends_in_order() {
    let api = api();
    let first = api.add_post("t2", NewPost::new("Ask about complications.")).await.unwrap();
    let second = api
        .add_post("t2", NewPost::new("Ask for before/after photos.").author("Ola"))
        .await
        .unwrap();

    let thread = api.get_thread("t2").await.unwrap().unwrap();
    let ids: Vec<_> = thread.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    assert_eq!(thread.posts[0].author, "Guest");
    assert_eq!(thread.posts[1].author, "Ola");
    assert_eq!(thread.posts[1].likes, 0);
}

#[tokio::test]
async fn test_add_post_unknown_thread_is_not_found() {
    let api = api();
    let err = api.add_post("t404", NewPost::new("hello")).await.unwrap_err();
    assert!(matches!(err, NemesiaError::NotFound(_)));
    assert_eq!(api.get_forum_threads().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_like_thread_increments_by_one() {
    let api = api();
    let mut previous = 18;
    for _ in 0..5 {
        let likes = api.like_thread("t1").await.unwrap();
        assert_eq!(likes, previous + 1);
        previous = likes;
    }
    assert_eq!(api.get_thread("t1").await.unwrap().unwrap().likes, 23);
    assert!(api.like_thread("nope").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_like_post_increments_and_checks_both_ids() {
    let api = api();
    assert_eq!(api.like_post("t1", "p1").await.unwrap(), 7);
    assert_eq!(api.like_post("t1", "p1").await.unwrap(), 8);

    assert!(api.like_post("t1", "p404").await.unwrap_err().is_not_found());
    assert!(api.like_post("t404", "p1").await.unwrap_err().is_not_found());
    // p1 lives in t1, not t2
    assert!(api.like_post("t2", "p1").await.unwrap_err().is_not_found());

    let thread = api.get_thread("t1").await.unwrap().unwrap();
    assert_eq!(thread.post("p1").unwrap().likes, 8);
    assert_eq!(thread.likes, 18);
}

#[tokio::test]
async fn test_reset_restores_seed() {
    let api = api();
    api.add_plan_entry(NewPlanEntry::new("rf-tighten", Utc::now(), 5000.0))
        .await
        .unwrap();
    api.delete_plan_entry("e2").await.unwrap();
    api.create_thread(NewThread::new("x", "y", "z")).await.unwrap();
    api.like_post("t1", "p1").await.unwrap();

    assert!(api.reset().await.unwrap());

    let seed = default_document(Utc::now());
    let plan = api.get_plan().await.unwrap();
    assert_eq!(plan.len(), seed.plan.entries.len());
    for (got, want) in plan.iter().zip(&seed.plan.entries) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.procedure_id, want.procedure_id);
        assert_eq!(got.cost, want.cost);
        assert!((got.date - want.date).abs() < Duration::seconds(5));
    }

    let threads = api.get_forum_threads().await.unwrap();
    let summary: Vec<_> = threads.iter().map(|t| (t.id.as_str(), t.likes, t.posts.len())).collect();
    assert_eq!(summary, vec![("t1", 18, 1), ("t2", 31, 0)]);
    assert_eq!(threads[0].posts[0].likes, 6);
    assert_eq!(api.get_catalogue().await.unwrap(), seed.catalogue);
}

#[tokio::test]
async fn test_every_call_reloads_from_storage() {
    let backend = Arc::new(InMemoryStorage::new());
    let writer = MockApi::new(backend.clone(), ApiConfig::instant()).unwrap();
    let reader = MockApi::new(backend, ApiConfig::instant()).unwrap();

    let created = writer
        .add_plan_entry(NewPlanEntry::new("botox-brow", Utc::now(), 3900.0))
        .await
        .unwrap();
    assert_eq!(reader.get_plan().await.unwrap()[0].id, created.id);
}

#[tokio::test]
async fn test_prefill_handoff() {
    let api = api();
    let prefill = api.prefill();
    prefill.set("rf-tighten").await.unwrap();

    assert_eq!(api.prefill().take().await.unwrap().as_deref(), Some("rf-tighten"));
    assert_eq!(api.prefill().take().await.unwrap(), None);
}
