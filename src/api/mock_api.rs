use super::config::{ApiConfig, Operation};
use super::ids::{self, PLAN_ENTRY_PREFIX, POST_PREFIX, THREAD_PREFIX};
use crate::core::{NemesiaError, Result};
use crate::model::{
    Document, ForumThread, NewPlanEntry, NewPost, NewThread, PlanEntry, Post, Procedure, Profile,
};
use crate::store::{DocumentStore, FallbackReason, LoadOutcome, Prefill};
use crate::storage::StorageBackend;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Latency-simulating CRUD facade over the document store.
///
/// Holds no data between calls: every operation reloads the full document.
/// Mutations run load-mutate-save under one async lock, so concurrent callers
/// sharing a `MockApi` (or its clones) never overwrite each other's changes.
/// Separate `MockApi` instances over the same backend do not share the lock.
#[derive(Clone)]
pub struct MockApi {
    store: DocumentStore,
    config: ApiConfig,
    write_lock: Arc<Mutex<()>>,
}

impl MockApi {
    pub fn new(backend: Arc<dyn StorageBackend>, config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let store = DocumentStore::with_key(backend, config.storage_key.clone());
        Ok(Self {
            store,
            config,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Catalogue-to-planner hand-off slot on the same backend
    pub fn prefill(&self) -> Prefill {
        Prefill::new(self.store.backend().clone())
    }

    // ------------------------------------------------------------------------
    // Profile & catalogue
    // ------------------------------------------------------------------------

    pub async fn get_profile(&self) -> Result<Profile> {
        Ok(self.read(Operation::GetProfile).await.profile)
    }

    pub async fn get_catalogue(&self) -> Result<Vec<Procedure>> {
        Ok(self.read(Operation::GetCatalogue).await.catalogue)
    }

    /// `None` when no procedure has this id; absence is not an error.
    pub async fn get_procedure(&self, id: &str) -> Result<Option<Procedure>> {
        let doc = self.read(Operation::GetProcedure).await;
        Ok(doc.catalogue.into_iter().find(|p| p.id == id))
    }

    // ------------------------------------------------------------------------
    // Plan
    // ------------------------------------------------------------------------

    pub async fn get_plan(&self) -> Result<Vec<PlanEntry>> {
        Ok(self.read(Operation::GetPlan).await.plan.entries)
    }

    /// Insert at the front with a fresh id. Costs that are negative or not
    /// finite are rejected with `Validation` and nothing is saved.
    pub async fn add_plan_entry(&self, entry: NewPlanEntry) -> Result<PlanEntry> {
        entry.validate()?;
        self.mutate(Operation::AddPlanEntry, |doc| {
            let created = PlanEntry::from_new(ids::generate(PLAN_ENTRY_PREFIX), entry);
            doc.plan.entries.insert(0, created.clone());
            Ok(created)
        })
        .await
    }

    /// Remove every entry with `id`. Deleting an unknown id is a no-op and
    /// still reports success.
    pub async fn delete_plan_entry(&self, id: &str) -> Result<bool> {
        self.mutate(Operation::DeletePlanEntry, |doc| {
            let before = doc.plan.entries.len();
            doc.plan.entries.retain(|e| e.id != id);
            debug!(entry_id = id, removed = before - doc.plan.entries.len(), "plan entry delete");
            Ok(true)
        })
        .await
    }

    // ------------------------------------------------------------------------
    // Forum
    // ------------------------------------------------------------------------

    pub async fn get_forum_threads(&self) -> Result<Vec<ForumThread>> {
        Ok(self.read(Operation::GetForumThreads).await.forum.threads)
    }

    pub async fn get_thread(&self, thread_id: &str) -> Result<Option<ForumThread>> {
        let doc = self.read(Operation::GetThread).await;
        Ok(doc.forum.threads.into_iter().find(|t| t.id == thread_id))
    }

    pub async fn create_thread(&self, thread: NewThread) -> Result<ForumThread> {
        let author = self.author_or_guest(thread.author);
        self.mutate(Operation::CreateThread, |doc| {
            let created = ForumThread {
                id: ids::generate(THREAD_PREFIX),
                title: thread.title,
                tag: thread.tag,
                created_at: Utc::now(),
                author,
                body: thread.body,
                likes: 0,
                posts: Vec::new(),
            };
            doc.forum.threads.insert(0, created.clone());
            Ok(created)
        })
        .await
    }

    pub async fn add_post(&self, thread_id: &str, post: NewPost) -> Result<Post> {
        let author = self.author_or_guest(post.author);
        self.mutate(Operation::AddPost, |doc| {
            let thread = thread_mut(doc, thread_id)?;
            let created = Post {
                id: ids::generate(POST_PREFIX),
                author,
                created_at: Utc::now(),
                body: post.body,
                likes: 0,
            };
            thread.posts.push(created.clone());
            Ok(created)
        })
        .await
    }

    /// Returns the new like count.
    pub async fn like_thread(&self, thread_id: &str) -> Result<u64> {
        self.mutate(Operation::LikeThread, |doc| {
            let thread = thread_mut(doc, thread_id)?;
            thread.likes = thread.likes.saturating_add(1);
            Ok(thread.likes)
        })
        .await
    }

    /// Returns the new like count.
    pub async fn like_post(&self, thread_id: &str, post_id: &str) -> Result<u64> {
        self.mutate(Operation::LikePost, |doc| {
            let thread = thread_mut(doc, thread_id)?;
            let post = thread
                .posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| {
                    NemesiaError::not_found(format!(
                        "post '{}' in thread '{}'",
                        post_id, thread_id
                    ))
                })?;
            post.likes = post.likes.saturating_add(1);
            Ok(post.likes)
        })
        .await
    }

    // ------------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------------

    /// Discard every change and restore the seed document.
    pub async fn reset(&self) -> Result<bool> {
        self.pause(Operation::Reset).await;
        let _guard = self.write_lock.lock().await;
        self.store.reset().await?;
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    async fn pause(&self, op: Operation) {
        let delay = self.config.latency_for(op);
        debug!(operation = %op, delay_ms = delay.as_millis() as u64, "mock api call");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    async fn read(&self, op: Operation) -> Document {
        self.pause(op).await;
        self.store.load().await.into_document()
    }

    /// Load, apply `apply`, save. Nothing is saved when `apply` fails.
    ///
    /// A backend read failure aborts with `Storage`: the stored value may be
    /// intact, and saving the seed over it would lose it. Missing and corrupt
    /// documents are replaced by the seed as usual.
    async fn mutate<T, F>(&self, op: Operation, apply: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        self.pause(op).await;
        let _guard = self.write_lock.lock().await;
        let mut doc = match self.store.load().await {
            LoadOutcome::Fallback(_, FallbackReason::Unreadable(err)) => {
                return Err(NemesiaError::storage(format!(
                    "cannot read '{}' before {op}: {err}",
                    self.store.key()
                )));
            }
            outcome => outcome.into_document(),
        };
        let out = apply(&mut doc)?;
        self.store.save(&doc).await?;
        Ok(out)
    }

    fn author_or_guest(&self, author: Option<String>) -> String {
        author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.config.guest_author.clone())
    }
}

fn thread_mut<'a>(doc: &'a mut Document, thread_id: &str) -> Result<&'a mut ForumThread> {
    doc.thread_mut(thread_id)
        .ok_or_else(|| NemesiaError::not_found(format!("thread '{}'", thread_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use std::time::{Duration, Instant};

    fn api() -> MockApi {
        MockApi::new(Arc::new(InMemoryStorage::new()), ApiConfig::instant()).unwrap()
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_save() {
        let api = api();
        let err = api.like_thread("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!api.store().backend().contains("nemesia_db_v1").await.unwrap());
    }

    /// Reads fail; counts writes.
    struct BrokenReads {
        writes: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl StorageBackend for BrokenReads {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(NemesiaError::storage("disk went away"))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            self.writes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unreadable_store_blocks_mutations() {
        let backend = Arc::new(BrokenReads {
            writes: Default::default(),
        });
        let api = MockApi::new(backend.clone(), ApiConfig::instant()).unwrap();

        // reads still serve the seed
        assert_eq!(api.get_plan().await.unwrap().len(), 2);

        let err = api
            .add_plan_entry(NewPlanEntry::new("botox-brow", Utc::now(), 3900.0))
            .await
            .unwrap_err();
        assert!(matches!(err, NemesiaError::Storage(_)));
        assert!(matches!(
            api.like_thread("t1").await,
            Err(NemesiaError::Storage(_))
        ));
        assert_eq!(backend.writes.load(std::sync::atomic::Ordering::SeqCst), 0);

        // an explicit reset still overwrites
        api.reset().await.unwrap();
        assert_eq!(backend.writes.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_author_becomes_guest() {
        let api = MockApi::new(
            Arc::new(InMemoryStorage::new()),
            ApiConfig::instant().guest_author("Visitor"),
        )
        .unwrap();
        let thread = api
            .create_thread(NewThread::new("Title", "Aftercare", "Body").author("   "))
            .await
            .unwrap();
        assert_eq!(thread.author, "Visitor");
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let result = MockApi::new(
            Arc::new(InMemoryStorage::new()),
            ApiConfig::instant().storage_key(""),
        );
        assert!(matches!(result, Err(NemesiaError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_simulated_latency_is_applied() {
        let api = MockApi::new(
            Arc::new(InMemoryStorage::new()),
            ApiConfig::new().latency_scale(0.1),
        )
        .unwrap();
        let started = Instant::now();
        api.get_catalogue().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(22));
    }
}
