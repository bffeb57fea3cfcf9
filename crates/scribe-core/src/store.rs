//! The post store - CRUD over a slug-keyed collection of posts persisted in a
//! local key-value backend.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::StoreError;
use crate::ports::{Clock, Storage};
use crate::slug::generate_slug;

/// Key of the single collection entry in the storage backend.
const COLLECTION_KEY: &str = "blog_posts";

/// CRUD service for blog posts.
///
/// Every mutation is a whole-collection read-modify-write against one storage
/// key: O(n) per mutation, and the last whole-collection write wins between
/// interleaved callers. The store performs no input validation; trimming and
/// non-empty checks belong to the caller.
pub struct PostStore {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl PostStore {
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// All stored posts, most recently created first.
    ///
    /// An absent or empty collection entry yields an empty vector. A
    /// non-empty but unparseable entry surfaces as [`StoreError::Corrupt`]
    /// rather than being silently treated as empty.
    pub fn list(&self) -> Result<Vec<Post>, StoreError> {
        match self.storage.get(COLLECTION_KEY)? {
            Some(raw) if !raw.is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Look up a single post by its slug.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        let posts = self.list()?;
        Ok(posts.into_iter().find(|post| post.slug == slug))
    }

    /// Create a post, deriving a unique slug from its title.
    ///
    /// The new post is prepended so [`PostStore::list`] stays newest-first.
    pub fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
        let mut posts = self.list()?;

        let base = generate_slug(&new_post.title);
        let slug = resolve_slug(&base, &posts, None);
        let now = self.clock.now();

        let post = Post {
            id: next_id(&posts, now),
            title: new_post.title,
            content: new_post.content,
            slug,
            created_at: now,
            updated_at: now,
        };

        posts.insert(0, post.clone());
        self.persist(&posts)?;
        Ok(post)
    }

    /// Apply a partial update to the post stored under `slug`.
    ///
    /// Returns `Ok(None)` when no post matches. The slug is recomputed only
    /// when a new title is supplied and differs from the stored title, so
    /// content-only saves never change a post's public identifier or trigger a
    /// collision scan.
    pub fn update(&self, slug: &str, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        let mut posts = self.list()?;
        let Some(index) = posts.iter().position(|post| post.slug == slug) else {
            return Ok(None);
        };

        let title_changed = patch
            .title
            .as_ref()
            .is_some_and(|title| *title != posts[index].title);

        let mut post = posts[index].clone();
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        post.updated_at = self.clock.now();

        if title_changed {
            let base = generate_slug(&post.title);
            post.slug = resolve_slug(&base, &posts, Some(&post.id));
        }

        posts[index] = post.clone();
        self.persist(&posts)?;
        Ok(Some(post))
    }

    /// Delete the post stored under `slug`.
    ///
    /// Returns `false` without touching the backend when nothing matches.
    pub fn delete(&self, slug: &str) -> Result<bool, StoreError> {
        let posts = self.list()?;
        let remaining: Vec<Post> = posts
            .iter()
            .filter(|post| post.slug != slug)
            .cloned()
            .collect();

        if remaining.len() == posts.len() {
            return Ok(false);
        }

        self.persist(&remaining)?;
        Ok(true)
    }

    fn persist(&self, posts: &[Post]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(posts)?;
        self.storage.set(COLLECTION_KEY, &raw)?;
        Ok(())
    }
}

/// Find the first free slug for `base`, appending `-1`, `-2`, ... on
/// collision. `exclude_id` skips the post being updated so it never collides
/// with its own previous slug.
fn resolve_slug(base: &str, posts: &[Post], exclude_id: Option<&str>) -> String {
    let taken = |candidate: &str| {
        posts
            .iter()
            .any(|post| post.slug == candidate && exclude_id != Some(post.id.as_str()))
    };

    let mut slug = base.to_string();
    let mut counter = 1;
    while taken(&slug) {
        slug = format!("{base}-{counter}");
        counter += 1;
    }
    slug
}

/// Ids are millisecond timestamps rendered as strings, bumped until unique so
/// two posts created within the same millisecond never share an id.
fn next_id(posts: &[Post], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    while posts.iter().any(|post| post.id == millis.to_string()) {
        millis += 1;
    }
    millis.to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, RwLock};

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::ports::StorageError;

    /// String key-value fake backed by a plain map.
    #[derive(Default)]
    struct MemStorage {
        entries: RwLock<HashMap<String, String>>,
    }

    impl MemStorage {
        /// Raw persisted value, bypassing the store.
        fn raw(&self, key: &str) -> Option<String> {
            self.entries.read().unwrap().get(key).cloned()
        }

        fn put_raw(&self, key: &str, value: &str) {
            self.entries
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }
    }

    impl Storage for MemStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.read().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.put_raw(key, value);
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.write().unwrap().remove(key);
            Ok(())
        }
    }

    /// A clock that always returns a fixed point in time.
    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// A clock that advances by one minute on every read.
    struct SteppingClock {
        current: Mutex<DateTime<Utc>>,
    }

    impl SteppingClock {
        fn starting_at(start: DateTime<Utc>) -> Self {
            Self {
                current: Mutex::new(start),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut current = self.current.lock().unwrap();
            let now = *current;
            *current = now + Duration::minutes(1);
            now
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn fixed_store() -> (PostStore, Arc<MemStorage>) {
        let storage = Arc::new(MemStorage::default());
        let store = PostStore::new(storage.clone(), Arc::new(FixedClock(fixed_time())));
        (store, storage)
    }

    fn stepping_store() -> PostStore {
        PostStore::new(
            Arc::new(MemStorage::default()),
            Arc::new(SteppingClock::starting_at(fixed_time())),
        )
    }

    fn new_post(title: &str, content: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn create_derives_base_slug_and_round_trips() {
        let (store, _) = fixed_store();

        let created = store.create(new_post("My First Post", "<p>hello</p>")).unwrap();
        assert_eq!(created.slug, "my-first-post");
        assert_eq!(created.created_at, created.updated_at);

        let found = store.find_by_slug("my-first-post").unwrap().unwrap();
        assert_eq!(found.title, "My First Post");
        assert_eq!(found.content, "<p>hello</p>");
        assert_eq!(found, created);
    }

    #[test]
    fn duplicate_titles_get_increasing_suffixes() {
        let (store, _) = fixed_store();

        let first = store.create(new_post("Launch Update", "a")).unwrap();
        let second = store.create(new_post("Launch Update", "b")).unwrap();
        let third = store.create(new_post("Launch Update", "c")).unwrap();

        assert_eq!(first.slug, "launch-update");
        assert_eq!(second.slug, "launch-update-1");
        assert_eq!(third.slug, "launch-update-2");
    }

    #[test]
    fn list_is_newest_first() {
        let (store, _) = fixed_store();

        store.create(new_post("Oldest", "a")).unwrap();
        store.create(new_post("Middle", "b")).unwrap();
        store.create(new_post("Newest", "c")).unwrap();

        let titles: Vec<String> = store.list().unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn list_is_empty_when_backend_has_no_entry() {
        let (store, _) = fixed_store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn list_is_empty_when_entry_is_an_empty_string() {
        let (store, storage) = fixed_store();
        storage.put_raw("blog_posts", "");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn find_by_slug_returns_none_for_missing_post() {
        let (store, _) = fixed_store();
        assert!(store.find_by_slug("nope").unwrap().is_none());
    }

    #[test]
    fn content_only_update_keeps_slug_and_created_at() {
        let store = stepping_store();

        let created = store.create(new_post("Stable Title", "v1")).unwrap();
        let updated = store
            .update(
                "stable-title",
                PostPatch {
                    title: None,
                    content: Some("v2".to_string()),
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.slug, created.slug);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.content, "v2");
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn resaving_identical_title_keeps_suffixed_slug() {
        let (store, _) = fixed_store();

        store.create(new_post("Alpha", "a")).unwrap();
        let second = store.create(new_post("Alpha", "b")).unwrap();
        assert_eq!(second.slug, "alpha-1");

        // Same title string again: no recompute, no collision scan.
        let updated = store
            .update(
                "alpha-1",
                PostPatch {
                    title: Some("Alpha".to_string()),
                    content: Some("b2".to_string()),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.slug, "alpha-1");
    }

    #[test]
    fn title_update_colliding_with_other_post_gets_suffix() {
        let (store, _) = fixed_store();

        store.create(new_post("Alpha", "a")).unwrap();
        store.create(new_post("Beta", "b")).unwrap();

        let updated = store
            .update(
                "beta",
                PostPatch {
                    title: Some("Alpha".to_string()),
                    content: None,
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.slug, "alpha-1");
    }

    #[test]
    fn title_update_colliding_only_with_own_slug_keeps_it() {
        let (store, _) = fixed_store();

        store.create(new_post("Alpha", "a")).unwrap();

        // "Alpha!" derives the same slug the post already owns.
        let updated = store
            .update(
                "alpha",
                PostPatch {
                    title: Some("Alpha!".to_string()),
                    content: None,
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.slug, "alpha");
        assert_eq!(updated.title, "Alpha!");
    }

    #[test]
    fn update_missing_slug_returns_none() {
        let (store, _) = fixed_store();
        let result = store.update("ghost", PostPatch::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn update_does_not_reorder_collection() {
        let (store, _) = fixed_store();

        store.create(new_post("One", "a")).unwrap();
        store.create(new_post("Two", "b")).unwrap();

        store
            .update(
                "one",
                PostPatch {
                    title: None,
                    content: Some("a2".to_string()),
                },
            )
            .unwrap()
            .unwrap();

        let slugs: Vec<String> = store.list().unwrap().into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, ["two", "one"]);
    }

    #[test]
    fn delete_missing_slug_leaves_persisted_bytes_untouched() {
        let (store, storage) = fixed_store();

        store.create(new_post("Keep Me", "a")).unwrap();
        let before = storage.raw("blog_posts").unwrap();

        assert!(!store.delete("ghost").unwrap());
        assert_eq!(storage.raw("blog_posts").unwrap(), before);
    }

    #[test]
    fn delete_all_posts_leaves_consistent_empty_collection() {
        let (store, storage) = fixed_store();

        store.create(new_post("One", "a")).unwrap();
        store.create(new_post("Two", "b")).unwrap();

        assert!(store.delete("one").unwrap());
        assert!(store.delete("two").unwrap());

        assert!(store.list().unwrap().is_empty());
        assert_eq!(storage.raw("blog_posts").unwrap(), "[]");
    }

    #[test]
    fn ids_stay_unique_under_a_fixed_clock() {
        let (store, _) = fixed_store();

        let first = store.create(new_post("One", "a")).unwrap();
        let second = store.create(new_post("Two", "b")).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn corrupt_collection_surfaces_an_error() {
        let (store, storage) = fixed_store();
        storage.put_raw("blog_posts", "{definitely not json");

        let result = store.list();
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn store_trusts_callers_with_empty_input() {
        let (store, _) = fixed_store();

        // Validation belongs to the caller; the store persists what it gets.
        let created = store.create(new_post("", "")).unwrap();
        assert_eq!(created.slug, "");
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
