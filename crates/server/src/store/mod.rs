// SPDX-License-Identifier: Apache-2.0

mod user;

pub use user::*;

use textbridge_type::UserContext;

use async_std::io;
use camino::Utf8Path;
use cap_async_std::fs_utf8::Dir;

/// Durable user-record storage rooted at a capability-scoped directory.
#[derive(Debug)]
pub struct Store {
    root: Dir,
}

async fn upsert_dir(root: &Dir, path: impl AsRef<Utf8Path>) -> io::Result<()> {
    let path = path.as_ref();
    if !root.is_dir(path).await {
        root.create_dir(path)
    } else {
        Ok(())
    }
}

impl Store {
    /// Initializes a new [Store] at `root`.
    pub async fn new(root: Dir) -> io::Result<Self> {
        upsert_dir(&root, "users").await?;
        Ok(Self { root })
    }

    /// Returns a handle on the document for `cx`.
    pub fn user(&self, UserContext { name }: &UserContext) -> User<'_> {
        User::new(&self.root, format!("users/{name}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use textbridge_type::UserProfile;

    use async_std::fs::File;

    async fn store(dir: &tempfile::TempDir) -> Store {
        let root = File::open(dir.path()).await.unwrap();
        Store::new(Dir::from_std_file(root)).await.unwrap()
    }

    fn cx(name: &str) -> UserContext {
        name.parse().unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            name: Some("Alice Example".into()),
            email: Some("alice@example.com".into()),
            picture: Some("https://pictures.example.com/alice.png".into()),
        }
    }

    #[async_std::test]
    async fn lazy_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let user = store.user(&cx("alice"));

        assert!(matches!(user.get().await, Err(GetError::NotFound)));

        let created = user.get_or_create(&profile()).await.unwrap();
        assert_eq!(created.usage_count, 0);
        assert_eq!(created.custom_credential, None);
        assert_eq!(created.profile, profile());

        // a later sight with different claims leaves the record untouched
        let again = user.get_or_create(&UserProfile::default()).await.unwrap();
        assert_eq!(again, created);
        assert_eq!(user.get().await.unwrap(), created);
    }

    #[async_std::test]
    async fn credential_roundtrip_preserves_usage() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let user = store.user(&cx("alice"));

        let record = user.get_or_create(&profile()).await.unwrap();
        let record = user.record_free_use(&record).await.unwrap();
        let record = user.record_free_use(&record).await.unwrap();
        assert_eq!(record.usage_count, 2);

        let blob = r#"{"type":"service_account"}"#;
        let record = user
            .update(|r| r.custom_credential = Some(blob.into()))
            .await
            .unwrap();
        assert_eq!(record.custom_credential.as_deref(), Some(blob));
        assert_eq!(record.usage_count, 2);

        let record = user.update(|r| r.custom_credential = None).await.unwrap();
        assert_eq!(record.custom_credential, None);
        assert_eq!(record.usage_count, 2);
    }

    #[async_std::test]
    async fn record_free_use_increments_from_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let user = store.user(&cx("alice"));

        let snapshot = user.get_or_create(&profile()).await.unwrap();
        let first = user.record_free_use(&snapshot).await.unwrap();
        assert_eq!(first.usage_count, 1);
        assert_eq!(user.get().await.unwrap().usage_count, 1);

        // a stale snapshot overwrites; the counter is read-then-increment
        let second = user.record_free_use(&snapshot).await.unwrap();
        assert_eq!(second.usage_count, 1);
        assert_eq!(user.get().await.unwrap().usage_count, 1);
    }

    #[async_std::test]
    async fn update_missing_record_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let user = store.user(&cx("ghost"));

        assert!(matches!(
            user.update(|r| r.usage_count += 1).await,
            Err(UpdateError::NotFound)
        ));
        assert!(matches!(user.get().await, Err(GetError::NotFound)));
    }

    #[async_std::test]
    async fn records_are_isolated_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let alice = store.user(&cx("alice"));
        let bob = store.user(&cx("bob"));

        let record = alice.get_or_create(&profile()).await.unwrap();
        let _ = alice.record_free_use(&record).await.unwrap();
        let _ = bob.get_or_create(&UserProfile::default()).await.unwrap();

        assert_eq!(alice.get().await.unwrap().usage_count, 1);
        assert_eq!(bob.get().await.unwrap().usage_count, 0);
    }
}
