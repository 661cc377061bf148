//! In-process stores used by the test-suite and by `STORAGE=memory` demo runs.

use crate::data::config_repository::SiteConfigRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::BlogPost;
use crate::domain::site_config::SiteConfig;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: BlogPost) -> Result<BlogPost, DomainError> {
        self.posts.write().await.push(post.clone());
        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, post: BlogPost) -> Result<Option<BlogPost>, DomainError> {
        let mut posts = self.posts.write().await;
        let Some(slot) = posts.iter_mut().find(|p| p.id == post.id) else {
            return Ok(None);
        };
        // created_at is owned by the store
        let created_at = slot.created_at;
        *slot = BlogPost { created_at, ..post };
        info!(post_id = %slot.id, "post updated");
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        let removed = posts.len() != before;
        if removed {
            info!(post_id = %id, "post deleted");
        }
        Ok(removed)
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<BlogPost>, DomainError> {
        let mut posts: Vec<BlogPost> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| include_inactive || p.is_active)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }
}

#[derive(Default)]
pub struct InMemorySiteConfigRepository {
    config: RwLock<Option<SiteConfig>>,
}

impl InMemorySiteConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SiteConfigRepository for InMemorySiteConfigRepository {
    async fn find(&self) -> Result<Option<SiteConfig>, DomainError> {
        Ok(self.config.read().await.clone())
    }

    async fn insert_if_absent(&self, config: SiteConfig) -> Result<SiteConfig, DomainError> {
        let mut slot = self.config.write().await;
        Ok(slot.get_or_insert(config).clone())
    }

    async fn save(&self, config: SiteConfig) -> Result<SiteConfig, DomainError> {
        *self.config.write().await = Some(config.clone());
        info!("site config saved");
        Ok(config)
    }
}
