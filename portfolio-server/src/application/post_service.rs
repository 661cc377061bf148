use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::admin::AdminIdentity;
use crate::domain::error::DomainError;
use crate::domain::post::{
    BlogPost, PostDraft, PostPatch, SortOrder, parse_post_id, sort_for_display,
};
use chrono::Utc;
use tracing::instrument;

pub struct PostService<R: PostRepository + 'static> {
    repo: Arc<R>,
}

// manual impl: the repository itself need not be Clone
impl<R: PostRepository + 'static> Clone for PostService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> PostService<R>
where
    R: PostRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Active posts, newest first. No pinning applied.
    pub async fn list_public(&self) -> Result<Vec<BlogPost>, DomainError> {
        self.repo.list(false).await
    }

    /// Active posts in display order: pinned first, then by date.
    pub async fn list_public_for_display(
        &self,
        order: SortOrder,
    ) -> Result<Vec<BlogPost>, DomainError> {
        let mut posts = self.repo.list(false).await?;
        sort_for_display(&mut posts, order);
        Ok(posts)
    }

    pub async fn list_all(&self, _admin: &AdminIdentity) -> Result<Vec<BlogPost>, DomainError> {
        self.repo.list(true).await
    }

    pub async fn get_post(&self, raw_id: &str) -> Result<BlogPost, DomainError> {
        let id = parse_post_id(raw_id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(raw_id.to_string()))
    }

    #[instrument(skip(self, admin), fields(admin = %admin.email()))]
    pub async fn create_post(
        &self,
        admin: &AdminIdentity,
        draft: PostDraft,
    ) -> Result<BlogPost, DomainError> {
        let post = BlogPost::new(draft, Utc::now())?;
        self.repo.create(post).await
    }

    #[instrument(skip(self, admin, patch), fields(admin = %admin.email()))]
    pub async fn update_post(
        &self,
        admin: &AdminIdentity,
        raw_id: &str,
        patch: PostPatch,
    ) -> Result<BlogPost, DomainError> {
        let mut post = self.get_post(raw_id).await?;
        post.apply(patch, Utc::now())?;
        match self.repo.update(post).await? {
            Some(post) => Ok(post),
            None => Err(DomainError::PostNotFound(raw_id.to_string())),
        }
    }

    #[instrument(skip(self, admin), fields(admin = %admin.email()))]
    pub async fn delete_post(&self, admin: &AdminIdentity, raw_id: &str) -> Result<(), DomainError> {
        let id = parse_post_id(raw_id)?;
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::PostNotFound(raw_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryPostRepository;
    use chrono::{TimeZone, Utc};

    fn service() -> PostService<InMemoryPostRepository> {
        PostService::new(Arc::new(InMemoryPostRepository::new()))
    }

    fn admin() -> AdminIdentity {
        AdminIdentity::new("admin@example.com")
    }

    fn draft(title: &str, year: i32) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            url: format!("https://blog.example.com/{}", title.to_lowercase()),
            published_at: Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn public_listing_hides_inactive_posts() {
        let svc = service();
        let visible = svc.create_post(&admin(), draft("Visible", 2022)).await.unwrap();
        let hidden = svc.create_post(&admin(), draft("Hidden", 2023)).await.unwrap();
        svc.update_post(
            &admin(),
            &hidden.id.to_string(),
            PostPatch {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let public = svc.list_public().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, visible.id);

        let all = svc.list_all(&admin()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, hidden.id, "newest first");
    }

    #[tokio::test]
    async fn display_listing_puts_pinned_first() {
        let svc = service();
        let mut a = draft("A", 2021);
        a.is_pinned = Some(true);
        let mut c = draft("C", 2022);
        c.is_pinned = Some(true);
        svc.create_post(&admin(), a).await.unwrap();
        svc.create_post(&admin(), draft("B", 2023)).await.unwrap();
        svc.create_post(&admin(), c).await.unwrap();

        let base: Vec<_> = svc
            .list_public()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(base, ["B", "C", "A"]);

        let display: Vec<_> = svc
            .list_public_for_display(SortOrder::Newest)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(display, ["C", "A", "B"]);
    }

    #[tokio::test]
    async fn update_with_empty_description_is_applied() {
        let svc = service();
        let mut d = draft("Post", 2022);
        d.description = Some("a summary".into());
        let post = svc.create_post(&admin(), d).await.unwrap();

        let updated = svc
            .update_post(
                &admin(),
                &post.id.to_string(),
                PostPatch {
                    description: Some(Some(String::new())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some(""));
        assert_eq!(svc.get_post(&post.id.to_string()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn invalid_update_leaves_stored_post_unchanged() {
        let svc = service();
        let post = svc.create_post(&admin(), draft("Post", 2022)).await.unwrap();

        let err = svc
            .update_post(
                &admin(),
                &post.id.to_string(),
                PostPatch {
                    title: Some("  ".into()),
                    is_pinned: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
        assert_eq!(svc.get_post(&post.id.to_string()).await.unwrap(), post);
    }

    #[tokio::test]
    async fn missing_and_malformed_ids_are_not_found() {
        let svc = service();
        let missing = uuid::Uuid::new_v4().to_string();

        for id in [missing.as_str(), "not-an-id"] {
            assert!(matches!(svc.get_post(id).await, Err(DomainError::PostNotFound(_))));
            assert!(matches!(
                svc.delete_post(&admin(), id).await,
                Err(DomainError::PostNotFound(_))
            ));
            assert!(matches!(
                svc.update_post(&admin(), id, PostPatch::default()).await,
                Err(DomainError::PostNotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn delete_is_permanent() {
        let svc = service();
        let post = svc.create_post(&admin(), draft("Gone", 2022)).await.unwrap();
        let id = post.id.to_string();

        svc.delete_post(&admin(), &id).await.unwrap();
        assert!(matches!(svc.get_post(&id).await, Err(DomainError::PostNotFound(_))));
        assert!(svc.list_all(&admin()).await.unwrap().is_empty());
        assert!(matches!(
            svc.delete_post(&admin(), &id).await,
            Err(DomainError::PostNotFound(_))
        ));
    }
}
