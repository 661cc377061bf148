use crate::domain::error::DomainError;
use crate::domain::site_config::{SiteConfig, SocialLink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{error, info};

/// Storage for the singleton [`SiteConfig`].
#[async_trait]
pub trait SiteConfigRepository: Send + Sync {
    async fn find(&self) -> Result<Option<SiteConfig>, DomainError>;
    /// Stores `config` only if no document exists yet and returns whichever
    /// document is stored afterwards.
    async fn insert_if_absent(&self, config: SiteConfig) -> Result<SiteConfig, DomainError>;
    async fn save(&self, config: SiteConfig) -> Result<SiteConfig, DomainError>;
}

// The table holds at most one row, pinned to this key by a CHECK constraint.
const SINGLETON_ID: i16 = 1;

#[derive(sqlx::FromRow)]
struct SiteConfigRow {
    seo_title: String,
    seo_description: String,
    seo_keywords: String,
    og_image: String,
    hero_name: String,
    hero_titles: Vec<String>,
    hero_bio: String,
    profile_image: String,
    resume_url: String,
    try_hack_me_id: String,
    social_links: Json<Vec<SocialLink>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SiteConfigRow> for SiteConfig {
    fn from(row: SiteConfigRow) -> Self {
        SiteConfig {
            seo_title: row.seo_title,
            seo_description: row.seo_description,
            seo_keywords: row.seo_keywords,
            og_image: row.og_image,
            hero_name: row.hero_name,
            hero_titles: row.hero_titles,
            hero_bio: row.hero_bio,
            profile_image: row.profile_image,
            resume_url: row.resume_url,
            try_hack_me_id: row.try_hack_me_id,
            social_links: row.social_links.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PostgresSiteConfigRepository {
    pool: PgPool,
}

impl PostgresSiteConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn write(&self, config: &SiteConfig, overwrite: bool) -> Result<(), sqlx::Error> {
        let conflict = if overwrite {
            r#"
            ON CONFLICT (id) DO UPDATE SET
                seo_title = EXCLUDED.seo_title,
                seo_description = EXCLUDED.seo_description,
                seo_keywords = EXCLUDED.seo_keywords,
                og_image = EXCLUDED.og_image,
                hero_name = EXCLUDED.hero_name,
                hero_titles = EXCLUDED.hero_titles,
                hero_bio = EXCLUDED.hero_bio,
                profile_image = EXCLUDED.profile_image,
                resume_url = EXCLUDED.resume_url,
                try_hack_me_id = EXCLUDED.try_hack_me_id,
                social_links = EXCLUDED.social_links,
                updated_at = EXCLUDED.updated_at
            "#
        } else {
            "ON CONFLICT (id) DO NOTHING"
        };

        let sql = format!(
            r#"
            INSERT INTO site_config
                (id, seo_title, seo_description, seo_keywords, og_image, hero_name, hero_titles,
                 hero_bio, profile_image, resume_url, try_hack_me_id, social_links, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            {conflict}
            "#
        );

        sqlx::query(&sql)
            .bind(SINGLETON_ID)
            .bind(&config.seo_title)
            .bind(&config.seo_description)
            .bind(&config.seo_keywords)
            .bind(&config.og_image)
            .bind(&config.hero_name)
            .bind(&config.hero_titles)
            .bind(&config.hero_bio)
            .bind(&config.profile_image)
            .bind(&config.resume_url)
            .bind(&config.try_hack_me_id)
            .bind(Json(&config.social_links))
            .bind(config.created_at)
            .bind(config.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn fetch(&self) -> Result<Option<SiteConfig>, sqlx::Error> {
        let row = sqlx::query_as::<_, SiteConfigRow>(
            r#"
            SELECT seo_title, seo_description, seo_keywords, og_image, hero_name, hero_titles,
                   hero_bio, profile_image, resume_url, try_hack_me_id, social_links,
                   created_at, updated_at
            FROM site_config WHERE id = $1
            "#,
        )
        .bind(SINGLETON_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SiteConfig::from))
    }
}

#[async_trait]
impl SiteConfigRepository for PostgresSiteConfigRepository {
    async fn find(&self) -> Result<Option<SiteConfig>, DomainError> {
        self.fetch().await.map_err(|e| {
            error!("db error while fetching site config: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn insert_if_absent(&self, config: SiteConfig) -> Result<SiteConfig, DomainError> {
        self.write(&config, false).await.map_err(|e| {
            error!("failed to create site config: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        self.find()
            .await?
            .ok_or_else(|| DomainError::Internal("site config missing after insert".into()))
    }

    async fn save(&self, config: SiteConfig) -> Result<SiteConfig, DomainError> {
        self.write(&config, true).await.map_err(|e| {
            error!("failed to save site config: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!("site config saved");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::{create_pool, run_migrations};
    use chrono::TimeZone;

    /// Runs against a real database only when `DATABASE_URL` is set; the
    /// `site_config` table is emptied first.
    async fn pool() -> Option<PgPool> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = create_pool(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        sqlx::query("DELETE FROM site_config")
            .execute(&pool)
            .await
            .unwrap();
        Some(pool)
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn postgres_singleton_insert_and_upsert() {
        let Some(pool) = pool().await else {
            return;
        };
        let repo = PostgresSiteConfigRepository::new(pool.clone());
        assert!(repo.find().await.unwrap().is_none());

        let first = repo
            .insert_if_absent(SiteConfig::seeded(at(1)))
            .await
            .unwrap();
        assert_eq!(first.hero_titles.len(), 4);
        assert_eq!(first.social_links.len(), 3);

        // a second insert keeps the stored row
        let second = repo
            .insert_if_absent(SiteConfig::with_defaults(at(2)))
            .await
            .unwrap();
        assert_eq!(second, first);

        let mut edited = second.clone();
        edited.hero_name = "Ada".into();
        edited.hero_titles = vec![];
        edited.updated_at = at(3);
        repo.save(edited.clone()).await.unwrap();

        let stored = repo.find().await.unwrap().unwrap();
        assert_eq!(stored, edited);
        assert_eq!(stored.created_at, at(1));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM site_config")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let rejected = sqlx::query(
            r#"
            INSERT INTO site_config
                (id, seo_title, seo_description, seo_keywords, og_image, hero_name,
                 hero_bio, profile_image, resume_url)
            VALUES (2, '', '', '', '', '', '', '', '')
            "#,
        )
        .execute(&pool)
        .await;
        assert!(rejected.is_err());
    }
}
