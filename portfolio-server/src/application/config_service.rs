use std::sync::Arc;

use crate::data::config_repository::SiteConfigRepository;
use crate::domain::admin::AdminIdentity;
use crate::domain::error::DomainError;
use crate::domain::site_config::{GeneralPatch, HeroPatch, SeoPatch, SiteConfig};
use chrono::Utc;
use tracing::{info, instrument};

pub struct ConfigService<R: SiteConfigRepository + 'static> {
    repo: Arc<R>,
}

// manual impl: the repository itself need not be Clone
impl<R: SiteConfigRepository + 'static> Clone for ConfigService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> ConfigService<R>
where
    R: SiteConfigRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the site config, creating it with defaults on first access.
    pub async fn get_config(&self) -> Result<SiteConfig, DomainError> {
        if let Some(config) = self.repo.find().await? {
            return Ok(config);
        }
        let config = self
            .repo
            .insert_if_absent(SiteConfig::with_defaults(Utc::now()))
            .await?;
        info!("site config created with defaults");
        Ok(config)
    }

    /// Startup bootstrap: writes the sample content if no config exists yet.
    /// Returns whether anything was written.
    pub async fn seed_defaults(&self) -> Result<bool, DomainError> {
        if self.repo.find().await?.is_some() {
            return Ok(false);
        }
        self.repo
            .insert_if_absent(SiteConfig::seeded(Utc::now()))
            .await?;
        info!("default site config seeded");
        Ok(true)
    }

    #[instrument(skip_all, fields(admin = %admin.email()))]
    pub async fn update_general(
        &self,
        admin: &AdminIdentity,
        patch: GeneralPatch,
    ) -> Result<SiteConfig, DomainError> {
        let mut config = self.get_config().await?;
        config.apply_general(patch, Utc::now());
        self.repo.save(config).await
    }

    #[instrument(skip_all, fields(admin = %admin.email()))]
    pub async fn update_seo(
        &self,
        admin: &AdminIdentity,
        patch: SeoPatch,
    ) -> Result<SiteConfig, DomainError> {
        let mut config = self.get_config().await?;
        config.apply_seo(patch, Utc::now());
        self.repo.save(config).await
    }

    #[instrument(skip_all, fields(admin = %admin.email()))]
    pub async fn update_hero(
        &self,
        admin: &AdminIdentity,
        patch: HeroPatch,
    ) -> Result<SiteConfig, DomainError> {
        let mut config = self.get_config().await?;
        config.apply_hero(patch, Utc::now());
        self.repo.save(config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemorySiteConfigRepository;
    use crate::domain::site_config::{DEFAULT_HERO_NAME, DEFAULT_SEO_TITLE};

    fn service() -> ConfigService<InMemorySiteConfigRepository> {
        ConfigService::new(Arc::new(InMemorySiteConfigRepository::new()))
    }

    fn admin() -> AdminIdentity {
        AdminIdentity::new("admin@example.com")
    }

    #[tokio::test]
    async fn get_is_idempotent_on_empty_store() {
        let svc = service();
        let first = svc.get_config().await.unwrap();
        assert_eq!(first.seo_title, DEFAULT_SEO_TITLE);
        assert!(first.hero_titles.is_empty());

        let second = svc.get_config().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn seeding_only_happens_once() {
        let svc = service();
        assert!(svc.seed_defaults().await.unwrap());
        assert!(!svc.seed_defaults().await.unwrap());
        assert_eq!(svc.get_config().await.unwrap().hero_titles.len(), 4);
    }

    #[tokio::test]
    async fn seeding_never_overwrites_existing_config() {
        let svc = service();
        svc.update_general(
            &admin(),
            GeneralPatch {
                hero_name: Some("Ada".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(!svc.seed_defaults().await.unwrap());
        let config = svc.get_config().await.unwrap();
        assert_eq!(config.hero_name, "Ada");
        assert!(config.hero_titles.is_empty());
    }

    #[tokio::test]
    async fn general_and_seo_updates_treat_empty_strings_differently() {
        let svc = service();

        let after_seo = svc
            .update_seo(
                &admin(),
                SeoPatch {
                    seo_title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(after_seo.seo_title, DEFAULT_SEO_TITLE);

        let after_general = svc
            .update_general(
                &admin(),
                GeneralPatch {
                    seo_title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(after_general.seo_title, "");
        assert_eq!(svc.get_config().await.unwrap().seo_title, "");
    }

    #[tokio::test]
    async fn updates_refresh_timestamp_even_without_changes() {
        let svc = service();
        let before = svc.get_config().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let after = svc
            .update_hero(&admin(), HeroPatch::default())
            .await
            .unwrap();
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.hero_name, DEFAULT_HERO_NAME);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn update_on_empty_store_starts_from_defaults() {
        let svc = service();
        let config = svc
            .update_hero(
                &admin(),
                HeroPatch {
                    hero_titles: Some(vec!["Threat Hunter".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(config.hero_titles, ["Threat Hunter"]);
        assert_eq!(config.resume_url, "/resume.pdf");
    }
}
