use crate::domain::error::DomainError;
use crate::domain::post::{BlogPost, PostDraft, PostPatch, SortOrder};
use crate::domain::site_config::{GeneralPatch, HeroPatch, SeoPatch, SiteConfig, SocialLink};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ======================= AUTH =======================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: i64,
    pub token_type: String, // "Bearer"
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
}

// ======================= POSTS =======================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub is_pinned: Option<bool>,
}

impl From<CreatePostRequest> for PostDraft {
    fn from(req: CreatePostRequest) -> Self {
        PostDraft {
            title: req.title,
            url: req.url,
            description: req.description,
            published_at: req.published_at,
            is_active: req.is_active,
            is_pinned: req.is_pinned,
        }
    }
}

/// Every key uses `present` so that `null` is seen as sent. Only
/// `description` may be cleared; `null` anywhere else is rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub published_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "present")]
    pub is_active: Option<Option<bool>>,
    #[serde(default, deserialize_with = "present")]
    pub is_pinned: Option<Option<bool>>,
}

impl TryFrom<UpdatePostRequest> for PostPatch {
    type Error = DomainError;

    fn try_from(req: UpdatePostRequest) -> Result<Self, Self::Error> {
        Ok(PostPatch {
            title: non_null(req.title, "title", "Title cannot be empty")?,
            url: non_null(req.url, "url", "Valid URL is required")?,
            description: req.description,
            published_at: non_null(req.published_at, "publishedAt", "Valid date is required")?,
            is_active: non_null(req.is_active, "isActive", "isActive must be a boolean")?,
            is_pinned: non_null(req.is_pinned, "isPinned", "isPinned must be a boolean")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub sort: Option<SortOrder>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub message: &'static str,
    pub post: BlogPost,
}

// ======================= CONFIG =======================

/// Keys outside this list are dropped by serde, which gives the allow-list
/// behaviour for free. A listed key sent as `null` is rejected rather than
/// skipped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigRequest {
    #[serde(default, deserialize_with = "present")]
    pub seo_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub seo_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub seo_keywords: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub og_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub hero_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub hero_titles: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "present")]
    pub hero_bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub profile_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub resume_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub try_hack_me_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub social_links: Option<Option<Vec<SocialLink>>>,
}

impl TryFrom<UpdateConfigRequest> for GeneralPatch {
    type Error = DomainError;

    fn try_from(req: UpdateConfigRequest) -> Result<Self, Self::Error> {
        Ok(GeneralPatch {
            seo_title: non_null(req.seo_title, "seoTitle", "seoTitle cannot be null")?,
            seo_description: non_null(req.seo_description, "seoDescription", "seoDescription cannot be null")?,
            seo_keywords: non_null(req.seo_keywords, "seoKeywords", "seoKeywords cannot be null")?,
            og_image: non_null(req.og_image, "ogImage", "ogImage cannot be null")?,
            hero_name: non_null(req.hero_name, "heroName", "heroName cannot be null")?,
            hero_titles: non_null(req.hero_titles, "heroTitles", "heroTitles cannot be null")?,
            hero_bio: non_null(req.hero_bio, "heroBio", "heroBio cannot be null")?,
            profile_image: non_null(req.profile_image, "profileImage", "profileImage cannot be null")?,
            resume_url: non_null(req.resume_url, "resumeUrl", "resumeUrl cannot be null")?,
            try_hack_me_id: non_null(req.try_hack_me_id, "tryHackMeId", "tryHackMeId cannot be null")?,
            social_links: non_null(req.social_links, "socialLinks", "socialLinks cannot be null")?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeoRequest {
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub og_image: Option<String>,
}

impl From<UpdateSeoRequest> for SeoPatch {
    fn from(req: UpdateSeoRequest) -> Self {
        SeoPatch {
            seo_title: req.seo_title,
            seo_description: req.seo_description,
            seo_keywords: req.seo_keywords,
            og_image: req.og_image,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHeroRequest {
    pub hero_name: Option<String>,
    pub hero_titles: Option<Vec<String>>,
    pub hero_bio: Option<String>,
    pub profile_image: Option<String>,
}

impl From<UpdateHeroRequest> for HeroPatch {
    fn from(req: UpdateHeroRequest) -> Self {
        HeroPatch {
            hero_name: req.hero_name,
            hero_titles: req.hero_titles,
            hero_bio: req.hero_bio,
            profile_image: req.profile_image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub message: &'static str,
    pub config: SiteConfig,
}

// ======================= Utils =======================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Wraps whatever was sent (including `null`) in `Some`; combined with
/// `#[serde(default)]` an absent key stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `Some(None)` is an explicit `null` for a field that cannot hold one.
fn non_null<T>(
    value: Option<Option<T>>,
    field: &'static str,
    message: &str,
) -> Result<Option<T>, DomainError> {
    match value {
        Some(None) => Err(DomainError::validation(field, message)),
        other => Ok(other.flatten()),
    }
}
