use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEO_TITLE: &str = "Cybersecurity Professional | Portfolio";
pub const DEFAULT_SEO_DESCRIPTION: &str = "Experienced Cybersecurity Engineer specializing in Blue Team operations, SOC Analysis, and Threat Hunting.";
pub const DEFAULT_SEO_KEYWORDS: &str =
    "cybersecurity, SOC analyst, blue team, threat hunting, security engineer";
pub const DEFAULT_OG_IMAGE: &str = "/og-image.jpg";
pub const DEFAULT_HERO_NAME: &str = "Your Name";
pub const DEFAULT_HERO_BIO: &str =
    "Passionate cybersecurity professional specializing in Blue Team operations.";
pub const DEFAULT_PROFILE_IMAGE: &str = "/profile.jpg";
pub const DEFAULT_RESUME_URL: &str = "/resume.pdf";

const SAMPLE_HERO_TITLES: [&str; 4] = [
    "Cybersecurity Engineer",
    "SOC Analyst",
    "Threat Hunter",
    "Blue Team Specialist",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
}

impl SocialLink {
    fn new(name: &str, url: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// The single site configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
    pub og_image: String,
    pub hero_name: String,
    pub hero_titles: Vec<String>,
    pub hero_bio: String,
    pub profile_image: String,
    pub resume_url: String,
    pub try_hack_me_id: String,
    pub social_links: Vec<SocialLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Presence-based patch over every editable field.
#[derive(Debug, Clone, Default)]
pub struct GeneralPatch {
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub og_image: Option<String>,
    pub hero_name: Option<String>,
    pub hero_titles: Option<Vec<String>>,
    pub hero_bio: Option<String>,
    pub profile_image: Option<String>,
    pub resume_url: Option<String>,
    pub try_hack_me_id: Option<String>,
    pub social_links: Option<Vec<SocialLink>>,
}

#[derive(Debug, Clone, Default)]
pub struct SeoPatch {
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub og_image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HeroPatch {
    pub hero_name: Option<String>,
    pub hero_titles: Option<Vec<String>>,
    pub hero_bio: Option<String>,
    pub profile_image: Option<String>,
}

impl SiteConfig {
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            seo_title: DEFAULT_SEO_TITLE.to_string(),
            seo_description: DEFAULT_SEO_DESCRIPTION.to_string(),
            seo_keywords: DEFAULT_SEO_KEYWORDS.to_string(),
            og_image: DEFAULT_OG_IMAGE.to_string(),
            hero_name: DEFAULT_HERO_NAME.to_string(),
            hero_titles: Vec::new(),
            hero_bio: DEFAULT_HERO_BIO.to_string(),
            profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
            resume_url: DEFAULT_RESUME_URL.to_string(),
            try_hack_me_id: String::new(),
            social_links: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Defaults plus the sample hero titles and social links written on
    /// first start.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            hero_titles: SAMPLE_HERO_TITLES.iter().map(|t| t.to_string()).collect(),
            social_links: vec![
                SocialLink::new("LinkedIn", "https://linkedin.com", "linkedin"),
                SocialLink::new("GitHub", "https://github.com", "github"),
                SocialLink::new("Twitter", "https://twitter.com", "twitter"),
            ],
            ..Self::with_defaults(now)
        }
    }

    pub fn apply_general(&mut self, patch: GeneralPatch, now: DateTime<Utc>) {
        set_present(&mut self.seo_title, patch.seo_title);
        set_present(&mut self.seo_description, patch.seo_description);
        set_present(&mut self.seo_keywords, patch.seo_keywords);
        set_present(&mut self.og_image, patch.og_image);
        set_present(&mut self.hero_name, patch.hero_name);
        set_present(&mut self.hero_titles, patch.hero_titles);
        set_present(&mut self.hero_bio, patch.hero_bio);
        set_present(&mut self.profile_image, patch.profile_image);
        set_present(&mut self.resume_url, patch.resume_url);
        set_present(&mut self.try_hack_me_id, patch.try_hack_me_id);
        set_present(&mut self.social_links, patch.social_links);
        self.updated_at = now;
    }

    /// Empty strings count as "not supplied" here, unlike [`Self::apply_general`].
    pub fn apply_seo(&mut self, patch: SeoPatch, now: DateTime<Utc>) {
        set_non_empty(&mut self.seo_title, patch.seo_title);
        set_non_empty(&mut self.seo_description, patch.seo_description);
        set_non_empty(&mut self.seo_keywords, patch.seo_keywords);
        set_non_empty(&mut self.og_image, patch.og_image);
        self.updated_at = now;
    }

    /// Same skip-empty rule as [`Self::apply_seo`]. Any supplied title list
    /// is applied, including an empty one.
    pub fn apply_hero(&mut self, patch: HeroPatch, now: DateTime<Utc>) {
        set_non_empty(&mut self.hero_name, patch.hero_name);
        set_present(&mut self.hero_titles, patch.hero_titles);
        set_non_empty(&mut self.hero_bio, patch.hero_bio);
        set_non_empty(&mut self.profile_image, patch.profile_image);
        self.updated_at = now;
    }
}

fn set_present<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn set_non_empty(slot: &mut String, value: Option<String>) {
    set_present(slot, value.filter(|v| !v.is_empty()));
}
