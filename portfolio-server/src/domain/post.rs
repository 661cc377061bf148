use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub is_active: bool,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a post. Unset flags and dates fall back to
/// their defaults in [`BlogPost::new`].
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub is_pinned: Option<bool>,
}

/// Partial update. `None` means the caller did not send the field; for
/// `description`, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<Option<String>>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub is_pinned: Option<bool>,
}

impl BlogPost {
    pub fn new(draft: PostDraft, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let title = validate_title(&draft.title, "Title is required")?;
        let url = validate_url(&draft.url)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            url,
            description: draft.description.map(|d| d.trim().to_string()),
            published_at: draft.published_at.unwrap_or(now),
            is_active: draft.is_active.unwrap_or(true),
            is_pinned: draft.is_pinned.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies every field present in `patch`. All present fields are
    /// validated before anything is written, so a rejected patch leaves the
    /// post untouched.
    pub fn apply(&mut self, patch: PostPatch, now: DateTime<Utc>) -> Result<(), DomainError> {
        let title = patch
            .title
            .as_deref()
            .map(|t| validate_title(t, "Title cannot be empty"))
            .transpose()?;
        let url = patch.url.as_deref().map(validate_url).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(description) = patch.description {
            self.description = description.map(|d| d.trim().to_string());
        }
        if let Some(published_at) = patch.published_at {
            self.published_at = published_at;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_pinned) = patch.is_pinned {
            self.is_pinned = is_pinned;
        }
        self.updated_at = now;
        Ok(())
    }
}

fn validate_title(title: &str, message: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("title", message));
    }
    Ok(title.to_string())
}

fn validate_url(raw: &str) -> Result<String, DomainError> {
    let raw = raw.trim();
    let invalid = || DomainError::validation("url", "Valid URL is required");
    let parsed = Url::parse(raw).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(raw.to_string()),
        _ => Err(invalid()),
    }
}

/// A structurally invalid id can never resolve, so it is reported the same
/// way as a missing post.
pub fn parse_post_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::PostNotFound(raw.to_string()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// Display ordering for post listings: pinned posts first, then by
/// `published_at` in the requested direction. The sort is stable.
pub fn sort_for_display(posts: &mut [BlogPost], order: SortOrder) {
    posts.sort_by(|a, b| display_cmp(a, b, order));
}

fn display_cmp(a: &BlogPost, b: &BlogPost, order: SortOrder) -> Ordering {
    b.is_pinned.cmp(&a.is_pinned).then_with(|| match order {
        SortOrder::Newest => b.published_at.cmp(&a.published_at),
        SortOrder::Oldest => a.published_at.cmp(&b.published_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            url: "https://medium.com/@me/threat-hunting-101".to_string(),
            ..Default::default()
        }
    }

    fn post(title: &str, pinned: bool, year: i32) -> BlogPost {
        let mut p = BlogPost::new(draft(title), date(year)).unwrap();
        p.is_pinned = pinned;
        p
    }

    #[test]
    fn new_post_defaults_flags_and_date() {
        let now = date(2024);
        let p = BlogPost::new(draft("  Detection engineering  "), now).unwrap();
        assert!(p.is_active);
        assert!(!p.is_pinned);
        assert_eq!(p.published_at, now);
        assert_eq!(p.created_at, now);
        assert_eq!(p.title, "Detection engineering");
        assert_eq!(p.description, None);
    }

    #[test]
    fn new_post_keeps_explicit_overrides() {
        let mut d = draft("Hidden");
        d.is_active = Some(false);
        d.is_pinned = Some(true);
        d.published_at = Some(date(2020));
        let p = BlogPost::new(d, date(2024)).unwrap();
        assert!(!p.is_active);
        assert!(p.is_pinned);
        assert_eq!(p.published_at, date(2020));
    }

    #[test]
    fn new_post_rejects_blank_title_and_bad_url() {
        let err = BlogPost::new(draft("   "), date(2024)).unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));

        for bad in ["", "not a url", "medium.com/post", "ftp://files.example.com/a", "mailto:me@example.com"] {
            let mut d = draft("ok");
            d.url = bad.to_string();
            let err = BlogPost::new(d, date(2024)).unwrap_err();
            assert!(
                matches!(err, DomainError::Validation { field: "url", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn apply_uses_presence_not_truthiness() {
        let mut p = post("Original", false, 2022);
        p.description = Some("summary".into());

        let patch = PostPatch {
            description: Some(Some(String::new())),
            is_active: Some(false),
            ..Default::default()
        };
        p.apply(patch, date(2025)).unwrap();

        assert_eq!(p.description.as_deref(), Some(""));
        assert!(!p.is_active);
        assert_eq!(p.title, "Original");
        assert_eq!(p.updated_at, date(2025));
    }

    #[test]
    fn apply_null_description_clears_it() {
        let mut p = post("Original", false, 2022);
        p.description = Some("summary".into());
        p.apply(
            PostPatch {
                description: Some(None),
                ..Default::default()
            },
            date(2025),
        )
        .unwrap();
        assert_eq!(p.description, None);
    }

    #[test]
    fn rejected_patch_writes_nothing() {
        let mut p = post("Original", false, 2022);
        let before = p.clone();
        let patch = PostPatch {
            title: Some("New title".into()),
            url: Some("nope".into()),
            is_pinned: Some(true),
            ..Default::default()
        };
        assert!(p.apply(patch, date(2025)).is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_post_id("123-not-a-uuid").unwrap_err();
        assert!(matches!(err, DomainError::PostNotFound(id) if id == "123-not-a-uuid"));
    }

    #[test]
    fn pinned_group_precedes_dates() {
        let a = post("A", true, 2021);
        let b = post("B", false, 2023);
        let c = post("C", true, 2022);

        let mut posts = vec![a, b, c];
        sort_for_display(&mut posts, SortOrder::Newest);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);

        sort_for_display(&mut posts, SortOrder::Oldest);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["A", "C", "B"]);
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let mut posts = vec![
            post("first", false, 2022),
            post("second", false, 2022),
            post("third", false, 2022),
        ];
        sort_for_display(&mut posts, SortOrder::Newest);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }
}
