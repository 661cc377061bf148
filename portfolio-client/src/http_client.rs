use crate::error::PortfolioClientError;
use crate::{ConfigUpdate, NewPost, Post, PostUpdate, SiteConfig, SortOrder};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::sync::Arc;
use uuid::Uuid;

/// File the bearer token is cached in between CLI invocations.
pub const TOKEN_FILE: &str = ".portfolio_token";

#[derive(Clone)]
pub struct PortfolioClient {
    client: Arc<Client>,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct PostEnvelope {
    post: Post,
}

#[derive(Debug, Deserialize)]
struct ConfigEnvelope {
    config: SiteConfig,
}

impl PortfolioClient {
    pub fn connect(endpoint: &str) -> Result<Self, PortfolioClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Arc::new(Client::builder().build()?),
            base_url,
            token: None,
        })
    }

    /// Stores the token in memory and in [`TOKEN_FILE`].
    pub fn set_token(&mut self, token: String) -> Result<(), PortfolioClientError> {
        fs::write(TOKEN_FILE, &token)?;
        self.token = Some(token);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn auth_header(&self) -> Result<HeaderValue, PortfolioClientError> {
        let token = match &self.token {
            Some(t) if !t.is_empty() => t.clone(),
            _ => fs::read_to_string(TOKEN_FILE)
                .map(|t| t.trim().to_string())
                .map_err(|_| PortfolioClientError::Unauthorized("not logged in".into()))?,
        };

        if token.is_empty() {
            return Err(PortfolioClientError::Unauthorized("not logged in".into()));
        }

        HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| PortfolioClientError::Unauthorized("malformed token".into()))
    }

    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder, PortfolioClientError> {
        Ok(req.header(AUTHORIZATION, self.auth_header()?))
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, PortfolioClientError> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(PortfolioClientError::from_http_response(resp).await)
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), PortfolioClientError> {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let auth: AuthResponse = Self::parse(resp).await?;
        self.set_token(auth.token)
    }

    /// Public listing of active posts. With a sort order, pinned posts come
    /// first.
    pub async fn list_posts(
        &self,
        sort: Option<SortOrder>,
    ) -> Result<Vec<Post>, PortfolioClientError> {
        let mut req = self.client.get(self.url("/blog"));
        if let Some(order) = sort {
            req = req.query(&[("sort", order.as_str())]);
        }
        Self::parse(req.send().await?).await
    }

    pub async fn list_all_posts(&self) -> Result<Vec<Post>, PortfolioClientError> {
        let req = self.authed(self.client.get(self.url("/blog/all")))?;
        Self::parse(req.send().await?).await
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, PortfolioClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/blog/{id}")))
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<Post, PortfolioClientError> {
        let req = self.authed(self.client.post(self.url("/blog")))?;
        let envelope: PostEnvelope = Self::parse(req.json(post).send().await?).await?;
        Ok(envelope.post)
    }

    pub async fn update_post(
        &self,
        id: Uuid,
        update: &PostUpdate,
    ) -> Result<Post, PortfolioClientError> {
        let req = self.authed(self.client.put(self.url(&format!("/blog/{id}"))))?;
        let envelope: PostEnvelope = Self::parse(req.json(update).send().await?).await?;
        Ok(envelope.post)
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<(), PortfolioClientError> {
        let req = self.authed(self.client.delete(self.url(&format!("/blog/{id}"))))?;
        let resp = req.send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(PortfolioClientError::from_http_response(resp).await)
        }
    }

    pub async fn get_config(&self) -> Result<SiteConfig, PortfolioClientError> {
        Self::parse(self.client.get(self.url("/config")).send().await?).await
    }

    /// General update: every field sent is applied, empty strings included.
    pub async fn update_config(
        &self,
        update: &ConfigUpdate,
    ) -> Result<SiteConfig, PortfolioClientError> {
        self.put_config("/config", update).await
    }

    /// SEO update: empty strings are ignored by the server.
    pub async fn update_seo(
        &self,
        update: &ConfigUpdate,
    ) -> Result<SiteConfig, PortfolioClientError> {
        self.put_config("/config/seo", update).await
    }

    /// Hero update: empty strings are ignored by the server.
    pub async fn update_hero(
        &self,
        update: &ConfigUpdate,
    ) -> Result<SiteConfig, PortfolioClientError> {
        self.put_config("/config/hero", update).await
    }

    async fn put_config(
        &self,
        path: &str,
        update: &ConfigUpdate,
    ) -> Result<SiteConfig, PortfolioClientError> {
        let req = self.authed(self.client.put(self.url(path)))?;
        let envelope: ConfigEnvelope = Self::parse(req.json(update).send().await?).await?;
        Ok(envelope.config)
    }
}
