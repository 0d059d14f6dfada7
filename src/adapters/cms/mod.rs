//! Prismic REST API (v2) client for blog posts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::cms_post::{CmsPost, RichTextBlock},
    infra::{error::InfraError, http_client::try_build_client},
    use_cases::preview::ContentSource,
};

/// Custom type holding blog posts in the repository.
pub const POST_DOCUMENT_TYPE: &str = "post";

const CMS_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub struct PrismicClient {
    client: Client,
    api_url: Url,
    access_token: Option<SecretString>,
}

impl PrismicClient {
    pub fn new(api_url: Url, access_token: Option<SecretString>) -> Result<Self, InfraError> {
        let client = try_build_client().map_err(InfraError::HttpClient)?;
        Ok(Self {
            client,
            api_url,
            access_token,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.query(&[("access_token", token.expose_secret())]),
            None => request,
        }
    }

    fn search_url(&self) -> AppResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("CMS API URL cannot be a base".into()))?
            .pop_if_empty()
            .push("documents")
            .push("search");
        Ok(url)
    }

    /// Every query must be pinned to a content ref; the master ref is the
    /// latest published release.
    async fn master_ref(&self) -> AppResult<String> {
        let api: ApiResponse = self
            .authorized(self.client.get(self.api_url.clone()))
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        api.master_ref()
            .ok_or_else(|| AppError::Upstream("CMS returned no master ref".into()))
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn get_post_by_uid(&self, uid: &str) -> AppResult<Option<CmsPost>> {
        let reference = self.master_ref().await?;
        let predicate = uid_predicate(uid);

        let search: SearchResponse = self
            .authorized(self.client.get(self.search_url()?))
            .query(&[
                ("ref", reference.as_str()),
                ("q", predicate.as_str()),
                ("pageSize", "1"),
            ])
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        Ok(search.results.into_iter().next().map(into_cms_post))
    }
}

fn upstream(err: reqwest::Error) -> AppError {
    AppError::Upstream(err.to_string())
}

fn uid_predicate(uid: &str) -> String {
    format!(r#"[[at(my.{POST_DOCUMENT_TYPE}.uid,"{uid}")]]"#)
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

impl ApiResponse {
    fn master_ref(self) -> Option<String> {
        self.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
    }
}

#[derive(Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<PrismicDocument>,
}

#[derive(Deserialize)]
struct PrismicDocument {
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    last_publication_date: Option<String>,
    #[serde(default)]
    data: PostData,
}

#[derive(Deserialize, Default)]
struct PostData {
    #[serde(default)]
    title: Vec<RichTextBlock>,
    #[serde(default)]
    content: Vec<RichTextBlock>,
}

fn into_cms_post(doc: PrismicDocument) -> CmsPost {
    let last_publication_date = doc
        .last_publication_date
        .as_deref()
        .and_then(parse_cms_date);

    CmsPost {
        uid: doc.uid.unwrap_or_default(),
        last_publication_date,
        title: doc.data.title,
        content: doc.data.content,
    }
}

fn parse_cms_date(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_str(raw, CMS_DATE_FORMAT) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(err) => {
            tracing::warn!(raw, error = %err, "Unparseable CMS publication date");
            None
        }
    }
}
