//! Growatt web API client.
//!
//! The web panel endpoints are form-encoded `POST`s authenticated by the session cookie
//! obtained from [`Api::login`].

pub mod device;
pub mod plant;
mod response;
pub mod session;
pub mod storage;
pub mod weather;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{
    Client,
    RequestBuilder,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

pub use self::response::Envelope;
use crate::prelude::*;

pub const DEFAULT_BASE_URL: &str = "https://server.growatt.com";

pub struct Api {
    client: Client,
    base_url: String,
}

#[bon::bon]
impl Api {
    #[builder]
    pub fn new(
        /// Server root, for example `https://server.growatt.com`.
        #[builder(into, default = DEFAULT_BASE_URL.to_owned())]
        base_url: String,

        #[builder(default = Duration::from_secs(15))] timeout: Duration,

        #[builder(into, default = concat!("growatt/", env!("CARGO_PKG_VERSION")).to_owned())]
        user_agent: String,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.append(ACCEPT, HeaderValue::from_static("*/*"));
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }
}

impl Api {
    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Post the form and unwrap the response payload.
    async fn post_form<F, R>(&self, path: &str, form: &F) -> Result<R>
    where
        F: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.post_form_enveloped::<F, R>(path, form).await?.into_result(path)
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    async fn post_form_enveloped<F, R>(&self, path: &str, form: &F) -> Result<Envelope<R>>
    where
        F: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        Self::send(path, self.client.post(self.url(path)).form(form)).await
    }

    async fn send<R: DeserializeOwned>(path: &str, request: RequestBuilder) -> Result<R> {
        let body = Self::fetch(path, request).await?;
        debug!(%body, "call succeeded");
        Self::parse(path, &body)
    }

    /// Same as [`Self::send`], but the response body carries credentials and is never logged.
    async fn send_sensitive<R: DeserializeOwned>(path: &str, request: RequestBuilder) -> Result<R> {
        let body = Self::fetch(path, request).await?;
        debug!(len = body.len(), "call succeeded");
        Self::parse(path, &body)
    }

    async fn fetch(path: &str, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|source| Error::Transport { path: path.to_owned(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { path: path.to_owned(), status });
        }
        response.text().await.map_err(|source| Error::Transport { path: path.to_owned(), source })
    }

    fn parse<R: DeserializeOwned>(path: &str, body: &str) -> Result<R> {
        serde_json::from_str(body).map_err(|source| Error::Parse { path: path.to_owned(), source })
    }
}

/// Inclusive date range for the history endpoints.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(rename = "startDate")]
    pub start: NaiveDate,

    #[serde(rename = "endDate")]
    pub end: NaiveDate,
}
