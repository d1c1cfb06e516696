use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::admin::AdminResource;
use crate::domain::entities::bet::{BetRecord, BetStatusChange};
use crate::domain::entities::form::FormValues;
use crate::domain::entities::grid::RowId;
use crate::domain::entities::report::PageResult;
use crate::domain::entities::session::LoginResponse;
use crate::infra::http::dto::{BetEnvelope, PageEnvelope};
use crate::infra::http::retry::{is_retryable_status, jittered_backoff, RetryPolicy};
use crate::usecase::ports::api::{
    AdminGateway, ApiError, AuthGateway, BetGateway, PageRequest, PageSource, TokenSource,
};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    retry: RetryPolicy,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme {} (expected http or https)",
                parsed.scheme()
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            base_url,
            http,
            retry: RetryPolicy::default(),
            tokens,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&url).map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    /// Appends each segment percent-encoded, so ids cannot add a query,
    /// fragment or extra path level.
    pub fn resource_url(&self, path: &str, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl("base URL cannot take path segments".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.tokens.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GETs are idempotent, so transport errors, 429 and 5xx are retried.
    pub async fn get_with_retry(
        &self,
        url: Url,
        query: &[(String, String)],
    ) -> Result<Response, ApiError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self
                .request(Method::GET, url.clone())
                .query(query)
                .send()
                .await;

            let retryable = match &result {
                Ok(response) => is_retryable_status(response.status().as_u16()),
                Err(err) => !err.is_builder(),
            };
            if !retryable || attempt >= max_attempts {
                let response = result.map_err(|err| ApiError::Transport(err.to_string()))?;
                return check_status(response).await;
            }

            let backoff = jittered_backoff(&mut rand::thread_rng(), self.retry.backoff_for(attempt));
            warn!(
                url = %url,
                attempt,
                backoff_ms = backoff.as_millis() as u64,
                "retrying request"
            );
            tokio::time::sleep(backoff).await;
        }
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let mut builder = self.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unavailable body>".to_string());
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

impl PageSource for ApiClient {
    fn fetch_page(&self, request: PageRequest) -> BoxFuture<'_, Result<PageResult, ApiError>> {
        Box::pin(async move {
            let url = self.endpoint(&request.path)?;
            let query = request.query_pairs();
            debug!(
                path = %request.path,
                skip = request.params.skip,
                take = request.params.take,
                "fetching page"
            );
            let response = self.get_with_retry(url, &query).await?;
            let envelope: PageEnvelope = decode(response).await?;
            Ok(envelope.into_page(&request.id_field, request.sub_rows_field.as_deref()))
        })
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

impl AuthGateway for ApiClient {
    fn login(
        &self,
        username: String,
        password: String,
    ) -> BoxFuture<'_, Result<LoginResponse, ApiError>> {
        Box::pin(async move {
            let url = self.endpoint("auth/login")?;
            let body = LoginBody {
                username: &username,
                password: &password,
            };
            let response = self.send_json(Method::POST, url, Some(&body)).await?;
            decode(response).await
        })
    }
}

impl AdminGateway for ApiClient {
    fn create(
        &self,
        resource: AdminResource,
        values: FormValues,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(async move {
            let url = self.endpoint(resource.path())?;
            self.send_json(Method::POST, url, Some(&values)).await?;
            Ok(())
        })
    }

    fn update(
        &self,
        resource: AdminResource,
        id: RowId,
        values: FormValues,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(async move {
            let url = self.resource_url(resource.path(), &[id.0.as_str()])?;
            self.send_json(Method::PUT, url, Some(&values)).await?;
            Ok(())
        })
    }

    fn delete(&self, resource: AdminResource, id: RowId) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(async move {
            let url = self.resource_url(resource.path(), &[id.0.as_str()])?;
            self.send_json::<()>(Method::DELETE, url, None).await?;
            Ok(())
        })
    }
}

impl BetGateway for ApiClient {
    fn find_bet(&self, bet_id: String) -> BoxFuture<'_, Result<Option<BetRecord>, ApiError>> {
        Box::pin(async move {
            let url = self.resource_url("bets", &[bet_id.as_str()])?;
            match self.get_with_retry(url, &[]).await {
                Ok(response) => {
                    let envelope: BetEnvelope = decode(response).await?;
                    Ok(Some(envelope.into()))
                }
                Err(ApiError::NotFound) => Ok(None),
                Err(err) => Err(err),
            }
        })
    }

    fn update_status(
        &self,
        bet_id: String,
        change: BetStatusChange,
    ) -> BoxFuture<'_, Result<BetRecord, ApiError>> {
        Box::pin(async move {
            let url = self.resource_url("bets", &[bet_id.as_str(), "status"])?;
            let response = self.send_json(Method::PATCH, url, Some(&change)).await?;
            let envelope: BetEnvelope = decode(response).await?;
            Ok(envelope.into())
        })
    }
}
