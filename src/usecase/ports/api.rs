use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::entities::admin::AdminResource;
use crate::domain::entities::bet::{BetRecord, BetStatusChange};
use crate::domain::entities::form::FormValues;
use crate::domain::entities::grid::{FetchParams, RowId};
use crate::domain::entities::report::PageResult;
use crate::domain::entities::session::LoginResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response payload: {0}")]
    Decode(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("not found")]
    NotFound,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// One page request against a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub path: String,
    pub params: FetchParams,
    pub filters: Vec<(String, String)>,
    pub id_field: String,
    pub sub_rows_field: Option<String>,
}

impl PageRequest {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.params.query_pairs();
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

pub trait PageSource: Send + Sync {
    fn fetch_page(&self, request: PageRequest) -> BoxFuture<'_, Result<PageResult, ApiError>>;
}

pub trait AuthGateway: Send + Sync {
    fn login(
        &self,
        username: String,
        password: String,
    ) -> BoxFuture<'_, Result<LoginResponse, ApiError>>;
}

pub trait AdminGateway: Send + Sync {
    fn create(
        &self,
        resource: AdminResource,
        values: FormValues,
    ) -> BoxFuture<'_, Result<(), ApiError>>;
    fn update(
        &self,
        resource: AdminResource,
        id: RowId,
        values: FormValues,
    ) -> BoxFuture<'_, Result<(), ApiError>>;
    fn delete(&self, resource: AdminResource, id: RowId) -> BoxFuture<'_, Result<(), ApiError>>;
}

pub trait BetGateway: Send + Sync {
    fn find_bet(&self, bet_id: String) -> BoxFuture<'_, Result<Option<BetRecord>, ApiError>>;
    fn update_status(
        &self,
        bet_id: String,
        change: BetStatusChange,
    ) -> BoxFuture<'_, Result<BetRecord, ApiError>>;
}

pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}
