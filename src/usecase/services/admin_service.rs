use std::sync::Arc;

use tracing::info;

use crate::domain::entities::admin::AdminResource;
use crate::domain::entities::form::{validate_form, FormErrors, FormValues};
use crate::domain::entities::grid::{FetchParams, RowId};
use crate::domain::entities::report::PageResult;
use crate::usecase::ports::api::{AdminGateway, ApiError, PageRequest, PageSource};

#[derive(Debug)]
pub enum AdminError {
    Invalid(FormErrors),
    Api(ApiError),
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminError::Invalid(errors) => write!(f, "{} field(s) need attention", errors.len()),
            AdminError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AdminError {}

impl From<ApiError> for AdminError {
    fn from(value: ApiError) -> Self {
        AdminError::Api(value)
    }
}

pub struct AdminService {
    source: Arc<dyn PageSource>,
    gateway: Arc<dyn AdminGateway>,
}

impl AdminService {
    pub fn new(source: Arc<dyn PageSource>, gateway: Arc<dyn AdminGateway>) -> Self {
        Self { source, gateway }
    }

    pub fn page_request(
        resource: AdminResource,
        params: FetchParams,
        search: &str,
    ) -> PageRequest {
        let search = search.trim();
        let filters = if search.is_empty() {
            Vec::new()
        } else {
            vec![("search".to_string(), search.to_string())]
        };
        PageRequest {
            path: resource.path().to_string(),
            params,
            filters,
            id_field: resource.id_field().to_string(),
            sub_rows_field: None,
        }
    }

    pub async fn list(
        &self,
        resource: AdminResource,
        params: FetchParams,
        search: &str,
    ) -> Result<PageResult, ApiError> {
        self.source
            .fetch_page(Self::page_request(resource, params, search))
            .await
    }

    pub async fn create(
        &self,
        resource: AdminResource,
        values: FormValues,
    ) -> Result<(), AdminError> {
        let values = checked(resource, values)?;
        self.gateway.create(resource, values).await?;
        info!(resource = resource.path(), "record created");
        Ok(())
    }

    pub async fn update(
        &self,
        resource: AdminResource,
        id: RowId,
        values: FormValues,
    ) -> Result<(), AdminError> {
        let values = checked(resource, values)?;
        self.gateway.update(resource, id.clone(), values).await?;
        info!(resource = resource.path(), id = %id, "record updated");
        Ok(())
    }

    pub async fn delete(&self, resource: AdminResource, id: RowId) -> Result<(), ApiError> {
        self.gateway.delete(resource, id.clone()).await?;
        info!(resource = resource.path(), id = %id, "record deleted");
        Ok(())
    }
}

fn checked(resource: AdminResource, values: FormValues) -> Result<FormValues, AdminError> {
    let errors = validate_form(&resource.form_fields(), &values);
    if !errors.is_empty() {
        return Err(AdminError::Invalid(errors));
    }
    Ok(values
        .into_iter()
        .map(|(key, value)| (key, value.trim().to_string()))
        .collect())
}
