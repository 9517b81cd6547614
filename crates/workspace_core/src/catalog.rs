//! Remote catalog client: problem CRUD and assessment generation over HTTP.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{AssessmentRequest, Problem, StudentProfile},
    error::ErrorBody,
    protocol::{Assessment, GenerateAssessmentRequest},
};
use tracing::{debug, warn};
use url::Url;

use crate::{config::WorkspaceSettings, error::CatalogError};

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_problems(&self) -> Result<Vec<Problem>, CatalogError>;
    async fn create_problem(&self, draft: &Problem) -> Result<Problem, CatalogError>;
    async fn update_problem(&self, id: &str, draft: &Problem) -> Result<Problem, CatalogError>;
    async fn delete_problem(&self, id: &str) -> Result<(), CatalogError>;
    async fn generate_assessment(
        &self,
        profile: &StudentProfile,
        request: &AssessmentRequest,
    ) -> Result<Assessment, CatalogError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogOperation {
    List,
    Create,
    Update,
    Delete,
    Generate,
}

impl CatalogOperation {
    fn name(self) -> &'static str {
        match self {
            Self::List => "list_problems",
            Self::Create => "create_problem",
            Self::Update => "update_problem",
            Self::Delete => "delete_problem",
            Self::Generate => "generate_assessment",
        }
    }

    fn classify(self, status: StatusCode, message: String) -> CatalogError {
        match self {
            Self::Create if status.is_client_error() => CatalogError::Validation { message },
            Self::Update | Self::Delete if status == StatusCode::NOT_FOUND => {
                CatalogError::NotFound { message }
            }
            _ => CatalogError::Service {
                status: status.as_u16(),
                message,
            },
        }
    }
}

pub struct HttpCatalogClient {
    http: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn from_settings(settings: &WorkspaceSettings) -> Self {
        Self::new(settings.service_base_url.clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Each segment is percent-encoded as one path segment. `.` and `..`
    /// would be resolved as navigation, so they are refused.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        if let Some(segment) = segments.iter().find(|s| is_dot_segment(s)) {
            return Err(CatalogError::Validation {
                message: format!("'{segment}' cannot be used as a problem id"),
            });
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CatalogError::network(format!("service url '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check(
        &self,
        operation: CatalogOperation,
        response: Result<Response, reqwest::Error>,
    ) -> Result<Response, CatalogError> {
        let response = response.map_err(|err| {
            warn!(operation = operation.name(), error = %err, "catalog request failed to send");
            CatalogError::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let fallback = format!("request failed with status code {}", status.as_u16());
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message().unwrap_or(fallback),
            Err(_) => fallback,
        };
        warn!(
            operation = operation.name(),
            status = status.as_u16(),
            %message,
            "catalog request rejected"
        );
        Err(operation.classify(status, message))
    }

    async fn decode<T: DeserializeOwned>(
        operation: CatalogOperation,
        response: Response,
    ) -> Result<T, CatalogError> {
        response.json::<T>().await.map_err(|err| {
            warn!(operation = operation.name(), error = %err, "undecodable catalog response");
            CatalogError::from(err)
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list_problems(&self) -> Result<Vec<Problem>, CatalogError> {
        let operation = CatalogOperation::List;
        let url = self.endpoint(&["api", "problems"])?;
        debug!(operation = operation.name(), %url, "dispatching catalog request");
        let response = self.check(operation, self.http.get(url).send().await).await?;
        Self::decode(operation, response).await
    }

    async fn create_problem(&self, draft: &Problem) -> Result<Problem, CatalogError> {
        let operation = CatalogOperation::Create;
        let url = self.endpoint(&["api", "problems"])?;
        debug!(operation = operation.name(), %url, problem_id = %draft.id, "dispatching catalog request");
        let response = self
            .check(operation, self.http.post(url).json(draft).send().await)
            .await?;
        Self::decode(operation, response).await
    }

    async fn update_problem(&self, id: &str, draft: &Problem) -> Result<Problem, CatalogError> {
        let operation = CatalogOperation::Update;
        if id != draft.id {
            return Err(CatalogError::Validation {
                message: format!(
                    "problem id '{}' does not match update target '{id}'",
                    draft.id
                ),
            });
        }
        let url = self.endpoint(&["api", "problems", id])?;
        debug!(operation = operation.name(), %url, problem_id = %id, "dispatching catalog request");
        let response = self
            .check(operation, self.http.put(url).json(draft).send().await)
            .await?;
        Self::decode(operation, response).await
    }

    async fn delete_problem(&self, id: &str) -> Result<(), CatalogError> {
        let operation = CatalogOperation::Delete;
        let url = self.endpoint(&["api", "problems", id])?;
        debug!(operation = operation.name(), %url, problem_id = %id, "dispatching catalog request");
        self.check(operation, self.http.delete(url).send().await)
            .await?;
        Ok(())
    }

    async fn generate_assessment(
        &self,
        profile: &StudentProfile,
        request: &AssessmentRequest,
    ) -> Result<Assessment, CatalogError> {
        let operation = CatalogOperation::Generate;
        let url = self.endpoint(&["api", "assessments", "generate"])?;
        debug!(
            operation = operation.name(),
            %url,
            student_id = %profile.id,
            strategy = %request.pedagogical_strategy,
            "dispatching catalog request"
        );
        let payload = GenerateAssessmentRequest {
            student_profile: profile.clone(),
            assessment_request: *request,
        };
        let response = self
            .check(operation, self.http.post(url).json(&payload).send().await)
            .await?;
        Self::decode(operation, response).await
    }
}

pub(crate) fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
