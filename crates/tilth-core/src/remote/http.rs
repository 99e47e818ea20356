//! HTTP client for the remote schedule service.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{
    wire::{ScheduleDocument, StatusBody},
    ScheduleService,
};
use crate::{
    error::{Result, ScheduleError},
    models::{Schedule, ScheduleStatus, ScheduleSummary},
    params::{CreateSchedule, PatchActivity, UpdateScheduleStatus},
};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Talks JSON to a remote schedule service rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpScheduleService {
    client: Client,
    base_url: Url,
}

impl HttpScheduleService {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::Configuration` if the URL does not parse or
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ScheduleError::Configuration {
            message: format!("Invalid remote URL '{base_url}': {e}"),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ScheduleError::Configuration {
                message: format!("Remote URL '{base_url}' cannot be used as a base"),
            });
        }

        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| ScheduleError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, base_url })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a request and maps transport and status failures.
    ///
    /// A 404 becomes `not_found` when given, since only the caller knows
    /// which resource the path names.
    async fn send(
        &self,
        request: RequestBuilder,
        not_found: Option<ScheduleError>,
    ) -> Result<Response> {
        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        debug!("Remote responded {status} for {}", response.url());

        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(error) = not_found {
                return Err(error);
            }
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body
        };
        warn!("Remote service rejected request: {} {message}", status.as_u16());
        Err(ScheduleError::RemoteService {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(network_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ScheduleError::RemoteService {
            status,
            message: format!("Malformed response body: {e}"),
        })
    }

    async fn read_schedule(response: Response) -> Result<Schedule> {
        Self::read_json::<ScheduleDocument>(response)
            .await
            .map(Schedule::from)
    }
}

fn network_error(e: reqwest::Error) -> ScheduleError {
    let message = if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("could not connect: {e}")
    } else {
        e.to_string()
    };
    ScheduleError::Network {
        message,
        source: Some(e),
    }
}

#[async_trait]
impl ScheduleService for HttpScheduleService {
    fn backend_tag(&self) -> &'static str {
        "http"
    }

    async fn list_schedules(&self, status: Option<ScheduleStatus>) -> Result<Vec<ScheduleSummary>> {
        let mut request = self.client.get(self.endpoint(&["schedules"]));
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }
        let response = self.send(request, None).await?;
        Self::read_json(response).await
    }

    async fn get_schedule(&self, id: u64) -> Result<Schedule> {
        let id_segment = id.to_string();
        let request = self.client.get(self.endpoint(&["schedules", &id_segment]));
        let not_found = ScheduleError::ScheduleNotFound { id };
        let response = self.send(request, Some(not_found)).await?;
        Self::read_schedule(response).await
    }

    async fn create_schedule(&self, params: &CreateSchedule) -> Result<Schedule> {
        let request = self
            .client
            .post(self.endpoint(&["schedules"]))
            .json(params);
        let response = self.send(request, None).await?;
        Self::read_schedule(response).await
    }

    async fn patch_activity(&self, params: &PatchActivity) -> Result<Schedule> {
        let id_segment = params.schedule_id.to_string();
        let url = self.endpoint(&["schedules", &id_segment, "activities", &params.activity_id]);
        let request = self.client.patch(url).json(&StatusBody {
            status: params.status,
        });
        let not_found = ScheduleError::ActivityNotFound {
            schedule_id: params.schedule_id,
            activity_id: params.activity_id.clone(),
        };
        let response = self.send(request, Some(not_found)).await?;
        Self::read_schedule(response).await
    }

    async fn update_schedule_status(&self, params: &UpdateScheduleStatus) -> Result<Schedule> {
        let id_segment = params.id.to_string();
        let request = self
            .client
            .patch(self.endpoint(&["schedules", &id_segment]))
            .json(&StatusBody {
                status: params.status,
            });
        let not_found = ScheduleError::ScheduleNotFound { id: params.id };
        let response = self.send(request, Some(not_found)).await?;
        Self::read_schedule(response).await
    }

    async fn delete_schedule(&self, id: u64) -> Result<()> {
        let id_segment = id.to_string();
        let request = self
            .client
            .delete(self.endpoint(&["schedules", &id_segment]));
        self.send(request, Some(ScheduleError::ScheduleNotFound { id }))
            .await
            .map(|_| ())
    }
}
