//! # bilancio-client
//!
//! HTTP client for the Bilancio analysis backend.
//!
//! One operation: upload a balance-sheet workbook together with a matching
//! strategy to `POST {base_url}/api/v1/analyze` as `multipart/form-data`
//! and decode the typed response. Each call makes exactly one attempt;
//! there is no retry. Every request is bounded by the configured timeout and
//! can be cancelled by the caller.

mod error;
mod http;
mod single_flight;
mod upload;

pub use error::ClientError;
pub use single_flight::{FlightPermit, SingleFlight};
pub use upload::{SPREADSHEET_EXTENSIONS, Upload};

use std::future::Future;
use std::time::Duration;

use bilancio_config::ApiConfig;
use bilancio_core::{AnalysisResponse, MatchingType};
use reqwest::multipart::Form;

use crate::http::check_response;

/// Path of the upload-and-analyze endpoint, relative to the base URL.
pub const ANALYZE_PATH: &str = "/api/v1/analyze";

/// Client for the analysis backend.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl AnalysisClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be built (e.g. an invalid `User-Agent`).
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}{ANALYZE_PATH}", config.origin()),
            timeout,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload `upload` for analysis with the given matching strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend answers
    /// with a non-success status, the body does not decode, or the timeout
    /// elapses.
    pub async fn submit_analysis(
        &self,
        upload: Upload,
        matching: MatchingType,
    ) -> Result<AnalysisResponse, ClientError> {
        self.submit_analysis_until(upload, matching, std::future::pending())
            .await
    }

    /// Like [`Self::submit_analysis`] with the strategy as its wire literal.
    ///
    /// An unknown literal is rejected before any network I/O.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Contract`] for an unknown matching type, and
    /// otherwise the errors of [`Self::submit_analysis`].
    pub async fn submit_analysis_str(
        &self,
        upload: Upload,
        matching: &str,
    ) -> Result<AnalysisResponse, ClientError> {
        let matching: MatchingType = matching.parse()?;
        self.submit_analysis(upload, matching).await
    }

    /// Submit an analysis, abandoning it as soon as `cancel` completes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cancelled`] if `cancel` resolves first, and
    /// otherwise the errors of [`Self::submit_analysis`].
    pub async fn submit_analysis_until<C>(
        &self,
        upload: Upload,
        matching: MatchingType,
        cancel: C,
    ) -> Result<AnalysisResponse, ClientError>
    where
        C: Future<Output = ()>,
    {
        if !upload.looks_like_spreadsheet() {
            tracing::warn!(
                file = upload.file_name(),
                "upload does not have an .xlsx/.xls extension; sending anyway"
            );
        }
        tracing::debug!(
            endpoint = %self.endpoint,
            file = upload.file_name(),
            bytes = upload.len(),
            %matching,
            "submitting analysis"
        );

        let form = Form::new()
            .part("file", upload.into_part()?)
            .text("matching_type", matching.as_str());

        let request = async {
            let resp = check_response(self.http.post(&self.endpoint).multipart(form).send().await?)
                .await?;
            let body = resp.bytes().await?;
            Ok::<_, ClientError>(serde_json::from_slice::<AnalysisResponse>(&body)?)
        };

        let result = tokio::select! {
            biased;
            () = cancel => Err(ClientError::Cancelled),
            result = request => result.map_err(|error| self.classify(error)),
        };

        match &result {
            Ok(response) => tracing::debug!(
                raw_rows = response.raw_data.len(),
                standardized_rows = response.standardized_data.len(),
                years = response.financial_indices.0.len(),
                "analysis completed"
            ),
            Err(error) => tracing::debug!(%error, "analysis failed"),
        }
        result
    }

    fn classify(&self, error: ClientError) -> ClientError {
        match error {
            ClientError::Http(inner) if inner.is_timeout() => ClientError::Timeout {
                secs: self.timeout.as_secs(),
            },
            other => other,
        }
    }
}
