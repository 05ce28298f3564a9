use serde::Serialize;
use std::fmt;

use super::{ApiKey, TargetStatus, WebId};
use crate::domains::subscriptions::{Result, SubscriptionError};

/// Count reported when a job fails before or during the fetch.
pub const FAILED_COUNT: i64 = -1;

/// Parameters of one toggle job.
#[derive(Debug, Clone)]
pub struct ToggleRequest {
    pub api_key: ApiKey,
    pub list_ref: WebId,
    pub target: TargetStatus,
    /// Overrides the configured fetch cap when set
    pub fetch_limit: Option<u32>,
}

impl ToggleRequest {
    /// Build a request from raw caller fields. Blank values count as missing.
    pub fn from_fields(
        api_key: Option<&str>,
        list_ref: Option<&str>,
        status: Option<&str>,
        fetch_limit: Option<&str>,
    ) -> Result<Self> {
        let api_key = non_blank(api_key).ok_or(SubscriptionError::MissingField("apiKey"))?;
        let list_ref = non_blank(list_ref).ok_or(SubscriptionError::MissingField("listId"))?;
        let status = non_blank(status).ok_or(SubscriptionError::MissingField("status"))?;

        let fetch_limit = match non_blank(fetch_limit) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| SubscriptionError::InvalidFetchLimit(raw.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            api_key: ApiKey::new(api_key),
            list_ref: list_ref.parse()?,
            target: status.parse()?,
            fetch_limit,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Success,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Success => "success",
            JobStatus::Error => "error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller gets back: a count and whether the pipeline completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub count: i64,
    pub status: JobStatus,
}

impl JobOutcome {
    pub fn success(count: usize) -> Self {
        Self {
            count: count as i64,
            status: JobStatus::Success,
        }
    }

    pub fn failed() -> Self {
        Self {
            count: FAILED_COUNT,
            status: JobStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }
}

/// Phases a job moves through, in order. Used for log events only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Received,
    Resolving,
    Fetching,
    Filtering,
    Updating,
    Completed,
}

impl JobPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobPhase::Received => "received",
            JobPhase::Resolving => "resolving",
            JobPhase::Fetching => "fetching",
            JobPhase::Filtering => "filtering",
            JobPhase::Updating => "updating",
            JobPhase::Completed => "completed",
        }
    }
}
