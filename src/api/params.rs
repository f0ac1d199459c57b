/*!
 * Query Parameters
 * Typed query strings for the process routes, decoded by serde
 *
 * Names are matched in their camelCase form or all lowercase. Values stay raw strings
 * so unknown enum names can fall back to defaults instead of rejecting the request.
 */

use crate::core::errors::ApiError;
use crate::core::types::{Priority, ProcessId};
use crate::process::{AddMethod, SortBy};
use serde::Deserialize;

/// `POST /processes?addMethod=&id=&priority=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddParams {
    #[serde(rename = "addMethod", alias = "addmethod")]
    pub add_method: Option<String>,
    pub id: Option<String>,
    pub priority: Option<String>,
}

impl AddParams {
    pub fn id(&self) -> Result<ProcessId, ApiError> {
        required_id(self.id.as_deref())
    }

    /// Unknown names fall back to `Default`
    pub fn method(&self) -> AddMethod {
        self.add_method
            .as_deref()
            .map(AddMethod::parse_or_default)
            .unwrap_or_default()
    }

    /// Unknown names fall back to `Low`
    pub fn priority(&self) -> Priority {
        self.priority
            .as_deref()
            .map(Priority::parse_or_default)
            .unwrap_or_default()
    }
}

/// `GET /processes?sortBy=&descending=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "sortBy", alias = "sortby")]
    pub sort_by: Option<String>,
    pub descending: Option<String>,
}

impl ListParams {
    pub fn sort_by(&self) -> SortBy {
        self.sort_by
            .as_deref()
            .map(SortBy::parse_or_default)
            .unwrap_or_default()
    }

    /// `true` and `1` are descending, anything else ascending
    pub fn descending(&self) -> bool {
        self.descending
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
    }
}

/// `DELETE /processes[?id=N | ?priority=P]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
    pub priority: Option<String>,
}

/// What a delete request removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Process(ProcessId),
    Group(Priority),
    All,
}

impl DeleteParams {
    /// `id` wins over `priority`; neither clears the table
    ///
    /// Unknown priorities are rejected, a typo never selects a group.
    pub fn target(&self) -> Result<DeleteTarget, ApiError> {
        if self.id.is_some() {
            return required_id(self.id.as_deref()).map(DeleteTarget::Process);
        }

        match self.priority.as_deref() {
            Some(raw) => raw
                .parse::<Priority>()
                .map(DeleteTarget::Group)
                .map_err(|_| ApiError::InvalidParameter {
                    name: "priority",
                    value: raw.to_string(),
                }),
            None => Ok(DeleteTarget::All),
        }
    }
}

fn required_id(raw: Option<&str>) -> Result<ProcessId, ApiError> {
    let raw = raw.ok_or(ApiError::MissingParameter("id"))?;
    raw.trim()
        .parse::<ProcessId>()
        .map_err(|_| ApiError::InvalidParameter {
            name: "id",
            value: raw.to_string(),
        })
}
