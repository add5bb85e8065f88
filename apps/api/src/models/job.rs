use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// One row of the `jobs` table as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub job_type: String,
    pub salary: String,
    pub tags: String,
    pub description: String,
    pub requirements: String,
    pub application_link: String,
    pub date_posted: NaiveDate,
}

/// Tags arrive either pre-joined or as a list; storage always holds the joined form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    Joined(String),
    List(Vec<String>),
}

impl Tags {
    pub fn into_joined(self) -> String {
        match self {
            Tags::Joined(s) => s,
            Tags::List(items) => items.join(", "),
        }
    }
}

/// Body of a create request. `id` and `date_posted` are ignored if sent.
#[derive(Debug, Default, Deserialize)]
pub struct NewJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub tags: Option<Tags>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub application_link: Option<String>,
}

/// A create payload that passed validation, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub tags: String,
    pub description: String,
    pub requirements: String,
    pub application_link: String,
}

impl NewJob {
    /// Checks the required fields in order, failing on the first missing or empty one.
    pub fn validate(self) -> Result<JobDraft, AppError> {
        Ok(JobDraft {
            title: required("title", self.title)?,
            company: required("company", self.company)?,
            location: required("location", self.location)?,
            job_type: required("type", self.job_type)?,
            salary: self.salary.unwrap_or_default(),
            tags: self.tags.map(Tags::into_joined).unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            requirements: self.requirements.unwrap_or_default(),
            application_link: self.application_link.unwrap_or_default(),
        })
    }
}

fn required(name: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::required_field(name)),
    }
}

/// Body of an update request. Absent (or null) keys leave the column untouched.
#[derive(Debug, Default, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub tags: Option<Tags>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub application_link: Option<String>,
}

impl JobPatch {
    /// Validates the patch and flattens it into `(column, value)` pairs.
    ///
    /// Required columns may be changed but never emptied.
    pub fn into_assignments(self) -> Result<Vec<(&'static str, String)>, AppError> {
        let JobPatch {
            title,
            company,
            location,
            job_type,
            salary,
            tags,
            description,
            requirements,
            application_link,
        } = self;

        let mut assignments = Vec::new();
        for (column, value) in [
            ("title", title),
            ("company", company),
            ("location", location),
            ("type", job_type),
        ] {
            if let Some(value) = value {
                assignments.push((column, required(column, Some(value))?));
            }
        }
        for (column, value) in [
            ("salary", salary),
            ("description", description),
            ("requirements", requirements),
            ("application_link", application_link),
        ] {
            if let Some(value) = value {
                assignments.push((column, value));
            }
        }
        if let Some(tags) = tags {
            assignments.push(("tags", tags.into_joined()));
        }
        Ok(assignments)
    }
}

/// Query parameters of the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub search: String,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: String::new(),
        }
    }
}

impl ListParams {
    /// Resolves `(limit, offset)`, capping `limit` at `max_page_size`.
    pub fn window(&self, max_page_size: u32) -> Result<(i64, i64), AppError> {
        if self.page == 0 {
            return Err(AppError::bad_request("'page' must be a positive integer"));
        }
        if self.limit == 0 {
            return Err(AppError::bad_request("'limit' must be a positive integer"));
        }
        let limit = i64::from(self.limit.min(max_page_size.max(1)));
        let offset = (i64::from(self.page) - 1) * limit;
        Ok((limit, offset))
    }
}
