//! Warehouse identifiers with canonical parsing.
//!
//! Tables are compared by exact equality on `project.dataset.table`; there is
//! no case folding and no partial matching. Both the standard SQL spelling
//! (`project.dataset.table`) and the legacy spelling (`project:dataset.table`)
//! parse to the same value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Canonical `project.dataset.table` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableRef {
    project: String,
    dataset: String,
    table: String,
}

impl TableRef {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self> {
        let r = Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        };
        let raw = r.to_string();
        for part in [&r.project, &r.dataset, &r.table] {
            if part.is_empty() {
                return Err(invalid(&raw, "empty component"));
            }
        }
        if r.dataset.contains('.') || r.table.contains('.') {
            return Err(invalid(&raw, "dataset and table must not contain '.'"));
        }
        Ok(r)
    }

    /// Parse a fully-qualified table id.
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_with_default_project(s, None)
    }

    /// Parse a table id, filling in `default_project` for bare `dataset.table`.
    pub fn parse_with_default_project(s: &str, default_project: Option<&str>) -> Result<Self> {
        let s = s.trim();

        // Legacy form: the part after the last ':' is exactly `dataset.table`.
        if let Some((project, rest)) = s.rsplit_once(':') {
            if rest.matches('.').count() == 1 {
                let (dataset, table) = rest.split_once('.').ok_or_else(|| invalid(s, "missing table"))?;
                return Self::new(project, dataset, table);
            }
        }

        let mut parts = s.rsplitn(3, '.');
        let table = parts.next().unwrap_or_default();
        let dataset = parts.next().ok_or_else(|| invalid(s, "expected dataset.table"))?;
        match parts.next() {
            Some(project) => Self::new(project, dataset, table),
            None => match default_project {
                Some(project) => Self::new(project, dataset, table),
                None => Err(invalid(s, "missing project")),
            },
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Short table name, without project or dataset.
    pub fn table_id(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

impl FromStr for TableRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TableRef {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<TableRef> for String {
    fn from(r: TableRef) -> Self {
        r.to_string()
    }
}

/// Structured job id as logged by the shredder: `project:location.job_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullJobId {
    pub project: String,
    pub location: String,
    pub job_id: String,
}

impl FullJobId {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (project, rest) = s.split_once(':').ok_or_else(|| invalid(s, "missing ':' after project"))?;
        let (location, job_id) = rest
            .split_once('.')
            .ok_or_else(|| invalid(s, "missing '.' after location"))?;
        if project.is_empty() || location.is_empty() || job_id.is_empty() {
            return Err(invalid(s, "empty component"));
        }
        Ok(Self {
            project: project.to_string(),
            location: location.to_string(),
            job_id: job_id.to_string(),
        })
    }
}

impl fmt::Display for FullJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.project, self.location, self.job_id)
    }
}

impl FromStr for FullJobId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FullJobId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<FullJobId> for String {
    fn from(id: FullJobId) -> Self {
        id.to_string()
    }
}

fn invalid(id: &str, reason: &'static str) -> Error {
    Error::InvalidId {
        id: id.to_string(),
        reason,
    }
}
