use serde::Serialize;
use std::str::FromStr;

use crate::core::error::CatalogError;
use crate::models::record::{EnrollmentRecord, RecordStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub review: usize,
}

/// Read-only enrollment records
pub struct RecordBook {
    records: Vec<EnrollmentRecord>,
}

/// Parse a status filter; `None`, empty and `all` mean no filter.
pub fn parse_status_filter<T: FromStr>(status: Option<&str>) -> Result<Option<T>, CatalogError> {
    match status.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CatalogError::InvalidParameter(format!("status '{}'", value))),
    }
}

/// Case-insensitive substring match; an empty needle matches.
pub fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    needle.is_empty() || haystacks.iter().any(|h| h.to_lowercase().contains(needle))
}

impl RecordBook {
    pub fn new(records: Vec<EnrollmentRecord>) -> Self {
        Self { records }
    }

    pub fn search(
        &self,
        search: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<EnrollmentRecord>, CatalogError> {
        let status: Option<RecordStatus> = parse_status_filter(status)?;
        let needle = search.map(str::to_lowercase).unwrap_or_default();

        Ok(self
            .records
            .iter()
            .filter(|r| matches_search(&needle, &[r.name.as_str(), r.id.as_str()]))
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    pub fn get(&self, id: &str) -> Result<EnrollmentRecord, CatalogError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("record {}", id)))
    }

    pub fn counts(&self) -> RecordCounts {
        let mut counts = RecordCounts {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.status {
                RecordStatus::Active => counts.active += 1,
                RecordStatus::Pending => counts.pending += 1,
                RecordStatus::Review => counts.review += 1,
            }
        }
        counts
    }
}
