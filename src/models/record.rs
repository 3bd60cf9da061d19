use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::enrollment::BiometricModality;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Pending,
    Review,
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(RecordStatus::Active),
            "pending" => Ok(RecordStatus::Pending),
            "review" => Ok(RecordStatus::Review),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureQuality {
    Excellent,
    Good,
    Fair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingDocument {
    pub name: String,
    pub status: String,
}

/// Extended fields shown on the record detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetails {
    pub review_date: String,
    pub nationality: String,
    pub rank: String,
    pub expiry_date: String,
    pub id_number: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub emergency_contact: EmergencyContact,
    pub documents: Vec<SupportingDocument>,
}

/// A completed enrollment as listed on the records page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub enrollment_date: String,
    pub status: RecordStatus,
    pub biometrics: Vec<BiometricModality>,
    pub quality: CaptureQuality,
    pub officer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<RecordDetails>,
}

impl EnrollmentRecord {
    /// Biometric summary shown on the detail page
    pub fn biometrics_summary(&self) -> &'static str {
        if self.biometrics.len() >= 3 {
            "Complete"
        } else {
            "Partial"
        }
    }
}
