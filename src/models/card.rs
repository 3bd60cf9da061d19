use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalStatus {
    Expired,
    Expiring,
    Active,
    Renewed,
    Pending,
}

impl FromStr for RenewalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expired" => Ok(RenewalStatus::Expired),
            "expiring" => Ok(RenewalStatus::Expiring),
            "active" => Ok(RenewalStatus::Active),
            "renewed" => Ok(RenewalStatus::Renewed),
            "pending" => Ok(RenewalStatus::Pending),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalType {
    Initial,
    Renewal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalEntry {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: RenewalType,
    pub expiry_date: NaiveDate,
}

/// Expiry urgency, ordered most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Expired,
    Critical,
    Warning,
    Normal,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Expired => "Expired",
            Urgency::Critical => "Expires Soon",
            Urgency::Warning => "Expiring",
            Urgency::Normal => "Active",
        }
    }
}

/// Staff access card tracked by the renewal desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCard {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub current_card_expiry: NaiveDate,
    pub renewal_status: RenewalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_renewal_date: Option<NaiveDate>,
    pub renewal_history: Vec<RenewalEntry>,
    pub access_level: String,
}

/// Enrolled individual awaiting or holding a printed ID card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintableIndividual {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub address: String,
    pub enrollment_date: String,
    pub card_printed: bool,
}
