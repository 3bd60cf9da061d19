use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of the enrollment wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Demographics,
    Biometrics,
    Review,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Demographics, Stage::Biometrics, Stage::Review];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Demographics => "demographics",
            Stage::Biometrics => "biometrics",
            Stage::Review => "review",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Demographics => "Demographics",
            Stage::Biometrics => "Biometrics",
            Stage::Review => "Review",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Stage::Demographics => 0,
            Stage::Biometrics => 1,
            Stage::Review => 2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demographics" => Ok(Stage::Demographics),
            "biometrics" => Ok(Stage::Biometrics),
            "review" => Ok(Stage::Review),
            other => Err(other.to_string()),
        }
    }
}

/// Biometric capture type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricModality {
    Fingerprint,
    Photo,
    Iris,
}

impl BiometricModality {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiometricModality::Fingerprint => "fingerprint",
            BiometricModality::Photo => "photo",
            BiometricModality::Iris => "iris",
        }
    }
}

impl fmt::Display for BiometricModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiometricModality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fingerprint" => Ok(BiometricModality::Fingerprint),
            "photo" => Ok(BiometricModality::Photo),
            "iris" => Ok(BiometricModality::Iris),
            other => Err(other.to_string()),
        }
    }
}

/// Which demographic form the console presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    #[default]
    Standard,
    /// Maritime form, adds seafarer id and rank
    Seafarer,
}

/// Demographic data collected by the wizard. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub id_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
}

/// Partial update of an [`EnrollmentDraft`]; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DemographicsUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub id_number: Option<String>,
    pub sid: Option<String>,
    pub rank: Option<String>,
}

impl EnrollmentDraft {
    pub fn apply(&mut self, update: DemographicsUpdate) {
        let DemographicsUpdate {
            first_name,
            last_name,
            date_of_birth,
            gender,
            address,
            phone_number,
            email,
            id_number,
            sid,
            rank,
        } = update;

        if let Some(v) = first_name {
            self.first_name = v;
        }
        if let Some(v) = last_name {
            self.last_name = v;
        }
        if let Some(v) = date_of_birth {
            self.date_of_birth = v;
        }
        if let Some(v) = gender {
            self.gender = v;
        }
        if let Some(v) = address {
            self.address = v;
        }
        if let Some(v) = phone_number {
            self.phone_number = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = id_number {
            self.id_number = v;
        }
        if sid.is_some() {
            self.sid = sid;
        }
        if rank.is_some() {
            self.rank = rank;
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parse_and_display() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
        assert!("summary".parse::<Stage>().is_err());
    }

    #[test]
    fn test_modality_parse() {
        assert_eq!("iris".parse::<BiometricModality>().unwrap(), BiometricModality::Iris);
        assert_eq!("fingerprint".parse::<BiometricModality>().unwrap(), BiometricModality::Fingerprint);
        assert!("retina".parse::<BiometricModality>().is_err());
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut draft = EnrollmentDraft {
            first_name: "Kwaku".to_string(),
            last_name: "Mensah".to_string(),
            ..Default::default()
        };

        draft.apply(DemographicsUpdate {
            last_name: Some("Owusu".to_string()),
            rank: Some("ABLE SEAMAN".to_string()),
            ..Default::default()
        });

        assert_eq!(draft.first_name, "Kwaku");
        assert_eq!(draft.last_name, "Owusu");
        assert_eq!(draft.rank.as_deref(), Some("ABLE SEAMAN"));
        assert_eq!(draft.full_name(), "Kwaku Owusu");
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = EnrollmentDraft {
            first_name: "Ama".to_string(),
            date_of_birth: "1990-07-22".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();

        assert_eq!(json["firstName"], "Ama");
        assert_eq!(json["dateOfBirth"], "1990-07-22");
        assert!(json.get("sid").is_none());
    }

    #[test]
    fn test_update_rejects_unknown_fields() {
        let result: Result<DemographicsUpdate, _> =
            serde_json::from_str(r#"{"firstName":"A","nickname":"B"}"#);
        assert!(result.is_err());
    }
}
