// Demo data loaded at startup. None of it is persisted.

use chrono::NaiveDate;

use crate::models::attendance::{StaffMember, StaffStatus};
use crate::models::card::{AccessCard, PrintableIndividual, RenewalEntry, RenewalStatus, RenewalType};
use crate::models::enrollment::BiometricModality::{Fingerprint, Iris, Photo};
use crate::models::record::{
    CaptureQuality, EmergencyContact, EnrollmentRecord, RecordDetails, RecordStatus,
    SupportingDocument,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

pub fn seed_staff() -> Vec<StaffMember> {
    use StaffStatus::*;

    vec![
        StaffMember::new("EMP-001", "John Smith", "Security", "Security Officer", ClockedIn, Some("08:00"), None, None),
        StaffMember::new("EMP-002", "Sarah Johnson", "Administration", "Data Entry Clerk", ClockedIn, Some("08:15"), None, None),
        StaffMember::new("EMP-003", "Michael Brown", "IT Support", "System Administrator", OnBreak, Some("07:45"), None, None),
        StaffMember::new("EMP-004", "Emma Davis", "Quality Control", "QC Specialist", ClockedOut, Some("08:00"), Some("17:00"), Some(8.5)),
        StaffMember::new("EMP-005", "James Wilson", "Operations", "Operations Manager", ClockedIn, Some("07:30"), None, None),
        StaffMember::new("EMP-006", "Lisa Anderson", "HR", "HR Assistant", ClockedOut, Some("09:00"), Some("18:00"), Some(8.0)),
    ]
}

fn record(
    id: &str,
    name: &str,
    date_of_birth: &str,
    enrollment_date: &str,
    status: RecordStatus,
    iris: bool,
    quality: CaptureQuality,
    officer: &str,
) -> EnrollmentRecord {
    let mut biometrics = vec![Fingerprint, Photo];
    if iris {
        biometrics.push(Iris);
    }

    EnrollmentRecord {
        id: id.to_string(),
        name: name.to_string(),
        date_of_birth: date_of_birth.to_string(),
        enrollment_date: enrollment_date.to_string(),
        status,
        biometrics,
        quality,
        officer: officer.to_string(),
        details: None,
    }
}

pub fn seed_records() -> Vec<EnrollmentRecord> {
    use CaptureQuality::*;
    use RecordStatus::*;

    let mut records = vec![
        record("ENR-2024-001247", "John Michael Doe", "1985-03-15", "2024-01-15", Active, true, Excellent, "Jane Smith"),
        record("ENR-2024-001246", "Sarah Elizabeth Johnson", "1990-07-22", "2024-01-14", Pending, false, Good, "John Wilson"),
        record("ENR-2024-001245", "Michael Robert Brown", "1978-11-08", "2024-01-14", Active, true, Excellent, "Jane Smith"),
        record("ENR-2024-001244", "Emma Grace Wilson", "1995-02-14", "2024-01-13", Review, false, Fair, "Mike Davis"),
        record("ENR-2024-001243", "David Alexander Lee", "1982-09-30", "2024-01-13", Active, true, Excellent, "Jane Smith"),
    ];

    records[0].details = Some(RecordDetails {
        review_date: "2024-01-20".to_string(),
        nationality: "GHANAIAN".to_string(),
        rank: "ABLE SEAMAN".to_string(),
        expiry_date: "31 DEC 2029".to_string(),
        id_number: "GHA123456".to_string(),
        email: "john.doe@email.com".to_string(),
        phone: "+233 123 456 789".to_string(),
        address: "123 Harbour Street, Tema, Ghana".to_string(),
        emergency_contact: EmergencyContact {
            name: "Ama Doe".to_string(),
            phone: "+233 987 654 321".to_string(),
            relationship: "Spouse".to_string(),
        },
        documents: vec![
            SupportingDocument { name: "Birth Certificate".to_string(), status: "Verified".to_string() },
            SupportingDocument { name: "Educational Certificate".to_string(), status: "Verified".to_string() },
            SupportingDocument { name: "Medical Certificate".to_string(), status: "Pending".to_string() },
        ],
    });

    records
}

pub fn seed_printables() -> Vec<PrintableIndividual> {
    let person = |id: &str, name: &str, dob: &str, address: &str, enrolled: &str, printed: bool| {
        PrintableIndividual {
            id: id.to_string(),
            name: name.to_string(),
            date_of_birth: dob.to_string(),
            address: address.to_string(),
            enrollment_date: enrolled.to_string(),
            card_printed: printed,
        }
    };

    vec![
        person("ENR-2024-001247", "John Michael Doe", "1985-03-15", "123 Main Street, City, State 12345", "2024-01-15", false),
        person("ENR-2024-001246", "Sarah Elizabeth Johnson", "1990-07-22", "456 Oak Avenue, City, State 12345", "2024-01-14", true),
        person("ENR-2024-001245", "Michael Robert Brown", "1978-11-08", "789 Pine Street, City, State 12345", "2024-01-14", false),
    ]
}

pub fn seed_cards() -> Vec<AccessCard> {
    let renewal = |on: NaiveDate, kind: RenewalType, expiry: NaiveDate| RenewalEntry {
        date: on,
        kind,
        expiry_date: expiry,
    };

    vec![
        AccessCard {
            id: "1".to_string(),
            employee_id: "EMP001".to_string(),
            name: "Sarah Johnson".to_string(),
            department: "Human Resources".to_string(),
            position: "HR Manager".to_string(),
            current_card_expiry: date(2024, 1, 15),
            renewal_status: RenewalStatus::Expired,
            last_renewal_date: Some(date(2023, 1, 15)),
            renewal_history: vec![
                renewal(date(2023, 1, 15), RenewalType::Renewal, date(2024, 1, 15)),
                renewal(date(2022, 1, 15), RenewalType::Initial, date(2023, 1, 15)),
            ],
            access_level: "Level 3".to_string(),
        },
        AccessCard {
            id: "2".to_string(),
            employee_id: "EMP002".to_string(),
            name: "Michael Chen".to_string(),
            department: "IT Department".to_string(),
            position: "Software Engineer".to_string(),
            current_card_expiry: date(2024, 12, 30),
            renewal_status: RenewalStatus::Expiring,
            last_renewal_date: Some(date(2023, 12, 30)),
            renewal_history: vec![renewal(date(2023, 12, 30), RenewalType::Renewal, date(2024, 12, 30))],
            access_level: "Level 2".to_string(),
        },
        AccessCard {
            id: "3".to_string(),
            employee_id: "EMP003".to_string(),
            name: "Emily Rodriguez".to_string(),
            department: "Marketing".to_string(),
            position: "Marketing Coordinator".to_string(),
            current_card_expiry: date(2025, 6, 15),
            renewal_status: RenewalStatus::Active,
            last_renewal_date: Some(date(2024, 6, 15)),
            renewal_history: vec![renewal(date(2024, 6, 15), RenewalType::Renewal, date(2025, 6, 15))],
            access_level: "Level 1".to_string(),
        },
        AccessCard {
            id: "4".to_string(),
            employee_id: "EMP004".to_string(),
            name: "David Kim".to_string(),
            department: "Finance".to_string(),
            position: "Senior Accountant".to_string(),
            current_card_expiry: date(2024, 11, 20),
            renewal_status: RenewalStatus::Expiring,
            last_renewal_date: None,
            renewal_history: Vec::new(),
            access_level: "Level 2".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let mut ids: Vec<_> = seed_records().into_iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_printables_match_records() {
        let records = seed_records();
        for person in seed_printables() {
            assert!(records.iter().any(|r| r.id == person.id && r.name == person.name));
        }
    }

    #[test]
    fn test_card_dates_are_valid() {
        assert!(seed_cards()
            .iter()
            .all(|card| card.current_card_expiry != NaiveDate::MIN));
    }
}
