use crate::models::enrollment::{EnrollmentDraft, FormVariant};

/// Required fields per form variant, in form order (camelCase names)
pub fn required_fields(variant: FormVariant) -> &'static [&'static str] {
    match variant {
        FormVariant::Standard => &["firstName", "lastName", "dateOfBirth"],
        FormVariant::Seafarer => &["firstName", "lastName", "dateOfBirth", "sid", "rank"],
    }
}

fn field_value<'a>(draft: &'a EnrollmentDraft, field: &str) -> &'a str {
    match field {
        "firstName" => &draft.first_name,
        "lastName" => &draft.last_name,
        "dateOfBirth" => &draft.date_of_birth,
        "sid" => draft.sid.as_deref().unwrap_or(""),
        "rank" => draft.rank.as_deref().unwrap_or(""),
        _ => "",
    }
}

/// Required fields that are still empty
pub fn missing_fields(draft: &EnrollmentDraft, variant: FormVariant) -> Vec<&'static str> {
    required_fields(variant)
        .iter()
        .copied()
        .filter(|field| field_value(draft, field).is_empty())
        .collect()
}

pub fn is_complete(draft: &EnrollmentDraft, variant: FormVariant) -> bool {
    missing_fields(draft, variant).is_empty()
}
