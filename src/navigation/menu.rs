use crate::models::role::{NavItem, UserRole};

const OPERATOR_ITEMS: &[(&str, &str)] = &[
    ("Dashboard", "/"),
    ("New Enrollment", "/enroll"),
    ("Records", "/records"),
    ("Attendance", "/attendance"),
    ("Print Cards", "/print"),
];

const ADMIN_ITEMS: &[(&str, &str)] = &[
    ("Card Renewal", "/card-renewal"),
    ("Admin Dashboard", "/admin"),
    ("Schedule Setup", "/schedule"),
    ("Logs", "/logs"),
];

/// Sidebar items for a role, with the entry matching `current_path` marked
/// active.
pub fn navigation(role: UserRole, current_path: &str) -> Vec<NavItem> {
    let extra: &[(&str, &str)] = match role {
        UserRole::Operator => &[],
        UserRole::Admin => ADMIN_ITEMS,
    };

    OPERATOR_ITEMS
        .iter()
        .chain(extra.iter())
        .map(|&(name, href)| NavItem {
            name,
            href,
            active: current_path == href,
        })
        .collect()
}
