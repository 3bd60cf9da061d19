use serde::Serialize;
use std::collections::HashMap;

use crate::models::enrollment::Stage;
use crate::models::role::UserRole;
use crate::wizard::stage::stage_from_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardVariant {
    Operator,
    Main,
    Admin,
}

/// Page rendered for a console path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    Dashboard {
        variant: DashboardVariant,
    },
    Enrollment {
        stage: Stage,
        #[serde(skip_serializing_if = "Option::is_none")]
        record_id: Option<String>,
    },
    Records,
    RecordDetail {
        id: String,
    },
    PrintCards,
    CardRenewal,
    Attendance {
        #[serde(skip_serializing_if = "Option::is_none")]
        employee: Option<String>,
    },
    Schedule,
    NotFound {
        path: String,
    },
}

/// Dashboard shown on `/` for a role
pub fn home_dashboard(role: UserRole) -> DashboardVariant {
    match role {
        UserRole::Admin => DashboardVariant::Main,
        UserRole::Operator => DashboardVariant::Operator,
    }
}

/// Map a console path (optionally with a query string) to the view it renders.
pub fn resolve_view(path: &str, role: UserRole) -> View {
    let (route, query) = match path.split_once('?') {
        Some((route, query)) => (route, query),
        None => (path, ""),
    };

    let route = match route.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    let segments: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => View::Dashboard {
            variant: home_dashboard(role),
        },
        ["admin"] => View::Dashboard {
            variant: DashboardVariant::Admin,
        },
        ["enroll"] => View::Enrollment {
            stage: Stage::Demographics,
            record_id: None,
        },
        ["enroll", step @ ("demographics" | "biometrics" | "review")] => View::Enrollment {
            stage: stage_from_path(&format!("/enroll/{}", step)),
            record_id: None,
        },
        ["enroll", id] => View::Enrollment {
            stage: Stage::Demographics,
            record_id: Some((*id).to_string()),
        },
        ["records"] => View::Records,
        ["records", id] => View::RecordDetail {
            id: (*id).to_string(),
        },
        ["print"] => View::PrintCards,
        ["card-renewal"] => View::CardRenewal,
        ["attendance"] => View::Attendance {
            employee: query_param(query, "employee"),
        },
        ["schedule"] => View::Schedule,
        // /logs is a placeholder route that renders the not-found page
        _ => View::NotFound {
            path: route.to_string(),
        },
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }

    serde_urlencoded::from_str::<HashMap<String, String>>(query)
        .ok()
        .and_then(|mut params| params.remove(name))
        .filter(|value| !value.is_empty())
}
