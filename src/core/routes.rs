// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{
    attendance, dashboard, enrollment, fallback, health, printing, records, renewal, schedule,
    session,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/metrics", get(dashboard::metrics_handler))

        // UI sessions: role switch, navigation, dashboards
        .route("/sessions", post(session::create_session_handler))
        .route(
            "/sessions/{id}/role",
            get(session::get_role_handler).put(session::set_role_handler),
        )
        .route("/sessions/{id}/navigation", get(session::navigation_handler))
        .route("/sessions/{id}/view", get(session::view_handler))
        .route("/sessions/{id}/dashboard", get(dashboard::dashboard_handler))

        // Enrollment wizard
        .route("/sessions/{id}/enroll", get(enrollment::snapshot_handler))
        .route("/sessions/{id}/enroll/navigate", post(enrollment::navigate_handler))
        .route("/sessions/{id}/enroll/demographics", put(enrollment::demographics_handler))
        .route(
            "/sessions/{id}/enroll/biometrics/{modality}",
            post(enrollment::capture_handler),
        )
        .route("/sessions/{id}/enroll/advance", post(enrollment::advance_handler))
        .route("/sessions/{id}/enroll/submit", post(enrollment::submit_handler))

        // Attendance
        .route("/attendance/clock", get(attendance::clock_today_handler))
        .route("/attendance/clock/in", post(attendance::clock_in_handler))
        .route("/attendance/clock/out", post(attendance::clock_out_handler))
        .route("/attendance/staff", get(attendance::staff_board_handler))
        .route("/attendance/staff/{id}/{action}", post(attendance::staff_action_handler))

        // Records and cards
        .route("/records", get(records::list_records_handler))
        .route("/records/{id}", get(records::get_record_handler))
        .route("/print", get(printing::list_printable_handler))
        .route("/print/{id}", post(printing::print_card_handler))
        .route("/print/{id}/pdf", get(printing::card_pdf_handler))
        .route("/card-renewal", get(renewal::list_cards_handler))
        .route("/card-renewal/bulk", post(renewal::bulk_renew_handler))
        .route("/card-renewal/{id}/renew", post(renewal::renew_card_handler))
        .route("/card-renewal/{id}/extend", post(renewal::extend_card_handler))
        .route("/card-renewal/{id}/history", get(renewal::card_history_handler))

        .route(
            "/schedule",
            get(schedule::get_schedule_handler).put(schedule::update_schedule_handler),
        )

        // 404 fallback for all unmatched routes
        .fallback(fallback::fallback_handler)

        .with_state(state)
}
