use crate::core::config::{
    AttendanceConfig, Config, EnrollmentConfig, LoggingConfig, ServerConfig, SessionConfig,
    StorageConfig,
};
use crate::core::state::AppState;
use crate::models::enrollment::FormVariant;
use crate::stores::kv::MemoryKv;
use crate::utils::time::{current_timestamp, FixedClock};
use axum::{body::Body, response::Response};
use chrono::NaiveDateTime;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            port: Some(8080),
            unix_socket: None,
            num_threads: 2,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
            console: false,
        },
        storage: StorageConfig {
            path: None,
            compact_on_start: false,
        },
        attendance: AttendanceConfig {
            simulated_latency_ms: 0,
        },
        enrollment: EnrollmentConfig {
            form_variant: FormVariant::Standard,
            iris_scanner_online: false,
        },
        sessions: SessionConfig {
            idle_timeout: 7200,
            sweep_interval: 300,
            capacity: 16,
        },
    }
}

pub fn test_now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-11-15 08:00", "%Y-%m-%d %H:%M").unwrap()
}

pub fn create_test_state_with(config: Config) -> (Arc<AppState>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(test_now()));
    let state = AppState::new(config, Arc::new(MemoryKv::new()), clock.clone());
    (Arc::new(state), clock)
}

pub fn create_test_state() -> Arc<AppState> {
    create_test_state_with(create_test_config()).0
}

pub fn open_session(state: &AppState) -> String {
    state.sessions.create(current_timestamp()).unwrap().id
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let (_, body) = response.into_parts();
    let bytes = Body::new(body).collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
