/// Length in hex characters of a UI session id (16 random bytes)
pub const SESSION_ID_LEN: usize = 32;

/// Generate a new random UI session id
pub fn new_session_id() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

/// Check that a caller-supplied session id has the expected shape
pub fn is_valid_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LEN && hex::decode(id).is_ok()
}

/// Clock record id, `clock-<unix millis>`
pub fn clock_record_id(millis: i64) -> String {
    format!("clock-{}", millis)
}
