// Wire format parsing and record conversion

use dbdash::models::*;

#[test]
fn test_state_response_parses_server_payload() {
    let json = r#"{
        "success": true,
        "result": {
            "disk_used": 1000,
            "disk_capacity": 4000,
            "soft_threshold": 2000,
            "hard_threshold": 3000,
            "databases": [
                {"name": "app", "user": "alice", "modified": 1600000000, "size": 300, "service": false},
                {"name": "postgres", "user": null, "modified": 1500000000, "size": 10, "service": true}
            ]
        }
    }"#;
    let response: ApiResponse<StatePayload> = serde_json::from_str(json).unwrap();
    assert!(response.success);
    assert!(response.message.is_none());
    let payload = response.result.unwrap();
    assert_eq!(payload.disk_capacity, 4000);
    assert_eq!(payload.databases.len(), 2);
    assert_eq!(payload.databases[1].user, None);
    assert!(payload.databases[1].service);
}

#[test]
fn test_failure_envelope_has_no_result() {
    let json = r#"{"success": false, "message": "State error"}"#;
    let response: ApiResponse<StatePayload> = serde_json::from_str(json).unwrap();
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("State error"));
    assert!(response.result.is_none());
}

#[test]
fn test_ack_accepts_null_result() {
    let ack: Ack = serde_json::from_str(r#"{"success": true, "result": null}"#).unwrap();
    assert!(ack.success);
    let ack: Ack = serde_json::from_str(r#"{"success": true}"#).unwrap();
    assert!(ack.result.is_none());
}

#[test]
fn test_missing_service_flag_defaults_to_false() {
    let entry: DatabaseEntry =
        serde_json::from_str(r#"{"name": "db", "modified": 1, "size": 2}"#).unwrap();
    assert!(!entry.service);
    assert!(entry.user.is_none());
}

#[test]
fn test_drop_request_body() {
    let body = serde_json::to_value(DropRequest { name: "db1".into() }).unwrap();
    assert_eq!(body, serde_json::json!({"name": "db1"}));
}

#[test]
fn test_record_from_entry_defaults_user() {
    let record = DatabaseRecord::from(DatabaseEntry {
        name: "db".into(),
        user: None,
        service: false,
        modified: 1_600_000_000,
        size: 1536,
    });
    assert_eq!(record.user, NO_USER);
    assert_eq!(record.modified_at, 1_600_000_000);
    assert_eq!(record.size_human(), "1.5 KiB");
    assert!(!record.modified_formatted().is_empty());
}

#[test]
fn test_record_keeps_reported_user() {
    let record = DatabaseRecord::from(DatabaseEntry {
        name: "db".into(),
        user: Some("alice".into()),
        service: true,
        modified: 0,
        size: 0,
    });
    assert_eq!(record.user, "alice");
    assert!(record.is_service);
    let now = chrono::DateTime::<chrono::Utc>::from_timestamp(3 * 3600, 0).unwrap();
    assert_eq!(record.modified_relative(now), "3 hours ago");
}
