use std::path::PathBuf;

use tl::error::{exit_codes, Error, JsonError};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::InvalidArgument("bad".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let config = Error::InvalidConfig("bad".to_string());
    assert_eq!(config.exit_code(), exit_codes::USER_ERROR);

    let op = Error::WriteTasks {
        path: PathBuf::from("/nope/tasks.json"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(op.exit_code(), exit_codes::OPERATION_FAILED);

    let record = Error::MalformedRecord("missing title".to_string());
    assert_eq!(record.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn json_error_includes_code() {
    let err = Error::InvalidArgument("task title cannot be empty".to_string());
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::USER_ERROR);
    assert!(json.error.contains("title cannot be empty"));
}

#[test]
fn persistence_errors_name_the_path() {
    let err = Error::ReadTasks {
        path: PathBuf::from("/somewhere/tasks.json"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.to_string().contains("/somewhere/tasks.json"));
}
