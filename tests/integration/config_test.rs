//! Configuration integration tests.
//!
//! Exercises the environment-variable contract through the public API.

use aidp_query::config::ConnectionConfig;
use aidp_query::db::{DatabaseClient, QueryRequest, SparkClient};
use std::sync::{Mutex, MutexGuard};

/// Serializes tests that mutate the process environment.
fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clear_env() {
    for name in [
        "AIDP_JDBC_URL",
        "AIDP_JDBC_JAR",
        "AIDP_OCI_CONFIG_FILE",
        "AIDP_OCI_PROFILE",
    ] {
        std::env::remove_var(name);
    }
}

#[test]
fn test_missing_configuration_fails_fast() {
    let _guard = env_lock();
    clear_env();

    let err = ConnectionConfig::from_env().unwrap_err();

    assert_eq!(err.category(), "Configuration Error");
    assert!(err.to_string().contains("AIDP_JDBC_URL"));
    assert!(err.to_string().contains("AIDP_JDBC_JAR"));
}

#[test]
fn test_missing_configuration_means_no_connection_attempt() {
    let _guard = env_lock();
    clear_env();

    // The client builds fine; the failure happens when a query is issued,
    // before the driver is ever asked for a session.
    let client = SparkClient::new().unwrap();
    let err = client.execute(&QueryRequest::new("SELECT 1")).unwrap_err();

    assert_eq!(err.category(), "Configuration Error");
}

#[test]
fn test_oci_attributes_appended_once() {
    let _guard = env_lock();
    clear_env();
    std::env::set_var("AIDP_JDBC_URL", "Host=adb.example.com;Port=443");
    std::env::set_var("AIDP_JDBC_JAR", "/opt/simba/lib/libsparkodbc64.so");
    std::env::set_var("AIDP_OCI_CONFIG_FILE", "/etc/oci/config");

    let config = ConnectionConfig::from_env().unwrap();
    let conn_str = config.effective_connection_string();

    assert_eq!(conn_str.matches("OCIConfigFile=/etc/oci/config").count(), 1);
    assert!(conn_str.contains(";OCIConfigFile=/etc/oci/config"));
    assert!(!conn_str.contains(";;"));

    clear_env();
}
