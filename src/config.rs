//! Connection configuration for the AIDP query tool.
//!
//! Configuration is sourced from the process environment on every call,
//! matching the AIDP "Connection details" contract. Nothing is cached or
//! persisted between invocations.

use crate::error::{AidpError, Result};

/// Environment variable holding the full driver connection string.
pub const ENV_JDBC_URL: &str = "AIDP_JDBC_URL";

/// Environment variable holding the path to the Spark driver library.
///
/// The name is fixed by the AIDP connection docs, which describe the JDBC
/// packaging of the Simba Spark driver; the same library family ships for
/// ODBC and takes identical connection-string attributes.
pub const ENV_JDBC_JAR: &str = "AIDP_JDBC_JAR";

/// Environment variable holding a non-default OCI config file path.
pub const ENV_OCI_CONFIG_FILE: &str = "AIDP_OCI_CONFIG_FILE";

/// Environment variable holding a non-default OCI profile name.
pub const ENV_OCI_PROFILE: &str = "AIDP_OCI_PROFILE";

/// Connection configuration for one query invocation.
///
/// Authentication happens out-of-band through the OCI profile/token
/// mechanism; no username or password ever enters the connection string.
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfig {
    /// Full driver connection string from AIDP "Connection details".
    pub jdbc_url: String,

    /// Filesystem path to the Spark driver library.
    pub driver_path: String,

    /// Non-default OCI config file path, if any.
    pub oci_config_file: Option<String>,

    /// Non-default OCI profile name, if any.
    pub oci_profile: Option<String>,
}

impl ConnectionConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Fails with a configuration error if either required variable is
    /// missing or blank. This runs before any connection attempt.
    pub fn from_env() -> Result<Self> {
        let jdbc_url = env_trimmed(ENV_JDBC_URL);
        let driver_path = env_trimmed(ENV_JDBC_JAR);

        let (Some(jdbc_url), Some(driver_path)) = (jdbc_url, driver_path) else {
            return Err(AidpError::config(format!(
                "{ENV_JDBC_URL} and {ENV_JDBC_JAR} must be set in the environment"
            )));
        };

        Ok(Self {
            jdbc_url,
            driver_path,
            oci_config_file: env_trimmed(ENV_OCI_CONFIG_FILE),
            oci_profile: env_trimmed(ENV_OCI_PROFILE),
        })
    }

    /// Builds the connection string handed to the driver manager.
    ///
    /// Starts from `jdbc_url`. A `Driver={...}` attribute naming the
    /// configured driver library is spliced in front unless the URL already
    /// carries one. If an OCI config file or profile is configured and not
    /// already embedded in the URL, the corresponding attribute is appended,
    /// inserting a `;` separator only when the string does not already end
    /// with one.
    pub fn effective_connection_string(&self) -> String {
        let mut conn_str = if self.jdbc_url.contains("Driver=") {
            self.jdbc_url.clone()
        } else {
            format!("Driver={{{}}};{}", self.driver_path, self.jdbc_url)
        };

        if let Some(cfg) = &self.oci_config_file {
            if !conn_str.contains("OCIConfigFile=") {
                append_attribute(&mut conn_str, "OCIConfigFile", cfg);
            }
        }
        if let Some(profile) = &self.oci_profile {
            if !conn_str.contains("OCIProfile=") {
                append_attribute(&mut conn_str, "OCIProfile", profile);
            }
        }

        conn_str
    }
}

/// Reads an environment variable, treating blank values as unset.
fn env_trimmed(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

/// Appends a `key=value` attribute, avoiding duplicate `;` separators.
fn append_attribute(conn_str: &mut String, key: &str, value: &str) {
    if !conn_str.is_empty() && !conn_str.ends_with(';') {
        conn_str.push(';');
    }
    conn_str.push_str(key);
    conn_str.push('=');
    conn_str.push_str(value);
}
