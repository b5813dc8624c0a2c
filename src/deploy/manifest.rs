//! Typed view of the `render.yaml` deployment blueprint and its checks.

use crate::error::TrackerError;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::HashSet;
use std::path::Path;

/// Keys the service needs bound in the web service environment.
pub const REQUIRED_ENV_KEYS: &[&str] = &[
    "DATABASE_URL",
    "SECRET_KEY",
    "PASSWORD_SALT",
    "RUSTUP_TOOLCHAIN",
];

/// Keys whose values must be generated by the platform, never written in source.
pub const GENERATED_ENV_KEYS: &[&str] = &["SECRET_KEY", "PASSWORD_SALT"];

#[derive(Debug, Clone, Deserialize)]
pub struct Blueprint {
    #[serde(default)]
    pub databases: Vec<DatabaseSpec>,
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSpec {
    pub name: String,
    pub database_name: Option<String>,
    pub user: Option<String>,
    pub plan: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(alias = "env")]
    pub runtime: Option<String>,
    pub plan: Option<String>,
    pub build_command: Option<String>,
    pub start_command: Option<String>,
    pub health_check_path: Option<String>,
    #[serde(default)]
    pub env_vars: Vec<EnvVarSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSpec {
    pub key: String,
    pub value: Option<Value>,
    pub generate_value: Option<bool>,
    pub from_database: Option<ResourceRef>,
    pub from_service: Option<Value>,
    pub sync: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResourceRef {
    pub name: String,
    pub property: String,
}

/// Where an environment value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSource {
    Static(String),
    Generated,
    FromDatabase(ResourceRef),
    FromService,
}

impl EnvVarSpec {
    /// Exactly one source must be declared per key.
    pub fn source(&self) -> Result<EnvSource, TrackerError> {
        let mut sources = Vec::with_capacity(1);
        if let Some(v) = &self.value {
            sources.push(EnvSource::Static(yaml_scalar(v).ok_or_else(|| {
                TrackerError::InvalidManifest(format!("{}: value must be a scalar", self.key))
            })?));
        }
        match self.generate_value {
            Some(true) => sources.push(EnvSource::Generated),
            Some(false) => {
                return Err(TrackerError::InvalidManifest(format!(
                    "{}: generateValue must be true when present",
                    self.key
                )));
            }
            None => {}
        }
        if let Some(r) = &self.from_database {
            sources.push(EnvSource::FromDatabase(r.clone()));
        }
        if self.from_service.is_some() {
            sources.push(EnvSource::FromService);
        }
        match sources.len() {
            1 => Ok(sources.remove(0)),
            0 => Err(TrackerError::InvalidManifest(format!(
                "{}: no value source declared",
                self.key
            ))),
            _ => Err(TrackerError::InvalidManifest(format!(
                "{}: more than one value source declared",
                self.key
            ))),
        }
    }
}

fn yaml_scalar(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSummary {
    pub database: String,
    pub service: String,
    pub build_command: String,
    pub start_command: String,
    pub env_keys: Vec<String>,
}

impl Blueprint {
    pub fn from_yaml_str(raw: &str) -> Result<Self, TrackerError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, TrackerError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn web_service(&self) -> Option<&ServiceSpec> {
        self.services.iter().find(|s| s.kind == "web")
    }

    /// Check topology (one database, one web service) and env bindings.
    pub fn validate(&self) -> Result<ManifestSummary, TrackerError> {
        let [database] = self.databases.as_slice() else {
            return Err(TrackerError::InvalidManifest(format!(
                "expected exactly one database, found {}",
                self.databases.len()
            )));
        };
        let [service] = self.services.as_slice() else {
            return Err(TrackerError::InvalidManifest(format!(
                "expected exactly one service, found {}",
                self.services.len()
            )));
        };
        if service.kind != "web" {
            return Err(TrackerError::InvalidManifest(format!(
                "service '{}' has type '{}', expected 'web'",
                service.name, service.kind
            )));
        }
        let build_command = non_blank(service.build_command.as_deref()).ok_or_else(|| {
            TrackerError::InvalidManifest(format!("service '{}' has no buildCommand", service.name))
        })?;
        let start_command = non_blank(service.start_command.as_deref()).ok_or_else(|| {
            TrackerError::InvalidManifest(format!("service '{}' has no startCommand", service.name))
        })?;

        let mut seen = HashSet::new();
        let mut env_keys = Vec::with_capacity(service.env_vars.len());
        for var in &service.env_vars {
            if !seen.insert(var.key.as_str()) {
                return Err(TrackerError::InvalidManifest(format!(
                    "{}: declared more than once",
                    var.key
                )));
            }
            let source = var.source()?;
            if let EnvSource::FromDatabase(r) = &source
                && r.name != database.name
            {
                return Err(TrackerError::InvalidManifest(format!(
                    "{}: references unknown database '{}'",
                    var.key, r.name
                )));
            }
            check_expected_source(&var.key, &source)?;
            env_keys.push(var.key.clone());
        }

        let missing: Vec<&str> = REQUIRED_ENV_KEYS
            .iter()
            .copied()
            .filter(|k| !seen.contains(k))
            .collect();
        if !missing.is_empty() {
            return Err(TrackerError::InvalidManifest(format!(
                "missing environment keys: {}",
                missing.join(", ")
            )));
        }

        Ok(ManifestSummary {
            database: database.name.clone(),
            service: service.name.clone(),
            build_command: build_command.to_string(),
            start_command: start_command.to_string(),
            env_keys,
        })
    }
}

fn check_expected_source(key: &str, source: &EnvSource) -> Result<(), TrackerError> {
    if GENERATED_ENV_KEYS.contains(&key) && *source != EnvSource::Generated {
        return Err(TrackerError::InvalidManifest(format!(
            "{key}: must use generateValue"
        )));
    }
    if key == "DATABASE_URL" {
        match source {
            EnvSource::FromDatabase(r) if r.property == "connectionString" => {}
            _ => {
                return Err(TrackerError::InvalidManifest(
                    "DATABASE_URL: must come from the database connectionString".to_string(),
                ));
            }
        }
    }
    Ok(())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
databases:
  - name: daily_tracker
    databaseName: daily_tracker
services:
  - type: web
    name: api
    runtime: rust
    buildCommand: ./build.sh
    startCommand: ./target/release/daily-tracker serve
    envVars:
      - key: DATABASE_URL
        fromDatabase:
          name: daily_tracker
          property: connectionString
      - key: SECRET_KEY
        generateValue: true
      - key: PASSWORD_SALT
        generateValue: true
      - key: RUSTUP_TOOLCHAIN
        value: 1.89.0
"#;

    #[test]
    fn valid_blueprint_summarizes() {
        let summary = Blueprint::from_yaml_str(VALID).unwrap().validate().unwrap();
        assert_eq!(summary.database, "daily_tracker");
        assert_eq!(summary.service, "api");
        assert_eq!(summary.build_command, "./build.sh");
        assert_eq!(summary.env_keys.len(), 4);
    }

    #[test]
    fn secret_written_in_source_is_rejected() {
        let raw = VALID.replace(
            "      - key: SECRET_KEY\n        generateValue: true",
            "      - key: SECRET_KEY\n        value: hunter2",
        );
        let err = Blueprint::from_yaml_str(&raw).unwrap().validate().unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn two_sources_for_one_key_is_rejected() {
        let var = EnvVarSpec {
            key: "X".to_string(),
            value: Some(Value::String("a".to_string())),
            generate_value: Some(true),
            from_database: None,
            from_service: None,
            sync: None,
        };
        assert!(var.source().is_err());
    }

    #[test]
    fn numeric_values_are_scalars() {
        let var = EnvVarSpec {
            key: "WORKERS".to_string(),
            value: Some(serde_yaml::from_str("4").unwrap()),
            generate_value: None,
            from_database: None,
            from_service: None,
            sync: None,
        };
        assert_eq!(var.source().unwrap(), EnvSource::Static("4".to_string()));
    }
}
