//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use bilancio_config::{BilancioConfig, ConfigError};
use bilancio_core::ExportFormat;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn loads_api_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://bilanci.example.org/"
timeout_secs = 45
user_agent = "studio-rossi/1.0"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(BilancioConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = BilancioConfig::from_figment(&figment).expect("config extracts");

        assert_eq!(config.api.origin(), "https://bilanci.example.org");
        assert_eq!(config.api.timeout_secs, 45);
        assert_eq!(config.api.user_agent, "studio-rossi/1.0");
        Ok(())
    });
}

#[test]
fn loads_export_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[export]
format = "json"
output_dir = "exports"
"#,
        )?;

        let config: BilancioConfig = Figment::from(Serialized::defaults(BilancioConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.export.format, ExportFormat::Json);
        assert_eq!(config.export.output_dir, PathBuf::from("exports"));
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".bilancio")?;
        jail.create_file(
            ".bilancio/config.toml",
            r#"
[api]
base_url = "http://project-backend:8000"
"#,
        )?;

        let config = BilancioConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://project-backend:8000");
        assert_eq!(config.api.timeout_secs, 120);
        Ok(())
    });
}

#[test]
fn env_overrides_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".bilancio")?;
        jail.create_file(
            ".bilancio/config.toml",
            r#"
[api]
base_url = "http://from-toml:8000"
"#,
        )?;
        jail.set_env("BILANCIO_API__BASE_URL", "http://from-env:8000");

        let config = BilancioConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://from-env:8000");
        Ok(())
    });
}

#[test]
fn unknown_export_format_fails_extraction() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[export]
format = "xlsx"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(BilancioConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = BilancioConfig::from_figment(&figment).expect_err("xlsx is not an export format");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn zero_timeout_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
timeout_secs = 0
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(BilancioConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = BilancioConfig::from_figment(&figment).expect_err("zero timeout rejected");
        assert!(err.to_string().contains("api.timeout_secs"));
        Ok(())
    });
}
