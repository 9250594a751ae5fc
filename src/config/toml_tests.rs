//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.api.token.is_none());
        assert!(config.api.base_url.is_none());
        assert!(config.api.headers.is_empty());
    }

    #[test]
    fn parse_full_api_section() {
        let toml = r#"
            [api]
            token = "secret-token"
            base_url = "https://staging-nginz-https.zinfra.io"
            timeout = 30
            max_body_bytes = 1048576

            [api.headers]
            X-Custom-Header = "custom-value"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let api = &config.api;

        assert_eq!(api.token.as_deref(), Some("secret-token"));
        assert_eq!(
            api.base_url.as_deref(),
            Some("https://staging-nginz-https.zinfra.io")
        );
        assert_eq!(api.timeout, Some(30));
        assert_eq!(api.max_body_bytes, Some(1_048_576));
        assert_eq!(
            api.headers.get("X-Custom-Header").map(String::as_str),
            Some("custom-value")
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [api]
            token = "secret"
            retries = 3
        "#;

        assert!(matches!(
            TomlConfig::parse(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(TomlConfig::parse("[server]\nport = 1").is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(TomlConfig::parse("[api]\ntimeout = \"fifteen\"").is_err());
    }
}

mod loading {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\ntoken = \"from-file\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();

        assert_eq!(config.api.token.as_deref(), Some("from-file"));
    }

    #[test]
    fn load_missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = TomlConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.api.timeout, Some(15));
        assert!(config.api.token.is_none());
    }

    #[test]
    fn default_template_documents_every_key() {
        let template = default_config_template();

        for key in ["token", "base_url", "timeout", "max_body_bytes", "[api.headers]"] {
            assert!(template.contains(key), "template is missing {key}");
        }
    }
}
