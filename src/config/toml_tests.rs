//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_full_api_section() {
        let toml = r#"
            [api]
            token = "server-token"
            connection_type = "account"
            base_url = "https://api.example.com/"
            user_agent = "my-app/1.0"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let api = &config.api;

        assert_eq!(api.token.as_deref(), Some("server-token"));
        assert_eq!(api.connection_type.as_deref(), Some("account"));
        assert_eq!(api.base_url.as_deref(), Some("https://api.example.com/"));
        assert_eq!(api.user_agent.as_deref(), Some("my-app/1.0"));
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.api.token.is_none());
        assert!(config.api.connection_type.is_none());
        assert!(config.api.base_url.is_none());
        assert!(config.api.user_agent.is_none());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [api]
            token = "t"
            timeout = 30
        "#;

        assert!(matches!(
            TomlConfig::parse(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(TomlConfig::parse("[server]\nname = \"x\"").is_err());
    }

    #[test]
    fn invalid_syntax_is_rejected() {
        assert!(matches!(
            TomlConfig::parse("[api\ntoken ="),
            Err(ConfigError::TomlParse(_))
        ));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        // Everything is commented out
        assert!(config.api.token.is_none());
    }

    #[test]
    fn default_template_documents_every_field() {
        let template = default_config_template();

        assert!(template.contains("[api]"));
        for key in ["token", "connection_type", "base_url", "user_agent"] {
            assert!(template.contains(&format!("# {key} = ")), "missing {key}");
        }
    }
}
