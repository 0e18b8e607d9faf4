//! Tests for configuration system

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::error::WalkerError;
    use crate::models::config::{OutputFormat, PartialSettings};
    use indexmap::IndexMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_partial_settings_merge() {
        let mut base = PartialSettings {
            ignore_patterns: Some(vec!["*.svg".to_string()]),
            max_depth: Some(2),
            ..Default::default()
        };

        base.merge_from(PartialSettings {
            max_depth: Some(5),
            ..Default::default()
        });

        assert_eq!(base.ignore_patterns, Some(vec!["*.svg".to_string()]));
        assert_eq!(base.max_depth, Some(5));
    }

    #[test]
    fn test_config_builder() {
        let settings = ConfigBuilder::new()
            .merge(PartialSettings {
                match_patterns: Some(vec!["js/*.js".to_string()]),
                output_format: Some(OutputFormat::Json),
                ..Default::default()
            })
            .merge(PartialSettings {
                output_format: Some(OutputFormat::Csv),
                max_depth: Some(3),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(settings.match_patterns, vec!["js/*.js".to_string()]);
        assert_eq!(settings.output_format, OutputFormat::Csv);
        assert_eq!(settings.max_depth, Some(3));
    }

    #[test]
    fn test_file_config_source() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("depwalk.toml");
        fs::write(
            &config_path,
            r#"
                ignore_patterns = ["virtual:*", "*.svg"]
                max_depth = 4
                output_format = "dot"
            "#,
        )
        .unwrap();

        let file_config = FileConfig::with_path(&config_path);
        assert!(file_config.is_available());
        assert_eq!(file_config.priority(), 20);

        let partial = file_config.load().unwrap();
        assert_eq!(
            partial.ignore_patterns,
            Some(vec!["virtual:*".to_string(), "*.svg".to_string()])
        );
        assert_eq!(partial.max_depth, Some(4));
        assert_eq!(partial.output_format, Some(OutputFormat::Dot));
    }

    #[test]
    fn test_load_all_orders_by_priority() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("depwalk.toml");
        fs::write(&config_path, "max_depth = 4\noutput_format = \"json\"").unwrap();

        let file_config = FileConfig::with_path(&config_path);
        let cli_config = CliConfig::new(CliArgs {
            max_depth: Some(1),
            ..Default::default()
        });

        // passed in the wrong order on purpose
        let settings = ConfigBuilder::new()
            .load_all(&[&cli_config, &file_config])
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(settings.max_depth, Some(1));
        assert_eq!(settings.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_try_load_from_ignores_broken_source() {
        let prefix = "DEPWALK_TEST_TRY";
        std::env::set_var(format!("{}_OUTPUT_FORMAT", prefix), "yaml");

        let env_config = EnvConfig::new(prefix);
        let settings = ConfigBuilder::new().try_load_from(&env_config).build().unwrap();
        assert_eq!(settings.output_format, OutputFormat::Text);

        assert!(ConfigBuilder::new().load_from(&env_config).is_err());
    }

    #[test]
    fn test_settings_validator() {
        let valid = PartialSettings {
            ignore_patterns: Some(vec!["*.png".to_string()]),
            ..Default::default()
        }
        .to_settings();
        assert!(SettingsValidator::validate(&valid).is_ok());

        let mut bad_glob = valid.clone();
        bad_glob.match_patterns = vec!["[".to_string()];
        assert!(SettingsValidator::validate(&bad_glob).is_err());

        let mut zero_depth = valid.clone();
        zero_depth.max_depth = Some(0);
        assert!(SettingsValidator::validate(&zero_depth).is_err());

        let mut empty_alias = valid.clone();
        empty_alias.aliases = IndexMap::from([(String::new(), "./src".to_string())]);
        assert!(SettingsValidator::validate(&empty_alias).is_err());

        let mut bad_dialect = valid.clone();
        bad_dialect.dialects.script_extensions = vec!["ts".to_string()];
        assert!(SettingsValidator::validate(&bad_dialect).is_err());

        let mut missing_dir = valid;
        missing_dir.output_file = Some(PathBuf::from("/definitely/not/a/dir/out.json"));
        assert!(matches!(
            SettingsValidator::validate(&missing_dir),
            Err(WalkerError::OutputDirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_load_config_with_env_prefix() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("depwalk.toml");
        fs::write(
            &config_path,
            r#"
                ignore_patterns = ["*.svg"]
                max_depth = 5
                output_format = "csv"

                [aliases]
                "@/" = "./src/"
            "#,
        )
        .unwrap();

        let prefix = "DEPWALK_TEST_LAYERS";
        std::env::set_var(format!("{}_OUTPUT_FORMAT", prefix), "json");
        std::env::set_var(format!("{}_MAX_DEPTH", prefix), "7");

        let cli_args = CliArgs {
            max_depth: Some(2),
            aliases: Some(IndexMap::from([("ui".to_string(), "@corp/ui".to_string())])),
            config: Some(config_path),
            ..Default::default()
        };

        let settings = load_config_with_env_prefix(cli_args, prefix).unwrap();

        // file only
        assert_eq!(settings.ignore_patterns, vec!["*.svg".to_string()]);
        // environment over file
        assert_eq!(settings.output_format, OutputFormat::Json);
        // command line over environment
        assert_eq!(settings.max_depth, Some(2));
        // aliases from every layer are kept
        assert_eq!(settings.aliases["@/"], "./src/");
        assert_eq!(settings.aliases["ui"], "@corp/ui");
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let cli_args = CliArgs {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Default::default()
        };

        assert!(matches!(
            load_config_with_env_prefix(cli_args, "DEPWALK_TEST_MISSING"),
            Err(WalkerError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_create_default_config_round_trips() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILE);

        FileConfig::with_path(&config_path).create_default().unwrap();

        let settings = ConfigBuilder::new()
            .add_config_file(&config_path)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(settings.output_format, OutputFormat::Text);
        assert!(settings.use_colors);
    }
}
