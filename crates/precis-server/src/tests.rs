use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::*;

// =============================================================================
// CLI
// =============================================================================

mod cli_tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["precis", "serve"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert_eq!(cli.command.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "precis",
            "-vv",
            "serve",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--model-dir",
            "/models/t5",
            "--max-length",
            "60",
            "--min-length",
            "10",
            "--request-timeout-secs",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let overrides = cli.command.overrides();
        assert_eq!(overrides.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(overrides.port, Some(8080));
        assert_eq!(overrides.model_dir, Some(PathBuf::from("/models/t5")));
        assert_eq!(overrides.max_length, Some(60));
        assert_eq!(overrides.min_length, Some(10));
        assert_eq!(overrides.request_timeout_secs, Some(5));
    }

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::try_parse_from([
            "precis",
            "summarize",
            "--input",
            "some text",
            "--config",
            "custom.toml",
            "-q",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match &cli.command {
            Commands::Summarize { input, quiet, .. } => {
                assert_eq!(input.as_deref(), Some("some text"));
                assert!(*quiet);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.command.overrides().host.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["precis", "translate"]).is_err());
    }
}

// =============================================================================
// Config
// =============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 2850);
        assert_eq!(config.bind_addr(), "0.0.0.0:2850");
        assert!(config.request_timeout().is_none());

        assert_eq!(config.model.dir, PathBuf::from("models/onnx_flant5_small"));
        assert_eq!(config.generation.max_length, 100);
        assert_eq!(config.generation.min_length, 30);
        assert_eq!(config.generation.prompt_prefix, "summarize: ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("precis.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            port = 9000
            request_timeout_secs = 30

            [generation]
            min_length = 5
            prompt_prefix = ""
            "#,
        )
        .unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.generation.min_length, 5);
        assert_eq!(config.generation.max_length, 100);
        assert_eq!(config.generation.prompt_prefix, "");
        assert_eq!(config.model.tokenizer_file, PathBuf::from("tokenizer.json"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("missing.toml").as_path())).is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(load_config_from_path(&path).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = ServerConfig::default();
        ConfigOverrides {
            port: Some(1234),
            model_dir: Some(PathBuf::from("/tmp/model")),
            max_length: Some(40),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.server.port, 1234);
        assert_eq!(config.model.dir, PathBuf::from("/tmp/model"));
        assert_eq!(config.generation.max_length, 40);
        assert_eq!(config.generation.min_length, 30);
    }

    #[test]
    fn test_validate_rejects_bad_lengths() {
        let mut config = ServerConfig::default();
        config.generation.min_length = 200;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.generation.max_length = 0;
        config.generation.min_length = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.generation.max_input_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_options_follow_config() {
        let mut config = ServerConfig::default();
        config.generation.max_input_length = 128;
        config.generation.pad_to_max_length = false;
        config.model.encoder_file = PathBuf::from("encoder_quantized.onnx");

        let options = config.load_options();
        assert_eq!(options.encoder_file, PathBuf::from("encoder_quantized.onnx"));
        assert_eq!(options.decoder_file, PathBuf::from("decoder_model.onnx"));
        assert_eq!(options.codec.max_input_length, 128);
        assert!(!options.codec.pad_to_max_length);
    }

    #[test]
    fn test_load_summarizer_missing_model_dir() {
        let mut config = ServerConfig::default();
        config.model.dir = PathBuf::from("/nonexistent/precis-model");
        let err = load_summarizer(&config).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/precis-model"));
    }
}
