// Configuration file loading

use imgframe::config::{Config, ConfigError, LogFormat};
use imgframe::resize::OutputFormat;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config_from_file() {
    let file = write_config(
        r#"
fonts:
  dir: /usr/share/fonts/truetype
output:
  format: webp
  quality: 80
limits:
  max_width: 4096
  max_height: 2048
  max_pixels: 8000000
  max_input_bytes: 1048576
logging:
  level: "imgframe=debug"
  format: json
"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.fonts.dir.to_str(), Some("/usr/share/fonts/truetype"));
    assert_eq!(config.output.format, OutputFormat::WebP);
    assert_eq!(config.logging.format, LogFormat::Json);

    let image = config.image_config();
    assert_eq!(image.max_width, 4096);
    assert_eq!(image.max_height, 2048);
    assert_eq!(image.max_pixels, 8_000_000);
    assert_eq!(image.max_input_bytes, 1_048_576);
    assert_eq!(image.default_quality, 80);
    assert_eq!(image.default_format, OutputFormat::WebP);
}

#[test]
fn test_env_var_substitution_in_file() {
    std::env::set_var("IMGFRAME_TEST_FONT_DIR", "/opt/brand/fonts");
    let file = write_config("fonts:\n  dir: ${IMGFRAME_TEST_FONT_DIR}\n");

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.fonts.dir.to_str(), Some("/opt/brand/fonts"));
}

#[test]
fn test_unset_env_var_is_an_error() {
    let file = write_config("fonts:\n  dir: ${IMGFRAME_TEST_NEVER_SET_ANYWHERE}\n");

    match Config::from_file(file.path()) {
        Err(ConfigError::MissingEnvVar(name)) => {
            assert_eq!(name, "IMGFRAME_TEST_NEVER_SET_ANYWHERE")
        }
        other => panic!("expected MissingEnvVar, got {:?}", other),
    }
}

#[test]
fn test_missing_file_reports_path() {
    let err = Config::from_file("/nonexistent/imgframe.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/imgframe.yaml"));
}

#[test]
fn test_malformed_yaml_is_a_parse_error() {
    let file = write_config("output: [this is not a mapping\n");
    assert!(matches!(
        Config::from_file(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_validation_rejects_out_of_range_quality() {
    let file = write_config("output:\n  quality: 101\n");
    let config = Config::from_file(file.path()).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}
