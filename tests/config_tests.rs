use std::io::Write;

use scene_editor::cli::Cli;
use scene_editor::config::{ConfigError, EditorConfig};
use scene_editor::editor::{EditorAction, SceneEditor};

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write config");
    file
}

#[cfg(test)]
mod config_file_tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let file = write_config(r#"{ "sidebar_fraction": 0.25, "seed": 42, "fov_degrees": 60.0 }"#);
        let config = EditorConfig::load(file.path()).expect("valid config");

        assert_eq!(config.sidebar_fraction, 0.25);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.fov_degrees, 60.0);
        assert_eq!(config.window_width, EditorConfig::default().window_width);
    }

    #[test]
    fn test_cli_seed_beats_file_seed() {
        let file = write_config(r#"{ "seed": 1, "window_height": 600 }"#);
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            seed: Some(2),
            ..Cli::default()
        };
        let config = EditorConfig::from_cli(&cli).expect("valid config");

        assert_eq!(config.seed, Some(2));
        assert_eq!(config.window_height, 600);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("{ \"seed\": ");
        let err = EditorConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn test_seeded_config_gives_repeatable_scene() {
        let file = write_config(r#"{ "seed": 77 }"#);
        let config = EditorConfig::load(file.path()).expect("valid config");

        let mut first = SceneEditor::new(&config);
        let mut second = SceneEditor::new(&config);
        for editor in [&mut first, &mut second] {
            editor.dialog_mut().draft.count = "4".to_string();
            editor.apply(EditorAction::ConfirmAdd);
        }
        assert_eq!(first.store().records(), second.store().records());
    }
}
