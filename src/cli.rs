// cli.rs - Command-line interface configuration
use std::path::PathBuf;
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "scene-editor")]
#[command(about = "Desktop editor for batches of procedural 3D primitives", long_about = None)]
pub struct Cli {
    /// JSON file with editor settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for primitive colors and positions (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["scene-editor"]);
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
        assert!(cli.width.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from([
            "scene-editor",
            "--config",
            "editor.json",
            "--seed",
            "42",
            "--width",
            "1024",
            "--height",
            "768",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("editor.json")));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.width, Some(1024));
        assert_eq!(cli.height, Some(768));
    }
}
