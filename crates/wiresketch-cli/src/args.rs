//! Command-line argument definitions for the Wiresketch CLI.

use clap::Parser;

/// Command-line arguments for the Wiresketch circuit diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input circuit description
    #[arg(help = "Path to the input file", required_unless_present = "list_types")]
    pub input: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Wire routing mode (straight, orthogonal, curved), overrides the config
    #[arg(long)]
    pub routing: Option<String>,

    /// Directory holding component definitions and an `assets/` folder,
    /// overrides the config
    #[arg(long)]
    pub components: Option<String>,

    /// Skip malformed lines instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Print the available component types and exit
    #[arg(long)]
    pub list_types: bool,
}

impl Args {
    /// Arguments for rendering `input` to `output` with everything else at
    /// its default.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
            output: output.into(),
            config: None,
            log_level: "info".to_string(),
            routing: None,
            components: None,
            lenient: false,
            list_types: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["wiresketch", "circuit.wsk"]).unwrap();

        assert_eq!(args.input.as_deref(), Some("circuit.wsk"));
        assert_eq!(args.output, "out.svg");
        assert!(!args.lenient);
        assert!(args.routing.is_none());
    }

    #[test]
    fn test_input_required_unless_listing() {
        assert!(Args::try_parse_from(["wiresketch"]).is_err());

        let args = Args::try_parse_from(["wiresketch", "--list-types"]).unwrap();
        assert!(args.list_types);
        assert!(args.input.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "wiresketch",
            "circuit.wsk",
            "-o",
            "board.svg",
            "--routing",
            "curved",
            "--components",
            "./parts",
            "--lenient",
        ])
        .unwrap();

        assert_eq!(args.output, "board.svg");
        assert_eq!(args.routing.as_deref(), Some("curved"));
        assert_eq!(args.components.as_deref(), Some("./parts"));
        assert!(args.lenient);
    }
}
