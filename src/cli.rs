use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::models::OcrLanguage;

#[derive(Debug, Parser)]
#[command(name = "ocr-keyword-search")]
#[command(version)]
#[command(about = "Extract text from images with a vision-language model and search it", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to the per-user config directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the upload form (default)
    Serve {
        /// Address to listen on, overrides the settings file
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Extract text from a single image and print both result fields
    Extract {
        image: PathBuf,

        #[arg(short, long, default_value = "")]
        keyword: String,

        /// Accepted for parity with the form; not used by the model
        #[arg(short, long, value_parser = parse_language)]
        language: Option<OcrLanguage>,
    },
}

fn parse_language(value: &str) -> Result<OcrLanguage, String> {
    value.parse().map_err(|e: anyhow::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_without_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["ocr-keyword-search"]).unwrap();

        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parses_extract_arguments() {
        let cli = Cli::try_parse_from([
            "ocr-keyword-search",
            "--config",
            "/tmp/settings.json",
            "extract",
            "scan.png",
            "--keyword",
            "world",
            "--language",
            "hindi",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/settings.json")));
        match cli.command {
            Some(Commands::Extract {
                image,
                keyword,
                language,
            }) => {
                assert_eq!(image, PathBuf::from("scan.png"));
                assert_eq!(keyword, "world");
                assert_eq!(language, Some(OcrLanguage::Hindi));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_language() {
        let result = Cli::try_parse_from(["ocr-keyword-search", "extract", "a.png", "-l", "latin"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_serve_bind_override() {
        let cli = Cli::try_parse_from(["ocr-keyword-search", "serve", "--bind", "0.0.0.0:8080"]).unwrap();

        match cli.command {
            Some(Commands::Serve { bind }) => assert_eq!(bind.as_deref(), Some("0.0.0.0:8080")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
