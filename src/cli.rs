//! Command-line interface for SITESMITH

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sitesmith",
    version,
    about = "Prompt-driven website generator",
    long_about = "SITESMITH turns a one-line request such as \"build a website for my athletic \
                  shoe store\" into a complete static site project. The prompt is classified, a \
                  deterministic design system is resolved from it, business copy is written by \
                  the first available AI provider, and everything is assembled over a fixed \
                  project skeleton. With no provider configured the site is still produced \
                  from deterministic fallback copy.",
    after_help = "EXAMPLES:
  # Generate a site
  sitesmith generate \"Build a website for my athletic shoe store\"
  sitesmith generate \"a cozy family bakery in Lisbon\" --output bakery-site

  # Reproducible design, offline copy
  sitesmith generate \"minimal architecture portfolio\" --seed launch --offline

  # Restrict providers
  sitesmith generate \"seafood restaurant\" --provider anthropic --provider gemini

  # Inspect the pipeline stages
  sitesmith analyze \"online store for handmade candles\"
  sitesmith design \"luxury spa\" --seed demo --format json

  # Providers and configuration
  sitesmith providers list
  sitesmith providers test openai
  sitesmith providers init
  sitesmith config generate --output sitesmith.yaml

ENVIRONMENT:
  OPENAI_API_KEY, ANTHROPIC_API_KEY, GEMINI_API_KEY, GROQ_API_KEY,
  DEEPSEEK_API_KEY, COHERE_API_KEY, HUGGINGFACE_API_KEY
  RUST_LOG overrides the -v log filter."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress the banner and progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Provider catalog path (default: ~/.sitesmith/ai-config.yaml)
    #[arg(long, global = true, value_name = "FILE", env = "SITESMITH_AI_CONFIG")]
    pub ai_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a website project from a prompt
    Generate(GenerateArgs),

    /// Classify a prompt without generating anything
    Analyze {
        /// Website request
        prompt: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Resolve the design system for a prompt
    Design {
        /// Website request
        prompt: String,

        /// Seed used instead of the prompt
        #[arg(short, long, value_name = "SEED")]
        seed: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Manage AI providers
    Providers {
        #[command(subcommand)]
        action: ProviderAction,
    },

    /// Generate configuration file
    Config(ConfigCommand),

    /// Display version information
    Version,
}

#[derive(Parser, Debug)]
#[command(
    about = "Generate a website project from a prompt",
    after_help = "OUTPUT:
  The project is written to --output (default: generated-site). The directory
  must be empty or absent unless --force is given. Use --dry-run to print the
  summary without writing files.

FALLBACK:
  Every content slot that cannot be generated (no provider, all providers
  failed, or the copy looked like template boilerplate) takes deterministic
  fallback copy. The summary lists which slots fell back and why."
)]
pub struct GenerateArgs {
    /// Website request
    pub prompt: String,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Design seed used instead of the prompt
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<String>,

    /// Only use these providers, in this order (repeatable)
    #[arg(short, long = "provider", value_name = "PROVIDER")]
    pub providers: Vec<String>,

    /// Never call a provider
    #[arg(long)]
    pub offline: bool,

    /// Content slots requested at once
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write into a non-empty output directory
    #[arg(short = 'F', long)]
    pub force: bool,

    /// Generate without writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum ProviderAction {
    /// List configured providers in priority order
    List {
        /// Show endpoint, model and limits
        #[arg(short = 'd', long)]
        detailed: bool,
    },

    /// Send one short prompt to a provider
    Test {
        /// Provider name (openai, anthropic, gemini, ...)
        provider: String,
    },

    /// Write the built-in provider catalog for editing
    Init {
        /// Catalog path (default: ~/.sitesmith/ai-config.yaml)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Replace an existing catalog
        #[arg(short = 'F', long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "sitesmith.yaml", value_name = "FILE")]
        output: PathBuf,

        /// Configuration format
        #[arg(short, long, value_enum, default_value = "yaml", value_name = "FORMAT")]
        format: ConfigFormat,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file to validate
        config: PathBuf,
    },

    /// Show current/default configuration
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable
    Text,
    /// JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML
    Yaml,
    /// TOML
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::parse_from([
            "sitesmith",
            "-vv",
            "generate",
            "a bakery",
            "--seed",
            "s1",
            "--provider",
            "openai",
            "--provider",
            "gemini",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.prompt, "a bakery");
                assert_eq!(args.seed.as_deref(), Some("s1"));
                assert_eq!(args.providers, ["openai", "gemini"]);
                assert_eq!(args.format, OutputFormat::Json);
                assert!(!args.offline);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_providers_list() {
        let cli = Cli::parse_from(["sitesmith", "--quiet", "providers", "list", "-d"]);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Providers {
                action: ProviderAction::List { detailed: true }
            }
        ));
    }

    #[test]
    fn test_providers_init() {
        let cli = Cli::parse_from(["sitesmith", "providers", "init", "-o", "catalog.yaml", "--force"]);
        match cli.command {
            Commands::Providers {
                action: ProviderAction::Init { output, force },
            } => {
                assert_eq!(output, Some(PathBuf::from("catalog.yaml")));
                assert!(force);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
