// SITESMITH: Prompt-to-Website Generator
// Copyright (c) 2024 SITESMITH Core Team

use anyhow::Context as _;
use sitesmith::{
    ai::{AIClient, AIConfig, GenerationOptions},
    analysis::analyze,
    config::Config,
    design::DesignResolver,
    output::{formatter, GenerationSummary, ProjectWriter},
    pipeline::{NoProgress, Pipeline, PipelineOptions, ProgressSink},
    progress::{get_progress, init_progress},
};
use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
use cli::{Cli, Commands, OutputFormat};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
        colored::control::set_override(false);
    }

    if !cli.quiet && !matches!(cli.command, Commands::Version) {
        sitesmith::banner::display_banner();
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli, config).await {
        tracing::error!("Error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity
/// - 0: errors only (progress bar mode)
/// - 1 (-v): info
/// - 2 (-vv): debug
/// - 3+ (-vvv): trace
fn init_logging(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let verbosity = cli.verbose.max(config.global.verbosity);
    let progress_enabled = verbosity == 0 && !cli.quiet;
    init_progress(progress_enabled);

    let filter_str = match verbosity {
        0 => "error",
        1 => "sitesmith=info",
        2 => "sitesmith=debug",
        _ => "sitesmith=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.global.log_json {
        registry.with(fmt_layer.json()).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    }
    .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Run the CLI command
async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let color = !cli.no_color && config.global.color;

    match cli.command {
        Commands::Generate(args) => {
            run_generate(args, config, cli.ai_config.as_deref(), color).await
        }
        Commands::Analyze { prompt, format } => run_analyze(&prompt, format),
        Commands::Design {
            prompt,
            seed,
            format,
        } => run_design(&prompt, seed.or(config.generation.seed), format),
        Commands::Providers { action } => {
            handle_providers_command(action, cli.ai_config.as_deref()).await
        }
        Commands::Config(cmd) => run_config_command(cmd),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_ai_config(path: Option<&Path>) -> anyhow::Result<AIConfig> {
    match path {
        Some(path) => AIConfig::load_from(path),
        None => AIConfig::load(),
    }
}

/// Generate a project and write it
async fn run_generate(
    args: cli::GenerateArgs,
    mut config: Config,
    ai_config_path: Option<&Path>,
    color: bool,
) -> anyhow::Result<()> {
    if let Some(seed) = args.seed {
        config.generation.seed = Some(seed);
    }
    if let Some(concurrency) = args.concurrency {
        config.generation.concurrency = concurrency;
    }
    config.generation.offline |= args.offline;
    config.validate()?;

    let mut ai_config = if config.generation.offline {
        AIConfig::default()
    } else {
        load_ai_config(ai_config_path)?
    };
    if !args.providers.is_empty() {
        for name in &args.providers {
            if ai_config.get_provider(name).is_none() {
                anyhow::bail!("Unknown provider '{}'", name);
            }
        }
        ai_config.restrict_to(&args.providers);
    }

    let pipeline = Pipeline::from_config(&config, &ai_config);

    // Ctrl-C or the overall timeout stop further slot requests; the run
    // still finishes with fallback copy for whatever is missing.
    let cancel = pipeline.cancellation_token();
    let timeout = Duration::from_secs(config.generation.timeout_secs);
    let watchdog = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::warn!("Interrupted, finishing with fallback content"),
                _ = tokio::time::sleep(timeout) => tracing::warn!("Generation timed out after {:?}", timeout),
            }
            cancel.cancel();
        }
    });

    let progress: &dyn ProgressSink = match get_progress() {
        Some(tracker) if tracker.is_enabled() => {
            tracker.init(&args.prompt);
            tracker
        }
        _ => &NoProgress,
    };

    let output = pipeline.generate(&args.prompt, progress).await;
    watchdog.abort();

    let target = args
        .output
        .unwrap_or_else(|| config.generation.output_dir.clone());
    if !args.dry_run {
        ProjectWriter::new(&target)
            .force(args.force)
            .write(&output.files)
            .with_context(|| format!("Failed to write project to {}", target.display()))?;
    }

    let summary = GenerationSummary::new(&args.prompt, &output);
    let formatter = formatter(args.format.as_str(), color)
        .context("Unsupported summary format")?;
    println!("{}", formatter.format(&summary)?);

    if !args.dry_run && args.format == OutputFormat::Text {
        println!(
            "{} Project written to {}",
            style("✓").green(),
            style(target.display()).bold()
        );
        println!("  cd {} && npm install && npm run dev", target.display());
    }

    Ok(())
}

fn run_analyze(prompt: &str, format: OutputFormat) -> anyhow::Result<()> {
    let analysis = analyze(prompt);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{}", style("Prompt Analysis").bold().cyan());
    println!("{}", style("═".repeat(60)).dim());
    println!("  Site type:  {}", style(analysis.site_type).bold());
    println!("  Industry:   {}", analysis.industry);
    println!("  Style:      {}", analysis.style);
    println!("  Confidence: {:.2}", analysis.confidence);
    println!(
        "  Features:   {}",
        analysis.features.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    println!("  Keywords:   {}", analysis.keywords.join(", "));

    let entities = &analysis.entities;
    if let Some(name) = &entities.company_name {
        println!("  Name:       {}", name);
    }
    if let Some(location) = &entities.location {
        println!("  Location:   {}", location);
    }
    if !entities.services.is_empty() {
        println!("  Services:   {}", entities.services.join(", "));
    }
    if !entities.products.is_empty() {
        println!("  Products:   {}", entities.products.join(", "));
    }

    Ok(())
}

fn run_design(prompt: &str, seed: Option<String>, format: OutputFormat) -> anyhow::Result<()> {
    let resolver = match seed {
        Some(seed) => DesignResolver::with_seed(seed),
        None => DesignResolver::new(),
    };
    let (design, variation) = resolver.resolve(prompt);

    if format == OutputFormat::Json {
        let value = serde_json::json!({ "design": design, "variation": variation });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let colors = &design.colors;
    let styles = &variation.component_styles;
    println!("{}", style("Design System").bold().cyan());
    println!("{}", style("═".repeat(60)).dim());
    println!("  Industry:    {}", design.industry.name);
    println!("  Palette:     {}", style(colors.name).bold());
    for (name, value) in colors.css_variables() {
        println!("    {:<20} {}", name, value);
    }
    println!(
        "  Personality: {:?} / {:?} / {:?} / {:?}",
        design.personality.mood,
        design.personality.energy,
        design.personality.sophistication,
        design.personality.trust_level
    );
    println!("  Headings:    {}", design.typography.heading_font);
    println!("  Body:        {}", design.typography.body_font);
    println!();
    println!("{}", style("Style Variation").bold().cyan());
    println!("{}", style("═".repeat(60)).dim());
    println!("  Layout:      {}", variation.layout_variant);
    println!(
        "  Components:  buttons {}, cards {}, navigation {}, hero {}",
        styles.buttons, styles.cards, styles.navigation, styles.hero
    );
    println!("  Spacing:     {}", variation.spacing_scale);
    println!("  Animation:   {}", variation.animation_level);
    println!("  Imagery:     {}", variation.image_style);
    println!(
        "  Interaction: {}",
        variation
            .interaction_patterns
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}

async fn handle_providers_command(
    action: cli::ProviderAction,
    ai_config_path: Option<&Path>,
) -> anyhow::Result<()> {
    use cli::ProviderAction;

    match action {
        ProviderAction::Init { output, force } => {
            init_provider_catalog(output.as_deref().or(ai_config_path), force)
        }
        ProviderAction::List { detailed } => {
            let ai_config = load_ai_config(ai_config_path)?;
            println!();
            println!("{}", style("AI Providers (priority order)").bold().cyan());
            println!("{}", style("═".repeat(60)).dim());
            println!();

            let eligible = ai_config.eligible_providers();
            for name in ai_config.providers_in_priority() {
                let Some(provider) = ai_config.get_provider(&name) else {
                    continue;
                };

                let (icon, status) = if eligible.contains(&name) {
                    (style("✓").green(), style("ready").green())
                } else if !provider.enabled {
                    (style("○").dim(), style("disabled").dim())
                } else {
                    (style("✗").yellow(), style("no API key").yellow())
                };
                println!("  {} {:<12} {}", icon, style(&name).bold(), status);

                if detailed {
                    println!("      Protocol:   {:?}", provider.kind);
                    println!("      Endpoint:   {}", provider.endpoint);
                    println!("      Model:      {}", provider.model);
                    println!("      Max tokens: {}", provider.max_tokens);
                    println!("      Rate limit: {}/min", provider.rate_limit_per_minute);
                }
            }

            println!();
            if eligible.is_empty() {
                println!(
                    "  {} No provider is ready; sites will use fallback copy.",
                    style("ℹ").yellow()
                );
                println!("  Export OPENAI_API_KEY (or another provider key) to enable AI copy.");
                println!();
            }
            println!("Use 'sitesmith providers test <name>' to test a provider");
            println!();
            Ok(())
        }
        ProviderAction::Test { provider } => {
            let ai_config = load_ai_config(ai_config_path)?;
            if ai_config.get_provider(&provider).is_none() {
                anyhow::bail!("Unknown provider '{}'", provider);
            }

            println!();
            println!(
                "{}",
                style(format!("Testing Provider: {}", provider)).bold().cyan()
            );
            println!("{}", style("═".repeat(60)).dim());

            let client = AIClient::from_config(&ai_config)?;
            let options = GenerationOptions {
                max_tokens: Some(16),
                ..GenerationOptions::default()
            };

            let started = Instant::now();
            let result = client
                .call(&provider, "Reply with the single word: ready", &options)
                .await;
            let elapsed = started.elapsed().as_millis();

            match result {
                Ok(completion) => {
                    println!("  {} Response in {}ms", style("✓").green(), elapsed);
                    println!("  {}", completion.content.trim());
                    if let Some(usage) = completion.usage {
                        println!("  Tokens: {} in, {} out", usage.input_tokens, usage.output_tokens);
                    }
                    Ok(())
                }
                Err(e) => {
                    println!("  {} {}", style("✗").red(), e);
                    Err(e.into())
                }
            }
        }
    }
}

/// Write the default catalog, keys left as `${ENV_VAR}` references
fn init_provider_catalog(output: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let catalog = AIConfig::default();
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => AIConfig::config_path()?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to replace it)",
            path.display()
        );
    }

    match output {
        Some(path) => catalog.save_to(path)?,
        None => catalog.save()?,
    }

    println!(
        "{} Provider catalog written to {}",
        style("✓").green(),
        style(path.display()).bold()
    );
    println!("  Export the API key variables it references, or edit the file directly.");
    Ok(())
}

fn run_config_command(cmd: cli::ConfigCommand) -> anyhow::Result<()> {
    use cli::ConfigAction;

    match cmd.action {
        ConfigAction::Generate { output, format } => {
            let output = with_format_extension(output, format);
            Config::default().save(&output)?;
            println!("Configuration generated: {}", output.display());
            Ok(())
        }
        ConfigAction::Validate { config } => {
            let cfg = Config::from_file(&config)?;
            cfg.validate()?;
            println!("Configuration is valid");
            Ok(())
        }
        ConfigAction::Show => {
            println!("{}", serde_yaml::to_string(&Config::default())?);
            Ok(())
        }
    }
}

/// The file extension decides the format on save
fn with_format_extension(path: PathBuf, format: cli::ConfigFormat) -> PathBuf {
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e == format.extension() || (e == "yml" && format == cli::ConfigFormat::Yaml))
        .unwrap_or(false);
    if matches {
        path
    } else {
        path.with_extension(format.extension())
    }
}

fn print_version() {
    sitesmith::banner::display_minimal_banner();
    println!("SITESMITH v{}", env!("CARGO_PKG_VERSION"));
    println!("Prompt-to-Website Generator");
    println!();
    println!("Build Information:");
    println!("  Target: {}", std::env::consts::ARCH);
    println!("  OS: {}", std::env::consts::OS);
}
