use clap::{CommandFactory, Parser};
use codescan::cli::{Cli, Commands, SearchArgs, TargetArgs, unescape};
use codescan::config::Config;
use codescan::error::{Result as ScanResult, ScanError};
use codescan::output::{self, OutputFormat};
use codescan::{
    FileTypeClassifier, RepoResolver, SearchEngine, SearchMode, SearchOptions, StructureOptions,
    get_structure,
};
use colored::*;
use env_logger::{Builder, Env, Target};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> ScanResult<()> {
    let config = Config::load(cli.config.as_deref())?;
    setup_logging(cli, &config)?;

    let start_time = Instant::now();
    info!("Application started with command: {:?}", cli.command);

    match &cli.command {
        Commands::Keyword {
            pattern,
            target,
            search,
            case,
        } => {
            let root = resolve_target(cli, &config, target)?;
            let case_sensitive = case.resolve(config.search.case_sensitive);
            let options = search_options(&config, search, case_sensitive);
            run_search(SearchMode::Keyword, pattern, &root, options, search.format)?;
        }
        Commands::Snippet {
            snippet,
            target,
            search,
            case,
            escapes,
        } => {
            let root = resolve_target(cli, &config, target)?;
            let case_sensitive = case.resolve(config.search.case_sensitive);
            let options = search_options(&config, search, case_sensitive);
            let snippet = if *escapes {
                unescape(snippet)
            } else {
                snippet.clone()
            };
            run_search(SearchMode::Snippet, &snippet, &root, options, search.format)?;
        }
        Commands::Regex {
            pattern,
            target,
            search,
        } => {
            let root = resolve_target(cli, &config, target)?;
            let options = search_options(&config, search, false);
            run_search(SearchMode::Regex, pattern, &root, options, search.format)?;
        }
        Commands::Tree {
            target,
            types,
            max_depth,
            format,
        } => {
            let root = resolve_target(cli, &config, target)?;
            let options = StructureOptions {
                types: checked_types(types.as_ref(), &config.search.default_types),
                max_depth: max_depth.unwrap_or(config.search.max_depth),
            };
            let tree = get_structure(&root, &options)?;
            println!("{}", render(output::format_structure(&tree, *format))?);
        }
        Commands::Types => {
            let classifier = FileTypeClassifier::new();
            for (tag, extensions) in classifier.rules() {
                let joined: Vec<_> = extensions.iter().copied().collect();
                println!("{:<12} {}", tag.cyan(), joined.join(" "));
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "codescan", &mut std::io::stdout());
        }
    }

    info!(
        "Application finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn run_search(
    mode: SearchMode,
    pattern: &str,
    root: &std::path::Path,
    options: SearchOptions,
    format: OutputFormat,
) -> ScanResult<()> {
    let engine = SearchEngine::new(mode, pattern, options)?;
    let report = engine.run_with_summary(root)?;
    info!(
        "{mode} search scanned {} file(s), skipped {}",
        report.files_scanned, report.files_skipped
    );

    if matches!(format, OutputFormat::Json) {
        println!("{}", render(output::format_matches(&report.matches, format))?);
        return Ok(());
    }

    if report.matches.is_empty() {
        println!("{}", "No matches found".yellow());
        return Ok(());
    }

    println!("{}", render(output::format_matches(&report.matches, format))?);
    println!(
        "\n{} {} {}{}",
        "Found".green(),
        report.matches.len(),
        "matches".green(),
        if report.truncated {
            " (result limit reached)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    Ok(())
}

fn resolve_target(cli: &Cli, config: &Config, target: &TargetArgs) -> ScanResult<PathBuf> {
    match (&target.path, &target.repo) {
        (_, Some(slug)) => {
            let base_dir = cli
                .repo_dir
                .clone()
                .unwrap_or_else(|| config.repos.base_dir.clone());
            RepoResolver::new(base_dir).resolve_slug(slug)
        }
        (Some(path), None) => Ok(path.clone()),
        (None, None) => Ok(PathBuf::from(".")),
    }
}

fn search_options(config: &Config, args: &SearchArgs, case_sensitive: bool) -> SearchOptions {
    SearchOptions {
        types: checked_types(args.types.as_ref(), &config.search.default_types),
        case_sensitive,
        context_lines: args.context.unwrap_or(config.search.context_lines),
        max_results: args
            .max_results
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .unwrap_or(config.search.max_results),
    }
}

/// Unknown tags are allowed (they match nothing) but worth a warning.
fn checked_types(requested: Option<&Vec<String>>, defaults: &[String]) -> Vec<String> {
    let types = requested.cloned().unwrap_or_else(|| defaults.to_vec());
    let classifier = FileTypeClassifier::new();
    for tag in types.iter().filter(|t| !classifier.is_known_tag(t)) {
        warn!("Unknown file type '{tag}' matches no files; see `codescan types`");
    }
    types
}

fn render(rendered: serde_json::Result<String>) -> ScanResult<String> {
    rendered.map_err(|e| ScanError::Other(e.to_string()))
}

fn setup_logging(cli: &Cli, config: &Config) -> ScanResult<()> {
    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent()
            && !parent_dir.as_os_str().is_empty()
            && !parent_dir.exists()
        {
            fs::create_dir_all(parent_dir).map_err(ScanError::Io)?;
        }
        let log_file = fs::File::create(log_path).map_err(ScanError::Io)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| ScanError::Other(e.to_string()))?;
    Ok(())
}
