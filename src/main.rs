use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codelang_lib::components::{ElementProps, code};
use codelang_lib::config::{self, CONFIG_FILE_NAME, Config, NormalizeLanguage};
use codelang_lib::exit_codes::exit;
use codelang_lib::language::resolve_language;
use codelang_lib::output::OutputFormat;
use codelang_lib::scan::{self, FileReport};
use codelang_lib::extract_code_blocks;
use colored::Colorize;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format: text, json or json-lines (overrides the config file)
    #[arg(short, long, global = true)]
    output_format: Option<OutputFormat>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the language for a class name such as `language-rust`
    Resolve {
        /// Class name token; omit for a code block without one
        token: Option<String>,

        /// Map aliases like `py` to canonical names
        #[arg(long)]
        normalize: bool,
    },
    /// List the resolved language of every code block in Markdown files
    Scan {
        /// Files or directories to scan, `-` for stdin
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
    },
    /// Print the highlighter properties for each code block of a document
    Props {
        /// Markdown file, stdin when omitted or `-`
        path: Option<PathBuf>,
    },
    /// Create a default configuration file
    Init {
        /// Where to write the configuration
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        path: PathBuf,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content).context("Failed to read stdin")?;
    Ok(content)
}

fn run_resolve(token: Option<&str>, normalize: bool, config: &Config) -> Result<()> {
    let strategy = if normalize {
        NormalizeLanguage::Linguist
    } else {
        config.normalize_language
    };
    let language = strategy.apply(resolve_language(token));
    println!("{language}");
    Ok(())
}

fn run_scan(paths: &[PathBuf], config: &Config) -> Result<()> {
    let reports: Vec<FileReport> = if paths.len() == 1 && is_stdin(&paths[0]) {
        vec![scan::scan_content("<stdin>", &read_stdin()?, config)]
    } else {
        scan::scan_paths(paths, config)?
    };

    let formatter = config.output_format.create_formatter(io::stdout().is_terminal());
    let mut stdout = io::stdout().lock();
    for report in &reports {
        stdout.write_all(formatter.format_file(report).as_bytes())?;
    }
    if let Some(summary) = formatter.format_summary(&reports) {
        writeln!(stdout, "{summary}")?;
    }

    let total: usize = reports.iter().map(|r| r.blocks.len()).sum();
    log::info!("Scanned {} files, {total} code blocks", reports.len());
    Ok(())
}

fn run_props(path: Option<&Path>, config: &Config) -> Result<()> {
    let content = match path {
        Some(path) if !is_stdin(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        _ => read_stdin()?,
    };

    let props: Vec<_> = extract_code_blocks(&content)
        .into_iter()
        .map(|block| {
            let mut element = ElementProps::new(block.content);
            element.class_name = block.class_name;
            let mut words = block.info_string.splitn(2, char::is_whitespace);
            if let Some(meta) = words.nth(1).map(str::trim).filter(|m| !m.is_empty()) {
                element = element.with_prop("metastring", meta);
            }
            let mut highlighted = code(element);
            highlighted.language = config.normalize_language.apply(highlighted.language);
            highlighted
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&props)?);
    Ok(())
}

fn run_init(path: &Path, quiet: bool) -> Result<()> {
    config::create_default_config(path)?;
    if !quiet {
        println!("Created {} at {}", "configuration".green(), path.display());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { path } => return run_init(path, cli.quiet),
        Commands::Schema => {
            let schema = schemars::schema_for!(Config);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            return Ok(());
        }
        _ => {}
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.output_format {
        config.output_format = format;
    }

    match &cli.command {
        Commands::Resolve { token, normalize } => run_resolve(token.as_deref(), *normalize, &config),
        Commands::Scan { paths } => run_scan(paths, &config),
        Commands::Props { path } => run_props(path.as_deref(), &config),
        Commands::Init { .. } | Commands::Schema => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("{}: {e:#}", "Error".red().bold());
        exit::tool_error();
    }
    exit::success();
}
