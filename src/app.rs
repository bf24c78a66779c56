use std::path::PathBuf;

use clap::{error::ErrorKind, Parser};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{CliArgs, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::dataset::{DataSource, LoadState, Loader, Mode};
use crate::engine::{self, Dimension, FilterState};
use crate::output::{self, OutputFormat};
use crate::state::{SortState, ViewState, DEFAULT_PAGE_SIZE};
use crate::utils;

#[derive(Clone, Debug, PartialEq)]
enum RunCommand {
    Leaderboard {
        state: ViewState,
        chart: bool,
        insights: bool,
    },
    Explore {
        state: ViewState,
    },
    Show {
        id: String,
        filter: FilterState,
        trial: Option<u32>,
    },
    Values {
        dimension: Dimension,
        mode: Option<Mode>,
    },
    InitConfig {
        path: PathBuf,
    },
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: DataSource,
    timeout: u64,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
    command: RunCommand,
}

fn format_kv_line(label: &str, value: &str) {
    tracing::info!("{:<10}: {}", label, value);
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn base_view_state(cfg: &ConfigFile) -> Result<ViewState, String> {
    let mut state = ViewState::default();
    if let Some(raw) = cfg.mode.as_deref() {
        let mode =
            utils::parse_mode(raw).map_err(|e| format!("invalid config mode '{raw}': {e}"))?;
        state = state.with_mode(mode);
    }
    if let Some(raw) = cfg.sort.as_deref() {
        let key =
            utils::parse_sort_key(raw).map_err(|e| format!("invalid config sort '{raw}': {e}"))?;
        state.sort = SortState {
            key,
            ascending: false,
        };
    }
    Ok(state.with_page_size(cfg.page_size.unwrap_or(DEFAULT_PAGE_SIZE)))
}

fn parse_opt_mode(raw: Option<&str>) -> Result<Option<Mode>, String> {
    raw.map(utils::parse_mode).transpose()
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;
    let base = base_view_state(&cfg)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);

    let source = match (args.data_dir, args.base_url) {
        (Some(dir), _) => DataSource::Dir(config::expand_tilde(&dir)),
        (None, Some(url)) => DataSource::Url(url),
        (None, None) => match (cfg.data_dir, cfg.base_url) {
            (Some(dir), _) => DataSource::Dir(config::expand_tilde(&dir)),
            (None, Some(url)) => DataSource::Url(url),
            (None, None) => DataSource::Dir(PathBuf::from("./data")),
        },
    };

    let output = utils::non_empty(args.output.or(cfg.output));
    let output_format = match args.format.or(cfg.output_format) {
        Some(raw) => utils::parse_output_format(&raw)
            .map_err(|e| format!("invalid output format '{raw}': {e}"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    let command = match args.command {
        Command::Leaderboard(lb) => {
            let mut state = base;
            if let Some(mode) = parse_opt_mode(lb.mode.as_deref())? {
                state = state.with_mode(mode);
            }
            for raw in &lb.sort {
                state = state.with_sort_column(utils::parse_sort_key(raw)?);
            }
            if lb.ascending {
                state.sort.ascending = true;
            }
            RunCommand::Leaderboard {
                state,
                chart: lb.chart,
                insights: lb.insights,
            }
        }
        Command::Explore(ex) => {
            let mut state = base;
            if let Some(mode) = parse_opt_mode(ex.mode.as_deref())? {
                state = state.with_mode(mode);
            }
            if let Some(size) = ex.page_size {
                state = state.with_page_size(size);
            }
            let result = ex.result.as_deref().map(utils::parse_outcome).transpose()?;
            let difficulty = ex.difficulty.map(utils::parse_difficulty).transpose()?;
            state = state
                .with_model_filter(utils::non_empty(ex.model))
                .with_difficulty_filter(difficulty)
                .with_result_filter(result);
            if let Some(page) = ex.page {
                state = state.with_page(page.saturating_sub(1));
            }
            RunCommand::Explore { state }
        }
        Command::Show(show) => {
            let filter = FilterState {
                mode: parse_opt_mode(show.mode.as_deref())?,
                model: utils::non_empty(show.model),
                difficulty: None,
                result: show.result.as_deref().map(utils::parse_outcome).transpose()?,
            };
            RunCommand::Show {
                id: show.id.trim().to_string(),
                filter,
                trial: show.trial,
            }
        }
        Command::Values(values) => RunCommand::Values {
            dimension: utils::parse_dimension(&values.dimension)?,
            mode: parse_opt_mode(values.mode.as_deref())?,
        },
        Command::InitConfig => {
            let path = match args.config.as_deref() {
                Some(p) => config::expand_tilde(p),
                None => config::default_config_path()
                    .ok_or_else(|| "could not determine home directory".to_string())?,
            };
            RunCommand::InitConfig { path }
        }
    };

    Ok(RunConfig {
        source,
        timeout,
        output,
        output_format,
        no_color,
        command,
    })
}

async fn render(run: &RunConfig, loader: &Loader) -> Result<Vec<u8>, String> {
    let format = run.output_format;
    let rendered = match &run.command {
        RunCommand::Leaderboard {
            state,
            chart,
            insights,
        } => {
            let summaries = loader.load_summaries().await;
            let view = output::build_leaderboard(&summaries, state, *insights);
            match format {
                OutputFormat::Text => output::text::render_leaderboard(&view, *chart),
                OutputFormat::Json => output::render_json(&view)?,
                OutputFormat::Html => output::report::render_leaderboard(&view, *chart),
            }
        }
        RunCommand::Explore { state } => {
            let questions = loader.load_questions().await;
            let view = output::build_explorer(&questions, state);
            match format {
                OutputFormat::Text => output::text::render_explorer(&view),
                OutputFormat::Json => output::render_json(&view)?,
                OutputFormat::Html => output::report::render_explorer(&view),
            }
        }
        RunCommand::Show { id, filter, trial } => {
            let questions = loader.load_questions().await;
            if let LoadState::Failed(e) = &questions {
                return Err(format!("failed to load data: {e}"));
            }
            let view = output::build_detail(questions.records(), id, filter, *trial)
                .ok_or_else(|| format!("no question with id '{id}'"))?;
            match format {
                OutputFormat::Text => output::text::render_detail(&view),
                OutputFormat::Json => output::render_json(&view)?,
                OutputFormat::Html => output::report::render_detail(&view),
            }
        }
        RunCommand::Values { dimension, mode } => {
            let questions = loader.load_questions().await;
            if let LoadState::Failed(e) = &questions {
                return Err(format!("failed to load data: {e}"));
            }
            let values = match (dimension, mode) {
                (Dimension::Model, Some(mode)) => {
                    engine::models_for_mode(questions.records(), *mode)
                }
                _ => engine::extract_distinct_values(questions.records(), *dimension),
            };
            match format {
                OutputFormat::Json => output::render_json(&values)?,
                _ => output::text::render_values(&values),
            }
        }
        RunCommand::InitConfig { .. } => Vec::new(),
    };
    Ok(rendered)
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if let RunCommand::InitConfig { path } = &run.command {
        if config::ensure_default_config_file(path)? {
            println!("wrote {}", path.display());
        } else {
            println!("config already exists: {}", path.display());
        }
        return Ok(());
    }

    let loader = Loader::new(run.source.clone(), run.timeout);
    format_kv_line("Source", &run.source.to_string());
    format_kv_line("Format", &format!("{:?}", run.output_format));

    let rendered = render(&run, &loader).await?;

    match run.output.as_ref() {
        Some(outfile_path) => {
            let mut outfile = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(outfile_path)
                .await
                .map_err(|e| format!("failed to open output file: {e}"))?;
            outfile
                .write_all(&rendered)
                .await
                .map_err(|e| format!("failed to write output file: {e}"))?;
            tracing::info!(path = %outfile_path, bytes = rendered.len(), "wrote output");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(&rendered)
                .await
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
            stdout
                .flush()
                .await
                .map_err(|e| format!("failed to flush stdout: {e}"))?;
        }
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_tracing(args.verbose);

    // init-config must not trip over the file it is about to create.
    let cfg = if matches!(args.command, Command::InitConfig) {
        ConfigFile::default()
    } else {
        match args.config.as_deref().map(config::expand_tilde) {
            Some(path) => config::load_config(&path, false)?,
            None => match config::default_config_path() {
                Some(path) => config::load_config(&path, true)?,
                None => ConfigFile::default(),
            },
        }
    };

    let run = build_run_config(args, cfg)?;
    // Files always get plain text; stdout honors --no-color.
    if run.no_color || run.output.is_some() {
        colored::control::set_override(false);
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
