use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "benchview",
    version,
    about = "benchmark results dashboard",
    long_about = "benchview renders benchmark results (detailed.json and summary.json) as a sortable leaderboard, a filterable question explorer and per-response detail views.\n\nExamples:\n  benchview leaderboard --chart --insights\n  benchview leaderboard --mode with-search --sort pass3\n  benchview explore --model gpt-4o --result incorrect\n  benchview show q17 --model gpt-4o --mode no-search --trial 2\n  benchview -u https://bench.example/data/ leaderboard -o board.html\n\nTip: Use --config to persist the data source and view defaults."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "no-color",
        visible_alias = "nc",
        global = true,
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        global = true,
        help_heading = "Output",
        help = "Write the rendered view to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        global = true,
        help_heading = "Output",
        help = "Output format: text, json or html (inferred from --output when omitted)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.benchview/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'd',
        long = "data-dir",
        value_name = "DIR",
        global = true,
        help_heading = "Input",
        help = "Directory holding detailed.json and summary.json."
    )]
    pub data_dir: Option<String>,

    #[arg(
        short = 'u',
        long = "base-url",
        value_name = "URL",
        global = true,
        help_heading = "Input",
        help = "Fetch the JSON documents relative to this URL instead of a directory."
    )]
    pub base_url: Option<String>,

    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        global = true,
        help_heading = "Input",
        help = "HTTP timeout when loading from --base-url."
    )]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Per-model leaderboard from summary.json.
    Leaderboard(LeaderboardArgs),
    /// Question-by-model trial grid from detailed.json.
    Explore(ExploreArgs),
    /// Full detail for one question's responses.
    Show(ShowArgs),
    /// Distinct values available for filtering.
    Values(ValuesArgs),
    /// Write the default config file if it does not exist.
    InitConfig,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LeaderboardArgs {
    #[arg(short = 'm', long = "mode", value_name = "MODE", help = "no-search or with-search.")]
    pub mode: Option<String>,

    #[arg(
        short = 's',
        long = "sort",
        value_name = "COLUMN",
        action = ArgAction::Append,
        help = "Sort column (model, accuracy, pass1, pass3). Repeating a column flips its direction."
    )]
    pub sort: Vec<String>,

    #[arg(long = "asc", help = "Sort ascending.")]
    pub ascending: bool,

    #[arg(long = "chart", help = "Include the accuracy bar chart.")]
    pub chart: bool,

    #[arg(long = "insights", help = "Include top performer, average and search impact.")]
    pub insights: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExploreArgs {
    #[arg(short = 'm', long = "mode", value_name = "MODE", help = "no-search or with-search.")]
    pub mode: Option<String>,

    #[arg(long = "model", value_name = "MODEL", help = "Only this model's responses.")]
    pub model: Option<String>,

    #[arg(long = "difficulty", value_name = "1-5", help = "Only questions of this difficulty.")]
    pub difficulty: Option<u8>,

    #[arg(long = "result", value_name = "RESULT", help = "correct or incorrect.")]
    pub result: Option<String>,

    #[arg(long = "page", value_name = "N", help = "Page number, starting at 1.")]
    pub page: Option<usize>,

    #[arg(long = "page-size", value_name = "N", help = "Questions per page (0 = all).")]
    pub page_size: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    #[arg(value_name = "QUESTION_ID")]
    pub id: String,

    #[arg(short = 'm', long = "mode", value_name = "MODE")]
    pub mode: Option<String>,

    #[arg(long = "model", value_name = "MODEL")]
    pub model: Option<String>,

    #[arg(long = "result", value_name = "RESULT")]
    pub result: Option<String>,

    #[arg(long = "trial", value_name = "N")]
    pub trial: Option<u32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ValuesArgs {
    #[arg(value_name = "DIMENSION", help = "model, mode or category.")]
    pub dimension: String,

    #[arg(
        short = 'm',
        long = "mode",
        value_name = "MODE",
        help = "Only models with responses in this mode. Requires the `model` dimension."
    )]
    pub mode: Option<String>,
}
