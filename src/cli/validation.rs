use crate::cli::args::{CliArgs, Command};
use crate::engine::Dimension;
use crate::utils;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if args.data_dir.is_some() && args.base_url.is_some() {
        return Err("use either --data-dir or --base-url, not both".to_string());
    }
    if let Some(raw) = args.format.as_deref() {
        utils::parse_output_format(raw).map_err(|e| format!("invalid --format '{raw}': {e}"))?;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    match &args.command {
        Command::Leaderboard(lb) => {
            if let Some(raw) = lb.mode.as_deref() {
                utils::parse_mode(raw).map_err(|e| format!("invalid --mode '{raw}': {e}"))?;
            }
            for raw in &lb.sort {
                utils::parse_sort_key(raw).map_err(|e| format!("invalid --sort '{raw}': {e}"))?;
            }
        }
        Command::Explore(ex) => {
            if let Some(raw) = ex.mode.as_deref() {
                utils::parse_mode(raw).map_err(|e| format!("invalid --mode '{raw}': {e}"))?;
            }
            if let Some(d) = ex.difficulty {
                utils::parse_difficulty(d).map_err(|e| format!("invalid --difficulty '{d}': {e}"))?;
            }
            if let Some(raw) = ex.result.as_deref() {
                utils::parse_outcome(raw).map_err(|e| format!("invalid --result '{raw}': {e}"))?;
            }
            if ex.page == Some(0) {
                return Err("invalid page, pages start at 1".to_string());
            }
        }
        Command::Show(show) => {
            if show.id.trim().is_empty() {
                return Err("question id is empty".to_string());
            }
            if let Some(raw) = show.mode.as_deref() {
                utils::parse_mode(raw).map_err(|e| format!("invalid --mode '{raw}': {e}"))?;
            }
            if let Some(raw) = show.result.as_deref() {
                utils::parse_outcome(raw).map_err(|e| format!("invalid --result '{raw}': {e}"))?;
            }
        }
        Command::Values(values) => {
            let raw = values.dimension.as_str();
            let dimension = utils::parse_dimension(raw)
                .map_err(|e| format!("invalid dimension '{raw}': {e}"))?;
            if let Some(mode) = values.mode.as_deref() {
                utils::parse_mode(mode).map_err(|e| format!("invalid --mode '{mode}': {e}"))?;
                if dimension != Dimension::Model {
                    return Err(format!(
                        "--mode only applies to the model dimension, not '{raw}'"
                    ));
                }
            }
        }
        Command::InitConfig => {}
    }
    Ok(())
}
