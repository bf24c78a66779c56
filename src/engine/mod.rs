//! Pure derivations from the loaded dataset: filtering, sorting, distinct
//! values, pagination and leaderboard insights. Nothing here formats or
//! escapes text; that belongs to [`crate::output`].

pub mod filters;
pub mod insights;
pub mod page;
pub mod sort;
pub mod values;

pub use filters::{apply_filters, apply_response_filters, FilterState, Outcome};
pub use insights::{compute_insights, Insights, MetricBand, TopPerformer};
pub use page::{paginate, Page};
pub use sort::{project_mode, sort_models, ModelRow, SortKey};
pub use values::{
    extract_distinct_values, find_question, find_response, models_for_mode, trial_responses,
    Dimension,
};
