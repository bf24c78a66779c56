pub mod loader;
pub mod model;

pub use loader::{DataSource, LoadError, LoadState, Loader};
pub use model::{
    difficulty_for_accuracy, question_accuracy, Mode, ModeMetrics, ModelSummaryRecord,
    QuestionRecord, ResponseRecord,
};
