//! Video investigation core.
//!
//! Validates video links, runs an analysis collaborator that turns a video
//! into scored statements, and tracks one submission at a time through an
//! explicit state machine.

pub mod config;
pub mod error;
pub mod flow;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod video_url;

pub use error::{AnalysisError, FlowError, InputError, StatementError};
pub use flow::{Investigator, Phase, Submission};
pub use models::{classify, Category, Classification, ResultSet, Statement};
pub use video_url::{extract_video_id, is_recognized_video_url};
