pub mod common;
pub mod score;
pub mod statement;
pub mod transcript;
pub mod video;

pub use common::{IsoDateTime, RequestId, SessionId};
pub use score::{classify, Breakdown, Category, Classification};
pub use statement::{format_timestamp, ResultSet, Statement, Summary};
pub use transcript::{FetchedTranscript, SourceMeta, Transcript, TranscriptOrigin, TranscriptSegment};
pub use video::{InvalidVideoId, VideoId};
