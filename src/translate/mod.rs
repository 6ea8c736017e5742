//! Machine translation of flat entries through a remote backend.

pub mod backend;
pub mod libre;
pub mod mock;
pub mod pipeline;

pub use backend::{Language, TranslateRequest, TranslationBackend};
pub use libre::{DEFAULT_API_URL, LibreTranslate};
pub use mock::{MockBackend, MockReply};
pub use pipeline::{Batch, PipelineOptions, TranslationPipeline, partition};
