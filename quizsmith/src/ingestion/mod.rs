pub mod extractors;
mod ingestor;
mod types;

pub use extractors::ExtractionError;
pub use ingestor::Ingestor;
pub use types::{
    AggregatedText, ExtractionOutcome, ExtractionResult, FileFormat, FileReference, IngestReport,
};
