pub mod engine;
pub mod export;
pub mod extract;
pub mod filter;
pub mod metadata;
pub mod record;
pub mod report;

pub mod prelude {
    pub use crate::metadata::MetadataEntry;
    pub use crate::record::ExtractedRecord;
}
