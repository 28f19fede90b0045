// Content records - the unit of publishable educational material

pub mod types;

pub use types::{
    ContentKind, ContentRecord, ContentStatus, FaqEntry, GeoConfig, PublishingConfig, SeoConfig,
};
