pub mod brief;
pub mod error;
pub mod format;
pub mod input;
pub mod quality;
pub mod rules;
pub mod terminology;
pub mod types;

pub use brief::{BriefInputs, assemble_brief};
pub use error::{CourseprepError, Result};
pub use format::{format_quality_readable, format_terminology_readable, group_thousands};
pub use input::{ChannelInput, parse_document};
pub use quality::{
    QualityReport, WebValidation, YoutubeValidation, combine, validate_video_transcripts,
    validate_web_sources,
};
pub use rules::RuleSet;
pub use terminology::{
    TermExtraction, TerminologyReport, extract_video_terms, extract_web_terms, map_phases, merge,
};
pub use types::{ChannelKind, CourseStructure, QualityTier, VideoCollection, WebCollection};
