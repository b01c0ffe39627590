// Olympic Medals - Core Library
// Every pipeline stage lives here; the binary only wires paths and logging.

pub mod error;
pub mod medal;
pub mod extract;

// Paris 2024 text-to-table pipeline, in stage order
pub mod headings;       // heading normalizer
pub mod parser;         // paragraph preparation
pub mod grouping;       // medal grouper
pub mod corrections;    // snapshot corrections
pub mod alignment;      // heading / group aligner
pub mod reconciliation; // sport cursor + event labels
pub mod countries;
pub mod rules;
pub mod athletes;       // athlete / country splitter, ties
pub mod table;
pub mod pipeline;

// Other sources and derived tables
pub mod tokyo;
pub mod kaggle;
pub mod combine;
pub mod swimming;
pub mod data_quality;

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::PipelineError;
pub use medal::{EventMedalGroup, Medal, MedalLine, NO_MEDAL_AWARDED};
pub use extract::RawPageExtract;
pub use headings::normalize_headings;
pub use parser::{event_labels, medal_lines, prepare_paragraphs};
pub use grouping::{group_medals, GroupingRules};
pub use corrections::{CorrectionSet, CorrectionTable, HeadingOp, RowEventOverride};
pub use alignment::{align, combine_grouped_medals_with_headings, AlignedEvent};
pub use reconciliation::{reconcile, CursorStep, EventRow, SportCursor};
pub use countries::{CountryDirectory, CountryEntry, NocRegions};
pub use rules::OverrideRules;
pub use athletes::AthleteResolver;
pub use table::{
    melt_medals, read_records, write_records, Edition, OlympicRecord, SportEventRow,
    FINAL_COLUMNS,
};
pub use pipeline::{run_paris, ParisRun, ParisSources, PipelineReport};
pub use data_quality::{DataQualityEngine, QualityIssue, QualityReport, Severity};
pub use config::PipelineConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
