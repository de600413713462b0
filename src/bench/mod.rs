pub mod compare;
pub mod config;
pub mod report;
pub mod run;
pub mod scenario;

pub use compare::compare;
pub use config::{BenchConfig, FileConfig, Overrides};
pub use report::{load_jsonl, records, table, write_jsonl, ResultRecord};
pub use run::{load_corpora, run, Corpus, ScenarioResult, Timing};
pub use scenario::Scenario;
