pub mod completion;
pub mod display;
pub mod plan_normalizer;
pub mod profile_form;
pub mod profile_metrics;
pub mod recommendation;
pub mod schedule_parser;
