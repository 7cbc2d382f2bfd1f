//! Validate-then-load pipeline.
//!
//! A run loads the source, validates it against the rule set and appends the
//! accepted rows to the destination. Any fatal failure returns a
//! [`PipelineError`] and no statistics; the destination is only touched once
//! validation has produced at least one accepted row.

use std::time::Instant;

use tracing::{info, info_span, trace};

use rowgate_ingest::{LoadOptions, Source, load_dataset};
use rowgate_model::{Rejection, RuleSet, RunStats, StatsAggregator};
use rowgate_sink::{Destination, Sink, SqliteSink};
use rowgate_validate::{ValidationOutcome, validate_dataset};

use crate::error::PipelineError;
use crate::logging::redact_value;

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: Source,
    pub destination: Destination,
    pub rules: RuleSet,
    pub load_options: LoadOptions,
    /// Stop after validation without opening the destination.
    pub dry_run: bool,
}

impl RunConfig {
    /// Config with the built-in passenger rules and default load options.
    pub fn new(source: impl Into<Source>, destination: Destination) -> Self {
        Self {
            source: source.into(),
            destination,
            rules: RuleSet::default(),
            load_options: LoadOptions::default(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_load_options(mut self, load_options: LoadOptions) -> Self {
        self.load_options = load_options;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Runs the pipeline against the SQLite destination named in `config`.
///
/// The database is opened after validation succeeds, so a failed load or
/// validation never creates it.
pub fn run(config: &RunConfig) -> Result<RunStats, PipelineError> {
    let validated = validate_stage(config)?;
    if config.dry_run {
        return Ok(validated.stats.finish());
    }
    let mut sink = SqliteSink::open(&config.destination)?;
    persist_stage(&mut sink, &config.destination, validated)
}

/// Runs the pipeline with a caller-supplied sink.
///
/// With no sink, or with `dry_run` set, the run stops after validation and
/// returns [`RunStage::Validated`](rowgate_model::RunStage::Validated) stats.
pub fn run_pipeline(
    config: &RunConfig,
    sink: Option<&mut dyn Sink>,
) -> Result<RunStats, PipelineError> {
    let validated = validate_stage(config)?;
    match sink {
        Some(sink) if !config.dry_run => persist_stage(sink, &config.destination, validated),
        _ => Ok(validated.stats.finish()),
    }
}

struct Validated {
    outcome: ValidationOutcome,
    stats: StatsAggregator,
}

fn validate_stage(config: &RunConfig) -> Result<Validated, PipelineError> {
    let mut stats = StatsAggregator::new();

    let dataset = info_span!("load", input = %config.source.label()).in_scope(
        || -> Result<_, PipelineError> {
            let start = Instant::now();
            let dataset = load_dataset(&config.source, &config.load_options)?;
            info!(
                rows = dataset.height(),
                columns = dataset.width(),
                duration_ms = start.elapsed().as_millis(),
                "load complete"
            );
            Ok(dataset)
        },
    )?;
    stats.loaded(dataset.height());

    let outcome = info_span!("validate", rules = config.rules.rules.len()).in_scope(
        || -> Result<_, PipelineError> {
            let start = Instant::now();
            let outcome = validate_dataset(&dataset, &config.rules)?;
            log_rejected_values(&outcome.rejections);
            info!(
                accepted_rows = outcome.accepted.len(),
                skipped_rows = outcome.rejections.len(),
                duration_ms = start.elapsed().as_millis(),
                "validation complete"
            );
            Ok(outcome)
        },
    )?;
    stats.rejected(&outcome.rejections);

    Ok(Validated { outcome, stats })
}

fn persist_stage(
    sink: &mut dyn Sink,
    destination: &Destination,
    validated: Validated,
) -> Result<RunStats, PipelineError> {
    let Validated { outcome, mut stats } = validated;

    let inserted = info_span!("persist", destination = %destination).in_scope(
        || -> Result<_, PipelineError> {
            let start = Instant::now();
            let inserted = sink.append(&outcome.columns, &outcome.accepted)?;
            info!(
                inserted_rows = inserted,
                duration_ms = start.elapsed().as_millis(),
                "persist complete"
            );
            Ok(inserted)
        },
    )?;
    stats.persisted(inserted);

    Ok(stats.finish())
}

fn log_rejected_values(rejections: &[Rejection]) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for rejection in rejections {
        let value = rejection.value.to_string();
        trace!(
            row = rejection.row_number,
            column = %rejection.column,
            value = redact_value(&value),
            "rejected value"
        );
    }
}
