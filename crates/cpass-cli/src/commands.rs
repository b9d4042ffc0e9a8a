use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use cpass_cli::report::{
    ColumnsReport, OnboardReport, certify_report, derive_batch_id, match_report,
};
use cpass_ingest::{CsvTable, read_csv_table};
use cpass_map::{
    MappingConfig, MappingConfigLoader, MappingEngine, MappingRepository, MappingResult,
    MappingReview, detect_data_tier, merge_mappings,
};
use cpass_model::BatchId;
use cpass_persistence::{JsonWorkerStore, WorkerStore};
use cpass_skills::{MatcherOptions, OnboardingPipeline, PipelineOptions, SkillMatcher};
use cpass_taxonomy::{Taxonomy, load_default};

use crate::cli::{CertifyArgs, ColumnsArgs, MatchArgs, OnboardArgs, TaxonomyArgs, ThresholdArgs};
use crate::progress::RowProgressBar;
use crate::summary::{
    print_certify, print_columns, print_dangling, print_fragments, print_onboard, print_stats,
    print_taxonomy,
};

fn load_taxonomy(dir: Option<&Path>) -> Result<Taxonomy> {
    let taxonomy = load_default(dir).context("load taxonomy")?;
    info!(
        version = taxonomy.version(),
        skills = taxonomy.skills().len(),
        "taxonomy loaded"
    );
    Ok(taxonomy)
}

fn read_upload(path: &Path) -> Result<CsvTable> {
    read_csv_table(path).with_context(|| format!("read upload {}", path.display()))
}

fn matcher_options(thresholds: ThresholdArgs, log_data: bool) -> Result<MatcherOptions> {
    if !(0.0..=1.0).contains(&thresholds.min_similarity) {
        bail!("--min-similarity must be between 0 and 1");
    }
    if !(0.0..=1.0).contains(&thresholds.synonym_weight) {
        bail!("--synonym-weight must be between 0 and 1");
    }
    Ok(MatcherOptions {
        min_similarity: thresholds.min_similarity,
        synonym_weight: thresholds.synonym_weight,
        log_data,
        ..MatcherOptions::default()
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{json}");
    Ok(())
}

pub fn run_taxonomy(dir: Option<&Path>, args: &TaxonomyArgs) -> Result<i32> {
    let taxonomy = load_taxonomy(dir)?;
    if args.stats {
        print_stats(&taxonomy.stats());
    } else {
        print_taxonomy(&taxonomy, args.domain.as_deref());
    }
    Ok(0)
}

pub fn run_columns(args: &ColumnsArgs) -> Result<i32> {
    let table = read_upload(&args.csv)?;
    let batch_id = derive_batch_id(&args.csv)?;
    let mut review = MappingReview::new(batch_id, MappingEngine::new().suggest(&table));
    review
        .apply_overrides(&args.overrides)
        .context("apply column overrides")?;
    let data_tier = match detect_data_tier(&table.headers) {
        Ok(tier) => Some(tier),
        Err(error) => {
            warn!(%error, "data tier not detected");
            None
        }
    };
    print_columns(&ColumnsReport::new(
        data_tier,
        review.mappings(),
        review.summary(),
    ));
    Ok(0)
}

pub fn run_match(dir: Option<&Path>, args: &MatchArgs, log_data: bool) -> Result<i32> {
    let taxonomy = load_taxonomy(dir)?;
    let matcher = SkillMatcher::new(&taxonomy, matcher_options(args.thresholds, log_data)?);
    let lines = match_report(&matcher, &args.text);
    if lines.is_empty() {
        println!("No fragments of 4 or more characters in the text");
        return Ok(0);
    }
    print_fragments(&lines);
    Ok(0)
}

/// Detected mappings, merged with the stored ones when a mapping directory
/// holds a config for this batch.
fn reviewed_mappings(
    table: &CsvTable,
    batch_id: &BatchId,
    args: &OnboardArgs,
) -> Result<(MappingReview, Option<String>)> {
    let detected = MappingEngine::new().suggest(table);
    let mut loader = MappingConfigLoader::new(batch_id.clone());
    if let Some(dir) = &args.mapping_dir {
        let repository = MappingRepository::new(dir)
            .with_context(|| format!("open mapping directory {}", dir.display()))?;
        loader = loader.with_repository(repository);
    }
    let stored = loader
        .load_or_default(|| MappingConfig {
            batch_id: batch_id.clone(),
            mappings: Vec::new(),
        })
        .context("load stored mapping")?;
    let result = MappingResult {
        mappings: merge_mappings(&detected.mappings, &stored.mappings),
    };

    let mut review = MappingReview::new(batch_id.clone(), result);
    review
        .apply_overrides(&args.overrides)
        .context("apply column overrides")?;
    let saved = loader
        .save(&review.to_config())
        .context("save reviewed mapping")?;
    Ok((review, saved.map(|p| p.display().to_string())))
}

pub fn run_onboard(dir: Option<&Path>, args: &OnboardArgs, log_data: bool) -> Result<i32> {
    if args.limit == Some(0) {
        bail!("--limit must be at least 1");
    }
    let taxonomy = load_taxonomy(dir)?;
    let table = read_upload(&args.csv)?;
    let batch_id = match &args.batch_id {
        Some(raw) => BatchId::new(raw.as_str()).context("parse --batch-id")?,
        None => derive_batch_id(&args.csv)?,
    };
    let span = info_span!("batch", batch_id = %batch_id);
    let _guard = span.enter();

    let map_start = Instant::now();
    let (review, mapping_path) = reviewed_mappings(&table, &batch_id, args)?;
    let mapping_summary = review.summary();
    info!(
        mapped = mapping_summary.mapped,
        ignored = mapping_summary.ignored,
        overridden = mapping_summary.overridden,
        duration_ms = map_start.elapsed().as_millis(),
        "mapping complete"
    );
    if mapping_summary.mapped == 0 {
        bail!("no column could be mapped; use --map COLUMN=FIELD");
    }

    let options = PipelineOptions {
        matcher: matcher_options(args.thresholds, log_data)?,
        skill_baseline: args.skill_baseline,
    };
    let pipeline = OnboardingPipeline::new(&taxonomy, options);
    let show_progress = !args.json && io::stderr().is_terminal();
    let mut progress = RowProgressBar::new(table.row_count(), args.limit, show_progress);
    let batch = pipeline.run(&batch_id, &table, review.mappings(), &mut progress);
    progress.finish();

    let mut report = OnboardReport::new(&batch, mapping_summary);
    report.mapping_path = mapping_path;
    if let Some(store_dir) = &args.store_dir {
        let mut store = JsonWorkerStore::new(store_dir);
        store
            .save_batch(&batch)
            .with_context(|| format!("store batch {batch_id}"))?;
        report.store_path = Some(store.path_for(&batch_id).display().to_string());
    }

    if args.json {
        print_json(&report)?;
    } else {
        print_onboard(&report);
    }
    Ok(0)
}

pub fn run_certify(dir: Option<&Path>, args: &CertifyArgs) -> Result<i32> {
    let taxonomy = load_taxonomy(dir)?;
    let report = certify_report(&taxonomy, &args.skills, &args.ratings)?;
    if args.json {
        print_json(&report)?;
    } else {
        print_certify(&report);
    }
    Ok(if report.skills.is_empty() { 1 } else { 0 })
}

/// Exit code 1 when the taxonomy references undefined skills.
pub fn run_doctor(dir: Option<&Path>) -> Result<i32> {
    let taxonomy = load_taxonomy(dir)?;
    let references = taxonomy.dangling_references();
    print_dangling(&references);
    Ok(if references.is_empty() { 0 } else { 1 })
}
