//! Pairwise Orchestrator
//!
//! # Stages
//!
//! 1. Validate the run config (fail fast, nothing computed on error)
//! 2. Drop repeated submission ids, order files by submission id
//! 3. Tokenize the template once; an unusable template becomes a warning
//! 4. Tokenize + fingerprint every file in parallel into the `TokenCache`
//! 5. Enumerate pairs `i < j` of files owned by different students; pairs
//!    touching a failed file are skipped and counted on that file's warning
//! 6. Compare pairs in parallel
//! 7. Aggregate (single-threaded, after all workers joined)
//!
//! Cancellation is polled before every file and every pair, and inside the
//! structural matcher while a pair is being matched. A cancelled run returns
//! `EngineError::Cancelled` and discards everything computed so far.

use crate::config::{RunConfig, Validatable};
use crate::errors::{EngineError, Result};
use crate::features::hybrid::HybridCombiner;
use crate::features::report::domain::PairSide;
use crate::features::report::{
    AnalysisWarning, PairResult, Report, ReportAggregator, RunStats, SubmissionRef,
};
use crate::features::semantic::SemanticScorer;
use crate::features::structural::StructuralMatcher;
use crate::features::tokenization::{TemplateFilter, Tokenizer};
use crate::pipeline::token_cache::{CachedFile, TokenCache};
use crate::shared::models::{AssignmentId, Language, SourceFile, SubmissionId, TemplateCode};
use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Everything one analysis run consumes
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub assignment_id: AssignmentId,

    /// Eligible submissions (latest per student, resolved by the caller)
    pub submissions: Vec<SourceFile>,

    pub template: Option<TemplateCode>,
    pub config: RunConfig,
}

impl AnalysisInput {
    pub fn new(assignment_id: AssignmentId, submissions: Vec<SourceFile>) -> Self {
        Self {
            assignment_id,
            submissions,
            template: None,
            config: RunConfig::default(),
        }
    }

    pub fn with_template(mut self, template: TemplateCode) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }
}

/// Scorers shared read-only by all pair workers
struct Scorers {
    tokenizer: Tokenizer,
    matcher: StructuralMatcher,
    semantic: SemanticScorer,
    combiner: HybridCombiner,
}

/// Drives one analysis run
#[derive(Debug, Clone, Default)]
pub struct PairwiseOrchestrator {
    cancel: CancellationToken,
}

impl PairwiseOrchestrator {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Run the analysis
    ///
    /// Per-file problems become report warnings. Only an invalid config or
    /// cancellation prevents a report.
    pub fn run(&self, input: &AnalysisInput) -> Result<Report> {
        let started = Instant::now();
        let config = &input.config;
        config.validate()?;
        self.check_cancelled()?;

        let scorers = Scorers {
            tokenizer: Tokenizer::from_config(config),
            matcher: StructuralMatcher::new(config),
            semantic: SemanticScorer::new(config),
            combiner: HybridCombiner::new(config)?,
        };

        let threads = config.effective_worker_threads();
        let pool = build_pool(threads);

        let (files, mut warnings) = dedupe(&input.submissions);
        info!(
            assignment_id = input.assignment_id,
            submissions = files.len(),
            threads,
            template = input.template.is_some(),
            "starting similarity analysis"
        );

        let template = input.template.as_ref().and_then(|template| {
            match scorers.tokenizer.template_filter(template) {
                Ok(filter) => Some((filter, template.language)),
                Err(e) => {
                    let warning = AnalysisWarning::template_unusable(&e);
                    warn!(error = %e, "template code could not be tokenized");
                    warnings.push(warning);
                    None
                }
            }
        });

        let cache = TokenCache::with_capacity(files.len());
        let failures = install(pool.as_ref(), || {
            self.tokenize_all(&files, template.as_ref(), &scorers, &cache)
        })?;

        let plan = plan_pairs(&files, &failures);
        for (file, error) in &failures {
            let skipped = plan.skipped_for(file.submission_id);
            if let Some(warning) =
                AnalysisWarning::for_file_error(file.submission_id, &file.file_name, error, skipped)
            {
                warn!(
                    submission_id = file.submission_id,
                    kind = warning.kind.as_str(),
                    pairs_skipped = skipped,
                    "{}",
                    warning
                );
                warnings.push(warning);
            }
        }

        let pairs = install(pool.as_ref(), || self.compare_all(&plan.work, &scorers, &cache))?;

        let stats = RunStats {
            files_tokenized: cache.len(),
            files_skipped: failures.len(),
            pairs_compared: pairs.len(),
            pairs_skipped: plan.skipped_total,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        let submissions = files.iter().map(|f| SubmissionRef::from(*f)).collect();
        let report = ReportAggregator::new(input.assignment_id, config.flag_threshold)
            .aggregate(pairs, submissions, warnings, stats);

        info!(
            assignment_id = report.assignment_id,
            comparisons = report.total_comparisons,
            flagged = report.flagged_pairs,
            warnings = report.warnings.len(),
            elapsed_ms = stats.elapsed_ms,
            "similarity analysis finished"
        );
        Ok(report)
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(EngineError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Fill the cache; returns the files that failed with their errors
    fn tokenize_all<'a>(
        &self,
        files: &[&'a SourceFile],
        template: Option<&(TemplateFilter, Language)>,
        scorers: &Scorers,
        cache: &TokenCache,
    ) -> Result<Vec<(&'a SourceFile, EngineError)>> {
        let failures: Mutex<Vec<(&'a SourceFile, EngineError)>> = Mutex::new(Vec::new());

        files.par_iter().try_for_each(|&file| -> Result<()> {
            self.check_cancelled()?;
            let tokenized = scorers.tokenizer.tokenize(
                &file.source_text,
                file.language,
                template.map(|(filter, _)| filter),
                template.map(|(_, language)| *language),
            );
            match tokenized {
                Ok(stream) => {
                    debug!(
                        submission_id = file.submission_id,
                        tokens = stream.len(),
                        template_removed = stream.template_tokens_removed(),
                        recovered = stream.diagnostics().len(),
                        "tokenized submission"
                    );
                    let inserted = cache.insert(CachedFile::new(
                        file.submission_id,
                        file.student_id,
                        stream,
                        &scorers.matcher,
                        &scorers.semantic,
                    ));
                    // ids are unique after dedupe
                    debug_assert!(inserted, "second cache write for {}", file.submission_id);
                    if !inserted {
                        warn!(
                            submission_id = file.submission_id,
                            "token cache refused a second write; first entry kept"
                        );
                    }
                }
                Err(e) => failures.lock().push((file, e.for_submission(file.submission_id))),
            }
            Ok(())
        })?;

        let mut failures = failures.into_inner();
        failures.sort_by_key(|(file, _)| file.submission_id);
        Ok(failures)
    }

    fn compare_all(
        &self,
        work: &[(SubmissionId, SubmissionId)],
        scorers: &Scorers,
        cache: &TokenCache,
    ) -> Result<Vec<PairResult>> {
        let results: Vec<Option<PairResult>> = work
            .par_iter()
            .map(|&(a, b)| -> Result<Option<PairResult>> {
                self.check_cancelled()?;
                let (Some(left), Some(right)) = (cache.get(a), cache.get(b)) else {
                    return Ok(None);
                };
                compare_pair(&left, &right, scorers, &self.cancel).map(Some)
            })
            .collect::<Result<_>>()?;
        Ok(results.into_iter().flatten().collect())
    }
}

fn compare_pair(
    left: &CachedFile,
    right: &CachedFile,
    scorers: &Scorers,
    cancel: &CancellationToken,
) -> Result<PairResult> {
    let structural = scorers.matcher.compare_cancellable(
        &left.stream,
        &left.structural,
        &right.stream,
        &right.structural,
        cancel,
    )?;
    let semantic = scorers.semantic.compare(&left.semantic, &right.semantic).score;
    let hybrid = scorers.combiner.combine(structural.score, semantic);

    debug!(
        left = left.submission_id,
        right = right.submission_id,
        structural = structural.score,
        semantic,
        hybrid = hybrid.hybrid_score,
        fragments = structural.fragments.len(),
        "compared pair"
    );

    Ok(PairResult::new(
        PairSide {
            submission_id: left.submission_id,
            student_id: left.student_id,
        },
        PairSide {
            submission_id: right.submission_id,
            student_id: right.student_id,
        },
        structural,
        semantic,
        hybrid,
    ))
}

/// Pairs to compare plus skip counts per failed file
struct PairPlan {
    work: Vec<(SubmissionId, SubmissionId)>,
    skipped: Vec<(SubmissionId, usize)>,
    skipped_total: usize,
}

impl PairPlan {
    fn skipped_for(&self, id: SubmissionId) -> usize {
        self.skipped
            .iter()
            .find(|(failed, _)| *failed == id)
            .map_or(0, |(_, count)| *count)
    }
}

/// Enumerate pairs of different students in ascending submission id order
fn plan_pairs(files: &[&SourceFile], failures: &[(&SourceFile, EngineError)]) -> PairPlan {
    let failed = |id: SubmissionId| failures.iter().any(|(f, _)| f.submission_id == id);
    let mut skipped: Vec<(SubmissionId, usize)> =
        failures.iter().map(|(f, _)| (f.submission_id, 0)).collect();
    let mut work = Vec::new();
    let mut skipped_total = 0;

    for (i, left) in files.iter().enumerate() {
        for right in &files[i + 1..] {
            if left.student_id == right.student_id {
                continue;
            }
            let (left_failed, right_failed) = (failed(left.submission_id), failed(right.submission_id));
            if left_failed || right_failed {
                skipped_total += 1;
                for (id, count) in skipped.iter_mut() {
                    if (left_failed && *id == left.submission_id)
                        || (right_failed && *id == right.submission_id)
                    {
                        *count += 1;
                    }
                }
                continue;
            }
            work.push((left.submission_id, right.submission_id));
        }
    }

    PairPlan {
        work,
        skipped,
        skipped_total,
    }
}

/// Files ordered by submission id, first copy of each id kept
fn dedupe(submissions: &[SourceFile]) -> (Vec<&SourceFile>, Vec<AnalysisWarning>) {
    let mut ordered: Vec<&SourceFile> = submissions.iter().collect();
    ordered.sort_by_key(|f| f.submission_id);

    let mut warnings = Vec::new();
    let mut files: Vec<&SourceFile> = Vec::with_capacity(ordered.len());
    for file in ordered {
        if files.last().is_some_and(|kept| kept.submission_id == file.submission_id) {
            warn!(submission_id = file.submission_id, "duplicate submission id ignored");
            warnings.push(AnalysisWarning::duplicate(file.submission_id, &file.file_name));
            continue;
        }
        files.push(file);
    }
    (files, warnings)
}

fn build_pool(threads: usize) -> Option<ThreadPool> {
    match ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("classifi-worker-{}", i))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!(error = %e, "falling back to the global rayon pool");
            None
        }
    }
}

fn install<R, F>(pool: Option<&ThreadPool>, op: F) -> R
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    match pool {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Run an analysis without external cancellation
pub fn run_analysis(input: &AnalysisInput) -> Result<Report> {
    PairwiseOrchestrator::default().run(input)
}
