//! Orchestration of a splitting run.
//!
//! For every feature of a report the [`Splitter`] walks the elements in
//! order: backgrounds are recorded, plain scenarios are assembled once and
//! outlines once per Examples row. Each assembled scenario gets its
//! narrative and is checked against the [`TagFilter`].
//!
//! Splitting happens in two phases. [`Splitter::assemble`] builds every
//! surviving scenario in memory; only when the whole report assembled
//! without error and no two scenarios share a path are they handed to the
//! [`FeatureEmitter`]. A broken report therefore leaves no output behind.

use std::ops::AddAssign;

use camino::Utf8PathBuf;
use tracing::{debug, info, warn};

use crate::context::{RunContext, ScenarioDraft};
use crate::emit::{AssembledScenario, FeatureEmitter, ensure_unique_paths};
use crate::error::SplitError;
use crate::extract;
use crate::naming::{self, Clock, SystemClock};
use crate::narrative;
use crate::outline::{self, ExampleQueue};
use crate::report::{Element, Feature, ParsedReport};
use crate::tags::TagFilter;

/// Counts describing what a run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// Scenarios handed to the emitter.
    pub emitted: usize,
    /// Scenarios dropped by the tag filter.
    pub filtered: usize,
    /// Elements skipped because they declare no steps.
    pub skipped_elements: usize,
}

impl AddAssign for SplitSummary {
    fn add_assign(&mut self, other: Self) {
        self.emitted += other.emitted;
        self.filtered += other.filtered;
        self.skipped_elements += other.skipped_elements;
    }
}

/// Scenarios assembled from one report, not yet emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Surviving scenarios in report order.
    pub scenarios: Vec<AssembledScenario>,
    /// Counts for the report; `emitted` equals `scenarios.len()`.
    pub summary: SplitSummary,
}

impl Assembly {
    /// Hand every scenario to `emitter` in order.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the emitter.
    pub fn emit_into<E>(&self, emitter: &mut E) -> Result<(), SplitError>
    where
        E: FeatureEmitter + ?Sized,
    {
        for scenario in &self.scenarios {
            emitter.emit(scenario)?;
            info!(
                scenario = %scenario.name,
                path = %scenario.relative_path(),
                "emitted scenario"
            );
        }
        Ok(())
    }
}

/// Splits reports into one emitted feature per scenario.
///
/// # Examples
/// ```
/// use bdd_split::{MemoryEmitter, Splitter, TagFilter};
///
/// let report = r#"{
///   "uri": "features/search.feature",
///   "keyword": "Feature",
///   "name": "Search",
///   "elements": [{
///     "id": "search;find-cheese",
///     "type": "scenario",
///     "keyword": "Scenario",
///     "name": "Find cheese",
///     "tags": [{"name": "@smoke"}],
///     "steps": [{"keyword": "When ", "name": "I search for cheese"}]
///   }]
/// }"#;
/// let mut emitter = MemoryEmitter::new();
/// let summary = Splitter::new(TagFilter::default())
///     .split_str(report, &mut emitter)
///     .unwrap();
/// assert_eq!(summary.emitted, 1);
/// assert_eq!(emitter.scenarios()[0].name, "Find cheese");
/// ```
#[derive(Debug, Clone)]
pub struct Splitter<C = SystemClock> {
    filter: TagFilter,
    clock: C,
}

impl Splitter<SystemClock> {
    /// Create a splitter stamping filenames with the current time.
    #[must_use]
    pub fn new(filter: TagFilter) -> Self {
        Self::with_clock(filter, SystemClock)
    }
}

impl<C: Clock> Splitter<C> {
    /// Create a splitter with a custom timestamp source.
    #[must_use]
    pub fn with_clock(filter: TagFilter, clock: C) -> Self {
        Self { filter, clock }
    }

    /// The tag filter applied to every scenario.
    #[must_use]
    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    /// Parse a report document and split it.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is blank or malformed, when an
    /// Examples table is inconsistent, when two scenarios share a path, or
    /// when the emitter fails.
    pub fn split_str<E>(&self, text: &str, emitter: &mut E) -> Result<SplitSummary, SplitError>
    where
        E: FeatureEmitter + ?Sized,
    {
        let report = ParsedReport::from_json(text)?;
        self.split_report(&report, emitter)
    }

    /// Split every feature of a parsed report.
    ///
    /// Nothing reaches `emitter` unless the whole report assembles.
    ///
    /// # Errors
    ///
    /// Returns an error when an Examples table is inconsistent, when two
    /// scenarios share a path, or when the emitter fails.
    pub fn split_report<E>(
        &self,
        report: &ParsedReport,
        emitter: &mut E,
    ) -> Result<SplitSummary, SplitError>
    where
        E: FeatureEmitter + ?Sized,
    {
        let assembly = self.assemble(report)?;
        ensure_unique_paths(&assembly.scenarios)?;
        assembly.emit_into(emitter)?;
        Ok(assembly.summary)
    }

    /// Assemble every surviving scenario of a report without emitting.
    ///
    /// All buffers live in a context created for this call, so nothing
    /// carries over between reports.
    ///
    /// # Errors
    ///
    /// Returns an error when an Examples table is inconsistent.
    pub fn assemble(&self, report: &ParsedReport) -> Result<Assembly, SplitError> {
        let mut ctx = RunContext::new();
        let mut assembly = Assembly::default();
        for feature in report.features() {
            FeaturePass {
                splitter: self,
                feature,
                source_dir: naming::source_directory(&feature.uri),
                ctx: &mut ctx,
                assembly: &mut assembly,
            }
            .run()?;
        }
        Ok(assembly)
    }
}

/// State for splitting a single feature.
struct FeaturePass<'a, C> {
    splitter: &'a Splitter<C>,
    feature: &'a Feature,
    source_dir: Utf8PathBuf,
    ctx: &'a mut RunContext,
    assembly: &'a mut Assembly,
}

impl<C: Clock> FeaturePass<'_, C> {
    fn run(&mut self) -> Result<(), SplitError> {
        self.ctx.begin_feature();
        if !self.feature.has_scenarios() {
            warn!(feature = %self.feature.uri, "no scenarios found in feature; skipping");
            return Ok(());
        }
        for element in &self.feature.elements {
            self.split_element(element)?;
        }
        Ok(())
    }

    fn split_element(&mut self, element: &Element) -> Result<(), SplitError> {
        if element.steps.is_empty() {
            debug!(element = %element.name, "element declares no steps; skipping");
            self.assembly.summary.skipped_elements += 1;
            return Ok(());
        }
        if element.is_background() {
            extract::extract_element(element, self.ctx);
            debug!(feature = %self.feature.uri, "recorded background");
            return Ok(());
        }
        let Some(queue) = ExampleQueue::from_element(element)? else {
            self.split_scenario(element);
            return Ok(());
        };
        self.split_outline(element, queue);
        Ok(())
    }

    fn split_scenario(&mut self, element: &Element) {
        extract::extract_element(element, self.ctx);
        if outline::contains_placeholders(&element.name) {
            debug!(
                scenario = %element.name,
                "scenario has placeholders but no Examples; emitting them verbatim"
            );
        }
        let identifier = naming::identifier_suffix(element.id.as_deref().unwrap_or_default());
        let draft = self.ctx.finish_scenario();
        self.finish(draft, &identifier);
    }

    fn split_outline(&mut self, element: &Element, queue: ExampleQueue) {
        if queue.is_empty() {
            warn!(scenario = %element.name, "outline has no Examples rows; nothing to emit");
            return;
        }
        debug!(scenario = %element.name, rows = queue.remaining(), "expanding outline");
        for binding in queue {
            let concrete = outline::instantiate(element, &binding);
            self.finish(concrete.draft, &concrete.identifier);
        }
    }

    fn finish(&mut self, draft: ScenarioDraft, identifier: &str) {
        let narrative = narrative::compose(self.feature, &draft.heading());
        if !self.splitter.filter.matches(draft.tag_line.as_deref()) {
            info!(
                scenario = %draft.name,
                tags = draft.tag_line.as_deref().unwrap_or("<none>"),
                "scenario does not carry an expected tag; skipping"
            );
            self.assembly.summary.filtered += 1;
            return;
        }
        let file_name = naming::file_name(identifier, &self.splitter.clock.timestamp());
        self.assembly.scenarios.push(AssembledScenario {
            narrative,
            background: self.ctx.background().to_vec(),
            scenario: draft.lines(),
            name: draft.name,
            source_dir: self.source_dir.clone(),
            file_name,
        });
        self.assembly.summary.emitted += 1;
    }
}
