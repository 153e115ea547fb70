//! Staged soil image analysis
//!
//! The image flow does no real vision work. It walks through four named
//! stages on a scheduler tick and then yields a fixed soil reading. The
//! walk is an explicit state machine:
//!
//! ```text
//! Idle --start--> Running{0} --tick--> Running{0} --tick--> Running{1} ... Running{4} --tick--> Done
//!                     |                                                       |
//!                     +-------------------------cancel------------------------+--> Cancelled
//! ```
//!
//! Every stage index, including 0, takes one full stage period, so a run
//! completes on the sixth period. `Running{4}` means every stage has
//! finished and the result is about to be produced. Starting a new run while one is in flight cancels the old
//! run first; its token reports cancelled from then on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::types::{ImageRef, SoilData};

/// Named analysis stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Vision,
    Texture,
    Moisture,
    Nutrients,
}

impl AnalysisStage {
    pub const ALL: [AnalysisStage; 4] = [
        AnalysisStage::Vision,
        AnalysisStage::Texture,
        AnalysisStage::Moisture,
        AnalysisStage::Nutrients,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisStage::Vision => "AI Vision Processing",
            AnalysisStage::Texture => "Texture Detection",
            AnalysisStage::Moisture => "Moisture Estimation",
            AnalysisStage::Nutrients => "Nutrient Analysis",
        }
    }

    pub fn name_local(&self) -> &'static str {
        match self {
            AnalysisStage::Vision => "AI பார்வை செயலாக்கம்",
            AnalysisStage::Texture => "அமைப்பு கண்டறிதல்",
            AnalysisStage::Moisture => "ஈரப்பதம் மதிப்பீடு",
            AnalysisStage::Nutrients => "ஊட்டச்சத்து பகுப்பாய்வு",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnalysisStage::Vision => "Analyzing soil image with computer vision",
            AnalysisStage::Texture => "Identifying soil texture and composition",
            AnalysisStage::Moisture => "Calculating moisture content from color",
            AnalysisStage::Nutrients => "Estimating NPK levels",
        }
    }
}

/// Stage index at which every stage is complete
const FINAL_STAGE_INDEX: usize = AnalysisStage::ALL.len();

/// Cooperative cancellation flag shared between a run and its owner
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Idle,
    /// `stage_index` stages have finished
    Running { stage_index: usize },
    Done,
    Cancelled,
}

/// What a scheduler tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing running, or still waiting out the current stage
    Unchanged,
    /// Moved to the next stage
    Advanced { stage_index: usize, progress: u8 },
    /// Finished; reported exactly once per run
    Completed(SoilData),
    /// The run was cancelled; reported once, further ticks are `Unchanged`
    Halted,
}

/// Tick-driven mock analysis of a soil photo
#[derive(Debug, Clone)]
pub struct SoilAnalysis {
    phase: AnalysisPhase,
    token: Option<CancellationToken>,
    image: Option<ImageRef>,
    template: SoilData,
    ticks_per_stage: u32,
    pending_ticks: u32,
    /// Whether the first stage period of the run has elapsed
    stage_entered: bool,
    result: Option<SoilData>,
}

impl SoilAnalysis {
    /// Create an idle machine
    ///
    /// `template` is the fixed reading every run produces; `ticks_per_stage`
    /// is how many scheduler ticks each stage lasts (at least one).
    pub fn new(template: SoilData, ticks_per_stage: u32) -> Self {
        Self {
            phase: AnalysisPhase::Idle,
            token: None,
            image: None,
            template,
            ticks_per_stage: ticks_per_stage.max(1),
            pending_ticks: 0,
            stage_entered: false,
            result: None,
        }
    }

    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, AnalysisPhase::Running { .. })
    }

    /// Result of the last completed run
    pub fn result(&self) -> Option<&SoilData> {
        self.result.as_ref()
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    /// Start a run, cancelling any run already in flight
    pub fn start(&mut self, image: Option<ImageRef>) -> CancellationToken {
        if let Some(previous) = self.token.take() {
            if self.is_running() {
                tracing::debug!("restarting soil analysis, cancelling in-flight run");
            }
            previous.cancel();
        }

        let token = CancellationToken::new();
        self.token = Some(token.clone());
        self.image = image;
        self.result = None;
        self.pending_ticks = 0;
        self.stage_entered = false;
        self.phase = AnalysisPhase::Running { stage_index: 0 };
        tracing::info!(image = ?self.image.as_ref().map(|i| &i.location), "soil analysis started");
        token
    }

    /// Cancel the current run, if any
    pub fn cancel(&mut self) {
        if let Some(token) = &self.token {
            token.cancel();
        }
        if self.is_running() {
            self.phase = AnalysisPhase::Cancelled;
            tracing::info!("soil analysis cancelled");
        }
    }

    /// Reset to idle, cancelling any run in flight
    pub fn reset(&mut self) {
        self.cancel();
        self.token = None;
        self.image = None;
        self.result = None;
        self.pending_ticks = 0;
        self.stage_entered = false;
        self.phase = AnalysisPhase::Idle;
    }

    /// Completion percentage of the current run
    pub fn progress(&self) -> u8 {
        match self.phase {
            AnalysisPhase::Idle | AnalysisPhase::Cancelled => 0,
            AnalysisPhase::Running { stage_index } => {
                (stage_index * 100 / (FINAL_STAGE_INDEX + 1)) as u8
            }
            AnalysisPhase::Done => 100,
        }
    }

    /// Whether `stage` has finished in the current run
    pub fn stage_complete(&self, stage: AnalysisStage) -> bool {
        let position = AnalysisStage::ALL
            .iter()
            .position(|s| *s == stage)
            .unwrap_or(FINAL_STAGE_INDEX);
        match self.phase {
            AnalysisPhase::Running { stage_index } => stage_index > position,
            AnalysisPhase::Done => true,
            _ => false,
        }
    }

    /// Advance by one scheduler tick
    pub fn tick(&mut self) -> TickOutcome {
        let AnalysisPhase::Running { stage_index } = self.phase else {
            return TickOutcome::Unchanged;
        };

        if self.token.as_ref().is_some_and(CancellationToken::is_cancelled) {
            self.phase = AnalysisPhase::Cancelled;
            tracing::info!("soil analysis halted by cancellation");
            return TickOutcome::Halted;
        }

        self.pending_ticks += 1;
        if self.pending_ticks < self.ticks_per_stage {
            return TickOutcome::Unchanged;
        }
        self.pending_ticks = 0;

        if !self.stage_entered {
            self.stage_entered = true;
            return TickOutcome::Advanced {
                stage_index,
                progress: self.progress(),
            };
        }

        if stage_index < FINAL_STAGE_INDEX {
            let next = stage_index + 1;
            self.phase = AnalysisPhase::Running { stage_index: next };
            TickOutcome::Advanced {
                stage_index: next,
                progress: self.progress(),
            }
        } else {
            let mut result = self.template.clone();
            result.image = self.image.clone();
            self.result = Some(result.clone());
            self.phase = AnalysisPhase::Done;
            tracing::info!("soil analysis completed");
            TickOutcome::Completed(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageMimeType, SoilTexture};

    fn template() -> SoilData {
        SoilData {
            ph: 6.8,
            nitrogen: 75.0,
            phosphorus: 62.0,
            potassium: 58.0,
            moisture: 42.0,
            organic_matter: 3.2,
            texture: SoilTexture::Loamy,
            image: None,
        }
    }

    fn image() -> ImageRef {
        ImageRef {
            location: "/tmp/field.jpg".to_string(),
            mime_type: ImageMimeType::Jpeg,
        }
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut analysis = SoilAnalysis::new(template(), 1);
        assert_eq!(analysis.tick(), TickOutcome::Unchanged);
        assert_eq!(analysis.phase(), AnalysisPhase::Idle);
    }

    #[test]
    fn test_full_run_stage_sequence() {
        let mut analysis = SoilAnalysis::new(template(), 1);
        analysis.start(Some(image()));
        assert_eq!(analysis.progress(), 0);

        let progress: Vec<u8> = (0..5)
            .map(|_| match analysis.tick() {
                TickOutcome::Advanced { progress, .. } => progress,
                other => panic!("Expected Advanced, got {:?}", other),
            })
            .collect();
        assert_eq!(progress, vec![0, 20, 40, 60, 80]);
        assert!(analysis.stage_complete(AnalysisStage::Nutrients));

        match analysis.tick() {
            TickOutcome::Completed(data) => {
                assert_eq!(data.ph, 6.8);
                assert_eq!(data.image, Some(image()));
            }
            other => panic!("Expected Completed, got {:?}", other),
        }
        assert_eq!(analysis.phase(), AnalysisPhase::Done);
        assert_eq!(analysis.progress(), 100);

        // Completion is reported once
        assert_eq!(analysis.tick(), TickOutcome::Unchanged);
        assert!(analysis.result().is_some());
    }

    #[test]
    fn test_ticks_per_stage() {
        let mut analysis = SoilAnalysis::new(template(), 3);
        analysis.start(None);

        assert_eq!(analysis.tick(), TickOutcome::Unchanged);
        assert_eq!(analysis.tick(), TickOutcome::Unchanged);
        assert!(matches!(
            analysis.tick(),
            TickOutcome::Advanced { stage_index: 0, .. }
        ));
        assert!(!analysis.stage_complete(AnalysisStage::Vision));

        for _ in 0..2 {
            assert_eq!(analysis.tick(), TickOutcome::Unchanged);
        }
        assert!(matches!(
            analysis.tick(),
            TickOutcome::Advanced { stage_index: 1, .. }
        ));
        assert!(analysis.stage_complete(AnalysisStage::Vision));
        assert!(!analysis.stage_complete(AnalysisStage::Texture));
    }

    #[test]
    fn test_completes_on_sixth_stage_period() {
        let mut analysis = SoilAnalysis::new(template(), 2);
        analysis.start(None);

        let completed_at = (1..=20)
            .find(|_| matches!(analysis.tick(), TickOutcome::Completed(_)));
        assert_eq!(completed_at, Some(12));
    }

    #[test]
    fn test_cancel_halts_advancement() {
        let mut analysis = SoilAnalysis::new(template(), 1);
        let token = analysis.start(None);
        analysis.tick();

        token.cancel();
        assert_eq!(analysis.tick(), TickOutcome::Halted);
        assert_eq!(analysis.phase(), AnalysisPhase::Cancelled);

        for _ in 0..10 {
            assert_eq!(analysis.tick(), TickOutcome::Unchanged);
        }
        assert!(analysis.result().is_none());
    }

    #[test]
    fn test_cancel_method_stops_run_immediately() {
        let mut analysis = SoilAnalysis::new(template(), 1);
        let token = analysis.start(None);

        analysis.cancel();

        assert!(token.is_cancelled());
        assert_eq!(analysis.phase(), AnalysisPhase::Cancelled);
        assert_eq!(analysis.tick(), TickOutcome::Unchanged);
    }

    #[test]
    fn test_restart_cancels_in_flight_run() {
        let mut analysis = SoilAnalysis::new(template(), 1);
        let first = analysis.start(None);
        analysis.tick();
        analysis.tick();

        let second = analysis.start(Some(image()));

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(analysis.phase(), AnalysisPhase::Running { stage_index: 0 });

        let mut completions = 0;
        for _ in 0..10 {
            if let TickOutcome::Completed(_) = analysis.tick() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut analysis = SoilAnalysis::new(template(), 1);
        let token = analysis.start(Some(image()));
        analysis.reset();

        assert!(token.is_cancelled());
        assert_eq!(analysis.phase(), AnalysisPhase::Idle);
        assert!(analysis.image().is_none());
    }
}
