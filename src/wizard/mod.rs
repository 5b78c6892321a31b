// ABOUTME: Wizard controller holding the cross-step state of the meme flow
// Step order, selection, caption/hashtags and the merged media handle live here;
// every mutation goes through one of the transition functions below

pub mod choose;
pub mod generating;
pub mod publish;
pub mod review;

use crate::catalog::{self, Trend};
use crate::media::{MediaHandle, MediaStore};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use choose::{ChooseFocus, ChooseState};
pub use generating::GeneratingState;
pub use publish::{Platform, PublishState, PublishStatus};
pub use review::{parse_hashtags, ReviewFocus, ReviewState};

/// Screens of the application. The first four form the linear pipeline;
/// `Analytics` sits outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Step {
    Choose,
    Generating,
    Review,
    Publish,
    Analytics,
}

impl Step {
    /// Pipeline steps in order
    pub const ORDER: [Self; 4] = [Self::Choose, Self::Generating, Self::Review, Self::Publish];

    /// Position in the pipeline, `None` for analytics
    pub fn index(self) -> Option<usize> {
        Self::ORDER.iter().position(|s| *s == self)
    }

    pub fn in_pipeline(self) -> bool {
        self.index().is_some()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Choose => "Select Trend",
            Self::Generating => "Generate Video",
            Self::Review => "Review",
            Self::Publish => "Publish",
            Self::Analytics => "Analytics",
        }
    }

    /// Immediate predecessor, clamped at the first step
    pub fn previous(self) -> Self {
        match self.index() {
            Some(idx) => Self::ORDER[idx.saturating_sub(1)],
            None => self,
        }
    }
}

/// How a step is drawn in the step indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Current,
    Todo,
}

/// Behaviour switches covering both flavours of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowFlags {
    /// Only the table's compatible brand may be picked for a trend
    pub strict_brand_gating: bool,
    /// Analytics screen and post synthesis are available
    pub analytics_enabled: bool,
}

impl Default for FlowFlags {
    fn default() -> Self {
        Self {
            strict_brand_gating: true,
            analytics_enabled: true,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("{brand} cannot be used with the {trend} trend")]
    IncompatibleBrand { trend: String, brand: String },

    #[error("Unknown brand: {0}")]
    UnknownBrand(String),

    #[error("No trend selected")]
    MissingTrend,

    #[error("Cannot jump from {from:?} to {to:?}")]
    StepLocked { from: Step, to: Step },

    #[error("Pick a valid trend and brand before generating")]
    CannotGenerate,

    #[error("Analytics are disabled")]
    AnalyticsDisabled,
}

/// Root wizard state shared by every step
#[derive(Debug, Clone)]
pub struct WizardState {
    step: Step,
    trend: Option<&'static Trend>,
    brand: String,
    prompt: String,
    caption: String,
    hashtags: Vec<String>,
    merged: Option<MediaHandle>,
    highlighted_post: Option<String>,
    flags: FlowFlags,
}

impl WizardState {
    pub fn new(flags: FlowFlags) -> Self {
        Self {
            step: Step::Choose,
            trend: None,
            brand: String::new(),
            prompt: catalog::build_prompt(None, ""),
            caption: String::new(),
            hashtags: Vec::new(),
            merged: None,
            highlighted_post: None,
            flags,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn trend(&self) -> Option<&'static Trend> {
        self.trend
    }

    /// Selected brand name, empty when unselected
    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn hashtags(&self) -> &[String] {
        &self.hashtags
    }

    pub fn merged(&self) -> Option<MediaHandle> {
        self.merged
    }

    pub fn highlighted_post(&self) -> Option<&str> {
        self.highlighted_post.as_deref()
    }

    pub fn flags(&self) -> FlowFlags {
        self.flags
    }

    pub fn step_status(&self, step: Step) -> StepStatus {
        match (step.index(), self.step.index()) {
            (Some(idx), Some(current)) if idx < current => StepStatus::Done,
            (Some(idx), Some(current)) if idx == current => StepStatus::Current,
            _ => StepStatus::Todo,
        }
    }

    /// Whether `brand_name` may be picked under the current trend
    pub fn brand_allowed(&self, brand_name: &str) -> bool {
        if !self.flags.strict_brand_gating {
            return true;
        }
        self.trend
            .is_some_and(|t| catalog::is_compatible(t.id, brand_name))
    }

    pub fn select_trend(&mut self, trend: &'static Trend) {
        if self.trend.is_some_and(|t| t.id == trend.id) {
            debug!("Trend {} already selected", trend.id);
            return;
        }
        info!("Selected trend {}", trend.id);
        self.trend = Some(trend);
        if self.flags.strict_brand_gating
            && !self.brand.is_empty()
            && !catalog::is_compatible(trend.id, &self.brand)
        {
            debug!("Clearing brand {} after trend switch", self.brand);
            self.brand.clear();
        }
        self.refresh_prompt();
    }

    pub fn select_brand(&mut self, brand_name: &str) -> Result<(), WizardError> {
        if catalog::find_brand_by_name(brand_name).is_none() {
            return Err(WizardError::UnknownBrand(brand_name.to_string()));
        }
        if !self.brand_allowed(brand_name) {
            warn!("Rejected brand {} for trend {:?}", brand_name, self.trend.map(|t| t.id));
            return Err(WizardError::IncompatibleBrand {
                trend: self.trend.map_or_else(|| "(none)".to_string(), |t| t.title.to_string()),
                brand: brand_name.to_string(),
            });
        }
        if self.brand == brand_name {
            debug!("Brand {} already selected", brand_name);
            return Ok(());
        }
        info!("Selected brand {}", brand_name);
        self.brand = brand_name.to_string();
        self.refresh_prompt();
        Ok(())
    }

    /// User edit of the prompt; kept until trend or brand change again
    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    fn refresh_prompt(&mut self) {
        self.prompt = catalog::build_prompt(self.trend, &self.brand);
    }

    pub fn can_generate(&self) -> bool {
        match self.trend {
            None => false,
            Some(trend) if self.flags.strict_brand_gating => {
                catalog::is_compatible(trend.id, &self.brand)
            }
            Some(_) => true,
        }
    }

    pub fn start_generation(&mut self) -> Result<(), WizardError> {
        if self.step != Step::Choose || !self.can_generate() {
            return Err(WizardError::CannotGenerate);
        }
        self.set_step(Step::Generating);
        Ok(())
    }

    /// Progress finished; moves to review, or back to selection when the
    /// trend has gone missing
    pub fn finish_generation(&mut self) -> Result<(), WizardError> {
        if self.step != Step::Generating {
            return Ok(());
        }
        self.enter_review()
    }

    fn enter_review(&mut self) -> Result<(), WizardError> {
        if self.trend.is_none() {
            warn!("Review requested without a trend, redirecting to selection");
            self.set_step(Step::Choose);
            return Err(WizardError::MissingTrend);
        }
        self.set_step(Step::Review);
        Ok(())
    }

    pub fn continue_to_publish(&mut self, caption: String, hashtags: Vec<String>) {
        self.caption = caption;
        self.hashtags = hashtags;
        self.set_step(Step::Publish);
    }

    /// Step indicator navigation: only already reached pipeline steps
    pub fn navigate_to(&mut self, target: Step) -> Result<(), WizardError> {
        let locked = WizardError::StepLocked {
            from: self.step,
            to: target,
        };
        let (Some(target_idx), Some(current_idx)) = (target.index(), self.step.index()) else {
            return Err(locked);
        };
        if target_idx > current_idx {
            return Err(locked);
        }
        if target == Step::Review {
            return self.enter_review();
        }
        self.set_step(target);
        Ok(())
    }

    /// One step back, clamped at the first step; no-op outside the pipeline
    pub fn back(&mut self) -> Result<(), WizardError> {
        if !self.step.in_pipeline() {
            return Ok(());
        }
        let previous = self.step.previous();
        if previous == Step::Review {
            return self.enter_review();
        }
        self.set_step(previous);
        Ok(())
    }

    pub fn open_analytics(&mut self) -> Result<(), WizardError> {
        if !self.flags.analytics_enabled {
            return Err(WizardError::AnalyticsDisabled);
        }
        self.set_step(Step::Analytics);
        Ok(())
    }

    pub fn close_analytics(&mut self) {
        if self.step == Step::Analytics {
            self.set_step(Step::Choose);
        }
    }

    /// Adopt a freshly merged clip, releasing the one it replaces
    pub fn set_merged(&mut self, handle: MediaHandle, store: &mut MediaStore) {
        if let Some(previous) = self.merged.replace(handle) {
            if previous != handle {
                store.release(previous);
            }
        }
    }

    /// Drop the merged clip, releasing its bytes
    pub fn discard_merged(&mut self, store: &mut MediaStore) {
        if let Some(handle) = self.merged.take() {
            debug!("Discarding merged clip {}", handle);
            store.release(handle);
        }
    }

    pub fn highlight_post(&mut self, id: String) {
        self.highlighted_post = Some(id);
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted_post = None;
    }

    /// Back to a fresh selection. The highlight survives so the analytics
    /// screen still marks the last post.
    pub fn reset(&mut self, store: &mut MediaStore) {
        info!("Restarting flow");
        self.trend = None;
        self.brand.clear();
        self.caption.clear();
        self.hashtags.clear();
        self.prompt = catalog::build_prompt(None, "");
        self.discard_merged(store);
        self.set_step(Step::Choose);
    }

    fn set_step(&mut self, step: Step) {
        if self.step != step {
            info!("Step {:?} -> {:?}", self.step, step);
        }
        self.step = step;
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(FlowFlags::default())
    }
}
