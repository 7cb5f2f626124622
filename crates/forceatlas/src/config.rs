//! Configuration types for ForceAtlas2 layout runs.
//!
//! This module provides the records that control how the external engine is
//! located and how it simulates. All types implement [`serde::Deserialize`]
//! so they can be loaded from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining engine and layout settings.
//! - [`EngineConfig`] - Where the engine lives and how the JVM is started.
//! - [`LayoutConfig`] - Tunable simulation parameters passed to the engine.
//!
//! # Example
//!
//! ```
//! # use forceatlas::config::{LayoutConfig, StoppingCriterion};
//! let config = LayoutConfig::default().with_threshold(1e-3).with_iterations(10_000);
//! assert_eq!(
//!     config.stopping_criterion(),
//!     StoppingCriterion::TargetChange { threshold: 1e-3, max_steps: 10_000 }
//! );
//! ```

use std::{
    env,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    thread,
};

use serde::Deserialize;

use forceatlas_core::position::Dimension;

/// Top-level configuration combining engine and layout settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Engine location section.
    #[serde(default)]
    engine: EngineConfig,

    /// Simulation parameter section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(engine: EngineConfig, layout: LayoutConfig) -> Self {
        Self { engine, layout }
    }

    /// Returns the engine configuration.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Replaces the layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Location and JVM settings of the external engine.
///
/// The classpath is injected here rather than computed globally so that
/// several engine installations can be driven from the same process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The `java` executable to launch.
    java: PathBuf,

    /// Classpath entries, joined with the platform separator.
    classpath: Vec<PathBuf>,

    /// Fully qualified entry point class.
    main_class: String,

    /// JVM heap ceiling, as accepted by `-Xmx`.
    max_heap: String,

    /// Directory for temporary files; the system temp dir when unset.
    work_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            java: PathBuf::from("java"),
            classpath: vec![
                PathBuf::from("ext/forceatlas2.jar"),
                PathBuf::from("ext/gephi-toolkit-0.9.2-all.jar"),
            ],
            main_class: "kco.forceatlas2.Main".to_string(),
            max_heap: "8g".to_string(),
            work_dir: None,
        }
    }
}

impl EngineConfig {
    /// Creates an engine configuration for the given executable and classpath.
    pub fn new(java: impl Into<PathBuf>, classpath: Vec<PathBuf>) -> Self {
        Self {
            java: java.into(),
            classpath,
            ..Self::default()
        }
    }

    /// Sets the entry point class.
    pub fn with_main_class(mut self, main_class: impl Into<String>) -> Self {
        self.main_class = main_class.into();
        self
    }

    /// Sets the JVM heap ceiling.
    pub fn with_max_heap(mut self, max_heap: impl Into<String>) -> Self {
        self.max_heap = max_heap.into();
        self
    }

    /// Sets the directory temporary files are created in.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(work_dir.into());
        self
    }

    pub fn java(&self) -> &Path {
        &self.java
    }

    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    pub fn main_class(&self) -> &str {
        &self.main_class
    }

    pub fn max_heap(&self) -> &str {
        &self.max_heap
    }

    /// Returns the directory temporary files are created in.
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(env::temp_dir)
    }
}

/// When the simulation stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoppingCriterion {
    /// Run exactly this many steps.
    Steps(u32),
    /// Run until the mean per-node change drops below `threshold`,
    /// for at most `max_steps` steps.
    TargetChange { threshold: f64, max_steps: u32 },
}

/// Simulation parameters forwarded to the engine.
///
/// Defaults mirror the engine's recommended settings. Unset optional values
/// leave the corresponding engine flag out so the engine's own default applies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    iterations: u32,
    threshold: Option<f64>,
    directed: bool,
    dim: Dimension,
    splits: Option<u32>,
    theta: f64,
    update_iter: u32,
    update_center: bool,
    jitter_tolerance: f64,
    lin_log_mode: bool,
    repulsion: Option<f64>,
    gravity: f64,
    strong_gravity_mode: bool,
    outbound_attraction_distribution: bool,
    n_jobs: usize,
    seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            threshold: None,
            directed: false,
            dim: Dimension::Two,
            splits: None,
            theta: 1.2,
            update_iter: 1,
            update_center: false,
            jitter_tolerance: 1.0,
            lin_log_mode: false,
            repulsion: None,
            gravity: 1.0,
            strong_gravity_mode: false,
            outbound_attraction_distribution: false,
            n_jobs: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Step count, or the step cap when a threshold is set.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Switches to convergence-based stopping.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Switches back to fixed-step stopping.
    pub fn without_threshold(mut self) -> Self {
        self.threshold = None;
        self
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_dim(mut self, dim: Dimension) -> Self {
        self.dim = dim;
        self
    }

    /// Barnes-Hut split rounds; the region count is `4^splits` in 2D and `8^splits` in 3D.
    pub fn with_splits(mut self, splits: u32) -> Self {
        self.splits = Some(splits);
        self
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    /// Rebuild the Barnes-Hut tree every `update_iter` steps.
    pub fn with_update_iter(mut self, update_iter: u32) -> Self {
        self.update_iter = update_iter;
        self
    }

    /// Update region centers between tree rebuilds.
    pub fn with_update_center(mut self, update_center: bool) -> Self {
        self.update_center = update_center;
        self
    }

    pub fn with_jitter_tolerance(mut self, jitter_tolerance: f64) -> Self {
        self.jitter_tolerance = jitter_tolerance;
        self
    }

    pub fn with_lin_log_mode(mut self, lin_log_mode: bool) -> Self {
        self.lin_log_mode = lin_log_mode;
        self
    }

    /// Scaling ratio; larger values spread the graph out.
    pub fn with_repulsion(mut self, repulsion: f64) -> Self {
        self.repulsion = Some(repulsion);
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_strong_gravity_mode(mut self, strong_gravity_mode: bool) -> Self {
        self.strong_gravity_mode = strong_gravity_mode;
        self
    }

    /// Hubs attract less and drift towards the borders.
    pub fn with_outbound_attraction_distribution(mut self, enabled: bool) -> Self {
        self.outbound_attraction_distribution = enabled;
        self
    }

    /// Engine worker threads; has no effect on the driver itself.
    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = n_jobs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the single active stopping criterion.
    pub fn stopping_criterion(&self) -> StoppingCriterion {
        match self.threshold {
            None => StoppingCriterion::Steps(self.iterations),
            Some(threshold) => StoppingCriterion::TargetChange {
                threshold,
                max_steps: self.iterations,
            },
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    pub fn splits(&self) -> Option<u32> {
        self.splits
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn update_iter(&self) -> u32 {
        self.update_iter
    }

    pub fn update_center(&self) -> bool {
        self.update_center
    }

    pub fn jitter_tolerance(&self) -> f64 {
        self.jitter_tolerance
    }

    pub fn lin_log_mode(&self) -> bool {
        self.lin_log_mode
    }

    pub fn repulsion(&self) -> Option<f64> {
        self.repulsion
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn strong_gravity_mode(&self) -> bool {
        self.strong_gravity_mode
    }

    pub fn outbound_attraction_distribution(&self) -> bool {
        self.outbound_attraction_distribution
    }

    pub fn n_jobs(&self) -> usize {
        self.n_jobs
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
