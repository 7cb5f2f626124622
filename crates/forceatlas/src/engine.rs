//! Engine command construction and invocation.
//!
//! [`build_command`] turns an [`EngineConfig`], a [`LayoutConfig`] and the
//! paths of the files prepared for a run into the exact argument vector the
//! engine expects. It performs no I/O, so identical inputs always produce an
//! identical [`EngineCommand`].
//!
//! Running the command is delegated to a [`Launcher`]; see the [`launcher`]
//! module.

pub mod launcher;

pub use launcher::{ExitOutcome, Launcher, SystemLauncher};

use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
};

use crate::config::{EngineConfig, LayoutConfig, StoppingCriterion};
use forceatlas_core::position::Dimension;

#[cfg(windows)]
const CLASSPATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const CLASSPATH_SEPARATOR: &str = ":";

/// Paths of the files involved in one engine run.
#[derive(Debug, Clone)]
pub struct CommandFiles {
    /// Pajek network file.
    pub network: PathBuf,
    /// Output base; the engine appends `.txt` (and `.distances.txt`).
    pub output_base: PathBuf,
    /// Initial position file, when the caller supplied positions.
    pub positions: Option<PathBuf>,
}

/// A fully built engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl EngineCommand {
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Returns the value following the first occurrence of `flag`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ffi::OsStr;
    ///
    /// use forceatlas::{
    ///     config::{EngineConfig, LayoutConfig},
    ///     engine::{CommandFiles, build_command},
    /// };
    ///
    /// let files = CommandFiles {
    ///     network: "graph.net".into(),
    ///     output_base: "out.coords".into(),
    ///     positions: None,
    /// };
    /// let command = build_command(&EngineConfig::default(), &LayoutConfig::default(), &files);
    ///
    /// assert_eq!(command.arg_value("--input"), Some(OsStr::new("graph.net")));
    /// assert_eq!(command.arg_value("--coords"), None);
    /// ```
    pub fn arg_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }

    /// Returns `true` if `flag` appears anywhere in the argument vector.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Accumulates arguments while keeping each option next to its value.
struct ArgsBuilder {
    args: Vec<OsString>,
}

impl ArgsBuilder {
    fn flag(&mut self, flag: &str) {
        self.args.push(flag.into());
    }

    fn option(&mut self, flag: &str, value: impl fmt::Display) {
        self.args.push(flag.into());
        self.args.push(value.to_string().into());
    }

    fn path(&mut self, flag: &str, path: &Path) {
        self.args.push(flag.into());
        self.args.push(path.as_os_str().to_owned());
    }

    fn flag_if(&mut self, enabled: bool, flag: &str) {
        if enabled {
            self.flag(flag);
        }
    }

    fn option_if_some(&mut self, flag: &str, value: Option<impl fmt::Display>) {
        if let Some(value) = value {
            self.option(flag, value);
        }
    }
}

/// Builds the engine invocation for one run.
pub fn build_command(engine: &EngineConfig, layout: &LayoutConfig, files: &CommandFiles) -> EngineCommand {
    let mut builder = ArgsBuilder { args: Vec::new() };

    builder.flag("-Djava.awt.headless=true");
    builder.flag(&format!("-Xmx{}", engine.max_heap()));
    builder.args.push("-cp".into());
    builder.args.push(join_classpath(engine.classpath()));
    builder.flag(engine.main_class());

    builder.path("--input", &files.network);
    builder.path("--output", &files.output_base);
    builder.option("--nthreads", layout.n_jobs());
    builder.option("--barnesHutTheta", layout.theta());
    builder.option("--barnesHutUpdateIter", layout.update_iter());
    builder.option("--jitterTolerance", layout.jitter_tolerance());
    builder.option("--gravity", layout.gravity());

    // 3D is the engine default.
    builder.flag_if(layout.dim() == Dimension::Two, "--2d");
    builder.option_if_some("--seed", layout.seed());
    builder.option_if_some("--barnesHutSplits", layout.splits());
    builder.flag_if(layout.update_center(), "--updateCenter");
    builder.flag_if(layout.lin_log_mode(), "--linLogMode");
    builder.option_if_some("--scalingRatio", layout.repulsion());
    builder.flag_if(layout.strong_gravity_mode(), "--strongGravityMode");
    builder.flag_if(
        layout.outbound_attraction_distribution(),
        "--outboundAttractionDistribution",
    );
    builder.flag_if(layout.directed(), "--directed");

    match layout.stopping_criterion() {
        StoppingCriterion::Steps(steps) => builder.option("--nsteps", steps),
        StoppingCriterion::TargetChange {
            threshold,
            max_steps,
        } => {
            builder.option("--targetChangePerNode", threshold);
            builder.option("--targetSteps", max_steps);
        }
    }

    if let Some(positions) = &files.positions {
        builder.path("--coords", positions);
    }

    EngineCommand {
        program: engine.java().to_path_buf(),
        args: builder.args,
    }
}

fn join_classpath(entries: &[PathBuf]) -> OsString {
    let mut joined = OsString::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            joined.push(CLASSPATH_SEPARATOR);
        }
        joined.push(entry);
    }
    joined
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn files() -> CommandFiles {
        CommandFiles {
            network: PathBuf::from("/tmp/forceatlas-a.net"),
            output_base: PathBuf::from("/tmp/forceatlas-b.coords"),
            positions: None,
        }
    }

    fn engine() -> EngineConfig {
        EngineConfig::new(
            "java",
            vec![PathBuf::from("lib/fa2.jar"), PathBuf::from("lib/gephi.jar")],
        )
    }

    fn strings(command: &EngineCommand) -> Vec<String> {
        command
            .args()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_default_command() {
        let layout = LayoutConfig::default().with_n_jobs(4);

        let command = build_command(&engine(), &layout, &files());

        assert_eq!(command.program(), Path::new("java"));
        assert_eq!(
            strings(&command),
            vec![
                "-Djava.awt.headless=true",
                "-Xmx8g",
                "-cp",
                format!("lib/fa2.jar{CLASSPATH_SEPARATOR}lib/gephi.jar").as_str(),
                "kco.forceatlas2.Main",
                "--input",
                "/tmp/forceatlas-a.net",
                "--output",
                "/tmp/forceatlas-b.coords",
                "--nthreads",
                "4",
                "--barnesHutTheta",
                "1.2",
                "--barnesHutUpdateIter",
                "1",
                "--jitterTolerance",
                "1",
                "--gravity",
                "1",
                "--2d",
                "--nsteps",
                "50",
            ]
        );
    }

    #[test]
    fn test_three_dimensions_omit_2d_flag() {
        let layout = LayoutConfig::default().with_dim(Dimension::Three);

        let command = build_command(&engine(), &layout, &files());

        assert!(!command.has_flag("--2d"));
    }

    #[test]
    fn test_optional_flags() {
        let layout = LayoutConfig::default()
            .with_seed(42)
            .with_splits(3)
            .with_update_center(true)
            .with_lin_log_mode(true)
            .with_repulsion(2.5)
            .with_strong_gravity_mode(true)
            .with_outbound_attraction_distribution(true)
            .with_directed(true);

        let command = build_command(&engine(), &layout, &files());

        assert_eq!(command.arg_value("--seed"), Some(OsStr::new("42")));
        assert_eq!(command.arg_value("--barnesHutSplits"), Some(OsStr::new("3")));
        assert_eq!(command.arg_value("--scalingRatio"), Some(OsStr::new("2.5")));
        for flag in [
            "--updateCenter",
            "--linLogMode",
            "--strongGravityMode",
            "--outboundAttractionDistribution",
            "--directed",
        ] {
            assert!(command.has_flag(flag), "missing {flag}");
        }
    }

    #[test]
    fn test_unset_options_are_omitted() {
        let command = build_command(&engine(), &LayoutConfig::default(), &files());

        for flag in [
            "--seed",
            "--barnesHutSplits",
            "--updateCenter",
            "--linLogMode",
            "--scalingRatio",
            "--strongGravityMode",
            "--outboundAttractionDistribution",
            "--directed",
            "--coords",
            "--targetChangePerNode",
            "--targetSteps",
        ] {
            assert!(!command.has_flag(flag), "unexpected {flag}");
        }
    }

    #[test]
    fn test_threshold_replaces_nsteps() {
        let layout = LayoutConfig::default()
            .with_threshold(1e-3)
            .with_iterations(10_000);

        let command = build_command(&engine(), &layout, &files());

        let threshold: f64 = command
            .arg_value("--targetChangePerNode")
            .and_then(OsStr::to_str)
            .and_then(|value| value.parse().ok())
            .unwrap();
        assert_eq!(threshold, 1e-3);
        assert_eq!(command.arg_value("--targetSteps"), Some(OsStr::new("10000")));
        assert!(!command.has_flag("--nsteps"));
    }

    #[test]
    fn test_positions_file_is_passed() {
        let mut files = files();
        files.positions = Some(PathBuf::from("/tmp/forceatlas-c.csv"));

        let command = build_command(&engine(), &LayoutConfig::default(), &files);

        assert_eq!(
            command.args()[command.args().len() - 2..],
            [OsString::from("--coords"), OsString::from("/tmp/forceatlas-c.csv")]
        );
    }

    #[test]
    fn test_engine_settings() {
        let engine = engine().with_max_heap("512m").with_main_class("org.example.Layout");

        let command = build_command(&engine, &LayoutConfig::default(), &files());

        assert!(command.has_flag("-Xmx512m"));
        assert!(command.has_flag("org.example.Layout"));
    }

    #[test]
    fn test_display() {
        let command = build_command(&engine(), &LayoutConfig::default(), &files());

        let rendered = command.to_string();
        assert!(rendered.starts_with("java -Djava.awt.headless=true -Xmx8g -cp "));
        assert!(rendered.ends_with("--nsteps 50"));
    }

    // ===================
    // Strategies
    // ===================

    fn layout_strategy() -> impl Strategy<Value = LayoutConfig> {
        (
            1u32..100_000,
            prop::option::of(1e-6f64..1.0),
            any::<bool>(),
            prop::option::of(any::<u64>()),
            prop::option::of(0u32..8),
            0.1f64..5.0,
            1usize..64,
        )
            .prop_map(|(iterations, threshold, three_d, seed, splits, theta, n_jobs)| {
                let mut layout = LayoutConfig::default()
                    .with_iterations(iterations)
                    .with_theta(theta)
                    .with_n_jobs(n_jobs)
                    .with_dim(if three_d { Dimension::Three } else { Dimension::Two });
                if let Some(threshold) = threshold {
                    layout = layout.with_threshold(threshold);
                }
                if let Some(seed) = seed {
                    layout = layout.with_seed(seed);
                }
                if let Some(splits) = splits {
                    layout = layout.with_splits(splits);
                }
                layout
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Building twice from the same inputs yields the same command.
    fn check_build_is_deterministic(layout: LayoutConfig) -> Result<(), TestCaseError> {
        let first = build_command(&engine(), &layout, &files());
        let second = build_command(&engine(), &layout.clone(), &files());

        prop_assert_eq!(first, second);
        Ok(())
    }

    /// Exactly one stopping mode is present in every command.
    fn check_single_stopping_mode(layout: LayoutConfig) -> Result<(), TestCaseError> {
        let command = build_command(&engine(), &layout, &files());

        let fixed = command.has_flag("--nsteps");
        let target = command.has_flag("--targetChangePerNode");
        prop_assert!(fixed != target);
        prop_assert_eq!(target, command.has_flag("--targetSteps"));
        prop_assert_eq!(target, layout.threshold().is_some());
        Ok(())
    }

    /// Every option flag is immediately followed by its value.
    fn check_options_have_values(layout: LayoutConfig) -> Result<(), TestCaseError> {
        let command = build_command(&engine(), &layout, &files());

        for flag in ["--input", "--output", "--nthreads", "--barnesHutTheta", "--gravity"] {
            let value = command.arg_value(flag);
            prop_assert!(value.is_some());
            prop_assert!(!value.unwrap().to_string_lossy().starts_with("--"));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn build_is_deterministic(layout in layout_strategy()) {
            check_build_is_deterministic(layout)?;
        }

        #[test]
        fn single_stopping_mode(layout in layout_strategy()) {
            check_single_stopping_mode(layout)?;
        }

        #[test]
        fn options_have_values(layout in layout_strategy()) {
            check_options_have_values(layout)?;
        }
    }
}
