//! ForceAtlas - graph layout through the external ForceAtlas2 engine.
//!
//! The force simulation itself runs in a separate JVM process. This crate
//! prepares its input files, builds its command line, runs it, and maps the
//! coordinates it writes back onto the caller's node labels. Every temporary
//! file is removed before control returns, whether the run succeeded or not.

pub mod config;
pub mod engine;
pub mod format;
pub mod temp;

mod error;

pub use forceatlas_core::{graph, mapping, position};

pub use error::{EngineInvocationError, LayoutError, ResultIntegrityError, SerializationError};

use std::{
    ffi::OsString,
    fmt::Debug,
    fs::File,
    hash::Hash,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use config::{EngineConfig, LayoutConfig};
use engine::{CommandFiles, Launcher, SystemLauncher};
use forceatlas_core::{
    graph::LayoutGraph,
    mapping::IndexMapping,
    position::PositionMap,
};
use temp::TempResources;

/// Progress of a single layout run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Init,
    Mapped,
    GraphWritten,
    PositionsWritten,
    Invoked,
    Parsed,
}

/// Runs layouts through the external engine.
///
/// A driver holds no per-run state; every call to
/// [`compute_layout`](LayoutDriver::compute_layout) works on its own fresh
/// set of temporary files, so one driver can serve any number of calls.
///
/// # Examples
///
/// ```rust,no_run
/// use forceatlas::{LayoutDriver, config::{EngineConfig, LayoutConfig}, graph::LayoutGraph};
///
/// let mut graph = LayoutGraph::new();
/// graph.add_edge(0, 1);
/// graph.add_edge(1, 2);
/// graph.add_edge(2, 3);
///
/// let driver = LayoutDriver::new(EngineConfig::default());
/// let positions = driver
///     .compute_layout(&graph, None, &LayoutConfig::default().with_iterations(10))
///     .expect("Failed to compute layout");
///
/// assert_eq!(positions.len(), 4);
/// ```
#[derive(Debug)]
pub struct LayoutDriver<L = SystemLauncher> {
    engine: EngineConfig,
    launcher: L,
}

impl LayoutDriver {
    /// Creates a driver that runs the engine described by `engine` as a child process.
    pub fn new(engine: EngineConfig) -> Self {
        let launcher = SystemLauncher::new(engine.classpath().to_vec());
        Self { engine, launcher }
    }
}

impl Default for LayoutDriver {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<L: Launcher> LayoutDriver<L> {
    /// Creates a driver that runs engine commands through `launcher`.
    pub fn with_launcher(engine: EngineConfig, launcher: L) -> Self {
        Self { engine, launcher }
    }

    /// Returns the engine configuration.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Computes positions for every node of `graph`.
    ///
    /// `initial` seeds the engine with starting coordinates for some or all
    /// nodes; without it the engine starts from random positions.
    ///
    /// # Arguments
    ///
    /// * `graph` - The graph to lay out
    /// * `initial` - Optional starting positions, keyed by node label
    /// * `layout` - Simulation parameters
    ///
    /// # Errors
    ///
    /// Returns `LayoutError` for:
    /// - Initial positions for labels outside the graph, or of the wrong dimension
    /// - I/O failures while writing the engine's input files
    /// - An engine that cannot be started or exits unsuccessfully
    /// - Engine output that does not cover every node exactly once
    ///
    /// Temporary files are removed before any error is returned.
    pub fn compute_layout<N>(
        &self,
        graph: &LayoutGraph<N>,
        initial: Option<&PositionMap<N>>,
        layout: &LayoutConfig,
    ) -> Result<PositionMap<N>, LayoutError>
    where
        N: Clone + Eq + Hash + Debug,
    {
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dim:% = layout.dim();
            "Computing layout"
        );

        if graph.is_empty() {
            debug!("Graph has no nodes, skipping engine run");
            return Ok(PositionMap::new());
        }

        let mut resources = TempResources::new(self.engine.work_dir());
        let mut stage = Stage::Init;

        let result = self.run(graph, initial, layout, &mut resources, &mut stage);

        let warnings = resources.cleanup();
        debug!(warnings = warnings.len(); "Temporary files cleaned up");

        match &result {
            Ok(positions) => info!(positions = positions.len(); "Layout computed"),
            Err(err) => debug!(last_stage:? = stage, err:%; "Layout run failed"),
        }

        result
    }

    fn run<N>(
        &self,
        graph: &LayoutGraph<N>,
        initial: Option<&PositionMap<N>>,
        layout: &LayoutConfig,
        resources: &mut TempResources,
        stage: &mut Stage,
    ) -> Result<PositionMap<N>, LayoutError>
    where
        N: Clone + Eq + Hash + Debug,
    {
        let mapping = IndexMapping::from_graph(graph);
        let edges = mapping
            .relabel_edges(graph)
            .ok_or(SerializationError::UnmappedEndpoint)?;
        format::network::check_weights(&mapping, &edges)?;
        // Reject bad positions before any file exists.
        let position_rows = initial
            .map(|positions| format::positions::index_positions(&mapping, positions, layout.dim()))
            .transpose()?;
        advance(stage, Stage::Mapped);

        let network = write_temp(resources, ".net", |writer| {
            format::network::write_network(writer, mapping.len(), &edges, graph.is_directed())
        })?;
        advance(stage, Stage::GraphWritten);

        let (output_base, _) = resources.create(".coords")?;
        let output = with_suffix(&output_base, ".txt");
        resources.track(&output);
        resources.track(with_suffix(&output_base, ".distances.txt"));

        let positions = match &position_rows {
            Some(rows) => {
                let path = write_temp(resources, ".csv", |writer| {
                    format::positions::write_positions(writer, layout.dim(), rows)
                })?;
                advance(stage, Stage::PositionsWritten);
                Some(path)
            }
            None => None,
        };

        let files = CommandFiles {
            network,
            output_base,
            positions,
        };
        let command = engine::build_command(&self.engine, layout, &files);
        trace!(command:% = command; "Launching engine");

        self.launcher.launch(&command)?.check()?;
        advance(stage, Stage::Invoked);

        let coordinates = format::coordinates::read_coordinates(&output, layout.dim(), mapping.len())?;
        advance(stage, Stage::Parsed);

        Ok(mapping
            .iter()
            .zip(coordinates)
            .map(|((_, label), position)| (label.clone(), position))
            .collect())
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from:? = *stage, to:? = next; "Layout stage complete");
    *stage = next;
}

/// Creates a tracked temporary file and fills it through a buffered writer.
fn write_temp<F>(resources: &mut TempResources, suffix: &str, write: F) -> Result<PathBuf, SerializationError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let (path, file) = resources.create(suffix)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|source| SerializationError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_suffix() {
        let base = Path::new("/tmp/forceatlas-abc.coords");

        assert_eq!(
            with_suffix(base, ".txt"),
            PathBuf::from("/tmp/forceatlas-abc.coords.txt")
        );
        assert_eq!(
            with_suffix(base, ".distances.txt"),
            PathBuf::from("/tmp/forceatlas-abc.coords.distances.txt")
        );
    }

    #[test]
    fn test_empty_graph_skips_engine() {
        let launcher = |_: &engine::EngineCommand| -> io::Result<engine::ExitOutcome> {
            panic!("engine must not run for an empty graph")
        };
        let driver = LayoutDriver::with_launcher(EngineConfig::default(), launcher);

        let positions = driver
            .compute_layout(&LayoutGraph::<u32>::new(), None, &LayoutConfig::default())
            .unwrap();

        assert!(positions.is_empty());
    }

    #[test]
    fn test_advance() {
        let mut stage = Stage::Init;
        advance(&mut stage, Stage::Mapped);
        assert_eq!(stage, Stage::Mapped);
    }
}
