// # Mazebot: A Depth-First Maze Exploration Agent
//
// The agent talks a line protocol on stdin/stdout: it is told where it is and
// which walls it can see, and answers with the tile center it wants to reach
// next. The core is the depth-first planner in `planner`; everything else is
// geometry, parsing, and the polling loop around it. A local judge, a maze
// generator and an SVG renderer support offline runs.

/// A macro for convenient initialization of vectors, including nested vectors for multi-dimensional arrays.
///
/// # Examples
///
/// ```
/// use mazebot::mat;
/// // A simple vector
/// let v1 = mat![1, 2, 3];
///
/// // A 2x3 matrix initialized with zeros
/// let m1 = mat![0; 2; 3];
/// assert_eq!(m1, vec![vec![0, 0, 0], vec![0, 0, 0]]);
/// ```
#[macro_export]
macro_rules! mat {
    ($($e:expr),*) => { vec![$($e),*] };
    ($($e:expr,)*) => { vec![$($e),*] };
    ($e:expr; $d:expr) => { vec![$e; $d] };
    ($e:expr; $d:expr $(; $ds:expr)+) => { vec![mat![$e $(; $ds)*]; $d] };
}

/// Tiles, positions, and wall segments.
pub mod geometry;

/// Maze dimensions and agent loop settings.
pub mod config;

/// Parsing of `bot` and `wall` sensor records.
pub mod observation;

/// The set of known walls.
pub mod knowledge;

/// Depth-first exploration planner.
pub mod planner;

/// Owned agent state: position, walls, and planner.
pub mod controller;

/// Outbound command lines.
pub mod protocol;

/// Non-blocking line input.
pub mod input;

/// The polling control loop.
pub mod agent;

/// Reading and writing maze files.
pub mod maze;

/// In-process simulated maze server.
pub mod judge;

/// SVG rendering of mazes and runs.
pub mod svg;

/// Tools for generating mazes.
pub mod mapgen {
    /// Randomized depth-first carving.
    pub mod random;
}

/// Installs the stderr log subscriber used by the binaries. `RUST_LOG`
/// overrides the default `mazebot=info` filter.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mazebot=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
