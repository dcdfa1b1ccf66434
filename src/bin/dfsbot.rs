use anyhow::Context;
use clap::Parser;
use mazebot::agent::Agent;
use mazebot::config::{self, AgentConfig, EmitPolicy, MazeConfig};
use mazebot::geometry::Tile;
use std::time::Duration;
use tracing::info;

/// Depth-first maze explorer. Reads `bot`/`wall` records on stdin and writes
/// `toward` commands on stdout.
#[derive(Parser, Debug)]
struct Cli {
    /// Name announced in the greeting.
    #[clap(long, default_value = config::DEFAULT_NAME)]
    name: String,
    #[clap(long, default_value_t = config::DEFAULT_SIZE)]
    width: i32,
    #[clap(long, default_value_t = config::DEFAULT_SIZE)]
    height: i32,
    /// Goal column. Defaults to the last column.
    #[clap(long)]
    goal_x: Option<i32>,
    /// Goal row. Defaults to the last row.
    #[clap(long)]
    goal_y: Option<i32>,
    /// Distance from a tile center that counts as having arrived.
    #[clap(long, default_value_t = config::DEFAULT_ARRIVAL_THRESHOLD)]
    arrival_threshold: f64,
    /// Milliseconds between control cycles.
    #[clap(long, default_value_t = 125)]
    interval_ms: u64,
    /// Milliseconds to wait for initial sense data after the greeting.
    #[clap(long, default_value_t = 250)]
    settle_ms: u64,
    #[clap(long, value_enum, default_value_t = EmitPolicy::EveryCycle)]
    emit: EmitPolicy,
}

impl Cli {
    fn into_config(self) -> AgentConfig {
        let maze = MazeConfig::new(self.width, self.height);
        let goal = Tile::new(
            self.goal_x.unwrap_or(maze.goal.col),
            self.goal_y.unwrap_or(maze.goal.row),
        );
        AgentConfig {
            name: self.name,
            maze: maze.with_goal(goal),
            arrival_threshold: self.arrival_threshold,
            interval: Duration::from_millis(self.interval_ms),
            settle: Duration::from_millis(self.settle_ms),
            emit: self.emit,
        }
    }
}

fn main() -> anyhow::Result<()> {
    mazebot::init_logging();
    let config = Cli::parse().into_config();
    config.validate().context("invalid configuration")?;

    ctrlc::set_handler(|| {
        info!("interrupted, exiting");
        std::process::exit(130);
    })
    .context("failed to install Ctrl+C handler")?;

    let input = mazebot::input::stdin().context("failed to open stdin")?;
    let mut agent = Agent::new(config, input, std::io::stdout().lock());
    agent.run().context("agent loop failed")
}
