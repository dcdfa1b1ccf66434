use anyhow::{Context, bail};
use clap::Parser;
use mazebot::config::AgentConfig;
use mazebot::geometry::Tile;
use mazebot::judge::{self, Episode};
use mazebot::maze::Maze;
use mazebot::{mapgen, svg};

/// Runs the DFS agent against local mazes and reports how it did.
#[derive(Parser, Debug)]
struct Cli {
    /// Maze file to run on. A random maze is generated when omitted.
    #[clap(long, short = 'i')]
    input: Option<String>,
    #[clap(long, default_value_t = 11)]
    width: i32,
    #[clap(long, default_value_t = 11)]
    height: i32,
    /// First seed for generated mazes.
    #[clap(long, short = 's', default_value_t = 0)]
    seed: u64,
    /// Number of generated mazes (consecutive seeds).
    #[clap(long, short = 'n', default_value_t = 1)]
    count: u64,
    /// Stop after the goal has been reached this many times.
    #[clap(long, default_value_t = 1)]
    solves: usize,
    #[clap(long, default_value_t = 10_000)]
    max_cycles: u64,
    /// Write an SVG of the last run here.
    #[clap(long)]
    svg: Option<String>,
}

fn report(seed: Option<u64>, ep: &Episode) -> anyhow::Result<()> {
    match ep.solved_at {
        Some(c) => {
            eprintln!("!log status AC");
            eprintln!("!log cycles {}", c);
        }
        None => eprintln!("!log status WA"),
    }
    let out = serde_json::json!({
        "seed": seed,
        "episode": ep,
    });
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    mazebot::init_logging();
    let cli = Cli::parse();
    if cli.count == 0 {
        bail!("count must be positive");
    }

    let runs: Vec<(Option<u64>, Maze)> = match &cli.input {
        Some(path) => {
            let maze = Maze::load(path).with_context(|| format!("failed to read {}", path))?;
            vec![(None, maze)]
        }
        None => (cli.seed..cli.seed + cli.count)
            .map(|s| (Some(s), mapgen::random::generate(cli.width, cli.height, Some(s))))
            .collect(),
    };

    let mut solved = 0;
    let mut total_moves = 0;
    let mut last = None;
    for (seed, maze) in runs.iter().cloned() {
        let config = AgentConfig {
            maze: maze.config(),
            ..AgentConfig::default()
        };
        config.validate()?;
        let ep = judge::run_episode(maze.clone(), Tile::new(0, 0), config, cli.solves, cli.max_cycles)?;
        report(seed, &ep)?;
        if ep.solved_at.is_some() {
            solved += 1;
            total_moves += ep.moves;
        }
        last = Some((maze, ep));
    }
    eprintln!("!log solved {}/{}", solved, runs.len());
    if solved > 0 {
        eprintln!("!log avg_moves {:.1}", total_moves as f64 / solved as f64);
    }

    if let (Some(path), Some((maze, ep))) = (&cli.svg, &last) {
        let overlay = svg::Overlay {
            trail: ep.trail.clone(),
            dead: ep.dead.clone(),
            home: ep.trail.first().copied(),
            goal: Some(maze.config().goal),
        };
        std::fs::write(path, svg::render(maze, Some(&overlay)))
            .with_context(|| format!("failed to write {}", path))?;
    }
    Ok(())
}
