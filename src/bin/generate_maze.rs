use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use mazebot::maze::Maze;
use mazebot::{mapgen, svg};
use std::io::Write;

/// Generates a random perfect maze.
#[derive(Parser)]
struct Cli {
    #[clap(long, default_value_t = 11)]
    width: i32,
    #[clap(long, default_value_t = 11)]
    height: i32,
    /// Output path (stdout if omitted).
    #[clap(long, short = 'o')]
    output: Option<String>,
    /// Output format; taken from the file extension when omitted.
    #[clap(long, short = 'f')]
    format: Option<Format>,
    #[clap(long, short = 's')]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Maze,
    Json,
    Svg,
}

impl Format {
    fn from_path(path: &str) -> Option<Format> {
        match path.rsplit_once('.')?.1 {
            "maze" => Some(Format::Maze),
            "json" => Some(Format::Json),
            "svg" => Some(Format::Svg),
            _ => None,
        }
    }

    fn render(self, maze: &Maze) -> anyhow::Result<String> {
        Ok(match self {
            Format::Maze => maze.to_file_string() + "\n",
            Format::Json => serde_json::to_string_pretty(&maze.to_json())? + "\n",
            Format::Svg => svg::render(maze, None),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.width < 1 || cli.height < 1 {
        bail!("maze must be at least 1x1, got {}x{}", cli.width, cli.height);
    }
    let format = match (cli.format, &cli.output) {
        (Some(f), _) => f,
        (None, None) => Format::Maze,
        (None, Some(path)) => match Format::from_path(path) {
            Some(f) => f,
            None => bail!("cannot infer format of {}; pass -f", path),
        },
    };
    let maze = mapgen::random::generate(cli.width, cli.height, cli.seed);
    let content = format.render(&maze)?;
    match &cli.output {
        Some(path) => std::fs::write(path, content).with_context(|| format!("failed to write {}", path))?,
        None => std::io::stdout().lock().write_all(content.as_bytes())?,
    }
    Ok(())
}
