use anyhow::Context;
use clap::Parser;
use mazebot::maze::Maze;
use mazebot::svg;

/// Renders a maze file as SVG.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the maze file
    input: String,
    /// Path to the SVG file (stdout if omitted)
    #[clap(long, short = 'o')]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let maze = Maze::load(&cli.input).with_context(|| format!("failed to read {}", cli.input))?;
    let content = svg::render(&maze, None);
    match cli.output {
        Some(path) => std::fs::write(&path, content).with_context(|| format!("failed to write {}", path))?,
        None => println!("{}", content),
    }
    Ok(())
}
