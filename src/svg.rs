use crate::geometry::Tile;
use crate::maze::Maze;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Line, Path, Rectangle, Text};

/// Pixels per tile.
const CELL: f64 = 40.0;
const MARGIN: f64 = 10.0;

/// Extra layers drawn on top of the maze.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    /// Tiles the agent visited, in order.
    pub trail: Vec<Tile>,
    /// Tiles known to lead nowhere.
    pub dead: Vec<Tile>,
    pub home: Option<Tile>,
    pub goal: Option<Tile>,
}

fn px(v: f64) -> f64 {
    MARGIN + v * CELL
}

fn marker(t: Tile, color: &str, label: &str) -> (Circle, Text) {
    let c = t.center();
    let circle = Circle::new()
        .set("cx", px(c.x))
        .set("cy", px(c.y))
        .set("r", CELL * 0.3)
        .set("fill", color)
        .set("stroke", "black")
        .set("stroke-width", 1);
    let text = Text::new(label)
        .set("x", px(c.x))
        .set("y", px(c.y) + 5.0)
        .set("text-anchor", "middle")
        .set("font-size", "14px");
    (circle, text)
}

pub fn render(maze: &Maze, overlay: Option<&Overlay>) -> String {
    let width = maze.width as f64 * CELL + 2.0 * MARGIN;
    let height = maze.height as f64 * CELL + 2.0 * MARGIN;
    let mut document = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0.0, 0.0, width, height));

    document = document.add(
        Rectangle::new()
            .set("width", width)
            .set("height", height)
            .set("fill", "white"),
    );

    if let Some(ov) = overlay {
        for t in &ov.dead {
            let rect = Rectangle::new()
                .set("x", px(t.col as f64))
                .set("y", px(t.row as f64))
                .set("width", CELL)
                .set("height", CELL)
                .set("fill", "#dddddd")
                .set("title", format!("dead {}", t));
            document = document.add(rect);
        }
    }

    for w in maze.walls().iter() {
        let (a, b) = (w.start(), w.end());
        let line = Line::new()
            .set("x1", px(a.x as f64))
            .set("y1", px(a.y as f64))
            .set("x2", px(b.x as f64))
            .set("y2", px(b.y as f64))
            .set("stroke", "black")
            .set("stroke-width", 4)
            .set("stroke-linecap", "round");
        document = document.add(line);
    }

    if let Some(ov) = overlay {
        if let Some((first, rest)) = ov.trail.split_first() {
            let c = first.center();
            let mut data = Data::new().move_to((px(c.x), px(c.y)));
            for t in rest {
                let c = t.center();
                data = data.line_to((px(c.x), px(c.y)));
            }
            let path = Path::new()
                .set("fill", "none")
                .set("stroke", "#3060ff")
                .set("stroke-width", 3)
                .set("stroke-opacity", 0.6)
                .set("d", data);
            document = document.add(path);
        }
        for (tile, color, label) in [(ov.home, "#80ff80", "H"), (ov.goal, "#ff8080", "G")] {
            if let Some(t) = tile {
                let (circle, text) = marker(t, color, label);
                document = document.add(circle).add(text);
            }
        }
    }

    document.to_string()
}
