use std::io::{self, BufRead, Write};

use clap::Parser;
use crossterm::style::{Color, ContentStyle};
use flowgrid::buffer::{Buffer, StyleId};
use flowgrid::draw::{draw_arrow_line, draw_grid, edge_exit};
use flowgrid::geometry::{Point, Rect};
use flowgrid::graph::{Graph, Spatial};
use flowgrid::prelude::*;
use ahash::AHashMap;

// --- Demo chart payloads (editor-side node data) ---

#[derive(Debug, Clone)]
struct ChartNode {
    kind: NodeKind,
    x: i32,
    y: i32,
    text: String,
    code: String,
}

impl ChartNode {
    fn new(kind: NodeKind, x: i32, y: i32, text: &str, code: &str) -> Self {
        Self {
            kind,
            x,
            y,
            text: text.to_string(),
            code: code.to_string(),
        }
    }
}

impl Spatial for ChartNode {
    fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn size(&self) -> Point {
        match self.kind {
            NodeKind::Connector => Point::new(7, 3),
            _ => Point::new(22, 3),
        }
    }

    fn set_pos(&mut self, pos: Point) {
        self.x = pos.x;
        self.y = pos.y;
    }
}

#[derive(Debug, Clone, Default)]
struct ChartEdge {
    label: String,
}

type ChartGraph = Graph<ChartNode, ChartEdge>;

/// The bundled demo flowchart: sum the integers 1..=5 and print the result.
fn demo_chart() -> ChartGraph {
    let mut g = ChartGraph::new();

    let start = g.add_node(ChartNode::new(NodeKind::Terminal, 5, 1, "START", ""));
    let init = g.add_node(ChartNode::new(
        NodeKind::Process,
        4,
        5,
        "INIT",
        "i = 1; sum = 0",
    ));
    let cond = g.add_node(ChartNode::new(NodeKind::Decision, 4, 9, "i <= 5?", "i <= 5"));
    let accum = g.add_node(ChartNode::new(
        NodeKind::Process,
        4,
        17,
        "ACCUMULATE",
        "sum = sum + i; i = i + 1",
    ));
    let conn = g.add_node(ChartNode::new(NodeKind::Connector, 32, 13, "", ""));
    let print = g.add_node(ChartNode::new(
        NodeKind::Io,
        44,
        9,
        "PRINT SUM",
        r#"print("Sum 1..5 = " + str(sum))"#,
    ));
    let end = g.add_node(ChartNode::new(NodeKind::Terminal, 46, 14, "END", ""));

    g.add_edge(start, init, ChartEdge::default());
    g.add_edge(init, cond, ChartEdge::default());
    g.add_edge(cond, accum, ChartEdge {
        label: "Y".to_string(),
    });
    g.add_edge(accum, conn, ChartEdge::default());
    g.add_edge(conn, cond, ChartEdge::default());
    g.add_edge(cond, print, ChartEdge {
        label: "N".to_string(),
    });
    g.add_edge(print, end, ChartEdge::default());

    g
}

/// Snapshots the live chart into the plain records the interpreter consumes.
fn snapshot(g: &ChartGraph) -> (Vec<FlowNode>, Vec<FlowEdge>) {
    let nodes = g
        .nodes()
        .map(|n| FlowNode {
            id: n.id,
            kind: n.data.kind,
            text: n.data.text.clone(),
            code: n.data.code.clone(),
        })
        .collect();
    let edges = g
        .edges()
        .iter()
        .map(|e| FlowEdge {
            from: e.from,
            to: e.to,
            label: e.data.label.clone(),
        })
        .collect();
    (nodes, edges)
}

// --- Chart rendering ---

const STYLE_BG: StyleId = StyleId(0);
const STYLE_GRID: StyleId = StyleId(1);
const STYLE_BORDER: StyleId = StyleId(2);
const STYLE_TEXT: StyleId = StyleId(3);
const STYLE_EDGE: StyleId = StyleId(4);
const STYLE_ARROW: StyleId = StyleId(5);
const STYLE_LABEL: StyleId = StyleId(6);

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..Default::default()
    }
}

fn style_table() -> AHashMap<StyleId, ContentStyle> {
    let mut styles = AHashMap::new();
    styles.insert(STYLE_BG, ContentStyle::default());
    styles.insert(STYLE_GRID, fg(Color::DarkGrey));
    styles.insert(STYLE_BORDER, fg(Color::Cyan));
    styles.insert(STYLE_TEXT, fg(Color::White));
    styles.insert(STYLE_EDGE, fg(Color::DarkCyan));
    styles.insert(STYLE_ARROW, fg(Color::Yellow));
    styles.insert(STYLE_LABEL, fg(Color::Magenta));
    styles
}

fn node_tag(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Process => "P",
        NodeKind::Decision => "?",
        NodeKind::Terminal => "T",
        NodeKind::Io => "IO",
        NodeKind::Connector => "",
    }
}

fn draw_node_box(buf: &mut Buffer, bounds: Rect, tag: &str, text: &str) {
    let (x0, y0) = (bounds.min.x, bounds.min.y);
    let (x1, y1) = (bounds.max.x - 1, bounds.max.y - 1);

    for x in x0..=x1 {
        buf.set(x, y0, '─', STYLE_BORDER);
        buf.set(x, y1, '─', STYLE_BORDER);
    }
    for y in y0..=y1 {
        buf.set(x0, y, '│', STYLE_BORDER);
        buf.set(x1, y, '│', STYLE_BORDER);
    }
    buf.set(x0, y0, '┌', STYLE_BORDER);
    buf.set(x1, y0, '┐', STYLE_BORDER);
    buf.set(x0, y1, '└', STYLE_BORDER);
    buf.set(x1, y1, '┘', STYLE_BORDER);

    // Interior
    for y in y0 + 1..y1 {
        for x in x0 + 1..x1 {
            buf.set(x, y, ' ', STYLE_BG);
        }
    }

    if !tag.is_empty() {
        buf.set_string(x0 + 1, y0, tag, STYLE_LABEL);
    }
    let mid = y0 + bounds.height() / 2;
    buf.set_string(x0 + 2, mid, text, STYLE_TEXT);
}

fn render_chart(g: &ChartGraph) -> String {
    // Size the canvas to the chart with a small margin.
    let mut max = Point::new(0, 0);
    for node in g.nodes() {
        let b = node.data.bounds();
        max.x = max.x.max(b.max.x);
        max.y = max.y.max(b.max.y);
    }
    let mut buf = Buffer::new(max.x + 2, max.y + 1, STYLE_BG);
    draw_grid(&mut buf, 0, 0, 8, 4, STYLE_GRID);

    // Edges first so the boxes paint over the line ends.
    for edge in g.edges() {
        let (Some(from), Some(to)) = (g.node(edge.from), g.node(edge.to)) else {
            continue;
        };
        let exit = edge_exit(from.data.bounds(), to.data.center());
        let entry = edge_exit(to.data.bounds(), from.data.center());
        draw_arrow_line(
            &mut buf, exit.x, exit.y, entry.x, entry.y, STYLE_EDGE, STYLE_ARROW,
        );
        if !edge.data.label.is_empty() {
            let mid_x = (exit.x + entry.x) / 2;
            let mid_y = (exit.y + entry.y) / 2;
            buf.set_string(mid_x, mid_y, &edge.data.label, STYLE_LABEL);
        }
    }

    for node in g.nodes() {
        draw_node_box(
            &mut buf,
            node.data.bounds(),
            node_tag(node.data.kind),
            &node.data.text,
        );
    }

    buf.render(&style_table())
}

// --- CLI ---

/// Runs the bundled demo flowchart headless and prints its output.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Step budget for the run
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u32,

    /// Render the flowchart to styled terminal text before running
    #[arg(long)]
    render: bool,

    /// Dump the run result as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let chart = demo_chart();
    if cli.render {
        println!("{}\n", render_chart(&chart));
    }

    let (nodes, edges) = snapshot(&chart);
    let mut interp = Interpreter::new(nodes, edges).with_max_steps(cli.max_steps);

    let stdin = io::stdin();
    while !interp.done() {
        if interp.wait_input() {
            print!("{} ", interp.input_prompt());
            let _ = io::stdout().flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => interp.step(Some("")),
                Ok(_) => interp.step(Some(line.trim_end_matches(['\r', '\n']))),
            }
        } else {
            interp.step(None);
        }
    }

    if cli.json {
        let result = serde_json::json!({
            "vars": interp.vars(),
            "output": interp.output(),
            "steps": interp.step_count(),
            "err": interp.err_message(),
        });
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => exit_with_error(&format!("Failed to encode result: {}", e)),
        }
    } else {
        for line in interp.output() {
            println!("{}", line);
        }
        if let Some(err) = interp.err() {
            eprintln!("Run failed: {}", err);
            std::process::exit(1);
        }
        println!("({} steps)", interp.step_count());
    }
}

fn exit_with_error(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1)
}
