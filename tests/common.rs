//! Common test utilities: canned flowcharts and a spatial test payload.
use flowgrid::geometry::Point;
use flowgrid::graph::Spatial;
use flowgrid::prelude::*;

/// Builds the standard "sum 1..5" flowchart:
///
/// ```text
/// START → INIT(i=1,sum=0) → [i <= 5?] --Y--> ACCUMULATE → (connector) → back
///                                 \--N--> PRINT SUM → END
/// ```
#[allow(dead_code)]
pub fn sum15_chart() -> (Vec<FlowNode>, Vec<FlowEdge>) {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Process, "INIT", "i = 1; sum = 0"),
        flow_node(2, NodeKind::Decision, "i <= 5?", "i <= 5"),
        flow_node(3, NodeKind::Process, "ACCUMULATE", "sum = sum + i; i = i + 1"),
        flow_node(4, NodeKind::Connector, "", ""),
        flow_node(5, NodeKind::Io, "PRINT SUM", r#"print("Sum 1..5 = " + str(sum))"#),
        flow_node(6, NodeKind::Terminal, "END", ""),
    ];
    let edges = vec![
        flow_edge(0, 1, ""),
        flow_edge(1, 2, ""),
        flow_edge(2, 3, "Y"),
        flow_edge(3, 4, ""),
        flow_edge(4, 2, ""),
        flow_edge(2, 5, "N"),
        flow_edge(5, 6, ""),
    ];
    (nodes, edges)
}

#[allow(dead_code)]
pub fn flow_node(id: NodeId, kind: NodeKind, text: &str, code: &str) -> FlowNode {
    FlowNode {
        id,
        kind,
        text: text.to_string(),
        code: code.to_string(),
    }
}

#[allow(dead_code)]
pub fn flow_edge(from: NodeId, to: NodeId, label: &str) -> FlowEdge {
    FlowEdge {
        from,
        to,
        label: label.to_string(),
    }
}

/// Steps the interpreter until it finishes, with a generous safety bound so
/// a buggy run cannot hang the test suite.
#[allow(dead_code)]
pub fn run_to_completion(interp: &mut Interpreter) {
    for _ in 0..1000 {
        if interp.done() {
            return;
        }
        interp.step(None);
    }
    panic!("interpreter did not finish within 1000 steps");
}

/// A minimal positioned/sized payload for graph tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[allow(dead_code)]
impl TestBox {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

impl Spatial for TestBox {
    fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn size(&self) -> Point {
        Point::new(self.w, self.h)
    }

    fn set_pos(&mut self, pos: Point) {
        self.x = pos.x;
        self.y = pos.y;
    }
}
