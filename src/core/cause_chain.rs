//! Cause-chain traversal and rendering
//!
//! The chain is walked once, iteratively, into a bounded list of
//! [`CauseNode`]s. Both stack-trace representations render from that list,
//! so the node cap applies to each of them in the same way.

use super::thrown::{StackFrame, Throwable};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Key under which a node's type name is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseLabel {
    /// The root error
    Exception,
    /// Any error reached through a cause link
    CausedBy,
}

impl CauseLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CauseLabel::Exception => "exception",
            CauseLabel::CausedBy => "caused by",
        }
    }
}

/// One visited error in the chain
#[derive(Debug, Clone, Copy)]
pub struct CauseNode<'a> {
    pub label: CauseLabel,
    pub type_name: &'a str,
    pub message: Option<&'a str>,
    pub frames: &'a [StackFrame],
}

/// Walk `root` and its causes, visiting at most `max_depth` nodes
///
/// Terminates for any `Throwable`, including ones whose cause links loop
/// back, because only the node count bounds the walk. Nodes past the cap
/// are dropped without a marker.
pub fn walk(root: &dyn Throwable, max_depth: usize) -> Vec<CauseNode<'_>> {
    let mut nodes = Vec::with_capacity(max_depth.min(16));
    let mut current = Some(root);

    while let Some(node) = current {
        if nodes.len() >= max_depth {
            break;
        }
        let label = if nodes.is_empty() {
            CauseLabel::Exception
        } else {
            CauseLabel::CausedBy
        };
        nodes.push(CauseNode {
            label,
            type_name: node.type_name(),
            message: node.message(),
            frames: node.frames(),
        });
        current = node.cause();
    }

    nodes
}

/// Render visited nodes as a conventional trace printout
///
/// ```text
/// app::PoolError: pool exhausted
/// 	at app::db.acquire(db.rs:88)
/// 	at app.main(main.rs:12)
/// Caused by: std::io::Error: timed out
/// 	at app::net.connect(net.rs:40)
/// 	... 1 more
/// ```
pub fn render_text(nodes: &[CauseNode<'_>]) -> String {
    let mut out = String::new();
    let mut enclosing: &[StackFrame] = &[];

    for node in nodes {
        if node.label == CauseLabel::CausedBy {
            out.push_str("Caused by: ");
        }
        out.push_str(node.type_name);
        if let Some(message) = node.message {
            out.push_str(": ");
            out.push_str(message);
        }
        out.push('\n');

        let in_common = frames_in_common(node.frames, enclosing);
        for frame in &node.frames[..node.frames.len() - in_common] {
            out.push_str(&format!("\tat {}\n", frame));
        }
        if in_common > 0 {
            out.push_str(&format!("\t... {} more\n", in_common));
        }
        enclosing = node.frames;
    }

    out
}

// Trailing frames a cause shares with the error that wraps it
fn frames_in_common(frames: &[StackFrame], enclosing: &[StackFrame]) -> usize {
    frames
        .iter()
        .rev()
        .zip(enclosing.iter().rev())
        .take_while(|(frame, outer)| frame == outer)
        .count()
}

impl Serialize for CauseNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(self.label.as_str(), self.type_name)?;
        if let Some(message) = self.message {
            map.serialize_entry("message", message)?;
        }
        if !self.frames.is_empty() {
            map.serialize_entry("frames", &FrameLines(self.frames))?;
        }
        map.end()
    }
}

struct FrameLines<'a>(&'a [StackFrame]);

impl Serialize for FrameLines<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|frame| format!("at {}", frame)))
    }
}

/// The `stack-trace` field value
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StackTrace<'a> {
    /// Preformatted trace text
    Text(String),
    /// One object per visited node
    Structured(Vec<CauseNode<'a>>),
}

impl<'a> StackTrace<'a> {
    pub fn build(root: &'a dyn Throwable, max_depth: usize, structured: bool) -> Self {
        let nodes = walk(root, max_depth);
        if structured {
            StackTrace::Structured(nodes)
        } else {
            StackTrace::Text(render_text(&nodes))
        }
    }
}
