//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全：首个单词补全命令名，之后补全顶点或边的 ID

use crate::graph::{Graph, GraphAccessor};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::sync::Arc;

/// 命令列表
pub const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "stats", "vertices", "edges", "add", "connect", "weight", "rename",
    "remove", "select", "prim", "kruskal", "components", "reset", "log", "clear-log", "save",
    "load", "import", "speed", "metrics",
];

/// 参数为元素 ID 的命令
#[derive(Debug, Clone, Copy, PartialEq)]
enum Argument {
    Vertex,
    Edge,
    Element,
}

fn argument_kind(command: &str) -> Option<Argument> {
    match command {
        "prim" | "connect" | "rename" => Some(Argument::Vertex),
        "weight" => Some(Argument::Edge),
        "remove" | "select" => Some(Argument::Element),
        _ => None,
    }
}

/// MstGraph CLI 补全器
pub struct CommandCompleter {
    graph: Arc<Graph>,
}

impl CommandCompleter {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    fn ids(&self, kind: Argument) -> Vec<String> {
        let vertices = || self.graph.vertices().into_iter().map(|v| v.to_string());
        let edges = || self.graph.edges().into_iter().map(|e| e.id().to_string());
        match kind {
            Argument::Vertex => vertices().collect(),
            Argument::Edge => edges().collect(),
            Argument::Element => vertices().chain(edges()).collect(),
        }
    }

    /// 计算补全候选，返回替换起点
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();
        let at_word_end = !line_to_cursor.is_empty() && !line_to_cursor.ends_with(' ');

        let (index, current) = if at_word_end {
            (words.len() - 1, words.last().copied().unwrap_or(""))
        } else {
            (words.len(), "")
        };
        let start = pos - current.len();

        if index == 0 {
            let matches = COMMANDS
                .iter()
                .filter(|c| c.starts_with(current))
                .map(|c| c.to_string())
                .collect();
            return (start, matches);
        }

        let command = words[0].to_lowercase();
        match argument_kind(&command) {
            Some(kind) => {
                let matches = self
                    .ids(kind)
                    .into_iter()
                    .filter(|id| id.starts_with(current))
                    .collect();
                (start, matches)
            }
            None => (start, Vec::new()),
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(line, pos);
        let pairs = matches
            .into_iter()
            .map(|m| Pair {
                display: m.clone(),
                replacement: m,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_command_name() {
        let completer = CommandCompleter::new(Graph::sample());
        let (start, matches) = completer.candidates("kr", 2);
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["kruskal"]);

        let (_, matches) = completer.candidates("", 0);
        assert_eq!(matches.len(), COMMANDS.len());
    }

    #[test]
    fn test_complete_vertex_argument() {
        let completer = CommandCompleter::new(Graph::sample());
        let (start, matches) = completer.candidates("prim ", 5);
        assert_eq!(start, 5);
        assert_eq!(matches, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_complete_edge_argument() {
        let completer = CommandCompleter::new(Graph::sample());
        let (start, matches) = completer.candidates("weight f", 8);
        assert_eq!(start, 7);
        assert_eq!(matches, vec!["fa", "fe", "fc"]);

        let (_, matches) = completer.candidates("remove e", 8);
        assert_eq!(matches, vec!["e", "eb", "ec"]);
    }

    #[test]
    fn test_no_argument_completion() {
        let completer = CommandCompleter::new(Graph::sample());
        let (_, matches) = completer.candidates("kruskal ", 8);
        assert!(matches.is_empty());
    }
}
