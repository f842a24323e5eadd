//! 重置可视状态

use crate::graph::GraphAccessor;
use crate::types::ElementId;
use crate::visual::VisualState;

/// 清除所有算法标记，恢复默认样式并取消选择
///
/// 幂等，不写日志，也不清空日志。
pub fn reset(graph: &dyn GraphAccessor, visuals: &dyn VisualState) {
    visuals.clear_all_markers();
    for vertex in graph.vertices() {
        visuals.restore_default_style(&ElementId::Vertex(vertex));
    }
    for edge in graph.edges() {
        visuals.restore_default_style(&ElementId::Edge(edge.id().clone()));
    }
    visuals.clear_selection();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeId, Graph, VertexId};
    use crate::types::ColorToken;
    use crate::visual::VisualBoard;

    #[test]
    fn test_reset_on_fresh_graph_is_noop() {
        let graph = Graph::sample();
        let board = VisualBoard::new();
        let before = board.snapshot();

        reset(graph.as_ref(), &board);
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_reset_clears_everything_and_is_idempotent() {
        let graph = Graph::sample();
        let board = VisualBoard::new();
        board.mark_highlighted(&VertexId::from("a").into());
        board.mark_candidate(&EdgeId::from("ab").into());
        board.set_color(&VertexId::from("c").into(), &ColorToken::new("#ef4444"));
        board.select(EdgeId::from("cd").into());

        reset(graph.as_ref(), &board);
        let once = board.snapshot();
        assert!(once.styles.is_empty());
        assert!(once.selected.is_empty());

        reset(graph.as_ref(), &board);
        assert_eq!(board.snapshot(), once);
    }
}
