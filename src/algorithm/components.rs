//! 连通分量遍历
//!
//! 按顶点的自然顺序逐个开启新分量，对每个分量做深度优先遍历并染上同一种颜色。

use super::{reset, settle, AlgorithmKind, RunContext, RunOutcome};
use crate::error::Result;
use crate::graph::{Edge, EdgeId, VertexId};
use crate::types::{ColorToken, ElementId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// 黄金角，配色用尽后据此生成色相
const GOLDEN_ANGLE: f64 = 137.508;

/// 第 `index` 个分量的颜色
///
/// 先取配色表中的颜色，用尽后按黄金角旋转色相，保证颜色互不相同。
pub fn component_color(palette: &[ColorToken], index: usize) -> ColorToken {
    match palette.get(index) {
        Some(color) => color.clone(),
        None => {
            let hue = (index as f64 * GOLDEN_ANGLE) % 360.0;
            ColorToken::new(format!("hsl({:.2}, 70%, 50%)", hue))
        }
    }
}

/// 一个连通分量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub color: ColorToken,
    /// 按访问顺序
    pub vertices: Vec<VertexId>,
    /// 遍历经过的树边
    pub edges: Vec<EdgeId>,
}

/// 连通分量结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentReport {
    pub components: Vec<Component>,
}

impl ComponentReport {
    pub fn count(&self) -> usize {
        self.components.len()
    }

    /// 顶点所在分量的颜色
    pub fn color_of(&self, vertex: &VertexId) -> Option<&ColorToken> {
        self.components
            .iter()
            .find(|c| c.vertices.contains(vertex))
            .map(|c| &c.color)
    }
}

/// DFS 栈帧：顶点、它的关联边以及下一条待检查的边
struct Frame {
    vertex: VertexId,
    edges: Vec<Edge>,
    cursor: usize,
}

/// 连通分量浏览器
pub struct ComponentExplorer {
    ctx: RunContext,
}

impl ComponentExplorer {
    pub fn new(ctx: RunContext) -> Self {
        Self { ctx }
    }

    pub async fn run(self) -> Result<RunOutcome<ComponentReport>> {
        settle(self.execute().await)
    }

    async fn execute(&self) -> Result<ComponentReport> {
        let ctx = &self.ctx;

        reset(ctx.graph(), ctx.visuals());
        ctx.say("🔎 开始查找连通分量");

        let mut visited: IndexSet<VertexId> = IndexSet::new();
        let mut report = ComponentReport::default();

        for root in ctx.graph().vertices() {
            if visited.contains(&root) {
                continue;
            }

            let color = component_color(ctx.palette(), report.count());
            ctx.say(format!("🧩 连通分量 #{}（颜色 {}）", report.count() + 1, color));

            let mut component = Component {
                color,
                vertices: Vec::new(),
                edges: Vec::new(),
            };
            self.traverse(root, &mut visited, &mut component).await?;

            tracing::debug!(
                index = report.count() + 1,
                size = component.vertices.len(),
                "连通分量遍历完成"
            );
            report.components.push(component);
        }

        ctx.say(format!("✅ 共找到 {} 个连通分量", report.count()));
        tracing::info!(
            algorithm = %AlgorithmKind::Components,
            count = report.count(),
            "连通分量查找结束"
        );
        Ok(report)
    }

    /// 深度优先遍历，访问顺序与递归写法一致
    async fn traverse(
        &self,
        root: VertexId,
        visited: &mut IndexSet<VertexId>,
        component: &mut Component,
    ) -> Result<()> {
        let mut stack = vec![self.visit(root, visited, component).await?];

        while let Some(frame) = stack.last_mut() {
            let Some(edge) = frame.edges.get(frame.cursor).cloned() else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let next = edge.other_endpoint(&frame.vertex).clone();
            if visited.contains(&next) {
                continue;
            }

            self.ctx
                .visuals()
                .set_color(&ElementId::Edge(edge.id().clone()), &component.color);
            component.edges.push(edge.id().clone());

            let child = self.visit(next, visited, component).await?;
            stack.push(child);
        }

        Ok(())
    }

    async fn visit(
        &self,
        vertex: VertexId,
        visited: &mut IndexSet<VertexId>,
        component: &mut Component,
    ) -> Result<Frame> {
        let ctx = &self.ctx;

        visited.insert(vertex.clone());
        ctx.visuals()
            .set_color(&ElementId::Vertex(vertex.clone()), &component.color);
        ctx.say(format!("  → 访问顶点: {}", vertex));
        component.vertices.push(vertex.clone());

        ctx.pause(ctx.pacer().visit()).await?;

        let edges = ctx.graph().incident_edges(&vertex);
        Ok(Frame {
            vertex,
            edges,
            cursor: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::testing::{graph_from, Harness};
    use crate::algorithm::UnionFind;
    use crate::config::EngineConfig;
    use crate::engine::Pacer;
    use crate::graph::{Graph, GraphAccessor};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;
    use std::time::Duration;

    fn palette() -> Vec<ColorToken> {
        EngineConfig::default().palette_tokens()
    }

    async fn explore(h: &Harness) -> ComponentReport {
        let ctx = h
            .context(AlgorithmKind::Components, Pacer::instant())
            .with_palette(palette());
        ComponentExplorer::new(ctx)
            .run()
            .await
            .unwrap()
            .completed()
            .unwrap()
    }

    #[tokio::test]
    async fn test_two_components() {
        let graph = graph_from(&["a", "b", "c"], &[("ab", "a", "b", Some(1.0))]);
        let h = Harness::new(graph);
        let report = explore(&h).await;

        assert_eq!(report.count(), 2);
        let a = h.board.color(&VertexId::from("a").into());
        let b = h.board.color(&VertexId::from("b").into());
        let c = h.board.color(&VertexId::from("c").into());
        assert!(a.is_some());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(h.board.color(&EdgeId::from("ab").into()), a);

        assert_eq!(
            h.entries(),
            vec![
                "🔎 开始查找连通分量",
                "🧩 连通分量 #1（颜色 #ef4444）",
                "  → 访问顶点: a",
                "  → 访问顶点: b",
                "🧩 连通分量 #2（颜色 #22c55e）",
                "  → 访问顶点: c",
                "✅ 共找到 2 个连通分量",
            ]
        );
    }

    #[tokio::test]
    async fn test_depth_first_order() {
        // a 的第一条边通向 b，b 再深入到 d，之后才回到 a 的第二条边
        let graph = graph_from(
            &["a", "b", "c", "d"],
            &[
                ("ab", "a", "b", None),
                ("ac", "a", "c", None),
                ("bd", "b", "d", None),
                ("cd", "c", "d", None),
            ],
        );
        let h = Harness::new(graph);
        let report = explore(&h).await;

        assert_eq!(report.count(), 1);
        let order: Vec<&str> = report.components[0]
            .vertices
            .iter()
            .map(|v| v.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b", "d", "c"]);
        let tree: Vec<&str> = report.components[0]
            .edges
            .iter()
            .map(|e| e.as_str())
            .collect();
        assert_eq!(tree, vec!["ab", "bd", "cd"]);
        // 非树边不染色
        assert_eq!(h.board.color(&EdgeId::from("ac").into()), None);
    }

    #[tokio::test]
    async fn test_sample_graph_is_connected() {
        let h = Harness::new(Graph::sample());
        let report = explore(&h).await;
        assert_eq!(report.count(), 1);
        assert_eq!(report.components[0].vertices.len(), 6);
        assert_eq!(report.components[0].edges.len(), 5);
    }

    #[tokio::test]
    async fn test_empty_graph() {
        let h = Harness::new(Graph::new());
        let report = explore(&h).await;
        assert_eq!(report.count(), 0);
        assert_eq!(h.log.last().as_deref(), Some("✅ 共找到 0 个连通分量"));
    }

    #[tokio::test]
    async fn test_matches_union_find_partition() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..30 {
            let n = rng.gen_range(1..=12usize);
            let names: Vec<String> = (0..n).map(|i| format!("v{}", i)).collect();
            let vertices: Vec<&str> = names.iter().map(|s| s.as_str()).collect();

            let m = rng.gen_range(0..=n);
            let edge_names: Vec<String> = (0..m).map(|i| format!("e{}", i)).collect();
            let edges: Vec<(&str, &str, &str, Option<f64>)> = edge_names
                .iter()
                .map(|id| {
                    (
                        id.as_str(),
                        vertices[rng.gen_range(0..n)],
                        vertices[rng.gen_range(0..n)],
                        None,
                    )
                })
                .collect();

            let graph = graph_from(&vertices, &edges);
            let mut uf = UnionFind::from_elements(graph.vertices());
            for e in graph.edges() {
                uf.union(e.source(), e.target()).unwrap();
            }

            let h = Harness::new(graph.clone());
            let report = explore(&h).await;
            assert_eq!(report.count(), uf.set_count());

            let all = graph.vertices();
            for x in &all {
                for y in &all {
                    let same_color = report.color_of(x) == report.color_of(y);
                    assert_eq!(same_color, uf.same(x, y).unwrap(), "{} / {}", x, y);
                }
            }
        }
    }

    #[test]
    fn test_palette_overflow_stays_distinct() {
        let palette = vec![ColorToken::new("#000000"), ColorToken::new("#ffffff")];
        let colors: HashSet<ColorToken> =
            (0..64).map(|i| component_color(&palette, i)).collect();
        assert_eq!(colors.len(), 64);
        assert_eq!(component_color(&palette, 1).as_str(), "#ffffff");
        assert!(component_color(&palette, 2).as_str().starts_with("hsl("));
    }

    #[tokio::test(start_paused = true)]
    async fn test_visit_pacing() {
        let graph = graph_from(&["a", "b", "c"], &[("ab", "a", "b", Some(1.0))]);
        let h = Harness::new(graph);
        let ctx = h
            .context(
                AlgorithmKind::Components,
                Pacer::new(Duration::from_millis(1000), Duration::from_millis(200)),
            )
            .with_palette(palette());

        let start = tokio::time::Instant::now();
        ComponentExplorer::new(ctx).run().await.unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(600));
        assert!(elapsed < Duration::from_millis(650));
    }
}
