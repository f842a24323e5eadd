//! Kruskal 最小生成树
//!
//! 按权重升序（同权保持输入顺序）逐条尝试合并端点，
//! 并查集判断是否成环；凑满 |V| - 1 条边后不再检查剩余的边。

use super::{reset, settle, AlgorithmKind, MstReport, RunContext, RunOutcome, UnionFind};
use crate::error::Result;
use crate::graph::{EdgeId, VertexId};
use crate::types::ElementId;
use indexmap::IndexSet;

/// Kruskal 算法
pub struct Kruskal {
    ctx: RunContext,
}

impl Kruskal {
    pub fn new(ctx: RunContext) -> Self {
        Self { ctx }
    }

    pub async fn run(self) -> Result<RunOutcome<MstReport>> {
        settle(self.execute().await)
    }

    async fn execute(&self) -> Result<MstReport> {
        let ctx = &self.ctx;
        let pacer = *ctx.pacer();

        reset(ctx.graph(), ctx.visuals());

        let vertices = ctx.graph().vertices();
        let target_edges = vertices.len().saturating_sub(1);
        let mut uf = UnionFind::from_elements(vertices.iter().cloned());

        // sort_by 是稳定排序，同权边保持输入顺序
        let mut edges = ctx.graph().edges();
        edges.sort_by(|a, b| a.mst_weight().total_cmp(&b.mst_weight()));

        ctx.say("🚀 开始执行 Kruskal 算法");
        ctx.say(format!("📊 边数: {}", edges.len()));

        let mut mst: Vec<EdgeId> = Vec::new();
        let mut touched: IndexSet<VertexId> = IndexSet::new();
        let mut total_weight = 0.0;
        let mut evaluated = 0;

        for edge in edges {
            let id = ElementId::Edge(edge.id().clone());
            ctx.visuals().mark_candidate(&id);
            ctx.pause(pacer.half_step()).await?;
            evaluated += 1;

            let weight = edge.mst_weight();
            if uf.union(edge.source(), edge.target())? {
                ctx.visuals().clear_candidate(&id);
                ctx.visuals().mark_highlighted(&id);
                ctx.visuals()
                    .mark_highlighted(&ElementId::Vertex(edge.source().clone()));
                ctx.visuals()
                    .mark_highlighted(&ElementId::Vertex(edge.target().clone()));

                mst.push(edge.id().clone());
                touched.insert(edge.source().clone());
                touched.insert(edge.target().clone());
                total_weight += weight;

                ctx.say(format!(
                    "  ✓ 加入边: {} - {} (权重: {})",
                    edge.source(),
                    edge.target(),
                    weight
                ));
                tracing::debug!(edge = %edge.id(), weight, "Kruskal 选中边");
                ctx.pause(pacer.step()).await?;

                if mst.len() == target_edges {
                    break;
                }
            } else {
                ctx.visuals().clear_candidate(&id);
                ctx.say(format!(
                    "  ✗ 跳过边: {} - {} (形成环)",
                    edge.source(),
                    edge.target()
                ));
                ctx.pause(pacer.third_step()).await?;
            }
        }

        ctx.say(format!("✅ 完成！最小生成树总权重: {}", total_weight));

        Ok(MstReport {
            algorithm: AlgorithmKind::Kruskal,
            spanning: mst.len() == target_edges,
            edges: mst,
            total_weight,
            vertices: touched.into_iter().collect(),
            evaluated,
        })
    }
}
