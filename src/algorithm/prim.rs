//! Prim 最小生成树
//!
//! 从起始顶点出发，每一轮扫描已访问集合到未访问顶点的所有边，选出权重最小的一条。
//! 扫描顺序：外层按顶点加入顺序，内层按边的自然顺序；权重相同时先扫描到的胜出。

use super::{reset, settle, AlgorithmKind, MstReport, RunContext, RunOutcome};
use crate::error::{Error, Result};
use crate::graph::{Edge, VertexId};
use crate::types::ElementId;
use indexmap::IndexSet;

/// Prim 算法
pub struct Prim {
    ctx: RunContext,
}

impl Prim {
    pub fn new(ctx: RunContext) -> Self {
        Self { ctx }
    }

    /// 从 `source` 开始逐步构建最小生成树
    ///
    /// 起点不存在时立即失败，不改动可视状态也不写日志。
    /// 图不连通时只覆盖起点所在的分量，并正常结束。
    pub async fn run(self, source: &VertexId) -> Result<RunOutcome<MstReport>> {
        if !self.ctx.graph().contains_vertex(source) {
            return Err(Error::VertexNotFound(source.to_string()));
        }
        settle(self.execute(source).await)
    }

    async fn execute(&self, source: &VertexId) -> Result<MstReport> {
        let ctx = &self.ctx;
        let pacer = *ctx.pacer();

        reset(ctx.graph(), ctx.visuals());

        let total_vertices = ctx.graph().vertex_count();
        let mut visited: IndexSet<VertexId> = IndexSet::new();
        let mut mst: Vec<Edge> = Vec::new();
        let mut evaluated = 0;

        visited.insert(source.clone());
        ctx.visuals()
            .mark_highlighted(&ElementId::Vertex(source.clone()));

        ctx.say("🚀 开始执行 Prim 算法");
        ctx.say(format!("📍 起始顶点: {}", source));
        ctx.pause(pacer.step()).await?;

        while visited.len() < total_vertices {
            ctx.say("比较以下候选边:");

            let mut best: Option<Edge> = None;
            let mut candidates: Vec<ElementId> = Vec::new();
            let frontier: Vec<VertexId> = visited.iter().cloned().collect();

            for vertex in &frontier {
                for edge in ctx.graph().incident_edges(vertex) {
                    if visited.contains(edge.other_endpoint(vertex)) {
                        continue;
                    }

                    let weight = edge.mst_weight();
                    ctx.say(format!(
                        "  - 边: {} - {} (权重: {})",
                        edge.source(),
                        edge.target(),
                        weight
                    ));
                    let id = ElementId::Edge(edge.id().clone());
                    ctx.visuals().mark_candidate(&id);
                    candidates.push(id);

                    ctx.pause(pacer.half_step()).await?;
                    evaluated += 1;

                    if best.as_ref().map_or(true, |b| weight < b.mst_weight()) {
                        best = Some(edge);
                    }
                }
            }

            ctx.pause(pacer.half_step()).await?;
            for id in &candidates {
                ctx.visuals().clear_candidate(id);
            }

            let Some(edge) = best else {
                ctx.say("⚠️ 图不连通，无法得到完整的最小生成树");
                tracing::info!(visited = visited.len(), total_vertices, "Prim 遇到不连通的图");
                break;
            };

            let new_vertex = if visited.contains(edge.source()) {
                edge.target().clone()
            } else {
                edge.source().clone()
            };
            let weight = edge.mst_weight();

            ctx.say(format!(
                "🔍 选择最小边: {} - {} (权重: {})",
                edge.source(),
                edge.target(),
                weight
            ));
            ctx.visuals()
                .mark_highlighted(&ElementId::Edge(edge.id().clone()));
            ctx.visuals()
                .mark_highlighted(&ElementId::Vertex(new_vertex.clone()));
            ctx.say(format!(
                "  ✓ 加入边: {} - {} (权重: {})",
                edge.source(),
                edge.target(),
                weight
            ));
            tracing::debug!(edge = %edge.id(), weight, "Prim 选中边");

            visited.insert(new_vertex);
            mst.push(edge);

            ctx.pause(pacer.step()).await?;
        }

        let total_weight: f64 = mst.iter().map(|e| e.mst_weight()).sum();
        ctx.say(format!("✅ 完成！最小生成树总权重: {}", total_weight));

        Ok(MstReport {
            algorithm: AlgorithmKind::Prim,
            edges: mst.iter().map(|e| e.id().clone()).collect(),
            total_weight,
            spanning: visited.len() == total_vertices,
            vertices: visited.into_iter().collect(),
            evaluated,
        })
    }
}
