use anyhow::Result;

use crate::checkpoint::CheckpointStage;
use crate::generator::context::GeneratorContext;
use crate::generator::plan::memory::PlanMemory;
use crate::generator::research::memory::ResearchMemory;
use crate::generator::types::Generator;
use crate::types::{QueryOutcome, ResearchResult};
use crate::utils::threads::do_parallel_with_limit;

pub mod dispatcher;
pub mod memory;
pub mod worker;

pub struct ResearchDispatcher {}

impl ResearchDispatcher {
    pub fn new() -> Self {
        Self {}
    }
}

/// 执行多信息源研究阶段
pub async fn execute(context: &GeneratorContext) -> Result<()> {
    let dispatcher = ResearchDispatcher::new();
    dispatcher.execute(context.clone()).await?;
    Ok(())
}

impl Generator<Vec<ResearchResult>> for ResearchDispatcher {
    async fn execute(&self, context: GeneratorContext) -> Result<Vec<ResearchResult>> {
        println!("🔍 开始多信息源研究阶段...");

        if !context.config.force_regenerate {
            if let Some(pool) = context
                .checkpoints
                .load::<Vec<ResearchResult>>(CheckpointStage::RESEARCH)
            {
                println!("   ♻️ 从检查点恢复研究结果，共 {} 条", pool.len());
                context.store_research_pool(&pool).await?;
                return Ok(pool);
            }
        }

        let plan = match context.get_plan().await {
            Some(plan) if !plan.is_empty() => plan,
            _ => {
                println!("   ⚠️ 章节规划为空，跳过研究阶段");
                let pool: Vec<ResearchResult> = Vec::new();
                context.store_research_pool(&pool).await?;
                context.checkpoints.save(CheckpointStage::RESEARCH, &pool)?;
                return Ok(pool);
            }
        };

        let queue = dispatcher::build_query_queue(&plan, context.config.research.max_queries);
        let limit = context.config.llm.max_parallels;
        println!("   📋 调度 {} 条研究查询（并发上限 {}）", queue.len(), limit);

        let futures = queue
            .iter()
            .map(|query| worker::run_query(context.toolset.as_ref(), query))
            .collect::<Vec<_>>();
        let outcomes = do_parallel_with_limit(futures, limit).await;

        let mut pool = Vec::new();
        for outcome in outcomes {
            match outcome {
                QueryOutcome::Fulfilled(result) => {
                    println!("   ✅ 查询完成: {}", result.query);
                    pool.push(result);
                }
                QueryOutcome::Empty { query, diagnostics } => {
                    println!("   ⚠️ 查询 '{}' 未获得任何信息源内容", query);
                    for message in diagnostics {
                        context.add_diagnostic(message).await;
                    }
                }
            }
        }

        println!("   🔭 研究池共收集 {} 条结果", pool.len());

        context.store_research_pool(&pool).await?;
        context.checkpoints.save(CheckpointStage::RESEARCH, &pool)?;

        Ok(pool)
    }
}
