use anyhow::Result;

use crate::checkpoint::CheckpointStage;
use crate::generator::compose::agents::section_writer::{
    SectionWriterAgent, build_research_context,
};
use crate::generator::compose::memory::ComposeMemory;
use crate::generator::context::GeneratorContext;
use crate::generator::plan::memory::PlanMemory;
use crate::generator::research::memory::ResearchMemory;
use crate::generator::step_forward_agent::StepForwardAgent;
use crate::generator::types::Generator;
use crate::types::CompletedSection;
use crate::utils::threads::do_parallel_with_limit;

pub mod agents;
pub mod memory;

pub struct SectionComposer {}

impl SectionComposer {
    pub fn new() -> Self {
        Self {}
    }
}

/// 执行章节撰写阶段
pub async fn execute(context: &GeneratorContext) -> Result<()> {
    let composer = SectionComposer::new();
    composer.execute(context.clone()).await?;
    Ok(())
}

impl Generator<Vec<CompletedSection>> for SectionComposer {
    async fn execute(&self, context: GeneratorContext) -> Result<Vec<CompletedSection>> {
        println!("\n🖊️ 开始章节撰写阶段...");
        println!(
            "📝 目标语言: {}",
            context.config.target_language.display_name()
        );

        if !context.config.force_regenerate {
            if let Some(sections) = context
                .checkpoints
                .load::<Vec<CompletedSection>>(CheckpointStage::COMPOSE)
            {
                println!("   ♻️ 从检查点恢复已撰写章节，共 {} 个", sections.len());
                context.store_completed_sections(&sections).await?;
                return Ok(sections);
            }
        }

        let plan = match context.get_plan().await {
            Some(plan) if !plan.is_empty() => plan,
            _ => {
                println!("   ⚠️ 章节规划为空，跳过章节撰写");
                let sections: Vec<CompletedSection> = Vec::new();
                context.store_completed_sections(&sections).await?;
                context.checkpoints.save(CheckpointStage::COMPOSE, &sections)?;
                return Ok(sections);
            }
        };

        let pool = context.get_research_pool().await.unwrap_or_default();
        let total = plan.sections.len();

        // 研究上下文在派发前同步构建，写作智能体只携带各自的数据
        let futures = plan
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| {
                let agent = SectionWriterAgent {
                    section: section.clone(),
                    index,
                    research_context: build_research_context(section, &pool),
                };
                let context = context.clone();
                async move {
                    let name = agent.section.name.clone();
                    (index, name, agent.execute(&context).await)
                }
            })
            .collect::<Vec<_>>();

        let limit = context.config.llm.max_parallels;
        let outcomes = do_parallel_with_limit(futures, limit).await;

        let mut completed = Vec::new();
        for (index, name, outcome) in outcomes {
            match outcome {
                Ok(content) => completed.push(CompletedSection {
                    index,
                    name,
                    content,
                }),
                Err(e) => {
                    eprintln!("   ⚠️ 章节 '{}' 撰写失败: {}", name, e);
                    context
                        .add_diagnostic(format!("Section writer error: {}: {}", name, e))
                        .await;
                }
            }
        }

        println!("   📚 完成 {} / {} 个章节", completed.len(), total);

        context.store_completed_sections(&completed).await?;
        context.checkpoints.save(CheckpointStage::COMPOSE, &completed)?;

        Ok(completed)
    }
}
