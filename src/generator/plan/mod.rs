use anyhow::Result;

use crate::checkpoint::CheckpointStage;
use crate::generator::context::GeneratorContext;
use crate::generator::plan::agents::section_planner::SectionPlanner;
use crate::generator::plan::memory::PlanMemory;
use crate::generator::step_forward_agent::StepForwardAgent;
use crate::generator::types::Generator;
use crate::types::SectionPlan;

pub mod agents;
pub mod memory;

/// 规划契约的边界常量
pub const MIN_SECTIONS: usize = 4;
pub const MAX_SECTIONS: usize = 6;
pub const MIN_QUERIES_PER_SECTION: usize = 2;
pub const MAX_QUERIES_PER_SECTION: usize = 3;
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

pub struct ReportPlanner {}

impl ReportPlanner {
    pub fn new() -> Self {
        Self {}
    }
}

/// 执行报告规划阶段
pub async fn execute(context: &GeneratorContext) -> Result<()> {
    let planner = ReportPlanner::new();
    planner.execute(context.clone()).await?;
    Ok(())
}

impl Generator<SectionPlan> for ReportPlanner {
    async fn execute(&self, context: GeneratorContext) -> Result<SectionPlan> {
        println!("📋 开始报告规划阶段...");

        // 同一 run_id 再次执行时直接复用检查点中的规划
        if !context.config.force_regenerate {
            if let Some(plan) = context.checkpoints.load::<SectionPlan>(CheckpointStage::PLAN) {
                println!(
                    "   ♻️ 从检查点恢复章节规划，共 {} 个章节",
                    plan.sections.len()
                );
                context.store_plan(&plan).await?;
                return Ok(plan);
            }
        }

        let agent = SectionPlanner {
            topic: context.config.get_topic(),
            user_context: context.config.get_context(),
        };

        let plan = match agent.execute(&context).await {
            Ok(raw) => {
                let (plan, diagnostics) = validate_plan(raw);
                for message in diagnostics {
                    context.add_diagnostic(message).await;
                }
                plan
            }
            Err(e) => {
                eprintln!("⚠️ 规划失败，按空规划继续: {}", e);
                context
                    .add_diagnostic(format!("Orchestrator error: {}", e))
                    .await;
                SectionPlan { sections: vec![] }
            }
        };

        // 后续阶段只读取校验后的这一份规划，智能体的原始输出仅作留档
        context.store_plan(&plan).await?;
        context.checkpoints.save(CheckpointStage::PLAN, &plan)?;

        if plan.is_empty() {
            println!("   ⚠️ 章节规划为空，后续阶段将直接跳过");
        } else {
            println!(
                "   📑 规划出 {} 个章节，共 {} 条研究查询",
                plan.sections.len(),
                plan.query_count()
            );
        }

        Ok(plan)
    }
}

/// 校验规划契约
///
/// 章节数量越界视为整份规划失效，返回空规划；
/// 单章节查询数量越界仅记录诊断；优先级越界收敛到合法区间。
pub fn validate_plan(raw: SectionPlan) -> (SectionPlan, Vec<String>) {
    let mut diagnostics = Vec::new();

    let count = raw.sections.len();
    if !(MIN_SECTIONS..=MAX_SECTIONS).contains(&count) {
        diagnostics.push(format!(
            "Orchestrator error: planned {} sections, expected {}-{}",
            count, MIN_SECTIONS, MAX_SECTIONS
        ));
        return (SectionPlan { sections: vec![] }, diagnostics);
    }

    let mut plan = raw;
    for section in &mut plan.sections {
        let queries = section.research_queries.len();
        if !(MIN_QUERIES_PER_SECTION..=MAX_QUERIES_PER_SECTION).contains(&queries) {
            diagnostics.push(format!(
                "Orchestrator error: section '{}' has {} research queries, expected {}-{}",
                section.name, queries, MIN_QUERIES_PER_SECTION, MAX_QUERIES_PER_SECTION
            ));
        }

        for query in &mut section.research_queries {
            if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&query.priority) {
                diagnostics.push(format!(
                    "Orchestrator error: query '{}' priority {} clamped to {}-{}",
                    query.query, query.priority, MIN_PRIORITY, MAX_PRIORITY
                ));
                query.priority = query.priority.clamp(MIN_PRIORITY, MAX_PRIORITY);
            }
        }
    }

    (plan, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResearchQuery, Section, SectionType};

    fn section(name: &str, queries: Vec<(&str, u8)>) -> Section {
        Section {
            name: name.to_string(),
            description: format!("{} description", name),
            research_queries: queries
                .into_iter()
                .map(|(q, priority)| ResearchQuery {
                    query: q.to_string(),
                    priority,
                })
                .collect(),
            section_type: SectionType::Overview,
        }
    }

    fn plan_with_sections(count: usize) -> SectionPlan {
        SectionPlan {
            sections: (0..count)
                .map(|i| {
                    section(
                        &format!("Section {}", i),
                        vec![("query a", 3), ("query b", 4)],
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_valid_plan_passes_unchanged() {
        let (plan, diagnostics) = validate_plan(plan_with_sections(5));
        assert_eq!(plan.sections.len(), 5);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_too_few_sections_empties_plan() {
        let (plan, diagnostics) = validate_plan(plan_with_sections(3));
        assert!(plan.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("planned 3 sections"));
        assert!(diagnostics[0].starts_with("Orchestrator error:"));
    }

    #[test]
    fn test_too_many_sections_empties_plan() {
        let (plan, diagnostics) = validate_plan(plan_with_sections(7));
        assert!(plan.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_query_count_violation_keeps_plan() {
        let mut raw = plan_with_sections(4);
        raw.sections[1].research_queries.push(ResearchQuery {
            query: "extra query one".to_string(),
            priority: 2,
        });
        raw.sections[1].research_queries.push(ResearchQuery {
            query: "extra query two".to_string(),
            priority: 2,
        });

        let (plan, diagnostics) = validate_plan(raw);
        assert_eq!(plan.sections.len(), 4);
        assert_eq!(plan.sections[1].research_queries.len(), 4);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("has 4 research queries"));
    }

    #[test]
    fn test_priority_clamped_into_range() {
        let mut raw = plan_with_sections(4);
        raw.sections[0].research_queries[0].priority = 0;
        raw.sections[2].research_queries[1].priority = 9;

        let (plan, diagnostics) = validate_plan(raw);
        assert_eq!(plan.sections[0].research_queries[0].priority, 1);
        assert_eq!(plan.sections[2].research_queries[1].priority, 5);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].contains("priority 0 clamped"));
        assert!(diagnostics[1].contains("priority 9 clamped"));
    }
}
