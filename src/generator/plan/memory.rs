use crate::generator::context::GeneratorContext;
use crate::types::SectionPlan;

pub struct MemoryScope;

impl MemoryScope {
    pub const REPORT_PLAN: &'static str = "report_plan";
}

pub struct ScopedKeys;

impl ScopedKeys {
    pub const SECTION_PLAN: &'static str = "section_plan";
}

pub trait PlanMemory {
    async fn store_plan(&self, plan: &SectionPlan) -> anyhow::Result<()>;

    async fn get_plan(&self) -> Option<SectionPlan>;
}

impl PlanMemory for GeneratorContext {
    /// 存储校验后的章节规划
    async fn store_plan(&self, plan: &SectionPlan) -> anyhow::Result<()> {
        self.store_to_memory(MemoryScope::REPORT_PLAN, ScopedKeys::SECTION_PLAN, plan)
            .await
    }

    /// 获取章节规划
    async fn get_plan(&self) -> Option<SectionPlan> {
        self.get_from_memory(MemoryScope::REPORT_PLAN, ScopedKeys::SECTION_PLAN)
            .await
    }
}
