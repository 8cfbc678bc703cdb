use crate::generator::context::GeneratorContext;
use crate::types::ResearchResult;

pub struct MemoryScope;

impl MemoryScope {
    pub const RESEARCH_POOL: &'static str = "research_pool";
}

pub struct ScopedKeys;

impl ScopedKeys {
    pub const POOL: &'static str = "pool";
}

pub trait ResearchMemory {
    async fn store_research_pool(&self, pool: &[ResearchResult]) -> anyhow::Result<()>;

    async fn get_research_pool(&self) -> Option<Vec<ResearchResult>>;
}

impl ResearchMemory for GeneratorContext {
    /// 存储研究结果池
    async fn store_research_pool(&self, pool: &[ResearchResult]) -> anyhow::Result<()> {
        self.store_to_memory(MemoryScope::RESEARCH_POOL, ScopedKeys::POOL, pool)
            .await
    }

    /// 获取研究结果池
    async fn get_research_pool(&self) -> Option<Vec<ResearchResult>> {
        self.get_from_memory(MemoryScope::RESEARCH_POOL, ScopedKeys::POOL)
            .await
    }
}
