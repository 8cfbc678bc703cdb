use crate::generator::context::GeneratorContext;
use crate::types::CompletedSection;

pub struct MemoryScope;

impl MemoryScope {
    pub const COMPOSED_SECTIONS: &'static str = "composed_sections";
}

pub struct ScopedKeys;

impl ScopedKeys {
    pub const SECTIONS: &'static str = "sections";
}

pub trait ComposeMemory {
    async fn store_completed_sections(&self, sections: &[CompletedSection])
    -> anyhow::Result<()>;

    async fn get_completed_sections(&self) -> Option<Vec<CompletedSection>>;
}

impl ComposeMemory for GeneratorContext {
    /// 存储撰写完成的章节
    async fn store_completed_sections(
        &self,
        sections: &[CompletedSection],
    ) -> anyhow::Result<()> {
        self.store_to_memory(
            MemoryScope::COMPOSED_SECTIONS,
            ScopedKeys::SECTIONS,
            sections,
        )
        .await
    }

    /// 获取撰写完成的章节
    async fn get_completed_sections(&self) -> Option<Vec<CompletedSection>> {
        self.get_from_memory(MemoryScope::COMPOSED_SECTIONS, ScopedKeys::SECTIONS)
            .await
    }
}
