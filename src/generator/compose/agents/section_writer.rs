use crate::generator::compose::memory::MemoryScope;
use crate::generator::step_forward_agent::{LLMCallMode, PromptTemplate, StepForwardAgent};
use crate::types::{ResearchResult, Section};
use crate::utils::text::truncate_chars;

/// 单条研究内容注入提示词前的字符上限
pub const CONTEXT_CHAR_LIMIT: usize = 800;

/// 每个章节最多引用的研究结果条数
pub const RESULTS_PER_SECTION: usize = 3;

/// 为章节筛选研究上下文
///
/// 章节任一查询文本是结果查询的子串即视为相关，
/// 按研究池顺序保留前几条命中结果。
pub fn build_research_context(section: &Section, pool: &[ResearchResult]) -> String {
    pool.iter()
        .filter(|result| {
            section
                .research_queries
                .iter()
                .any(|q| result.query.contains(&q.query))
        })
        .take(RESULTS_PER_SECTION)
        .map(|result| {
            format!(
                "Research Query: {}\nFindings: {}...",
                result.query,
                truncate_chars(&result.content, CONTEXT_CHAR_LIMIT)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// 章节撰写智能体 - 基于研究上下文产出单个章节的Markdown正文
pub struct SectionWriterAgent {
    pub section: Section,
    pub index: usize,
    pub research_context: String,
}

impl StepForwardAgent for SectionWriterAgent {
    type Output = String;

    fn agent_type(&self) -> String {
        format!("section_{}", self.index)
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::COMPOSED_SECTIONS.to_string()
    }

    fn prompt_template(&self) -> PromptTemplate {
        let name = &self.section.name;
        let description = &self.section.description;
        let section_type = self.section.section_type;
        let research_context = &self.research_context;

        let system_prompt = format!(
            r#"You are a senior technical writer and domain expert.
        
        Write a comprehensive section for: "{name}"
        Description: {description}
        Section Type: {section_type}
        
        RESEARCH CONTEXT:
        {research_context}
        
        WRITING GUIDELINES:
        - Use the research findings to provide accurate, current information
        - Include specific examples, statistics, and real-world cases
        - Structure with clear headings (##, ###) and formatting
        - Add code blocks for technical content using ```language
        - Use bullet points and numbered lists appropriately
        - Include > blockquotes for key insights or warnings
        - Ensure content is actionable and valuable
        - Cite sources naturally within the text
        - Maintain professional yet engaging tone
        
        TECHNICAL REQUIREMENTS (if applicable):
        - Provide working code examples
        - Explain implementation steps clearly
        - Include error handling and best practices
        - Add performance considerations
        - Show integration patterns
        
        Write a detailed, well-researched section (800-1500 words) that thoroughly covers the topic.
        "#
        );

        PromptTemplate {
            system_prompt,
            user_prompt: format!(
                "Section: {}\nFocus: {}",
                self.section.name, self.section.description
            ),
            llm_call_mode: LLMCallMode::Prompt,
        }
    }
}
