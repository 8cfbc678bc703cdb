use crate::generator::plan::memory::MemoryScope;
use crate::generator::step_forward_agent::{LLMCallMode, PromptTemplate, StepForwardAgent};
use crate::types::SectionPlan;

/// 章节规划智能体 - 负责把研究主题拆解为带研究查询的章节规划
pub struct SectionPlanner {
    pub topic: String,
    pub user_context: String,
}

impl StepForwardAgent for SectionPlanner {
    type Output = SectionPlan;

    fn agent_type(&self) -> String {
        "section_planner".to_string()
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::REPORT_PLAN.to_string()
    }

    fn prompt_template(&self) -> PromptTemplate {
        let topic = &self.topic;
        let user_context = &self.user_context;

        let system_prompt = format!(
            r#"You are an expert research planner and strategist. 
        Create a comprehensive research plan for the topic: "{topic}"
        
        User Context: {user_context}
        
        Break this into 4-6 highly relevant sections that ensure:
        
        STRUCTURE REQUIREMENTS:
        - Start with an engaging title and overview (no **title** or **subtitle** labels)
        - Include fundamental concepts and background
        - Cover practical implementation or real-world applications
        - Address current trends and recent developments
        - Provide specific examples and case studies
        - End with future outlook or conclusions
        
        RESEARCH FOCUS:
        - Generate 2-3 specific research queries per section
        - Prioritize queries that need current/real-time information
        - Include both foundational knowledge and latest developments
        - Consider multiple perspectives and use cases
        
        SECTION TYPES:
        - overview: Introduction and fundamentals
        - technical: Deep technical details and implementation
        - practical: Real-world applications and examples  
        - analysis: Critical analysis and comparisons
        - conclusion: Summary and future outlook
        
        For technical topics, ensure coverage of:
        - Core concepts and principles
        - Implementation details with code examples
        - Best practices and common pitfalls
        - Performance considerations
        - Integration patterns
        - Troubleshooting guides
        "#
        );

        PromptTemplate {
            system_prompt,
            user_prompt: format!("Topic: {}\nContext: {}", self.topic, self.user_context),
            llm_call_mode: LLMCallMode::Extract,
        }
    }
}
