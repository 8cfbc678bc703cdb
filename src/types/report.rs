use std::fmt::{Display, Formatter};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 单条研究查询
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ResearchQuery {
    /// 用于信息检索的具体查询语句
    pub query: String,
    /// 优先级（1-5，5为最高）
    pub priority: u8,
}

/// 报告章节的类型分类枚举
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    /// 引言与基础概念
    Overview,
    /// 深入的技术细节与实现
    Technical,
    /// 实际应用与案例
    Practical,
    /// 批判性分析与对比
    Analysis,
    /// 总结与展望
    Conclusion,
}

impl SectionType {
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionType::Overview => "overview",
            SectionType::Technical => "technical",
            SectionType::Practical => "practical",
            SectionType::Analysis => "analysis",
            SectionType::Conclusion => "conclusion",
        }
    }
}

impl Display for SectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Default for SectionType {
    fn default() -> Self {
        SectionType::Overview
    }
}

/// 报告中的一个章节，由规划智能体产出
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct Section {
    /// 章节名称
    pub name: String,
    /// 章节主旨与核心概念的简要描述
    pub description: String,
    /// 本章节所需的研究查询清单
    pub research_queries: Vec<ResearchQuery>,
    /// 章节类型
    pub section_type: SectionType,
}

/// 规划智能体的结构化输出：整份报告的章节规划
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct SectionPlan {
    /// 报告的章节列表
    pub sections: Vec<Section>,
}

impl SectionPlan {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// 规划中所有查询的总数（未去重）
    pub fn query_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| s.research_queries.len())
            .sum()
    }
}

/// 单条查询的多源研究结果
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ResearchResult {
    /// 产生该结果的查询语句
    pub query: String,
    /// 各信息源片段拼接后的研究内容
    pub content: String,
    /// 信息来源标识
    pub source: String,
    /// 相关性分数，由查询优先级折算（priority / 5.0）
    pub relevance_score: f32,
}

impl ResearchResult {
    pub fn new(query: String, content: String, priority: u8) -> Self {
        Self {
            query,
            content,
            source: "multi-source".to_string(),
            relevance_score: priority as f32 / 5.0,
        }
    }
}

/// 撰写完成的章节，index 记录其在原始规划中的位置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompletedSection {
    /// 原始规划中的章节序号（从0开始）
    pub index: usize,
    /// 章节名称
    pub name: String,
    /// 模型生成的章节正文（Markdown）
    pub content: String,
}

/// 研究工作单元的类型化结果
///
/// 一条查询要么聚合出一份研究结果，要么因所有信息源
/// 均无内容而为空。空结果不产生 ResearchResult，
/// 其诊断信息仅进入运行摘要。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum QueryOutcome {
    /// 至少一个信息源返回了内容
    Fulfilled(ResearchResult),
    /// 所有信息源均失败或无内容
    Empty {
        query: String,
        diagnostics: Vec<String>,
    },
}

impl QueryOutcome {
    pub fn into_result(self) -> Option<ResearchResult> {
        match self {
            QueryOutcome::Fulfilled(result) => Some(result),
            QueryOutcome::Empty { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn test_research_result_relevance_score() {
        let result = ResearchResult::new("rust async".to_string(), "content".to_string(), 5);
        assert_eq!(result.relevance_score, 1.0);
        assert_eq!(result.source, "multi-source");

        let low = ResearchResult::new("rust async".to_string(), "content".to_string(), 1);
        assert_eq!(low.relevance_score, 0.2);
    }

    #[test]
    fn test_section_type_serde_lowercase() {
        let json = serde_json::to_string(&SectionType::Technical).unwrap();
        assert_eq!(json, "\"technical\"");

        let parsed: SectionType = serde_json::from_str("\"overview\"").unwrap();
        assert_eq!(parsed, SectionType::Overview);
    }

    #[test]
    fn test_section_type_unknown_is_schema_violation() {
        // 规划契约要求枚举值严格匹配，未知值应当反序列化失败
        let parsed: Result<SectionType, _> = serde_json::from_str("\"miscellaneous\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_section_plan_deserialize() {
        let json = r#"{
            "sections": [
                {
                    "name": "Fundamentals",
                    "description": "Core concepts",
                    "research_queries": [
                        {"query": "quantum computing basics", "priority": 4},
                        {"query": "qubit fundamentals", "priority": 3}
                    ],
                    "section_type": "overview"
                }
            ]
        }"#;

        let plan: SectionPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.sections.len(), 1);
        assert_eq!(plan.sections[0].research_queries.len(), 2);
        assert_eq!(plan.sections[0].research_queries[0].priority, 4);
        assert_eq!(plan.query_count(), 2);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_query_outcome_into_result() {
        let fulfilled = QueryOutcome::Fulfilled(ResearchResult::new(
            "latest rust release".to_string(),
            "Web: ...".to_string(),
            5,
        ));
        assert!(fulfilled.into_result().is_some());

        let empty = QueryOutcome::Empty {
            query: "latest rust release".to_string(),
            diagnostics: vec!["web search error: timeout".to_string()],
        };
        assert!(empty.into_result().is_none());
    }

    #[test]
    fn test_completed_section_roundtrip() {
        let section = CompletedSection {
            index: 2,
            name: "Applications".to_string(),
            content: "## Applications\n\nBody text".to_string(),
        };

        let json = serde_json::to_string(&section).unwrap();
        let back: CompletedSection = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index, 2);
        assert_eq!(back.name, "Applications");
    }
}
