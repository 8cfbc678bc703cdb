//! 研究工具适配器 - 统一接入外部信息源

use async_trait::async_trait;
use thiserror::Error;

pub mod news;
pub mod web_search;
pub mod wikipedia;

pub use news::NewsSearchTool;
pub use web_search::WebSearchTool;
pub use wikipedia::WikipediaTool;

use crate::config::ResearchConfig;

/// 工具调用错误
#[derive(Debug, Error)]
pub enum ToolError {
    /// API密钥未配置
    #[error("{tool} API key is not configured")]
    MissingApiKey { tool: &'static str },

    /// 网络请求失败
    #[error("request to {tool} failed: {source}")]
    Request {
        tool: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// 响应解析失败
    #[error("failed to parse {tool} response: {reason}")]
    InvalidResponse { tool: &'static str, reason: String },

    /// 服务端返回业务错误
    #[error("{tool} returned an error: {message}")]
    Api { tool: &'static str, message: String },
}

/// 研究工具统一接口
///
/// 每个适配器把一类外部信息源整理成适合注入提示词的纯文本
#[async_trait]
pub trait ToolAdapter: Send + Sync {
    /// 按查询检索并返回整理好的文本
    async fn search(&self, query: &str) -> Result<String, ToolError>;
}

/// 研究阶段可用的三类信息源
pub struct ResearchToolset {
    pub web: Box<dyn ToolAdapter>,
    pub wikipedia: Box<dyn ToolAdapter>,
    pub news: Box<dyn ToolAdapter>,
}

impl ResearchToolset {
    pub fn new(config: &ResearchConfig) -> Self {
        Self {
            web: Box::new(WebSearchTool::new(config)),
            wikipedia: Box::new(WikipediaTool::new(config)),
            news: Box::new(NewsSearchTool::new(config)),
        }
    }

    /// 注入自定义适配器，供测试替换真实网络调用
    pub fn with_adapters(
        web: Box<dyn ToolAdapter>,
        wikipedia: Box<dyn ToolAdapter>,
        news: Box<dyn ToolAdapter>,
    ) -> Self {
        Self {
            web,
            wikipedia,
            news,
        }
    }
}
