//! Web搜索工具（SerpAPI）

use reqwest::Client;
use serde::Deserialize;

use crate::config::ResearchConfig;
use crate::tools::{ToolAdapter, ToolError};

const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search";
const RESULT_COUNT: u32 = 5;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// SerpAPI响应
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    error: Option<String>,
}

/// 单条自然搜索结果
#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    snippet: Option<String>,
}

/// 基于SerpAPI的Web搜索适配器
pub struct WebSearchTool {
    api_key: String,
    client: Client,
}

impl WebSearchTool {
    pub fn new(config: &ResearchConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            api_key: config.serpapi_key.clone(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl ToolAdapter for WebSearchTool {
    async fn search(&self, query: &str) -> Result<String, ToolError> {
        if self.api_key.is_empty() {
            return Err(ToolError::MissingApiKey { tool: "web_search" });
        }

        let response = self
            .client
            .get(SERPAPI_ENDPOINT)
            .query(&[
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("engine", "google"),
                ("num", &RESULT_COUNT.to_string()),
            ])
            .send()
            .await
            .map_err(|source| ToolError::Request {
                tool: "web_search",
                source,
            })?;

        let status = response.status();
        let body: SerpApiResponse =
            response
                .json()
                .await
                .map_err(|e| ToolError::InvalidResponse {
                    tool: "web_search",
                    reason: e.to_string(),
                })?;

        if let Some(error) = body.error {
            return Err(ToolError::Api {
                tool: "web_search",
                message: error,
            });
        }
        if !status.is_success() {
            return Err(ToolError::Api {
                tool: "web_search",
                message: format!("HTTP {}", status),
            });
        }

        Ok(format_results(query, &body.organic_results))
    }
}

/// 把自然搜索结果整理成编号列表文本
fn format_results(query: &str, results: &[OrganicResult]) -> String {
    let mut entries: Vec<String> = Vec::new();
    for result in results {
        let title = result.title.as_deref().unwrap_or_default();
        let snippet = result.snippet.as_deref().unwrap_or_default();
        let line = match (title.is_empty(), snippet.is_empty()) {
            (true, true) => continue,
            (false, true) => title.to_string(),
            (true, false) => snippet.to_string(),
            (false, false) => format!("{}: {}", title, snippet),
        };
        entries.push(format!("{}. {}", entries.len() + 1, line));
    }

    let body = if entries.is_empty() {
        String::from("No good search result found")
    } else {
        entries.join("\n")
    };

    format!("Search results for '{}':\n{}", query, body)
}
