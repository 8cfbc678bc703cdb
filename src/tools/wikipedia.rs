//! 维基百科查询工具（MediaWiki API）

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;

use crate::config::ResearchConfig;
use crate::tools::{ToolAdapter, ToolError};

const PAGE_LIMIT: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// MediaWiki查询响应
///
/// 无结果时响应里没有query字段
#[derive(Debug, Deserialize)]
struct WikipediaResponse {
    query: Option<WikipediaQuery>,
}

#[derive(Debug, Deserialize)]
struct WikipediaQuery {
    #[serde(default)]
    pages: HashMap<String, WikipediaPage>,
}

/// 单个条目，index是搜索结果中的排序位置
#[derive(Debug, Deserialize)]
struct WikipediaPage {
    title: String,
    #[serde(default)]
    index: i64,
    extract: Option<String>,
}

/// 基于MediaWiki API的百科查询适配器
pub struct WikipediaTool {
    api_url: String,
    client: Client,
}

impl WikipediaTool {
    pub fn new(config: &ResearchConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            api_url: config.wikipedia_api_url.clone(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl ToolAdapter for WikipediaTool {
    async fn search(&self, query: &str) -> Result<String, ToolError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", &PAGE_LIMIT.to_string()),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|source| ToolError::Request {
                tool: "wikipedia",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Api {
                tool: "wikipedia",
                message: format!("HTTP {}", status),
            });
        }

        let body: WikipediaResponse =
            response
                .json()
                .await
                .map_err(|e| ToolError::InvalidResponse {
                    tool: "wikipedia",
                    reason: e.to_string(),
                })?;

        let pages = body
            .query
            .map(|q| q.pages.into_values().collect())
            .unwrap_or_default();

        Ok(format_pages(query, pages))
    }
}

/// 按搜索排序渲染条目摘要
fn format_pages(query: &str, mut pages: Vec<WikipediaPage>) -> String {
    if pages.is_empty() {
        return format!("No good Wikipedia result was found for '{}'", query);
    }

    pages.sort_by_key(|page| page.index);

    pages
        .iter()
        .map(|page| {
            format!(
                "Page: {}\nSummary: {}",
                page.title,
                page.extract.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, index: i64, extract: Option<&str>) -> WikipediaPage {
        WikipediaPage {
            title: title.to_string(),
            index,
            extract: extract.map(String::from),
        }
    }

    #[test]
    fn test_format_pages_ordered_by_search_index() {
        let pages = vec![
            page("Second", 2, Some("beta")),
            page("First", 1, Some("alpha")),
            page("Third", 3, Some("gamma")),
        ];

        let text = format_pages("anything", pages);
        let first = text.find("Page: First").unwrap();
        let second = text.find("Page: Second").unwrap();
        let third = text.find("Page: Third").unwrap();
        assert!(first < second && second < third);
        assert!(text.contains("Page: First\nSummary: alpha"));
    }

    #[test]
    fn test_format_pages_empty() {
        let text = format_pages("obscurity", Vec::new());
        assert_eq!(text, "No good Wikipedia result was found for 'obscurity'");
    }

    #[test]
    fn test_format_pages_missing_extract() {
        let pages = vec![page("Stub", 1, None)];
        let text = format_pages("stub", pages);
        assert_eq!(text, "Page: Stub\nSummary: ");
    }
}
