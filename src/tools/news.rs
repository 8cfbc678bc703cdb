//! 新闻检索工具（NewsAPI.org）

use chrono::{DateTime, Duration, Local};
use reqwest::Client;
use serde::Deserialize;

use crate::config::ResearchConfig;
use crate::tools::{ToolAdapter, ToolError};

const NEWSAPI_ENDPOINT: &str = "https://newsapi.org/v2/everything";
const PAGE_SIZE: u32 = 5;
const LOOKBACK_DAYS: i64 = 7;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// NewsAPI响应
#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsArticle {
    title: Option<String>,
    description: Option<String>,
    source: Option<NewsSource>,
    published_at: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsSource {
    name: Option<String>,
}

/// 基于NewsAPI.org的近期新闻适配器，查询范围固定为最近7天
pub struct NewsSearchTool {
    api_key: String,
    client: Client,
}

impl NewsSearchTool {
    pub fn new(config: &ResearchConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            api_key: config.newsapi_key.clone(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl ToolAdapter for NewsSearchTool {
    async fn search(&self, query: &str) -> Result<String, ToolError> {
        if self.api_key.is_empty() {
            return Err(ToolError::MissingApiKey {
                tool: "current_news",
            });
        }

        let now = Local::now();
        let to_date = now.format("%Y-%m-%d").to_string();
        let from_date = (now - Duration::days(LOOKBACK_DAYS))
            .format("%Y-%m-%d")
            .to_string();

        let response = self
            .client
            .get(NEWSAPI_ENDPOINT)
            .query(&[
                ("q", query),
                ("apiKey", self.api_key.as_str()),
                ("from", from_date.as_str()),
                ("to", to_date.as_str()),
                ("sortBy", "relevancy"),
                ("language", "en"),
                ("pageSize", &PAGE_SIZE.to_string()),
            ])
            .send()
            .await
            .map_err(|source| ToolError::Request {
                tool: "current_news",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Api {
                tool: "current_news",
                message: format!("HTTP {}", status),
            });
        }

        let body: NewsApiResponse =
            response
                .json()
                .await
                .map_err(|e| ToolError::InvalidResponse {
                    tool: "current_news",
                    reason: e.to_string(),
                })?;

        if body.status != "ok" {
            return Err(ToolError::Api {
                tool: "current_news",
                message: body
                    .message
                    .unwrap_or_else(|| String::from("Unknown error")),
            });
        }

        Ok(format_articles(query, &body.articles))
    }
}

/// 把新闻文章整理成带来源和日期的编号列表
fn format_articles(topic: &str, articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return format!("No recent news found for '{}'", topic);
    }

    let mut blocks = Vec::with_capacity(articles.len() + 1);
    blocks.push(format!("Recent News about '{}' (Last 7 days):\n", topic));

    for (i, article) in articles.iter().enumerate() {
        let title = article.title.as_deref().unwrap_or("No title");
        let description = article.description.as_deref().unwrap_or("No description");
        let source = article
            .source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("Unknown source");
        let url = article.url.as_deref().unwrap_or_default();

        blocks.push(format!(
            "\n{}. **{}**\n   - Source: {}\n   - Date: {}\n   - Summary: {}\n   - URL: {}\n",
            i + 1,
            title,
            source,
            format_publish_date(article.published_at.as_deref()),
            description,
            url
        ));
    }

    blocks.join("\n")
}

/// ISO时间戳转可读日期，解析失败时原样保留
fn format_publish_date(published_at: Option<&str>) -> String {
    let Some(raw) = published_at.filter(|s| !s.is_empty()) else {
        return String::from("Unknown date");
    };

    match DateTime::parse_from_rfc3339(&raw.replace('Z', "+00:00")) {
        Ok(parsed) => parsed.format("%B %d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
