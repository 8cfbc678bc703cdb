use crate::tools::{ResearchToolset, ToolAdapter};
use crate::types::{QueryOutcome, ResearchQuery, ResearchResult};
use crate::utils::text::truncate_chars;

/// 单个信息源片段注入研究结果前的字符上限
pub const SNIPPET_CHAR_LIMIT: usize = 500;

/// 查询文本命中任一关键词时视为时效敏感，需要追加新闻源
pub const NEWS_KEYWORDS: [&str; 5] = ["current", "latest", "2024", "2025", "recent"];

/// 判断查询是否需要新闻源补充
pub fn is_time_sensitive(query: &str) -> bool {
    let lowered = query.to_lowercase();
    NEWS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// 对单条查询执行多信息源研究
///
/// 依次调用网络搜索、百科与（时效敏感时）新闻源。
/// 单个信息源失败只转化为诊断信息，不影响其余信息源；
/// 所有信息源均无内容时返回空结果，不产生 ResearchResult。
pub async fn run_query(toolset: &ResearchToolset, query: &ResearchQuery) -> QueryOutcome {
    let mut snippets = Vec::new();
    let mut diagnostics = Vec::new();

    let mut sources: Vec<(&dyn ToolAdapter, &str)> = vec![
        (toolset.web.as_ref(), "Web"),
        (toolset.wikipedia.as_ref(), "Wikipedia"),
    ];
    if is_time_sensitive(&query.query) {
        sources.push((toolset.news.as_ref(), "News"));
    }

    for (adapter, label) in sources {
        match adapter.search(&query.query).await {
            Ok(payload) if !payload.is_empty() => {
                snippets.push(format!(
                    "{}: {}...",
                    label,
                    truncate_chars(&payload, SNIPPET_CHAR_LIMIT)
                ));
            }
            Ok(_) => {}
            Err(e) => diagnostics.push(format!("Research worker error: {}", e)),
        }
    }

    if snippets.is_empty() {
        QueryOutcome::Empty {
            query: query.query.clone(),
            diagnostics,
        }
    } else {
        QueryOutcome::Fulfilled(ResearchResult::new(
            query.query.clone(),
            snippets.join("\n\n"),
            query.priority,
        ))
    }
}
