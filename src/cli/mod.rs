use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use clap::Parser;
use std::path::PathBuf;

/// 固定的上下文片段，与研究表单的四个开关一一对应
const CONTEXT_NEWS: &str = "Include latest news and current events";
const CONTEXT_TECHNICAL: &str = "Provide technical details and implementation";
const CONTEXT_EXAMPLES: &str = "Include real-world examples and case studies";
const CONTEXT_TRENDS: &str = "Analyze future trends and predictions";

/// DeepReport-RS - 由Rust与AI驱动的研究报告生成引擎
#[derive(Parser, Debug)]
#[command(name = "Skald (deepreport-rs)")]
#[command(
    about = "AI-based research report generation engine. It plans a report outline for any topic, gathers evidence from web search, Wikipedia and news sources in parallel, and writes a polished Markdown research report."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 研究主题
    #[arg()]
    pub topic: Option<String>,

    /// 研究的补充上下文（自由文本）
    #[arg(long)]
    pub context: Option<String>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 运行标识，缺省时按启动时间生成
    #[arg(long)]
    pub run_id: Option<String>,

    /// 不在上下文中要求最新新闻与时事
    #[arg(long)]
    pub no_news: bool,

    /// 不在上下文中要求技术细节与实现
    #[arg(long)]
    pub no_technical: bool,

    /// 不在上下文中要求真实案例
    #[arg(long)]
    pub no_examples: bool,

    /// 不在上下文中要求趋势预测
    #[arg(long)]
    pub no_trends: bool,

    /// 是否跳过多源研究阶段
    #[arg(long)]
    pub skip_research: bool,

    /// 是否跳过章节撰写阶段
    #[arg(long)]
    pub skip_compose: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 高能效模型，优先用于Skald引擎的常规推理任务
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，优先用于Skald引擎的复杂推理任务，以及作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 最大并发数
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// 单次运行最多调度的研究查询数
    #[arg(long)]
    pub max_queries: Option<usize>,

    /// SerpAPI的API KEY
    #[arg(long)]
    pub serpapi_key: Option<String>,

    /// NewsAPI.org的API KEY
    #[arg(long)]
    pub newsapi_key: Option<String>,

    /// LLM Provider (groq, openai, deepseek, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 目标语言 (en, zh, ja, ko, de, fr, ru)
    #[arg(long)]
    pub target_language: Option<String>,

    /// 在报告末尾附加诊断信息附录
    #[arg(long)]
    pub surface_diagnostics: bool,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 强制重新生成（绕过缓存读取）
    #[arg(long)]
    pub force_regenerate: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)
                .unwrap_or_else(|_| panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path))
        } else {
            // 没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("skald.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!("⚠️ 警告: 无法读取默认配置文件 {:?}", default_config_path)
                })
            } else {
                Config::default()
            }
        };

        // 主题：CLI参数优先于配置文件
        if let Some(topic) = self.topic {
            config.topic = Some(topic);
        }

        // 组装补充上下文：自由文本在前，四个开关按顺序追加固定片段
        let free_text = self.context.or_else(|| config.context.take());
        let mut context_parts: Vec<String> = Vec::new();
        if let Some(text) = free_text
            && !text.trim().is_empty()
        {
            context_parts.push(text);
        }
        if !self.no_news {
            context_parts.push(CONTEXT_NEWS.to_string());
        }
        if !self.no_technical {
            context_parts.push(CONTEXT_TECHNICAL.to_string());
        }
        if !self.no_examples {
            context_parts.push(CONTEXT_EXAMPLES.to_string());
        }
        if !self.no_trends {
            context_parts.push(CONTEXT_TRENDS.to_string());
        }
        config.context = if context_parts.is_empty() {
            None
        } else {
            Some(context_parts.join(". "))
        };

        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        if let Some(run_id) = self.run_id {
            config.run_id = Some(run_id);
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
            // 只指定efficient档时，powerful档跟随同一模型
            if self.model_powerful.is_none() {
                config.llm.model_powerful = config.llm.model_efficient.to_string();
            }
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.llm.max_parallels = max_parallels;
        }

        // 覆盖研究配置
        if let Some(max_queries) = self.max_queries {
            config.research.max_queries = max_queries;
        }
        if let Some(serpapi_key) = self.serpapi_key {
            config.research.serpapi_key = serpapi_key;
        }
        if let Some(newsapi_key) = self.newsapi_key {
            config.research.newsapi_key = newsapi_key;
        }

        // 目标语言配置
        if let Some(target_language_str) = self.target_language {
            if let Ok(target_language) = target_language_str.parse::<TargetLanguage>() {
                config.target_language = target_language;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的目标语言: {}，使用默认语言 (English)",
                    target_language_str
                );
            }
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        // 其他配置
        config.surface_diagnostics = self.surface_diagnostics;
        config.force_regenerate = self.force_regenerate;
        config.skip_research = self.skip_research;
        config.skip_compose = self.skip_compose;
        config.verbose = self.verbose;

        config
    }
}

// Include tests
#[cfg(test)]
mod tests;
