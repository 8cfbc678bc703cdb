use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::i18n::TargetLanguage;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "groq")]
    #[default]
    Groq,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Groq => write!(f, "groq"),
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(LLMProvider::Groq),
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 研究主题
    pub topic: Option<String>,

    /// 研究的补充上下文，会拼接进规划提示词
    pub context: Option<String>,

    /// 报告输出路径
    pub output_path: PathBuf,

    /// 内部工作目录路径 (.skald)
    pub internal_path: PathBuf,

    /// 目标语言
    pub target_language: TargetLanguage,

    /// 运行标识，缺省时按启动时间生成
    pub run_id: Option<String>,

    /// 是否在报告末尾附加诊断信息附录
    pub surface_diagnostics: bool,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 研究阶段配置
    pub research: ResearchConfig,

    /// 缓存配置
    pub cache: CacheConfig,

    /// 强制重新生成（绕过缓存读取）
    pub force_regenerate: bool,

    /// 跳过研究阶段（仅依靠模型自身知识撰写）
    pub skip_research: bool,

    /// 跳过章节撰写阶段
    pub skip_compose: bool,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 高能效模型，优先用于Skald引擎的常规推理任务
    pub model_efficient: String,

    /// 高质量模型，优先用于Skald引擎的复杂推理任务，以及作为efficient失效情况下的兜底
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,

    pub max_parallels: usize,
}

/// 研究阶段配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ResearchConfig {
    /// 去重并按优先级排序后，单次运行最多调度的查询数
    pub max_queries: usize,

    /// SerpAPI的API KEY
    pub serpapi_key: String,

    /// NewsAPI.org的API KEY
    pub newsapi_key: String,

    /// Wikipedia API地址
    pub wikipedia_api_url: String,
}

/// 缓存配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,

    /// 缓存过期时间（小时）
    pub expire_hours: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 获取研究主题，未配置时返回空串
    pub fn get_topic(&self) -> String {
        self.topic.clone().unwrap_or_default()
    }

    /// 获取补充上下文，未配置时返回空串
    pub fn get_context(&self) -> String {
        self.context.clone().unwrap_or_default()
    }

    /// 检查点存储目录
    pub fn checkpoint_dir(&self) -> PathBuf {
        self.internal_path.join("checkpoints")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic: None,
            context: None,
            output_path: PathBuf::from("./skald.reports"),
            internal_path: PathBuf::from("./.skald"),
            target_language: TargetLanguage::default(),
            run_id: None,
            surface_diagnostics: false,
            llm: LLMConfig::default(),
            research: ResearchConfig::default(),
            cache: CacheConfig::default(),
            force_regenerate: false,
            skip_research: false,
            skip_compose: false,
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("SKALD_LLM_API_KEY")
                .or_else(|_| std::env::var("GROQ_API_KEY"))
                .unwrap_or_default(),
            api_base_url: String::from("https://api.groq.com/openai/v1"),
            model_efficient: String::from("openai/gpt-oss-20b"),
            model_powerful: String::from("openai/gpt-oss-120b"),
            max_tokens: 32768,
            temperature: 0.1,
            retry_attempts: 5,
            retry_delay_ms: 5000,
            timeout_seconds: 300,
            max_parallels: 3,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_queries: 15,
            serpapi_key: std::env::var("SERPAPI_KEY").unwrap_or_default(),
            newsapi_key: std::env::var("NEWSAPI_KEY").unwrap_or_default(),
            wikipedia_api_url: String::from("https://en.wikipedia.org/w/api.php"),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_dir: PathBuf::from(".skald/cache"),
            expire_hours: 8760,
        }
    }
}
