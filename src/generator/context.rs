use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    cache::CacheManager, checkpoint::CheckpointStore, config::Config, llm::client::LLMClient,
    memory::Memory, tools::ResearchToolset,
};

#[derive(Clone)]
pub struct GeneratorContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 配置
    pub config: Config,
    /// 缓存管理器
    pub cache_manager: Arc<RwLock<CacheManager>>,
    /// 生成器记忆
    pub memory: Arc<RwLock<Memory>>,
    /// 研究阶段使用的信息源适配器集合
    pub toolset: Arc<ResearchToolset>,
    /// 阶段检查点存储
    pub checkpoints: Arc<CheckpointStore>,
    /// 本次运行的标识
    pub run_id: String,
    /// 运行期间收集的非致命诊断信息
    diagnostics: Arc<RwLock<Vec<String>>>,
}

impl GeneratorContext {
    /// 创建新的生成器上下文
    pub fn new(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.clone())?;
        let cache_manager = Arc::new(RwLock::new(CacheManager::new(config.cache.clone())));
        let memory = Arc::new(RwLock::new(Memory::new()));
        let toolset = Arc::new(ResearchToolset::new(&config.research));

        let run_id = config
            .run_id
            .clone()
            .unwrap_or_else(|| format!("research_{}", Local::now().format("%Y%m%d_%H%M%S")));
        let checkpoints = Arc::new(CheckpointStore::new(config.checkpoint_dir(), &run_id));

        Ok(Self {
            llm_client,
            config,
            cache_manager,
            memory,
            toolset,
            checkpoints,
            run_id,
            diagnostics: Arc::new(RwLock::new(Vec::new())),
        })
    }

    /// 存储数据到 Memory
    pub async fn store_to_memory<T>(&self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let mut memory = self.memory.write().await;
        memory.store(scope, key, data)
    }

    /// 从 Memory 获取数据
    pub async fn get_from_memory<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a> + Send + Sync,
    {
        let mut memory = self.memory.write().await;
        memory.get(scope, key)
    }

    /// 获取Memory使用统计
    pub async fn get_memory_stats(&self) -> HashMap<String, usize> {
        let memory = self.memory.read().await;
        memory.get_usage_stats()
    }

    /// 记录一条非致命诊断信息，运行摘要中汇总展示
    pub async fn add_diagnostic(&self, message: impl Into<String>) {
        let mut diagnostics = self.diagnostics.write().await;
        diagnostics.push(message.into());
    }

    /// 获取已收集的全部诊断信息
    pub async fn diagnostics(&self) -> Vec<String> {
        let diagnostics = self.diagnostics.read().await;
        diagnostics.clone()
    }
}
