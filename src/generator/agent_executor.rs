use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generator::context::GeneratorContext;
use crate::llm::client::utils::{estimate_token_usage, evaluate_befitting_model};

/// StepForwardAgent传递给执行器的标准参数
pub struct AgentExecuteParams {
    /// 系统提示词
    pub prompt_sys: String,
    /// 用户提示词
    pub prompt_user: String,
    /// 缓存作用域，同时作为缓存性能统计的类别
    pub cache_scope: String,
    /// 日志标签
    pub log_tag: String,
}

impl AgentExecuteParams {
    fn cache_key(&self) -> String {
        format!("{}\n\n{}", self.prompt_sys, self.prompt_user)
    }
}

/// 调用LLM提取结构化数据，结果写入提示词缓存
pub async fn extract<T>(context: &GeneratorContext, params: AgentExecuteParams) -> Result<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    let cache_key = params.cache_key();

    if let Some(cached) = read_cache::<T>(context, &params.cache_scope, &cache_key).await {
        return Ok(cached);
    }

    println!("   🤖 [{}] 正在执行AI推理...", params.log_tag);
    let result = context
        .llm_client
        .extract::<T>(&params.prompt_sys, &params.prompt_user)
        .await?;

    write_cache(context, &params, &cache_key, &result).await;
    Ok(result)
}

/// 调用LLM进行单轮对话，结果写入提示词缓存
pub async fn prompt(context: &GeneratorContext, params: AgentExecuteParams) -> Result<String> {
    let cache_key = params.cache_key();

    if let Some(cached) = read_cache::<String>(context, &params.cache_scope, &cache_key).await {
        return Ok(cached);
    }

    println!("   🤖 [{}] 正在执行AI推理...", params.log_tag);
    let result = context
        .llm_client
        .prompt(&params.prompt_sys, &params.prompt_user)
        .await?;

    write_cache(context, &params, &cache_key, &result).await;
    Ok(result)
}

/// 读取提示词缓存，强制重新生成时跳过
async fn read_cache<T>(context: &GeneratorContext, scope: &str, cache_key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    if context.config.force_regenerate {
        println!("   🔄 [{}] 强制重新生成，跳过缓存读取", scope);
        return None;
    }

    let cache = context.cache_manager.read().await;
    let cached = cache.get::<T>(scope, cache_key).await.ok().flatten();
    if cached.is_some() && context.config.verbose {
        println!("   ♻️ [{}] 命中提示词缓存", scope);
    }
    cached
}

/// 写入提示词缓存，写入失败不影响主流程
async fn write_cache<T>(
    context: &GeneratorContext,
    params: &AgentExecuteParams,
    cache_key: &str,
    result: &T,
) where
    T: Serialize,
{
    let output_text = serde_json::to_string(result).unwrap_or_default();
    let token_usage = estimate_token_usage(cache_key, &output_text);
    let (model_name, _) =
        evaluate_befitting_model(&context.config.llm, &params.prompt_sys, &params.prompt_user);

    let cache = context.cache_manager.read().await;
    if let Err(e) = cache
        .set_with_tokens(
            &params.cache_scope,
            cache_key,
            result,
            token_usage,
            &model_name,
        )
        .await
    {
        eprintln!("⚠️ 缓存写入失败: {}", e);
    }
}
