use crate::{
    config::LLMConfig, llm::client::types::TokenUsage, utils::token_estimator::TokenEstimator,
};

use std::sync::LazyLock;

static TOKEN_ESTIMATOR: LazyLock<TokenEstimator> = LazyLock::new(TokenEstimator::new);

/// 适合由高效模型处理的提示词长度上限（字节）
const EFFICIENT_PROMPT_LIMIT: usize = 32 * 1024;

/// 根据提示词规模选择模型：短提示词优先高效模型并保留强力模型兜底，
/// 超长提示词直接使用强力模型
pub fn evaluate_befitting_model(
    llm_config: &LLMConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> (String, Option<String>) {
    if system_prompt.len() + user_prompt.len() <= EFFICIENT_PROMPT_LIMIT {
        return (
            llm_config.model_efficient.clone(),
            Some(llm_config.model_powerful.clone()),
        );
    }
    (llm_config.model_powerful.clone(), None)
}

/// 估算token使用情况（基于文本长度）
pub fn estimate_token_usage(input_text: &str, output_text: &str) -> TokenUsage {
    TokenUsage::new(
        TOKEN_ESTIMATOR.estimate_tokens(input_text),
        TOKEN_ESTIMATOR.estimate_tokens(output_text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_prefers_efficient_model() {
        let config = LLMConfig::default();
        let (model, fallover) = evaluate_befitting_model(&config, "system", "user");
        assert_eq!(model, config.model_efficient);
        assert_eq!(fallover, Some(config.model_powerful.clone()));
    }

    #[test]
    fn test_oversized_prompt_uses_powerful_model() {
        let config = LLMConfig::default();
        let long_prompt = "x".repeat(EFFICIENT_PROMPT_LIMIT + 1);
        let (model, fallover) = evaluate_befitting_model(&config, "system", &long_prompt);
        assert_eq!(model, config.model_powerful);
        assert_eq!(fallover, None);
    }

    #[test]
    fn test_estimate_token_usage_totals() {
        let usage = estimate_token_usage("hello world input", "output text");
        assert!(usage.input_tokens > 0);
        assert!(usage.output_tokens > 0);
        assert_eq!(
            usage.total_tokens,
            usage.input_tokens + usage.output_tokens
        );
    }
}
