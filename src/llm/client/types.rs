//! LLM客户端公共类型

use serde::{Deserialize, Serialize};

/// 单次LLM调用的token使用情况
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

impl TokenUsage {
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }

    /// 按模型估算本次调用成本（美元）
    ///
    /// 单价为每百万token的美元数，未知模型取保守默认价
    pub fn estimate_cost(&self, model_name: &str) -> f64 {
        let (input_price, output_price) = if model_name.contains("gpt-oss-120b") {
            (0.15, 0.75)
        } else if model_name.contains("gpt-oss-20b") {
            (0.10, 0.50)
        } else if model_name.contains("deepseek") {
            (0.27, 1.10)
        } else if model_name.contains("claude") {
            (3.00, 15.00)
        } else {
            (0.50, 1.50)
        };

        (self.input_tokens as f64 * input_price + self.output_tokens as f64 * output_price)
            / 1_000_000.0
    }
}
