use anyhow::Result;

use crate::generator::context::GeneratorContext;

/// 报告流水线阶段的统一执行接口
///
/// 每个阶段消费共享上下文并产出本阶段的结果，
/// 结果同时写入Memory供后续阶段取用。
#[allow(async_fn_in_trait)]
pub trait Generator<T> {
    async fn execute(&self, context: GeneratorContext) -> Result<T>;
}
