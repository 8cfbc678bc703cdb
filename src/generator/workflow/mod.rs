use crate::config::Config;
use crate::generator::context::GeneratorContext;

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::time::Duration;

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Option<std::time::Instant>,
    phase_start_times: HashMap<String, std::time::Instant>,
    phase_durations: HashMap<String, Duration>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Some(std::time::Instant::now()),
            phase_start_times: HashMap::new(),
            phase_durations: HashMap::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .insert(phase_name.to_string(), std::time::Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        if let Some(start_time) = self.phase_start_times.remove(phase_name) {
            let duration = start_time.elapsed();
            self.phase_durations
                .insert(phase_name.to_string(), duration);
            Some(duration)
        } else {
            None
        }
    }

    /// 获取总执行时间
    pub fn get_total_duration(&self) -> Option<Duration> {
        self.start_time.map(|start| start.elapsed())
    }

    /// 获取所有阶段的执行时间
    pub fn get_phase_durations(&self) -> &HashMap<String, Duration> {
        &self.phase_durations
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = String::new();

        if let Some(total_duration) = self.get_total_duration() {
            report.push_str(&format!(
                "总执行时间: {:.2}秒\n",
                total_duration.as_secs_f64()
            ));
        }

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const PLAN: &'static str = "plan";
    pub const RESEARCH: &'static str = "research";
    pub const COMPOSE: &'static str = "compose";
    pub const OUTPUT: &'static str = "output";
}

/// 启动报告生成工作流
pub async fn launch(config: &Config) -> Result<()> {
    if config.get_topic().trim().is_empty() {
        return Err(anyhow!("研究主题不能为空，请通过 --topic 参数或配置文件指定"));
    }

    let context = GeneratorContext::new(config.clone())?;
    println!("🧭 本次运行标识: {}", context.run_id);

    // 启动时检查模型连接
    context.llm_client.check_connection().await?;

    let mut timing = TimingScope::new();

    // 规划阶段始终执行，空规划会让后续阶段自行退化
    timing.start_phase(TimingKeys::PLAN);
    crate::generator::plan::execute(&context).await?;
    timing.end_phase(TimingKeys::PLAN);

    if !config.skip_research {
        timing.start_phase(TimingKeys::RESEARCH);
        crate::generator::research::execute(&context).await?;
        timing.end_phase(TimingKeys::RESEARCH);
    }

    if !config.skip_compose {
        timing.start_phase(TimingKeys::COMPOSE);
        crate::generator::compose::execute(&context).await?;
        timing.end_phase(TimingKeys::COMPOSE);
    }

    // 即使没有任何完成章节也输出报告骨架
    timing.start_phase(TimingKeys::OUTPUT);
    crate::generator::outlet::save(&context).await?;
    timing.end_phase(TimingKeys::OUTPUT);

    print_run_summary(&context, &timing).await;

    Ok(())
}

/// 打印运行摘要
async fn print_run_summary(context: &GeneratorContext, timing: &TimingScope) {
    println!("\n📊 运行摘要");
    print!("{}", timing.generate_timing_report());

    let cache_report = context
        .cache_manager
        .read()
        .await
        .generate_performance_report();
    println!(
        "\n缓存命中率: {:.1}%（命中 {} 次，未命中 {} 次，节省推理时间 {:.1} 秒）",
        cache_report.hit_rate * 100.0,
        cache_report.cache_hits,
        cache_report.cache_misses,
        cache_report.inference_time_saved
    );

    let memory_stats = context.get_memory_stats().await;
    if !memory_stats.is_empty() {
        let total_size: usize = memory_stats.values().sum();
        println!(
            "Memory存储: {} 个作用域，合计 {} bytes",
            memory_stats.len(),
            total_size
        );
    }

    let diagnostics = context.diagnostics().await;
    if !diagnostics.is_empty() {
        println!("\nErrors encountered:");
        for error in &diagnostics {
            println!("- {}", error);
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
