use crate::generator::compose::memory::ComposeMemory;
use crate::generator::context::GeneratorContext;
use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::PathBuf;

pub mod synthesizer;

/// 合成最终报告并保存到输出目录
pub async fn save(context: &GeneratorContext) -> Result<PathBuf> {
    let outlet = DiskOutlet::new();
    outlet.save(context).await
}

pub trait Outlet {
    async fn save(&self, context: &GeneratorContext) -> Result<PathBuf>;
}

pub struct DiskOutlet {}

impl DiskOutlet {
    pub fn new() -> Self {
        Self {}
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, context: &GeneratorContext) -> Result<PathBuf> {
        println!("\n🖊️ 报告合成与存储中...");

        let sections = context.get_completed_sections().await.unwrap_or_default();
        let topic = context.config.get_topic();
        let generated_on = Local::now().format("%B %d, %Y").to_string();

        let mut report = synthesizer::synthesize(&topic, &sections, &generated_on);

        // 诊断附录在纯合成之后追加，合成本身保持确定性
        if context.config.surface_diagnostics {
            let diagnostics = context.diagnostics().await;
            if !diagnostics.is_empty() {
                report.push_str("\n---\n\n## Appendix: Run Diagnostics\n\n");
                for message in &diagnostics {
                    report.push_str(&format!("- {}\n", message));
                }
            }
        }

        // 报告按运行累积，不清理历史输出
        let output_dir = &context.config.output_path;
        fs::create_dir_all(output_dir)?;

        let stamp = context
            .run_id
            .strip_prefix("research_")
            .unwrap_or(&context.run_id);
        let output_file_path = output_dir.join(format!("research_report_{}.md", stamp));
        fs::write(&output_file_path, &report)?;

        println!("💾 报告已保存: {}", output_file_path.display());

        Ok(output_file_path)
    }
}
