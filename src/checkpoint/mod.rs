use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

/// 各阶段检查点的固定名称
pub struct CheckpointStage;

impl CheckpointStage {
    pub const PLAN: &'static str = "section_plan";
    pub const RESEARCH: &'static str = "research_pool";
    pub const COMPOSE: &'static str = "composed_sections";
}

/// 阶段检查点存储
///
/// 每次运行在`{root}/{run_id}/`下保存各阶段产物的JSON快照。
/// 以相同`--run-id`重新启动时，已完成阶段直接从快照恢复，
/// 不再重复执行。
pub struct CheckpointStore {
    root: PathBuf,
    run_id: String,
}

impl CheckpointStore {
    pub fn new(root: PathBuf, run_id: &str) -> Self {
        Self {
            root,
            run_id: run_id.to_string(),
        }
    }

    /// 当前运行的检查点目录
    pub fn run_dir(&self) -> PathBuf {
        self.root.join(&self.run_id)
    }

    fn stage_path(&self, stage: &str) -> PathBuf {
        self.run_dir().join(format!("{}.json", stage))
    }

    /// 检查指定阶段的检查点是否存在
    pub fn exists(&self, stage: &str) -> bool {
        self.stage_path(stage).exists()
    }

    /// 保存阶段产物快照
    pub fn save<T>(&self, stage: &str, data: &T) -> Result<()>
    where
        T: Serialize,
    {
        let run_dir = self.run_dir();
        fs::create_dir_all(&run_dir)
            .context(format!("Failed to create checkpoint dir: {:?}", run_dir))?;

        let path = self.stage_path(stage);
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&path, content).context(format!("Failed to write checkpoint: {:?}", path))?;

        println!("   💾 检查点已写入: {}", path.display());
        Ok(())
    }

    /// 读取阶段产物快照，文件缺失或损坏时返回None
    pub fn load<T>(&self, stage: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let path = self.stage_path(stage);
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<T>(&content) {
                Ok(data) => Some(data),
                Err(e) => {
                    eprintln!("⚠️ 检查点解析失败，忽略: {} ({})", path.display(), e);
                    None
                }
            },
            Err(e) => {
                eprintln!("⚠️ 检查点读取失败，忽略: {} ({})", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(temp_dir.path().to_path_buf(), "research_20250101_120000");

        store
            .save(CheckpointStage::PLAN, &vec!["intro", "analysis"])
            .unwrap();

        assert!(store.exists(CheckpointStage::PLAN));
        let restored: Option<Vec<String>> = store.load(CheckpointStage::PLAN);
        assert_eq!(
            restored,
            Some(vec!["intro".to_string(), "analysis".to_string()])
        );
    }

    #[test]
    fn test_load_missing_stage_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(temp_dir.path().to_path_buf(), "research_20250101_120000");

        assert!(!store.exists(CheckpointStage::RESEARCH));
        let missing: Option<Vec<String>> = store.load(CheckpointStage::RESEARCH);
        assert!(missing.is_none());
    }

    #[test]
    fn test_corrupted_checkpoint_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let store = CheckpointStore::new(temp_dir.path().to_path_buf(), "research_20250101_120000");

        let run_dir = store.run_dir();
        fs::create_dir_all(&run_dir).unwrap();
        fs::write(run_dir.join("section_plan.json"), "not valid json{").unwrap();

        let restored: Option<Vec<String>> = store.load(CheckpointStage::PLAN);
        assert!(restored.is_none());
    }

    #[test]
    fn test_runs_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let first = CheckpointStore::new(temp_dir.path().to_path_buf(), "research_20250101_120000");
        let second = CheckpointStore::new(temp_dir.path().to_path_buf(), "research_20250102_090000");

        first.save(CheckpointStage::PLAN, &"first run").unwrap();

        assert!(first.exists(CheckpointStage::PLAN));
        assert!(!second.exists(CheckpointStage::PLAN));
    }
}
