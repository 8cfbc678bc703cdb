#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::generator::context::GeneratorContext;
    use crate::generator::workflow::{TimingKeys, TimingScope, launch};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_context() -> (GeneratorContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            topic: Some("Quantum error correction".to_string()),
            output_path: temp_dir.path().join("reports"),
            internal_path: temp_dir.path().join(".skald"),
            ..Default::default()
        };

        let context = GeneratorContext::new(config).unwrap();
        (context, temp_dir)
    }

    #[test]
    fn test_generator_context_creation() {
        let (_context, _temp_dir) = create_test_context();

        // Verify context was created successfully
        // No actual assertion needed as creation would panic on failure
    }

    #[test]
    fn test_generator_context_paths() {
        let (context, temp_dir) = create_test_context();

        assert_eq!(context.config.output_path, temp_dir.path().join("reports"));
        assert_eq!(context.config.internal_path, temp_dir.path().join(".skald"));
        assert_eq!(
            context.config.checkpoint_dir(),
            temp_dir.path().join(".skald").join("checkpoints")
        );
    }

    #[test]
    fn test_generator_context_llm_config() {
        let (context, _temp_dir) = create_test_context();

        // Check LLM config
        // api_key may be empty if env var is not set
        assert!(!context.config.llm.api_base_url.is_empty());
        assert!(!context.config.llm.model_efficient.is_empty());
        assert!(!context.config.llm.model_powerful.is_empty());
        assert_eq!(context.config.llm.max_tokens, 32768);
        assert_eq!(context.config.llm.temperature, 0.1);
        assert_eq!(context.config.llm.max_parallels, 3);
    }

    #[test]
    fn test_generator_context_cache_config() {
        let (context, _temp_dir) = create_test_context();

        // Check cache config
        assert!(context.config.cache.enabled);
        assert_eq!(context.config.cache.cache_dir, PathBuf::from(".skald/cache"));
        assert_eq!(context.config.cache.expire_hours, 8760);
    }

    #[test]
    fn test_research_config_defaults() {
        let (context, _temp_dir) = create_test_context();

        assert_eq!(context.config.research.max_queries, 15);
        assert!(!context.config.research.wikipedia_api_url.is_empty());
    }

    #[test]
    fn test_default_run_id_has_research_prefix() {
        let (context, _temp_dir) = create_test_context();

        assert!(context.run_id.starts_with("research_"));
    }

    #[test]
    fn test_custom_run_id_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            topic: Some("Topic".to_string()),
            internal_path: temp_dir.path().join(".skald"),
            run_id: Some("research_20260101_090000".to_string()),
            ..Default::default()
        };

        let context = GeneratorContext::new(config).unwrap();
        assert_eq!(context.run_id, "research_20260101_090000");
    }

    #[test]
    fn test_config_with_custom_values() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            topic: Some("Rust".to_string()),
            context: Some("Focus on async".to_string()),
            internal_path: temp_dir.path().join(".skald"),
            surface_diagnostics: true,
            force_regenerate: true,
            verbose: true,
            ..Default::default()
        };

        let context = GeneratorContext::new(config);
        assert!(context.is_ok());

        let ctx = context.unwrap();
        assert_eq!(ctx.config.get_topic(), "Rust");
        assert_eq!(ctx.config.get_context(), "Focus on async");
        assert!(ctx.config.surface_diagnostics);
        assert!(ctx.config.force_regenerate);
        assert!(ctx.config.verbose);
    }

    #[test]
    fn test_skip_flags() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            topic: Some("Topic".to_string()),
            internal_path: temp_dir.path().join(".skald"),
            skip_research: true,
            skip_compose: true,
            ..Default::default()
        };

        let context = GeneratorContext::new(config);
        assert!(context.is_ok());

        let ctx = context.unwrap();
        assert!(ctx.config.skip_research);
        assert!(ctx.config.skip_compose);
    }

    #[test]
    fn test_target_language() {
        use crate::i18n::TargetLanguage;

        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            topic: Some("Topic".to_string()),
            internal_path: temp_dir.path().join(".skald"),
            target_language: TargetLanguage::Japanese,
            ..Default::default()
        };

        let context = GeneratorContext::new(config);
        assert!(context.is_ok());

        let ctx = context.unwrap();
        assert_eq!(ctx.config.target_language, TargetLanguage::Japanese);
    }

    #[test]
    fn test_empty_topic_reads_as_empty_string() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            internal_path: temp_dir.path().join(".skald"),
            ..Default::default()
        };

        assert!(config.topic.is_none());
        assert_eq!(config.get_topic(), "");
    }

    #[tokio::test]
    async fn test_launch_rejects_missing_topic() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            internal_path: temp_dir.path().join(".skald"),
            ..Default::default()
        };

        let result = launch(&config).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_timing_scope_records_phases() {
        let mut timing = TimingScope::new();

        timing.start_phase(TimingKeys::PLAN);
        let duration = timing.end_phase(TimingKeys::PLAN);

        assert!(duration.is_some());
        assert!(timing.get_phase_durations().contains_key(TimingKeys::PLAN));
        assert!(timing.get_total_duration().is_some());
    }

    #[test]
    fn test_timing_scope_end_without_start() {
        let mut timing = TimingScope::new();
        assert!(timing.end_phase(TimingKeys::RESEARCH).is_none());
    }

    #[test]
    fn test_timing_report_lists_phases() {
        let mut timing = TimingScope::new();
        timing.start_phase(TimingKeys::OUTPUT);
        timing.end_phase(TimingKeys::OUTPUT);

        let report = timing.generate_timing_report();
        assert!(report.contains("总执行时间"));
        assert!(report.contains("- output:"));
    }
}
