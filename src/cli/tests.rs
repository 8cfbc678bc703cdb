#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(&["deepreport-rs"]).unwrap();

        assert!(args.topic.is_none());
        assert!(args.context.is_none());
        assert!(args.output_path.is_none());
        assert!(args.config.is_none());
        assert!(!args.no_news);
        assert!(!args.no_technical);
        assert!(!args.no_examples);
        assert!(!args.no_trends);
        assert!(!args.skip_research);
        assert!(!args.skip_compose);
        assert!(!args.verbose);
        assert!(!args.force_regenerate);
        assert!(!args.no_cache);
        assert!(!args.surface_diagnostics);
    }

    #[test]
    fn test_args_topic_positional() {
        let args = Args::try_parse_from(&["deepreport-rs", "Quantum error correction"]).unwrap();
        assert_eq!(args.topic, Some("Quantum error correction".to_string()));
    }

    #[test]
    fn test_args_long_options() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "Edge computing",
            "--output-path",
            "/test/output",
            "--skip-research",
            "--skip-compose",
            "--force-regenerate",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(args.topic, Some("Edge computing".to_string()));
        assert_eq!(args.output_path, Some(PathBuf::from("/test/output")));
        assert!(args.skip_research);
        assert!(args.skip_compose);
        assert!(args.force_regenerate);
        assert!(args.verbose);
    }

    #[test]
    fn test_args_llm_options() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "--llm-provider",
            "openai",
            "--llm-api-key",
            "test-key",
            "--llm-api-base-url",
            "https://api.openai.com",
            "--model-efficient",
            "gpt-4o-mini",
            "--model-powerful",
            "gpt-4o",
            "--max-tokens",
            "2048",
            "--temperature",
            "0.7",
            "--max-parallels",
            "5",
        ])
        .unwrap();

        assert_eq!(args.llm_provider, Some("openai".to_string()));
        assert_eq!(args.llm_api_key, Some("test-key".to_string()));
        assert_eq!(
            args.llm_api_base_url,
            Some("https://api.openai.com".to_string())
        );
        assert_eq!(args.model_efficient, Some("gpt-4o-mini".to_string()));
        assert_eq!(args.model_powerful, Some("gpt-4o".to_string()));
        assert_eq!(args.max_tokens, Some(2048));
        assert_eq!(args.temperature, Some(0.7));
        assert_eq!(args.max_parallels, Some(5));
    }

    #[test]
    fn test_args_research_options() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "--max-queries",
            "8",
            "--serpapi-key",
            "serp-key",
            "--newsapi-key",
            "news-key",
        ])
        .unwrap();

        assert_eq!(args.max_queries, Some(8));
        assert_eq!(args.serpapi_key, Some("serp-key".to_string()));
        assert_eq!(args.newsapi_key, Some("news-key".to_string()));
    }

    #[test]
    fn test_args_target_language() {
        let args = Args::try_parse_from(&["deepreport-rs", "--target-language", "zh"]).unwrap();

        assert_eq!(args.target_language, Some("zh".to_string()));
    }

    #[test]
    fn test_into_config_basic() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "Rust async runtimes",
            "-o",
            "/test/output",
        ])
        .unwrap();

        let config = args.into_config();

        assert_eq!(config.topic, Some("Rust async runtimes".to_string()));
        assert_eq!(config.output_path, PathBuf::from("/test/output"));
        assert!(!config.force_regenerate);
        assert!(!config.skip_research);
        assert!(!config.skip_compose);
        assert!(!config.verbose);
    }

    #[test]
    fn test_into_config_context_toggles_default_on() {
        let args = Args::try_parse_from(&["deepreport-rs", "Rust async runtimes"]).unwrap();
        let config = args.into_config();

        let context = config.context.unwrap();
        assert_eq!(
            context,
            "Include latest news and current events. \
             Provide technical details and implementation. \
             Include real-world examples and case studies. \
             Analyze future trends and predictions"
        );
    }

    #[test]
    fn test_into_config_free_text_prepended() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "Rust async runtimes",
            "--context",
            "Focus on embedded targets",
            "--no-news",
            "--no-trends",
        ])
        .unwrap();
        let config = args.into_config();

        let context = config.context.unwrap();
        assert_eq!(
            context,
            "Focus on embedded targets. \
             Provide technical details and implementation. \
             Include real-world examples and case studies"
        );
    }

    #[test]
    fn test_into_config_all_toggles_off_and_no_text() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "Rust async runtimes",
            "--no-news",
            "--no-technical",
            "--no-examples",
            "--no-trends",
        ])
        .unwrap();
        let config = args.into_config();

        assert!(config.context.is_none());
    }

    #[test]
    fn test_into_config_with_overrides() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "Edge computing",
            "--skip-research",
            "--force-regenerate",
            "--verbose",
            "--llm-provider",
            "openai",
            "--model-efficient",
            "gpt-4o-mini",
            "--max-queries",
            "6",
        ])
        .unwrap();

        let config = args.into_config();

        assert!(config.skip_research);
        assert!(config.force_regenerate);
        assert!(config.verbose);
        assert_eq!(config.llm.provider, crate::config::LLMProvider::OpenAI);
        assert_eq!(config.llm.model_efficient, "gpt-4o-mini");
        assert_eq!(config.research.max_queries, 6);
    }

    #[test]
    fn test_into_config_model_powerful_falls_back_to_efficient() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "Edge computing",
            "--model-efficient",
            "gpt-4o-mini",
        ])
        .unwrap();

        let config = args.into_config();
        assert_eq!(config.llm.model_powerful, "gpt-4o-mini");
    }

    #[test]
    fn test_into_config_unknown_provider_keeps_default() {
        let args = Args::try_parse_from(&[
            "deepreport-rs",
            "Edge computing",
            "--llm-provider",
            "not-a-provider",
        ])
        .unwrap();

        let config = args.into_config();
        assert_eq!(config.llm.provider, crate::config::LLMProvider::Groq);
    }

    #[test]
    fn test_into_config_no_cache() {
        let args = Args::try_parse_from(&["deepreport-rs", "--no-cache"]).unwrap();

        let config = args.into_config();
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_into_config_run_id_override() {
        let args =
            Args::try_parse_from(&["deepreport-rs", "--run-id", "research_20250101_120000"])
                .unwrap();

        let config = args.into_config();
        assert_eq!(config.run_id, Some("research_20250101_120000".to_string()));
    }
}
