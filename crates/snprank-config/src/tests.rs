#[cfg(test)]
mod tests {
    use super::super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_gamma() {
        let config = SnpRankConfig::default();
        assert_eq!(config.ranking.gamma, 0.85);
        assert_eq!(config.ranking.max_iterations, None);
        assert_eq!(config.backend.kind, BackendKind::Cpu);
        assert_eq!(config.output.format, OutputFormat::Tsv);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = SnpRankConfig::from_toml_str("").unwrap();
        assert_eq!(config, SnpRankConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = SnpRankConfig::from_toml_str(
            r#"
            [ranking]
            gamma = 0.5
            max_iterations = 1000

            [backend]
            kind = "accelerated"

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.ranking.gamma, 0.5);
        assert_eq!(config.ranking.max_iterations, Some(1000));
        assert_eq!(config.backend.kind, BackendKind::Accelerated);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_zero_max_iterations_rejected() {
        let err = SnpRankConfig::from_toml_str("[ranking]\nmax_iterations = 0\n").unwrap_err();
        assert!(matches!(err, SnpRankError::Config(_)));
    }

    #[test]
    fn test_non_finite_gamma_rejected() {
        let mut config = SnpRankConfig::default();
        config.ranking.gamma = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unconventional_gamma_accepted() {
        let mut config = SnpRankConfig::default();
        config.ranking.gamma = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = SnpRankConfig::from_toml_str("[backend]\nkind = \"tpu\"\n").unwrap_err();
        assert!(matches!(err, SnpRankError::Config(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ranking]\ngamma = 0.7").unwrap();
        let config = SnpRankConfig::from_path(file.path()).unwrap();
        assert_eq!(config.ranking.gamma, 0.7);
    }

    #[test]
    fn test_from_missing_path() {
        let err = SnpRankConfig::from_path("/nonexistent/snprank.toml").unwrap_err();
        assert!(matches!(err, SnpRankError::Config(_)));
    }

    #[test]
    fn test_parse_enums_from_str() {
        assert_eq!("GPU".parse::<BackendKind>(), Ok(BackendKind::Accelerated));
        assert_eq!("cpu".parse::<BackendKind>(), Ok(BackendKind::Cpu));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
