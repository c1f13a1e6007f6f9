#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.bind.port(), 5000);
        assert_eq!(config.data.records, PathBuf::from("data/results.csv"));
        assert_eq!(config.session.cookie_name, "loanscope_session");
        assert_eq!(config.scoring.radar_general.len(), 5);
    }

    #[test]
    fn test_default_thresholds_ordered() {
        let scoring = ScoringConfig::default();
        assert!(scoring.approve_threshold > scoring.review_threshold);
        let settings = scoring.engine_settings();
        assert_eq!(settings.thresholds.approve, 0.55);
        assert_eq!(settings.thresholds.review, 0.45);
    }

    #[test]
    fn test_partial_sections_fill_in_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            bind = "0.0.0.0:8080"

            [scoring]
            radar_general = ["EXT_SOURCE_2", "AMT_ANNUITY"]
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert_eq!(config.scoring.radar_general, vec!["EXT_SOURCE_2", "AMT_ANNUITY"]);
        assert_eq!(config.scoring.radar_top_n, 5);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let err = Config::from_toml("[scoring]\napprove_threshold = 0.4\nreview_threshold = 0.6\n");
        assert!(err.is_err());
    }
}
