//! Tests for builder settings loading and validation

#[cfg(test)]
mod tests {
    use minesetter::MinesetterError;
    use minesetter::algorithm::conditions::ConditionKind;
    use minesetter::builder::settings::{BuilderSettings, CountRange};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;

    // Tests the defaults are valid and allow every condition kind
    // Verified by defaulting the win window to an inverted range
    #[test]
    fn test_default_settings_valid() {
        let settings = BuilderSettings::default();
        assert!(settings.validate().is_ok());
        assert!(ConditionKind::ALL.iter().all(|&kind| settings.allows(kind)));
        assert_eq!(settings.stop_after, 1);
    }

    // Tests samples stay inside the range and degenerate ranges are fixed
    // Verified by sampling with an exclusive upper bound
    #[test]
    fn test_count_range_sample() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = CountRange::new(2, 4);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let value = range.sample(&mut rng);
            assert!((2..=4).contains(&value));
            seen[value] = true;
        }
        assert!(seen[4], "upper bound is inclusive");
        assert_eq!(CountRange::exactly(3).sample(&mut rng), 3);
    }

    // Tests minimums exceeding the largest grid are infeasible
    // Verified by comparing against the smallest grid instead
    #[test]
    fn test_infeasible_minimums() {
        let settings = BuilderSettings {
            grid_columns: CountRange::new(2, 3),
            grid_rows: CountRange::new(2, 3),
            blocks: Some(CountRange::new(4, 4)),
            normal_bombs: Some(CountRange::new(6, 6)),
            ..BuilderSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.to_string(), "Config Error: Min Elements (10) > Grid Area (9)");

        let disabled = BuilderSettings {
            blocks: None,
            ..settings
        };
        assert!(disabled.validate().is_ok());
    }

    // Tests malformed ranges and windows are rejected
    // Verified by skipping the min ≤ max check on count ranges
    #[test]
    fn test_invalid_ranges() {
        let inverted = BuilderSettings {
            power_bombs: Some(CountRange::new(3, 1)),
            ..BuilderSettings::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(MinesetterError::InvalidParameter { parameter: "powerBombs", .. })
        ));

        let window = BuilderSettings {
            min_win_percent: 40.0,
            max_win_percent: 20.0,
            ..BuilderSettings::default()
        };
        assert!(window.validate().is_err());

        let out_of_bounds = BuilderSettings {
            max_win_percent: 120.0,
            ..BuilderSettings::default()
        };
        assert!(out_of_bounds.validate().is_err());

        let no_stop = BuilderSettings {
            stop_after: 0,
            ..BuilderSettings::default()
        };
        assert!(no_stop.validate().is_err());
    }

    // Tests partial JSON files fill the rest from defaults
    // Verified by removing the struct-level serde default
    #[test]
    fn test_load_partial_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"minWinPercent": 5, "maxWinPercent": 15, "negativeBombs": {"min": 1, "max": 2},
                "allowedConditions": ["getScore", "setSwitches"], "maxAttempts": 9}"#,
        )
        .unwrap();

        let settings = BuilderSettings::load(&path).unwrap();
        assert!((settings.min_win_percent - 5.0).abs() < f64::EPSILON);
        assert_eq!(settings.negative_bombs, Some(CountRange::new(1, 2)));
        assert!(settings.allows(ConditionKind::SwitchState));
        assert!(!settings.allows(ConditionKind::CellEquals));
        assert_eq!(settings.max_attempts, Some(9));
        assert_eq!(settings.grid_columns, CountRange::new(4, 5));
    }

    // Tests missing and malformed files carry their path
    // Verified by returning a bare I/O error
    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            BuilderSettings::load(&missing),
            Err(MinesetterError::FileSystem { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            BuilderSettings::load(&broken),
            Err(MinesetterError::Serialization { path, .. }) if path == broken
        ));
    }
}
