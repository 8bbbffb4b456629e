//! Tests for solve and generation progress display

#[cfg(test)]
mod tests {
    use minesetter::builder::generation::AttemptPhase;
    use minesetter::io::progress::ProgressManager;
    use minesetter::io::wire::SolverMessage;
    use num_bigint::BigUint;

    // Tests a full solve message stream drives the bar without panicking
    // Verified by indexing progress with an unclamped percentage
    #[test]
    fn test_progress_manager_solve_stream() {
        let pm = ProgressManager::new();
        pm.start_solve("level.json");
        pm.handle_message(&SolverMessage::Estimate {
            total_combinations: BigUint::from(10_u32).pow(30),
        });
        pm.handle_message(&SolverMessage::Progress { percent: 40 });
        pm.set_percent(250);
        pm.handle_message(&SolverMessage::Error {
            message: "stopped".to_string(),
        });
        pm.finish();
    }

    // Tests default trait implementation matches new
    // Verified by creating the level bar eagerly in default
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();
        pm.level_accepted(12.5);
        pm.track_levels(2);
        pm.level_accepted(12.5);
        pm.finish();
    }

    // Tests generation phases and accepted levels update both bars
    // Verified by resetting the level bar on every phase change
    #[test]
    fn test_progress_manager_generation() {
        let mut pm = ProgressManager::new();
        pm.track_levels(3);
        for attempt in 1..=2 {
            pm.set_phase(attempt, AttemptPhase::FullScan);
            pm.set_estimate(&BigUint::from(500_u32));
            pm.set_percent(100);
            pm.set_phase(attempt, AttemptPhase::Verifying);
        }
        pm.level_accepted(25.0);
        pm.finish();
    }
}
