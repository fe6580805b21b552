//! Property tests for the level curve and the health score.

use maisonvital_core::{
    calculate_health_score, xp_for_next_level, HealthEntry, Severity, TaskStatus, UserProgress,
};
use proptest::prelude::*;

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Critical),
        Just(Severity::Moderate),
        Just(Severity::Minor),
    ]
}

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Ok),
        Just(TaskStatus::Late),
        Just(TaskStatus::Urgent),
    ]
}

fn arb_entry() -> impl Strategy<Value = HealthEntry> {
    (arb_severity(), arb_status()).prop_map(|(severity, status)| HealthEntry { severity, status })
}

/// XP accumulated since level 1.
fn lifetime_xp(progress: &UserProgress) -> u64 {
    (1..progress.level).map(xp_for_next_level).sum::<u64>() + progress.xp
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn add_xp_keeps_level_invariants(grants in prop::collection::vec(0u64..5_000, 1..20)) {
        let mut progress = UserProgress::new();
        let mut total = 0u64;
        for amount in grants {
            let before = progress.level;
            let grant = progress.add_xp(amount);
            total += amount;

            prop_assert!(progress.level >= 1);
            prop_assert!(progress.level >= before);
            prop_assert!(progress.xp < xp_for_next_level(progress.level));
            prop_assert_eq!(grant.next_level_xp, xp_for_next_level(progress.level));
            prop_assert_eq!(grant.levels_gained, progress.level - before);
            prop_assert_eq!(lifetime_xp(&progress), total);
        }
    }

    #[test]
    fn level_curve_is_increasing(level in 1u32..500) {
        prop_assert!(xp_for_next_level(level + 1) > xp_for_next_level(level));
    }

    #[test]
    fn health_score_stays_in_range(entries in prop::collection::vec(arb_entry(), 0..40)) {
        let score = calculate_health_score(&entries);
        prop_assert!(score <= 100);
        if entries.iter().all(|e| e.status == TaskStatus::Ok) {
            prop_assert_eq!(score, 100);
        }
    }

    #[test]
    fn fixing_a_task_never_lowers_health(
        entries in prop::collection::vec(arb_entry(), 1..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let before = calculate_health_score(&entries);
        let mut fixed = entries.clone();
        let i = pick.index(fixed.len());
        fixed[i].status = TaskStatus::Ok;
        prop_assert!(calculate_health_score(&fixed) >= before);
    }
}
