// Proptest generators for setups

use chrono::DateTime;
use proptest::collection::vec;
use proptest::prelude::*;
use uuid::Uuid;

use super::{SetupDraft, SetupRecord, TrackCondition};

pub(crate) fn arb_condition() -> impl Strategy<Value = TrackCondition> {
    prop_oneof![
        Just(TrackCondition::Loamy),
        Just(TrackCondition::HardPack),
        Just(TrackCondition::Sandy),
        Just(TrackCondition::Muddy),
        Just(TrackCondition::Mixed),
    ]
}

/// Any finite, non-negative value: realistic magnitudes plus the full bit range
fn arb_measurement() -> impl Strategy<Value = f64> {
    use proptest::num::f64::{NORMAL, POSITIVE, SUBNORMAL, ZERO};

    prop_oneof![0.0f64..1e6, POSITIVE | NORMAL | SUBNORMAL | ZERO]
        .prop_filter("finite", |value| value.is_finite())
}

pub(crate) fn arb_draft() -> impl Strategy<Value = SetupDraft> {
    (
        "[A-Za-z][A-Za-z ]{0,15}",
        arb_condition(),
        proptest::option::of("[A-Za-z ]{1,10}"),
        (0u32..40, 0u32..40, 0u32..40, 0u32..40),
        (
            arb_measurement(),
            arb_measurement(),
            arb_measurement(),
            arb_measurement(),
            arb_measurement(),
        ),
        "[a-z ]{0,30}",
        vec("[A-Za-z][A-Za-z ]{0,10}", 0..4),
    )
        .prop_map(
            |(
                track_name,
                conditions,
                weather,
                (front_compression, front_rebound, rear_low_speed_compression, rear_rebound),
                (front_sag, front_tire_pressure, rear_high_speed_compression, rear_sag, rear_tire_pressure),
                notes,
                tags,
            )| SetupDraft {
                track_name,
                conditions,
                weather,
                front_compression,
                front_rebound,
                front_sag,
                front_tire_pressure,
                rear_high_speed_compression,
                rear_low_speed_compression,
                rear_rebound,
                rear_sag,
                rear_tire_pressure,
                notes,
                tags,
            },
        )
}

pub(crate) fn arb_record() -> impl Strategy<Value = SetupRecord> {
    (any::<u128>(), 0i64..4_000_000_000, 0u32..1_000_000_000, arb_draft()).prop_map(
        |(id, secs, nanos, draft)| {
            let created_at = DateTime::from_timestamp(secs, nanos).unwrap();
            SetupRecord::with_identity(Uuid::from_u128(id), created_at, draft).unwrap()
        },
    )
}

/// Collection with distinct ids
pub(crate) fn arb_collection(max_len: usize) -> impl Strategy<Value = Vec<SetupRecord>> {
    vec(arb_record(), 0..max_len).prop_map(|records| {
        let mut seen = std::collections::HashSet::new();
        records
            .into_iter()
            .filter(|record| seen.insert(record.id()))
            .collect()
    })
}
