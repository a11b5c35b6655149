use earmark_core::models::audiogram::{Audiogram, ThresholdChange};
use earmark_core::models::ear::Ear;
use earmark_core::models::report::HearingReport;
use earmark_core::models::threshold::{Frequency, HearingLevel, ThresholdSet};

#[test]
fn frequency_labels_use_kilohertz_above_one_thousand() {
    assert_eq!(Frequency(125).label(), "125");
    assert_eq!(Frequency(750).label(), "750");
    assert_eq!(Frequency(1000).label(), "1k");
    assert_eq!(Frequency(1500).label(), "1.5k");
    assert_eq!(Frequency(8000).label(), "8k");
}

#[test]
fn threshold_set_iterates_in_ascending_frequency() {
    let set: ThresholdSet = [
        (Frequency(4000), HearingLevel(40)),
        (Frequency(250), HearingLevel(10)),
        (Frequency(1000), HearingLevel(25)),
    ]
    .into_iter()
    .collect();

    let order: Vec<u32> = set.iter().map(|(f, _)| f.hz()).collect();
    assert_eq!(order, vec![250, 1000, 4000]);
}

#[test]
fn setting_same_frequency_overwrites() {
    let mut set = ThresholdSet::new();
    assert_eq!(set.set(Frequency(1000), HearingLevel(20)), None);
    assert_eq!(
        set.set(Frequency(1000), HearingLevel(35)),
        Some(HearingLevel(20))
    );
    assert_eq!(set.len(), 1);
    assert_eq!(set.get(Frequency(1000)), Some(HearingLevel(35)));
}

#[test]
fn apply_touches_only_the_named_ear() {
    let mut audiogram = Audiogram::default();
    audiogram.right.set(Frequency(500), HearingLevel(15));

    audiogram.apply(&ThresholdChange::set(
        Ear::Left,
        Frequency(500),
        HearingLevel(30),
    ));
    assert_eq!(audiogram.left.get(Frequency(500)), Some(HearingLevel(30)));
    assert_eq!(audiogram.right.get(Frequency(500)), Some(HearingLevel(15)));

    let previous = audiogram.apply(&ThresholdChange::clear(Ear::Left, Frequency(500)));
    assert_eq!(previous, Some(HearingLevel(30)));
    assert!(audiogram.left.is_empty());
    assert_eq!(audiogram.right.len(), 1);
}

#[test]
fn threshold_set_serializes_as_frequency_keyed_object() {
    let set: ThresholdSet = [(Frequency(1000), HearingLevel(20))].into_iter().collect();
    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json, serde_json::json!({ "1000": 20 }));

    let back: ThresholdSet = serde_json::from_value(json).unwrap();
    assert_eq!(back, set);
}

#[test]
fn report_without_audiogram_deserializes_empty() {
    let json = r#"{
        "id": "6f1c1f43-5d0b-4a57-9b0e-6a1f2a3b4c5d",
        "client_id": "0d7a3c2e-1111-4a57-9b0e-6a1f2a3b4c5d",
        "test_date": "2026-03-14",
        "audiologist": null,
        "notes": null,
        "created_at": "2026-03-14T09:00:00Z",
        "updated_at": "2026-03-14T09:00:00Z"
    }"#;

    let report = HearingReport::from_json(json.as_bytes()).unwrap();
    assert!(report.audiogram.left.is_empty());
    assert!(report.audiogram.right.is_empty());
}

#[test]
fn report_apply_bumps_updated_at() {
    let created: jiff::Timestamp = "2026-03-14T09:00:00Z".parse().unwrap();
    let later: jiff::Timestamp = "2026-03-14T09:05:00Z".parse().unwrap();
    let mut report = HearingReport::new(
        uuid::Uuid::new_v4(),
        jiff::civil::date(2026, 3, 14),
        created,
    );

    report.apply(
        &ThresholdChange::set(Ear::Right, Frequency(2000), HearingLevel(45)),
        later,
    );

    assert_eq!(report.updated_at, later);
    assert_eq!(report.created_at, created);
    assert_eq!(
        report.audiogram.right.get(Frequency(2000)),
        Some(HearingLevel(45))
    );
}
