#![allow(dead_code, unused)]
#![cfg(all(feature = "derive", feature = "std"))]

use chrono::{DateTime, Utc};

use tachograph::avec::{FromRecord, FromRecords};
use tachograph::sans::gps::GpsFix;

#[test]
fn decode_slice_commute() {
    const PATH: &str = "fixtures/morning-commute.avl";
    let data = std::fs::read(PATH).unwrap();
    let mut journey = Journey::default();
    tachograph::avec::decode_slice(&data, &mut journey).unwrap();

    assert_eq!(journey.positions.len(), 4);

    let first = &journey.positions[0];
    assert_eq!(
        first.timestamp,
        DateTime::from_timestamp_millis(1_185_345_998_335)
    );
    assert_eq!(first.priority, Some(0));
    assert_eq!(first.event, Some(0));
    assert_eq!(first.ignition, Some(1));
    assert_eq!(first.signal_strength, Some(3));
    assert_eq!(first.counter, Some(349));
    assert_eq!(first.fix.unwrap().satellites, 4);

    let third = &journey.positions[2];
    assert_eq!(third.signal_strength, Some(0));
    assert_eq!(third.fix.unwrap().speed, 0);
}

#[derive(Debug, Default, FromRecords)]
struct Journey {
    #[record]
    positions: Vec<Position>,
}

#[derive(Debug, Default, FromRecord)]
struct Position {
    #[io(timestamp)]
    timestamp: Option<DateTime<Utc>>,
    #[io(priority)]
    priority: Option<u8>,
    #[io(gps)]
    fix: Option<GpsFix>,
    #[io(event)]
    event: Option<u8>,
    #[io(1)]
    ignition: Option<u8>,
    #[io(21)]
    signal_strength: Option<u8>,
    #[io(70)]
    counter: Option<u32>,
}

#[test]
fn decode_slice_latest_position() {
    const PATH: &str = "fixtures/morning-commute.avl";
    let data = std::fs::read(PATH).unwrap();
    let mut latest = Latest::default();
    tachograph::avec::decode_slice(&data, &mut latest).unwrap();

    // Earlier records are overwritten; only the last remains.
    let position = latest.position.unwrap();
    assert_eq!(
        position.timestamp,
        DateTime::from_timestamp_millis(1_185_346_387_035)
    );
    assert_eq!(position.counter, Some(347));
}

#[derive(Debug, Default, FromRecords)]
struct Latest {
    #[record]
    position: Option<Position>,
}

#[test]
fn accumulate_repeated_identifiers() {
    let mut data = vec![0x08, 0x01];
    data.extend_from_slice(&[0; 8]); // Timestamp.
    data.push(0); // Priority.
    data.extend_from_slice(&[0; 15]); // Positioning fix.
    data.extend_from_slice(&[0, 2]); // Event identifier, element total.
    data.extend_from_slice(&[2, 155, 1, 155, 2]); // One-byte tier.
    data.extend_from_slice(&[0, 0, 0]); // Remaining tiers.

    let mut crossings = Crossings::default();
    tachograph::avec::decode_slice(&data, &mut crossings).unwrap();

    assert_eq!(crossings.record.unwrap().zones, vec![1, 2]);
}

#[derive(Debug, Default, FromRecords)]
struct Crossings {
    #[record]
    record: Option<Zones>,
}

#[derive(Debug, Default, FromRecord)]
struct Zones {
    #[io(155, |v, z: u8| v.push(z))]
    zones: Vec<u8>,
}
