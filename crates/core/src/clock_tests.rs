// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_monotonic() {
    let clock = SystemClock;
    let t1 = clock.now();
    let t2 = clock.now();
    assert!(t2 >= t1);
}

#[test]
fn fake_clock_elapsed_tracks_advance() {
    let clock = FakeClock::new();
    let start = clock.now();
    clock.advance(Duration::from_millis(1500));
    assert_eq!(clock.elapsed_ms(start), 1500);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let start = clock1.now();
    clock2.advance(Duration::from_secs(30));
    assert_eq!(clock1.elapsed_ms(start), 30_000);
}

#[test]
fn elapsed_saturates_for_future_start() {
    let clock = FakeClock::new();
    let future = clock.now() + Duration::from_secs(5);
    assert_eq!(clock.elapsed_ms(future), 0);
}
