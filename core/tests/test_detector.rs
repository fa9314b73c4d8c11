// core/tests/test_detector.rs
use kicksim_core::{DetectorConfig, KickDetector, KickStream, Sample};

// 1/64 s gir eksakte tider og avstander i f64
const DT: f64 = 1.0 / 64.0;

/// 5 oppvarmings-samples + første trimmede sample i ro, deretter ett sample per fart.
fn with_speeds(speeds: &[f64]) -> Vec<Sample> {
    let mut out: Vec<Sample> = (0..6).map(|i| Sample::new(i as f64 * DT, 0.0, 0.0)).collect();
    let mut x = 0.0;
    for (k, v) in speeds.iter().enumerate() {
        x += v * DT;
        out.push(Sample::new((6 + k) as f64 * DT, x, 0.0));
    }
    out
}

#[test]
fn scenario_a_stationary_points_give_no_kicks() {
    let samples: Vec<Sample> = (0..7).map(|i| Sample::new(i as f64 * 0.01, 50.0, 80.0)).collect();
    let out = KickDetector::default().analyze(&samples);
    assert!(out.events.is_empty());
    assert!(out.peak.is_none());
}

#[test]
fn scenario_b_single_fast_pair_gives_one_kick() {
    // Samme tall som i appen: 20 px på 0.01 s = 2000 px/s
    let mut samples: Vec<Sample> = (0..6).map(|i| Sample::new(i as f64 * 0.01, 0.0, 0.0)).collect();
    samples.push(Sample::new(0.06, 20.0, 0.0));
    samples.push(Sample::new(0.07, 21.0, 0.0));
    samples.push(Sample::new(0.08, 22.0, 0.0));
    samples.push(Sample::new(0.09, 23.0, 0.0));

    let out = KickDetector::default().analyze(&samples);
    assert_eq!(out.events.len(), 1, "forventet nøyaktig ett spark");
    let ev = out.events[0];
    assert_eq!(ev.index, 1);
    assert!((ev.time - 0.06).abs() < 1e-12);
    assert!((ev.speed - 2000.0).abs() < 1e-6, "speed={}", ev.speed);
    assert_eq!(out.peak, Some(ev));
}

#[test]
fn scenario_c_two_bursts_separated_by_slow_motion() {
    let samples = with_speeds(&[2000.0, 100.0, 1500.0, 100.0]);
    let out = KickDetector::default().analyze(&samples);
    let idx: Vec<usize> = out.events.iter().map(|e| e.index).collect();
    assert_eq!(idx, vec![1, 3]);
}

#[test]
fn scenario_d_burst_that_never_cools_down_fires_once() {
    // 500 og 700 ligger mellom tersklene: ingen re-armering
    let samples = with_speeds(&[2000.0, 1500.0, 500.0, 1800.0, 700.0, 3000.0]);
    let out = KickDetector::default().analyze(&samples);
    assert_eq!(out.events.len(), 1);
    assert_eq!(out.events[0].index, 1);
    assert_eq!(out.peak.map(|p| p.index), Some(1));
}

#[test]
fn sustained_run_fires_at_first_pair_of_run() {
    let samples = with_speeds(&[100.0, 300.0, 1200.0, 1300.0, 1400.0, 50.0]);
    let out = KickDetector::default().analyze(&samples);
    assert_eq!(out.events.len(), 1);
    assert_eq!(out.events[0].index, 3);
    assert!((out.events[0].speed - 1200.0).abs() < 1e-9);
}

#[test]
fn six_or_fewer_samples_are_ignored() {
    for n in 0..=6 {
        let samples: Vec<Sample> = (0..n)
            .map(|i| Sample::new(i as f64 * DT, (i * 1000) as f64, 0.0))
            .collect();
        let out = KickDetector::default().analyze(&samples);
        assert!(out.events.is_empty(), "n={n} skal ikke gi spark");
        assert!(out.peak.is_none());
    }
}

#[test]
fn seven_samples_is_enough_for_one_pair() {
    let samples = with_speeds(&[2000.0]);
    assert_eq!(samples.len(), 7);
    let out = KickDetector::default().analyze(&samples);
    assert_eq!(out.events.len(), 1);
}

#[test]
fn warmup_samples_are_discarded() {
    // Store hopp blant de fem første samplene (og inn i første trimmede) teller ikke
    let xs = [0.0, 900.0, 0.0, 900.0, 900.0, 0.0, 0.0, 0.0];
    let samples: Vec<Sample> = xs
        .iter()
        .enumerate()
        .map(|(i, x)| Sample::new(i as f64 * DT, *x, 0.0))
        .collect();
    let out = KickDetector::default().analyze(&samples);
    assert!(out.events.is_empty());
}

#[test]
fn zero_and_negative_dt_pairs_are_skipped_and_do_not_rearm() {
    let mut samples = with_speeds(&[2000.0]);
    let last = *samples.last().unwrap();
    // dt = 0 med stillstand ville ellers re-armert (fart 0 < 400)
    samples.push(Sample::new(last.t, last.x, 0.0));
    // tid bakover
    samples.push(Sample::new(last.t - DT, last.x, 0.0));
    // dt = 0.0005 med stor bevegelse ville ellers vært et spark
    samples.push(Sample::new(last.t - DT + 0.0005, last.x + 500.0, 0.0));
    // ny rask bevegelse: fortsatt cooldown
    samples.push(Sample::new(last.t + DT, last.x + 600.0, 0.0));

    let detector = KickDetector::default();
    let (out, stats) = detector.analyze_with_stats(&samples);
    assert_eq!(out.events.len(), 1);
    assert_eq!(stats.pairs_skipped, 3);
    assert_eq!(stats.pairs_evaluated, 2);
}

#[test]
fn peak_ties_keep_first_event() {
    let samples = with_speeds(&[2000.0, 100.0, 2000.0, 100.0, 1500.0, 100.0]);
    let out = KickDetector::default().analyze(&samples);
    assert_eq!(out.events.len(), 3);
    let peak = out.peak.expect("peak");
    assert_eq!(peak.index, 1);
    assert_eq!(peak.speed, out.events[1].speed);
}

#[test]
fn peak_is_fastest_event() {
    let samples = with_speeds(&[1200.0, 100.0, 2500.0, 100.0, 1800.0, 100.0]);
    let out = KickDetector::default().analyze(&samples);
    assert_eq!(out.peak.map(|p| p.index), Some(3));
}

#[test]
fn analyze_is_idempotent() {
    let samples = with_speeds(&[2000.0, 100.0, 1500.0, 900.0, 50.0, 1100.0]);
    let detector = KickDetector::default();
    let a = detector.analyze(&samples);
    let b = detector.analyze(&samples);
    assert_eq!(a, b);
}

#[test]
fn min_frame_gap_is_off_by_default() {
    let samples = with_speeds(&[2000.0, 100.0, 2000.0]);
    let out = KickDetector::default().analyze(&samples);
    assert_eq!(out.events.len(), 2);
}

#[test]
fn min_frame_gap_suppresses_close_kicks_when_enabled() {
    let samples = with_speeds(&[2000.0, 100.0, 2000.0, 100.0, 100.0, 2000.0]);
    let cfg = DetectorConfig::default().with_min_frame_gap(4);
    let out = KickDetector::new(cfg).analyze(&samples);
    let idx: Vec<usize> = out.events.iter().map(|e| e.index).collect();
    assert_eq!(idx, vec![1, 6]);
}

#[test]
fn custom_thresholds_are_respected() {
    let cfg = DetectorConfig {
        kick_threshold: 250.0,
        cooldown_speed: 50.0,
        ..DetectorConfig::default()
    };
    let samples = with_speeds(&[300.0, 100.0, 300.0, 40.0, 300.0]);
    let out = KickDetector::new(cfg).analyze(&samples);
    let idx: Vec<usize> = out.events.iter().map(|e| e.index).collect();
    assert_eq!(idx, vec![1, 5]);
}

#[test]
fn stream_matches_batch_analysis() {
    let cases = vec![
        with_speeds(&[2000.0, 100.0, 1500.0, 100.0]),
        with_speeds(&[2000.0, 1500.0, 500.0, 1800.0, 700.0]),
        with_speeds(&[100.0, 100.0]),
        with_speeds(&[]),
    ];
    for samples in cases {
        let batch = KickDetector::default().analyze(&samples);

        let mut stream = KickStream::new(DetectorConfig::default());
        let mut live = Vec::new();
        for s in &samples {
            live.extend(stream.push(*s));
        }
        assert_eq!(live, batch.events);
        assert_eq!(stream.finish(), batch);
    }
}

#[test]
fn stream_holds_back_kicks_until_min_samples_passed() {
    let cfg = DetectorConfig {
        warmup_samples: 0,
        ..DetectorConfig::default()
    };
    let mut samples = vec![Sample::new(0.0, 0.0, 0.0), Sample::new(DT, 31.25, 0.0)];
    for i in 2..7 {
        samples.push(Sample::new(i as f64 * DT, 31.25, 0.0));
    }

    let mut stream = KickStream::new(cfg.clone());
    for s in &samples[..6] {
        assert!(stream.push(*s).is_empty());
    }
    let released = stream.push(samples[6]);
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].index, 1);

    // Med bare seks samples gir både batch og strøm tomt resultat
    let short = &samples[..6];
    assert!(KickDetector::new(cfg.clone()).analyze(short).events.is_empty());
    let mut s2 = KickStream::new(cfg);
    for s in short {
        s2.push(*s);
    }
    assert!(s2.finish().events.is_empty());
}
