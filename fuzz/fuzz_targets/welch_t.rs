#![no_main]

use libfuzzer_sys::fuzz_target;

use fuga::input::InputClass;
use fuga::statistics::{welch_t, SampleSet};

fuzz_target!(|data: (Vec<f64>, Vec<f64>)| {
    let (x, y) = data;

    // Restrict to the domain real collections produce: finite, nonnegative
    // durations in seconds, bounded well below f64 overflow territory
    let clean = |values: Vec<f64>| -> Vec<f64> {
        values
            .into_iter()
            .filter(|s| s.is_finite() && *s >= 0.0 && *s < 1e6)
            .collect()
    };
    let x = clean(x);
    let y = clean(y);
    if x.len() < 2 || y.len() < 2 {
        return;
    }

    let xs = SampleSet::new(InputClass::Fixed, x).expect("length checked above");
    let ys = SampleSet::new(InputClass::Random, y).expect("length checked above");

    // No panic, no NaN, no sign surprises, no asymmetry
    let t = welch_t(&xs, &ys);
    assert!(t.is_finite());
    assert!(t >= 0.0);
    assert_eq!(t, welch_t(&ys, &xs));

    let stats = xs.stats();
    assert!(stats.variance >= 0.0);
    assert!(stats.min <= stats.max);
});
