//! Property tests for easing curves.

use morph_core::easing::Easing;
use proptest::prelude::*;

fn any_easing() -> impl Strategy<Value = Easing> {
    prop_oneof![
        Just(Easing::Linear),
        Just(Easing::Ease),
        Just(Easing::EaseIn),
        Just(Easing::EaseOut),
        Just(Easing::EaseInOut),
        (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0)
            .prop_map(|(x1, a, x2, b)| Easing::CubicBezier {
                x1,
                y1: a.min(b),
                x2,
                y2: a.max(b),
            }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn monotonic_when_control_points_are_ordered(easing in any_easing()) {
        let mut prev = 0.0f64;
        for i in 0..=50 {
            let t = i as f64 / 50.0;
            let v = easing.apply(t);
            prop_assert!(v >= prev - 1e-4, "{} not monotonic at t={}", easing, t);
            prop_assert!((-1e-6..=1.0 + 1e-6).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn finite_for_any_input(easing in any_easing(), t in proptest::num::f64::ANY) {
        prop_assert!(easing.apply(t).is_finite());
    }
}
