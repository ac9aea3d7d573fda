use multislider_core::{round_to_precision, SliderOptions, Spacing, ValueMapper};

fn options_with_values(values: Vec<f64>, spacing: Spacing) -> SliderOptions {
    SliderOptions {
        values,
        spacing,
        ..SliderOptions::default()
    }
}

#[test]
fn continuous_round_trip() {
    let options = SliderOptions::default();
    let mapper = ValueMapper::new(0.0, 10.0, &options);

    for value in [0.0, 1.0, 2.5, 5.0, 7.3, 10.0] {
        let percent = mapper.value_to_percent(value, 0.0, false) / 100.0;
        let back = mapper.percent_to_value(percent, 0.0, 10.0).unwrap();
        assert!((back - value).abs() < 1e-9, "{value} round-tripped to {back}");
    }
}

#[test]
fn to_percent_is_plain_fraction() {
    let options = SliderOptions::default();
    let mapper = ValueMapper::new(0.0, 10.0, &options);
    assert_eq!(mapper.to_percent(2.5), 0.25);
    assert_eq!(mapper.to_percent(10.0), 1.0);
}

#[test]
fn knob_size_correction() {
    let options = SliderOptions::default();
    let mapper = ValueMapper::new(0.0, 10.0, &options);

    // half way along a track where the knob occupies 10%
    assert_eq!(mapper.value_to_percent(5.0, 10.0, false), 45.0);
    // a bar edge gets half the knob width back
    assert_eq!(mapper.value_to_percent(5.0, 10.0, true), 50.0);
}

#[test]
fn relative_nearest_rounds_to_nearer_neighbor() {
    let options = options_with_values(vec![0.0, 5.0, 10.0], Spacing::Relative);
    let mapper = ValueMapper::new(0.0, 10.0, &options);

    // 3 is past the bracket midpoint, so it lands on 5
    assert_eq!(mapper.nearest_value(3.0, 0.0, 10.0, false), Some(5.0));
    assert_eq!(mapper.nearest_value(2.0, 0.0, 10.0, false), Some(0.0));
    assert_eq!(mapper.nearest_value(7.4, 0.0, 10.0, false), Some(5.0));
    assert_eq!(mapper.nearest_value(7.6, 0.0, 10.0, false), Some(10.0));
}

#[test]
fn relative_nearest_clamps_to_bounds() {
    let options = options_with_values(vec![0.0, 5.0, 10.0], Spacing::Relative);
    let mapper = ValueMapper::new(0.0, 10.0, &options);

    // bracket low edge is below the effective floor
    assert_eq!(mapper.nearest_value(3.0, 2.0, 10.0, false), Some(5.0));
    // bracket high edge is above the effective ceiling
    assert_eq!(mapper.nearest_value(9.0, 0.0, 8.0, false), Some(5.0));
}

#[test]
fn relative_nearest_past_last_value() {
    let options = options_with_values(vec![0.0, 5.0, 10.0], Spacing::Relative);
    let mapper = ValueMapper::new(0.0, 10.0, &options);

    assert_eq!(mapper.nearest_value(12.0, 0.0, 10.0, false), Some(10.0));
    // the last value itself exceeds the ceiling, so nothing fits
    assert_eq!(mapper.nearest_value(12.0, 0.0, 8.0, false), None);
}

#[test]
fn relative_nearest_straddling_bracket_fails() {
    let options = options_with_values(vec![0.0, 10.0], Spacing::Relative);
    let mapper = ValueMapper::new(0.0, 10.0, &options);

    assert_eq!(mapper.nearest_value(5.0, 2.0, 8.0, false), None);
}

#[test]
fn equal_nearest_uses_index_spacing() {
    let options = options_with_values(vec![0.0, 1.0, 100.0], Spacing::Equal);
    let mapper = ValueMapper::new(0.0, 100.0, &options);

    // half way along the track is index 1 under equal spacing
    assert_eq!(mapper.nearest_value(50.0, 0.0, 100.0, false), Some(1.0));
}

#[test]
fn equal_nearest_scans_past_excluded_values() {
    let options = options_with_values(vec![0.0, 1.0, 100.0], Spacing::Equal);
    let mapper = ValueMapper::new(0.0, 100.0, &options);

    // both low values sit below the effective floor, the scan walks up
    assert_eq!(mapper.nearest_value(0.0, 2.0, 100.0, false), Some(100.0));
}

#[test]
fn equal_nearest_reports_no_fit() {
    let options = options_with_values(vec![0.0, 1.0, 2.0], Spacing::Equal);
    let mapper = ValueMapper::new(0.0, 2.0, &options);

    // nothing lies between the effective bounds
    assert_eq!(mapper.nearest_value(1.5, 1.2, 1.8, false), None);
}

#[test]
fn is_value_forces_relative_strategy() {
    let options = options_with_values(vec![0.0, 1.0, 100.0], Spacing::Equal);
    let mapper = ValueMapper::new(0.0, 100.0, &options);

    // equal spacing would pick index 1, bracket rounding picks 100
    assert_eq!(mapper.nearest_value(60.0, 0.0, 100.0, false), Some(1.0));
    assert_eq!(mapper.nearest_value(60.0, 0.0, 100.0, true), Some(100.0));
}

#[test]
fn percent_to_value_snaps_discrete_domains() {
    let options = options_with_values(vec![0.0, 5.0, 10.0], Spacing::Relative);
    let mapper = ValueMapper::new(0.0, 10.0, &options);

    assert_eq!(mapper.percent_to_value(0.3, 0.0, 10.0), Some(5.0));
    assert_eq!(mapper.percent_to_value(0.1, 0.0, 10.0), Some(0.0));
}

#[test]
fn discrete_value_to_percent_by_spacing() {
    let equal = options_with_values(vec![0.0, 5.0, 10.0], Spacing::Equal);
    let mapper = ValueMapper::new(0.0, 10.0, &equal);
    assert_eq!(mapper.value_to_percent(5.0, 0.0, false), 50.0);

    let relative = options_with_values(vec![0.0, 2.0, 10.0], Spacing::Relative);
    let mapper = ValueMapper::new(0.0, 10.0, &relative);
    assert_eq!(mapper.value_to_percent(2.0, 0.0, false), 20.0);
}

#[test]
fn precision_rounding() {
    assert_eq!(round_to_precision(7.456, 2), 7.46);
    assert_eq!(round_to_precision(7.5, 0), 8.0);
    assert_eq!(round_to_precision(7.449, 1), 7.4);
    assert_eq!(round_to_precision(3.0, 3), 3.0);
}
