use crate::{SliderOptions, Spacing};

pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

fn nearer_of_pair(position: f64, low: f64, high: f64) -> usize {
    ((position - low) / (high - low)).round() as usize
}

/// Converts between domain values and track percentages for one slider
/// configuration. Percentages returned by [`value_to_percent`] are on a
/// 0..100 scale already corrected for the knob's own footprint.
///
/// [`value_to_percent`]: ValueMapper::value_to_percent
pub struct ValueMapper<'a> {
    floor: f64,
    ceiling: f64,
    options: &'a SliderOptions,
}

impl<'a> ValueMapper<'a> {
    pub fn new(floor: f64, ceiling: f64, options: &'a SliderOptions) -> Self {
        Self {
            floor,
            ceiling,
            options,
        }
    }

    fn span(&self) -> f64 {
        self.ceiling - self.floor
    }

    /// Plain fraction of the domain, no knob correction.
    pub fn to_percent(&self, value: f64) -> f64 {
        (value - self.floor) / self.span()
    }

    pub fn value_to_percent(&self, value: f64, knob_percent: f64, bar: bool) -> f64 {
        let mut fraction = 1.0;

        if self.options.use_values() {
            let values = &self.options.values;
            for i in 0..values.len() - 1 {
                if value >= values[i] && value <= values[i + 1] {
                    let index = i + nearer_of_pair(value, values[i], values[i + 1]);
                    fraction = match self.options.spacing {
                        Spacing::Equal => index as f64 / (values.len() - 1) as f64,
                        Spacing::Relative => (values[index] - self.floor) / self.span(),
                    };
                }
            }
        } else {
            fraction = self.to_percent(value);
        }

        // scale down so the knob stays fully on the track
        let mut percent = fraction * (100.0 - knob_percent);

        if bar {
            // bar edges sit at the middle of the knob
            percent += knob_percent / 2.0;
        }

        percent
    }

    pub fn percent_to_value(&self, percent: f64, floor: f64, ceiling: f64) -> Option<f64> {
        let value = percent * (ceiling - floor) + floor;

        if self.options.use_values() {
            return self.nearest_value(value, floor, ceiling, false);
        }

        Some(value)
    }

    /// Find the nearest permitted value to `position` within `[floor, ceiling]`.
    /// `is_value` forces the relative strategy, used when `position` is already
    /// a domain value rather than an interpolated one.
    pub fn nearest_value(
        &self,
        position: f64,
        floor: f64,
        ceiling: f64,
        is_value: bool,
    ) -> Option<f64> {
        if self.options.is_equal_spacing() && !is_value {
            return self.nearest_equal(position, floor, ceiling);
        }
        self.nearest_relative(position, floor, ceiling)
    }

    fn nearest_equal(&self, position: f64, floor: f64, ceiling: f64) -> Option<f64> {
        let values = &self.options.values;
        let percent = self.to_percent(position);
        let mut index = (percent * (values.len() - 1) as f64).round() as isize;

        while index >= 0 && (index as usize) < values.len() {
            let i = index as usize;
            if values[i] < floor {
                if values.get(i + 1).map_or(false, |&next| next > ceiling) {
                    log::warn!(
                        "no value fits between floor {floor} and ceiling {ceiling} near {position}"
                    );
                    return None;
                }
                index += 1;
            } else if values[i] > ceiling {
                if i > 0 && values[i - 1] < floor {
                    log::warn!(
                        "no value fits between floor {floor} and ceiling {ceiling} near {position}"
                    );
                    return None;
                }
                index -= 1;
            } else {
                return Some(values[i]);
            }
        }

        log::warn!("position {position} does not fit any value in [{floor}, {ceiling}]");
        None
    }

    fn nearest_relative(&self, position: f64, floor: f64, ceiling: f64) -> Option<f64> {
        let values = &self.options.values;

        for i in 0..values.len().saturating_sub(1) {
            let low = values[i];
            let high = values[i + 1];
            if position >= low && position <= high {
                if low < floor && high > ceiling {
                    log::warn!(
                        "bracket [{low}, {high}] straddles both bounds [{floor}, {ceiling}]"
                    );
                    return None;
                }
                if low < floor {
                    return Some(high);
                }
                if high > ceiling {
                    return Some(low);
                }
                return Some(values[i + nearer_of_pair(position, low, high)]);
            }
        }

        let last = *values.last()?;
        if last > ceiling {
            log::warn!("position {position} is past the last value {last} above ceiling {ceiling}");
            return None;
        }
        // past every bracket, settle on the last value
        Some(last)
    }
}
