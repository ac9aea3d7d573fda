use std::collections::HashMap;

use crate::knobs::{KnobId, Slider};
use crate::mapper::round_to_precision;

/// Track origin and length along the active axis. The caller picks the x
/// or y coordinate depending on the slider's `vertical` option.
#[derive(Debug, Clone, Copy)]
pub struct TrackGeometry {
    pub offset: f64,
    pub size: f64,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    knobs: Vec<KnobId>,
    start_offsets: Vec<f64>,
}

/// Per-pointer drag state. One entry per touch identifier, so independent
/// touches move their knobs without interfering.
#[derive(Debug, Default)]
pub struct Gestures {
    active: HashMap<u64, ActiveDrag>,
}

impl Gestures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sliding(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn start_knob(
        &mut self,
        slider: &mut Slider,
        pointer: u64,
        knob: KnobId,
        pointer_pos: f64,
        track: TrackGeometry,
    ) {
        if slider.is_disabled() {
            return;
        }
        if slider.knob(knob).map_or(true, |k| !k.enabled) {
            return;
        }
        self.active.insert(
            pointer,
            ActiveDrag {
                knobs: vec![knob],
                start_offsets: vec![0.0],
            },
        );
        slider.begin_drag(knob);
        self.move_to(slider, pointer, pointer_pos, track);
    }

    /// Grab both knobs flanking a bar so they move as a rigid pair.
    pub fn start_bar(
        &mut self,
        slider: &mut Slider,
        pointer: u64,
        bar_index: usize,
        pointer_pos: f64,
        track: TrackGeometry,
    ) {
        if slider.is_disabled() {
            return;
        }
        let bars = slider.bars();
        let Some(bar) = bars.get(bar_index) else {
            return;
        };
        let knobs: Vec<KnobId> = [bar.low_knob, bar.high_knob]
            .into_iter()
            .flatten()
            .collect();
        if knobs.is_empty() {
            return;
        }

        let start_offsets = if knobs.len() > 1 {
            let cursor = pointer_pos - track.offset;
            knobs
                .iter()
                .map(|&id| knob_track_position(slider, id, track) - cursor)
                .collect()
        } else {
            vec![0.0]
        };

        for &id in &knobs {
            slider.begin_drag(id);
        }
        self.active.insert(
            pointer,
            ActiveDrag {
                knobs,
                start_offsets,
            },
        );
        self.move_to(slider, pointer, pointer_pos, track);
    }

    pub fn move_to(
        &mut self,
        slider: &mut Slider,
        pointer: u64,
        pointer_pos: f64,
        track: TrackGeometry,
    ) {
        let Some(drag) = self.active.get(&pointer).cloned() else {
            return;
        };
        let position = pointer_pos - track.offset;

        for (i, &id) in drag.knobs.iter().enumerate() {
            let Some(knob) = slider.knob(id) else {
                continue;
            };
            let knob_size = knob.size;
            let span = track.size - knob_size;
            if span <= 0.0 {
                continue;
            }
            let percent =
                ((position + drag.start_offsets[i] - knob_size / 2.0) / span).clamp(0.0, 1.0);
            let value = percent * (slider.ceiling() - slider.floor()) + slider.floor();
            let value = round_to_precision(value, slider.options().precision);
            slider.set_value(id, value);
        }
    }

    pub fn end(&mut self, slider: &mut Slider, pointer: u64) {
        if let Some(drag) = self.active.remove(&pointer) {
            for id in drag.knobs {
                slider.end_drag(id);
            }
        }
    }

    /// End any drag holding this knob, used when the knob is disabled
    /// mid-gesture.
    pub fn end_for_knob(&mut self, slider: &mut Slider, knob: KnobId) {
        let pointers: Vec<u64> = self
            .active
            .iter()
            .filter(|(_, drag)| drag.knobs.contains(&knob))
            .map(|(&pointer, _)| pointer)
            .collect();
        for pointer in pointers {
            self.end(slider, pointer);
        }
    }

    pub fn cancel_all(&mut self, slider: &mut Slider) {
        let pointers: Vec<u64> = self.active.keys().copied().collect();
        for pointer in pointers {
            self.end(slider, pointer);
        }
    }
}

fn knob_track_position(slider: &Slider, id: KnobId, track: TrackGeometry) -> f64 {
    let Some(knob) = slider.knob(id) else {
        return 0.0;
    };
    let knob_percent = if track.size > 0.0 {
        knob.size / track.size * 100.0
    } else {
        0.0
    };
    let percent = slider.mapper().value_to_percent(knob.value, knob_percent, false);
    percent / 100.0 * track.size
}
