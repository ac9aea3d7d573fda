use std::time::{Duration, Instant};

use crate::mapper::{round_to_precision, ValueMapper};
use crate::{SliderConfigError, SliderOptions};

pub type KnobId = u64;

const REFRESH_DELAY: Duration = Duration::from_millis(25);
const MAX_NORMALIZE_PASSES: usize = 8;

#[derive(Debug, Clone)]
pub struct Knob {
    pub id: KnobId,
    pub value: f64,
    pub enabled: bool,
    /// On-track size in pixels, used to correct percent offsets.
    pub size: f64,
    pub dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub low: f64,
    pub high: f64,
    pub low_knob: Option<KnobId>,
    pub high_knob: Option<KnobId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliderEvent {
    Changed { knob: KnobId, value: f64 },
    DragStarted { knob: KnobId },
    DragEnded { knob: KnobId },
}

/// Single-slot deferred refresh. Scheduling replaces any pending deadline,
/// so only the most recent request ever fires.
#[derive(Debug)]
pub struct RefreshDebounce {
    deadline: Option<Instant>,
    delay: Duration,
}

impl RefreshDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            deadline: None,
            delay,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct Slider {
    configured_floor: f64,
    configured_ceiling: f64,
    floor: f64,
    ceiling: f64,
    options: SliderOptions,
    disabled: bool,
    knobs: Vec<Knob>,
    next_id: KnobId,
    events: Vec<SliderEvent>,
    refresh: RefreshDebounce,
}

fn resolve_bounds(
    floor: f64,
    ceiling: f64,
    options: &SliderOptions,
) -> Result<(f64, f64), SliderConfigError> {
    if !floor.is_finite() || !ceiling.is_finite() {
        return Err(SliderConfigError::NonFiniteBound);
    }
    // an explicit value list overrides the configured bounds
    let (floor, ceiling) = match (options.values.first(), options.values.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => (floor, ceiling),
    };
    if floor > ceiling {
        return Err(SliderConfigError::InvertedBounds { floor, ceiling });
    }
    Ok((floor, ceiling))
}

impl Slider {
    pub fn new(floor: f64, ceiling: f64, options: SliderOptions) -> Result<Self, SliderConfigError> {
        options.validate()?;
        let (resolved_floor, resolved_ceiling) = resolve_bounds(floor, ceiling, &options)?;
        Ok(Self {
            configured_floor: floor,
            configured_ceiling: ceiling,
            floor: resolved_floor,
            ceiling: resolved_ceiling,
            options,
            disabled: false,
            knobs: Vec::new(),
            next_id: 1,
            events: Vec::new(),
            refresh: RefreshDebounce::new(REFRESH_DELAY),
        })
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn knobs(&self) -> &[Knob] {
        &self.knobs
    }

    pub fn knob(&self, id: KnobId) -> Option<&Knob> {
        self.knobs.iter().find(|knob| knob.id == id)
    }

    pub fn mapper(&self) -> ValueMapper<'_> {
        ValueMapper::new(self.floor, self.ceiling, &self.options)
    }

    pub fn register_knob(&mut self, value: f64) -> KnobId {
        self.register_knob_with_size(value, 0.0)
    }

    pub fn register_knob_with_size(&mut self, value: f64, size: f64) -> KnobId {
        let id = self.next_id;
        self.next_id += 1;
        self.knobs.push(Knob {
            id,
            value,
            enabled: true,
            size,
            dragging: false,
        });
        self.sort_knobs();
        self.set_value(id, value);
        self.request_refresh();
        id
    }

    pub fn unregister_knob(&mut self, id: KnobId) -> bool {
        let before = self.knobs.len();
        self.knobs.retain(|knob| knob.id != id);
        if self.knobs.len() == before {
            return false;
        }
        self.request_refresh();
        true
    }

    pub fn set_knob_size(&mut self, id: KnobId, size: f64) {
        if let Some(knob) = self.knobs.iter_mut().find(|knob| knob.id == id) {
            knob.size = size;
        }
    }

    pub fn set_knob_enabled(&mut self, id: KnobId, enabled: bool) {
        if let Some(knob) = self.knobs.iter_mut().find(|knob| knob.id == id) {
            knob.enabled = enabled;
        }
    }

    pub fn set_bounds(&mut self, floor: f64, ceiling: f64) -> Result<(), SliderConfigError> {
        let (resolved_floor, resolved_ceiling) = resolve_bounds(floor, ceiling, &self.options)?;
        self.configured_floor = floor;
        self.configured_ceiling = ceiling;
        self.floor = resolved_floor;
        self.ceiling = resolved_ceiling;
        self.request_refresh();
        Ok(())
    }

    pub fn set_options(&mut self, options: SliderOptions) -> Result<(), SliderConfigError> {
        options.validate()?;
        let (resolved_floor, resolved_ceiling) =
            resolve_bounds(self.configured_floor, self.configured_ceiling, &options)?;
        self.options = options;
        self.floor = resolved_floor;
        self.ceiling = resolved_ceiling;

        // every knob gets renormalized under the new options
        let ids: Vec<KnobId> = self.knobs.iter().map(|knob| knob.id).collect();
        for id in ids {
            if let Some(value) = self.knob(id).map(|knob| knob.value) {
                self.set_value(id, value);
            }
        }
        self.request_refresh();
        Ok(())
    }

    /// Write a raw value into a knob, normalizing it until it settles:
    /// neighbor containment (unless continuous), value-list or step
    /// snapping, clamping, then precision rounding. A value the discrete
    /// domain cannot accommodate leaves the knob untouched.
    pub fn set_value(&mut self, id: KnobId, raw: f64) {
        let Some(position) = self.knobs.iter().position(|knob| knob.id == id) else {
            return;
        };
        if !self.knobs[position].enabled {
            return;
        }

        let mut value = raw;
        for _ in 0..MAX_NORMALIZE_PASSES {
            self.sort_knobs();
            let Some(index) = self.knobs.iter().position(|knob| knob.id == id) else {
                return;
            };
            let Some(normalized) = self.normalized_value(index, value) else {
                return;
            };
            self.knobs[index].value = normalized;
            if normalized == value {
                // a confirmed write can still reorder the list in continuous mode
                self.sort_knobs();
                self.events.push(SliderEvent::Changed {
                    knob: id,
                    value: normalized,
                });
                self.request_refresh();
                return;
            }
            value = normalized;
        }
    }

    fn normalized_value(&self, index: usize, value: f64) -> Option<f64> {
        let mut floor = self.floor;
        let mut ceiling = self.ceiling;
        let last = self.knobs.len() - 1;

        if !self.options.continuous {
            // keep the knob contained to its section of the slider
            if index > 0 {
                floor = self.knobs[index - 1].value + self.options.buffer;
            }
            if index < last {
                ceiling = self.knobs[index + 1].value - self.options.buffer;
            }
        }

        let mut normalized = value;

        if self.options.use_values() {
            normalized = self.mapper().nearest_value(value, floor, ceiling, true)?;
        } else if self.options.steps > 1 {
            let step = (self.ceiling - self.floor) / (self.options.steps - 1) as f64;

            if index > 0 {
                // the effective floor must itself sit on a step
                let rem = (floor - self.floor) % step;
                if rem > 0.0 {
                    floor += step - rem;
                }
            }
            if index < last {
                let rem = (ceiling - self.floor) % step;
                if rem > 0.0 {
                    ceiling -= rem;
                }
            }

            let rem = (normalized - self.floor) % step;
            if rem < step / 2.0 {
                normalized -= rem;
            } else {
                normalized += step - rem;
            }
        }

        normalized = normalized.max(floor).min(ceiling);
        Some(round_to_precision(normalized, self.options.precision))
    }

    pub fn bars(&self) -> Vec<Bar> {
        let mut bars = Vec::with_capacity(self.knobs.len() + 1);
        for index in 0..=self.knobs.len() {
            let (low, low_knob) = if index > 0 {
                let knob = &self.knobs[index - 1];
                (knob.value, Some(knob.id))
            } else {
                (self.floor, None)
            };
            let (high, high_knob) = if index < self.knobs.len() {
                let knob = &self.knobs[index];
                (knob.value, Some(knob.id))
            } else {
                (self.ceiling, None)
            };
            bars.push(Bar {
                low,
                high,
                low_knob,
                high_knob,
            });
        }
        bars
    }

    pub fn request_refresh(&mut self) {
        self.refresh.schedule(Instant::now());
    }

    pub fn refresh_pending(&self) -> bool {
        self.refresh.pending()
    }

    pub fn poll_refresh(&mut self, now: Instant) -> bool {
        if !self.refresh.due(now) {
            return false;
        }
        self.refresh_now();
        true
    }

    pub fn refresh_now(&mut self) {
        self.sort_knobs();
        let floor = self.floor;
        let ceiling = self.ceiling;
        for knob in &mut self.knobs {
            knob.value = knob.value.max(floor).min(ceiling);
        }
    }

    pub fn take_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.events)
    }

    fn sort_knobs(&mut self) {
        self.knobs.sort_by(|a, b| a.value.total_cmp(&b.value));
    }

    pub(crate) fn begin_drag(&mut self, id: KnobId) {
        if let Some(knob) = self.knobs.iter_mut().find(|knob| knob.id == id) {
            if !knob.dragging {
                knob.dragging = true;
                self.events.push(SliderEvent::DragStarted { knob: id });
            }
        }
    }

    pub(crate) fn end_drag(&mut self, id: KnobId) {
        if let Some(knob) = self.knobs.iter_mut().find(|knob| knob.id == id) {
            if knob.dragging {
                knob.dragging = false;
                self.events.push(SliderEvent::DragEnded { knob: id });
            }
        }
    }
}
