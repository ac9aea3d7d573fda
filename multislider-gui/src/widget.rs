use std::time::Instant;

use multislider_core::{Gestures, Knob, Slider, SliderEvent, TrackGeometry};

/// Immediate-mode slider: a track with derived bar segments and one
/// draggable circle per knob. All value math lives in the core; this only
/// maps egui responses onto the gesture adapter.
pub struct SliderView {
    slider: Slider,
    gestures: Gestures,
    thickness: f32,
    knob_radius: f32,
}

impl SliderView {
    pub fn new(slider: Slider) -> Self {
        Self {
            slider,
            gestures: Gestures::new(),
            thickness: 6.0,
            knob_radius: 9.0,
        }
    }

    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut Slider {
        &mut self.slider
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Vec<SliderEvent> {
        let vertical = self.slider.options().vertical;
        let breadth = self.knob_radius * 2.0 + 8.0;
        let desired = if vertical {
            egui::vec2(breadth, ui.available_height().max(140.0))
        } else {
            egui::vec2(ui.available_width().max(140.0), breadth)
        };
        let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());

        let track = if vertical {
            TrackGeometry {
                offset: rect.min.y as f64,
                size: rect.height() as f64,
            }
        } else {
            TrackGeometry {
                offset: rect.min.x as f64,
                size: rect.width() as f64,
            }
        };

        // knobs report their on-track footprint for percent correction
        let ids: Vec<u64> = self.slider.knobs().iter().map(|knob| knob.id).collect();
        for id in ids {
            self.slider.set_knob_size(id, (self.knob_radius * 2.0) as f64);
        }

        self.paint(ui, rect, track, vertical);
        self.interact_bars(ui, rect, track, vertical);
        self.interact_knobs(ui, rect, track, vertical);

        self.slider.poll_refresh(Instant::now());
        if self.slider.refresh_pending() {
            ui.ctx().request_repaint();
        }
        self.slider.take_events()
    }

    fn paint(&self, ui: &egui::Ui, rect: egui::Rect, track: TrackGeometry, vertical: bool) {
        let painter = ui.painter();
        let visuals = ui.visuals();

        let track_size = if vertical {
            egui::vec2(self.thickness, rect.height())
        } else {
            egui::vec2(rect.width(), self.thickness)
        };
        let track_rect = egui::Rect::from_center_size(rect.center(), track_size);
        painter.rect_filled(
            track_rect,
            egui::Rounding::same(self.thickness / 2.0),
            visuals.widgets.inactive.bg_fill,
        );

        // interior bars are filled, the two edge segments stay as track
        for bar in self.slider.bars() {
            if bar.low_knob.is_none() || bar.high_knob.is_none() {
                continue;
            }
            if let Some(bar_rect) = self.bar_rect(rect, track, vertical, bar.low, bar.high) {
                painter.rect_filled(
                    bar_rect,
                    egui::Rounding::same(self.thickness / 2.0),
                    visuals.selection.bg_fill,
                );
            }
        }

        for knob in self.slider.knobs() {
            let center = knob_center(&self.slider, rect, track, vertical, knob);
            let fill = if knob.dragging {
                visuals.widgets.active.bg_fill
            } else {
                visuals.widgets.inactive.bg_fill
            };
            painter.circle_filled(center, self.knob_radius, fill);
            painter.circle_stroke(
                center,
                self.knob_radius,
                egui::Stroke::new(1.5, visuals.widgets.active.fg_stroke.color),
            );
        }
    }

    fn bar_rect(
        &self,
        rect: egui::Rect,
        track: TrackGeometry,
        vertical: bool,
        low: f64,
        high: f64,
    ) -> Option<egui::Rect> {
        let mapper = self.slider.mapper();
        let knob_percent = if track.size > 0.0 {
            (self.knob_radius * 2.0) as f64 / track.size * 100.0
        } else {
            0.0
        };
        let start =
            track.offset + mapper.value_to_percent(low, knob_percent, true) / 100.0 * track.size;
        let end =
            track.offset + mapper.value_to_percent(high, knob_percent, true) / 100.0 * track.size;
        if end <= start {
            return None;
        }
        let half = self.thickness / 2.0;
        let center = rect.center();
        Some(if vertical {
            egui::Rect::from_min_max(
                egui::pos2(center.x - half, start as f32),
                egui::pos2(center.x + half, end as f32),
            )
        } else {
            egui::Rect::from_min_max(
                egui::pos2(start as f32, center.y - half),
                egui::pos2(end as f32, center.y + half),
            )
        })
    }

    fn interact_knobs(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        track: TrackGeometry,
        vertical: bool,
    ) {
        let knobs: Vec<Knob> = self.slider.knobs().to_vec();
        for knob in knobs {
            let center = knob_center(&self.slider, rect, track, vertical, &knob);
            let knob_rect = egui::Rect::from_center_size(
                center,
                egui::vec2(self.knob_radius * 2.0, self.knob_radius * 2.0),
            );
            let response = ui.interact(
                knob_rect,
                ui.id().with(("knob", knob.id)),
                egui::Sense::drag(),
            );
            let pointer = pointer_coord(ui, &response, vertical);
            if response.drag_started() {
                if let Some(pos) = pointer {
                    self.gestures
                        .start_knob(&mut self.slider, 0, knob.id, pos, track);
                }
            } else if response.dragged() {
                if let Some(pos) = pointer {
                    self.gestures.move_to(&mut self.slider, 0, pos, track);
                }
            }
            if response.drag_stopped() {
                self.gestures.end(&mut self.slider, 0);
            }
        }
    }

    fn interact_bars(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        track: TrackGeometry,
        vertical: bool,
    ) {
        let mut targets = Vec::new();
        for (index, bar) in self.slider.bars().into_iter().enumerate() {
            if bar.low_knob.is_none() && bar.high_knob.is_none() {
                continue;
            }
            if let Some(bar_rect) = self.bar_rect(rect, track, vertical, bar.low, bar.high) {
                targets.push((index, bar_rect.expand(2.0)));
            }
        }

        for (index, bar_rect) in targets {
            let response = ui.interact(
                bar_rect,
                ui.id().with(("bar", index)),
                egui::Sense::drag(),
            );
            let pointer = pointer_coord(ui, &response, vertical);
            if response.drag_started() {
                if let Some(pos) = pointer {
                    self.gestures
                        .start_bar(&mut self.slider, 0, index, pos, track);
                }
            } else if response.dragged() {
                if let Some(pos) = pointer {
                    self.gestures.move_to(&mut self.slider, 0, pos, track);
                }
            }
            if response.drag_stopped() {
                self.gestures.end(&mut self.slider, 0);
            }
        }
    }
}

fn knob_center(
    slider: &Slider,
    rect: egui::Rect,
    track: TrackGeometry,
    vertical: bool,
    knob: &Knob,
) -> egui::Pos2 {
    let knob_percent = if track.size > 0.0 {
        knob.size / track.size * 100.0
    } else {
        0.0
    };
    let percent = slider.mapper().value_to_percent(knob.value, knob_percent, false);
    let along = track.offset + percent / 100.0 * track.size + knob.size / 2.0;
    if vertical {
        egui::pos2(rect.center().x, along as f32)
    } else {
        egui::pos2(along as f32, rect.center().y)
    }
}

fn pointer_coord(ui: &egui::Ui, response: &egui::Response, vertical: bool) -> Option<f64> {
    let pos = response
        .interact_pointer_pos()
        .or_else(|| ui.ctx().input(|i| i.pointer.latest_pos()))?;
    Some(if vertical { pos.y as f64 } else { pos.x as f64 })
}
