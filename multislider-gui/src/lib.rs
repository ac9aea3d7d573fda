use eframe::egui;
use multislider_core::{Slider, SliderConfigError, SliderOptions, Spacing};

mod widget;

pub use widget::SliderView;

#[derive(Debug, Clone)]
pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "Multislider".to_string(),
            width: 760.0,
            height: 420.0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}

pub struct SliderApp {
    views: Vec<(String, SliderView)>,
}

impl SliderApp {
    /// The configured slider plus two fixed showcases (stepped and
    /// discrete-notch) so every snapping mode is on screen.
    pub fn demo(
        floor: f64,
        ceiling: f64,
        options: SliderOptions,
    ) -> Result<Self, SliderConfigError> {
        let mut main = Slider::new(floor, ceiling, options)?;
        let span = main.ceiling() - main.floor();
        main.register_knob(main.floor() + span / 3.0);
        main.register_knob(main.floor() + span * 2.0 / 3.0);

        let mut stepped = Slider::new(
            0.0,
            10.0,
            SliderOptions {
                steps: 5,
                precision: 1,
                buffer: 2.5,
                ..SliderOptions::default()
            },
        )?;
        stepped.register_knob(2.5);
        stepped.register_knob(7.5);

        let mut notched = Slider::new(
            0.0,
            0.0,
            SliderOptions {
                values: vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0],
                spacing: Spacing::Equal,
                ..SliderOptions::default()
            },
        )?;
        notched.register_knob(5.0);

        Ok(Self {
            views: vec![
                ("Configured".to_string(), SliderView::new(main)),
                ("Stepped".to_string(), SliderView::new(stepped)),
                ("Notched".to_string(), SliderView::new(notched)),
            ],
        })
    }
}

impl eframe::App for SliderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            for (label, view) in &mut self.views {
                ui.label(egui::RichText::new(label.as_str()).strong());
                for event in view.ui(ui) {
                    log::debug!("{label}: {event:?}");
                }
                let slider = view.slider();
                let precision = slider.options().precision as usize;
                let values: Vec<String> = slider
                    .knobs()
                    .iter()
                    .map(|knob| format!("{:.precision$}", knob.value))
                    .collect();
                ui.label(format!(
                    "[{} .. {}] values: {}",
                    slider.floor(),
                    slider.ceiling(),
                    values.join(", ")
                ));
                ui.add_space(16.0);
            }
        });
    }
}

pub fn run_gui(config: GuiConfig, app: SliderApp) -> Result<(), GuiError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([config.width, config.height]),
        ..Default::default()
    };

    eframe::run_native(&config.title, options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| GuiError::Gui(err.to_string()))
}
