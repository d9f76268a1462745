#[cfg(feature = "gui")]
use clap::Parser;
#[cfg(feature = "gui")]
use log::{info, warn};

#[cfg(feature = "gui")]
use tonematrix::{
    render::BACKGROUND_COLOR, AudioOutput, Color, Config, Rect, SharedToneMatrix, ToneMatrix,
};

#[cfg(feature = "gui")]
#[derive(Parser, Debug)]
#[command(name = "tonematrix", about = "Grid step sequencer of plucked strings")]
struct Args {
    /// Initial grid size (one of 4, 6, 8, 9, 12, 16, 18)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Run without opening an audio device
    #[arg(long)]
    muted: bool,
}

#[cfg(feature = "gui")]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = Config::default();
    if let Some(size) = args.grid_size {
        config.grid_size = size;
    }
    config.validate()?;

    let mut audio = if args.muted {
        None
    } else {
        match AudioOutput::open() {
            Ok(output) => Some(output),
            Err(err) => {
                warn!("audio disabled: {err}");
                None
            }
        }
    };

    // strings are tuned against whatever rate the device will pull at
    let sample_rate = audio
        .as_ref()
        .map_or(config.fallback_sample_rate, AudioOutput::sample_rate);
    let light_size = config.light_size_for(config.window_size[0].min(config.window_size[1]));
    let matrix = SharedToneMatrix::new(ToneMatrix::new(config.grid_size, light_size, sample_rate)?);

    if let Some(output) = audio.as_mut() {
        output.play(matrix.clone())?;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title("Tone Matrix"),
        ..Default::default()
    };

    eframe::run_native(
        "Tone Matrix",
        options,
        Box::new(move |_cc| Ok(Box::new(ToneMatrixApp::new(config, matrix, audio)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))?;

    info!("window closed");
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn main() {
    eprintln!("This binary requires the 'gui' feature to be enabled");
    std::process::exit(1);
}

#[cfg(feature = "gui")]
struct ToneMatrixApp {
    config: Config,
    matrix: SharedToneMatrix,
    audio: Option<AudioOutput>,

    // UI state
    grid_size: usize,
}

#[cfg(feature = "gui")]
impl ToneMatrixApp {
    fn new(config: Config, matrix: SharedToneMatrix, audio: Option<AudioOutput>) -> Self {
        Self {
            grid_size: config.grid_size,
            config,
            matrix,
            audio,
        }
    }

    /// Top-left corner of the grid, centred in the padded canvas.
    fn grid_origin(&self, canvas: egui::Rect) -> egui::Pos2 {
        let padding = self.config.window_padding;
        let extent = self.matrix.extent() as f32;
        canvas.min
            + egui::vec2(
                padding + (canvas.width() - 2.0 * padding - extent) / 2.0,
                padding + (canvas.height() - 2.0 * padding - extent) / 2.0,
            )
    }

    /// Forwards presses and drags that land on the grid, in grid-local pixels.
    fn handle_pointer(&mut self, ctx: &egui::Context, origin: egui::Pos2) {
        let (pressed, down, position) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.interact_pos(),
            )
        });
        let Some(position) = position else {
            return;
        };

        let x = (position.x - origin.x).floor() as i32;
        let y = (position.y - origin.y).floor() as i32;
        let extent = self.matrix.extent();
        if x < 0 || y < 0 || x >= extent || y >= extent {
            return;
        }

        let result = if pressed {
            self.matrix.toggle_at(x, y).map(|_| ())
        } else if down {
            self.matrix.paint_at(x, y)
        } else {
            Ok(())
        };
        if let Err(err) = result {
            warn!("ignored pointer event: {err}");
        }
    }

    fn resize(&mut self, size: usize) {
        if let Err(err) = self.matrix.resize(size) {
            warn!("resize to {size} failed: {err}");
            self.grid_size = self.matrix.grid_size();
        }
    }

    fn toggle_audio(&mut self) {
        let Some(output) = self.audio.as_mut() else {
            return;
        };
        if output.is_playing() {
            output.stop();
        } else if let Err(err) = output.play(self.matrix.clone()) {
            warn!("could not restart audio: {err}");
        }
    }
}

#[cfg(feature = "gui")]
fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

#[cfg(feature = "gui")]
impl eframe::App for ToneMatrixApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut chosen = None;
                for &size in &self.config.grid_sizes {
                    if ui
                        .radio_value(&mut self.grid_size, size, format!("{size} × {size}"))
                        .clicked()
                    {
                        chosen = Some(size);
                    }
                }
                if let Some(size) = chosen {
                    self.resize(size);
                }

                ui.add_space(20.0);

                match self.audio.as_ref().map(AudioOutput::is_playing) {
                    Some(playing) => {
                        let label = if playing { "⏸ Stop" } else { "▶ Play" };
                        if ui.button(label).clicked() {
                            self.toggle_audio();
                        }
                    }
                    None => {
                        ui.colored_label(egui::Color32::YELLOW, "⚠ No audio output");
                    }
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(color32(BACKGROUND_COLOR)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let origin = self.grid_origin(response.rect);

                self.handle_pointer(ctx, origin);

                // paint from a copy so the audio callback never waits on egui
                let grid = self.matrix.grid_snapshot();
                grid.draw(self.matrix.light_size(), &mut |bounds: Rect, color: Color| {
                    let rect = egui::Rect::from_min_size(
                        origin + egui::vec2(bounds.x as f32, bounds.y as f32),
                        egui::vec2(bounds.width as f32, bounds.height as f32),
                    );
                    painter.rect_filled(rect, 0.0, color32(color));
                    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, color32(color.halved())));
                });
            });
    }
}
