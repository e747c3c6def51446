// src/ui/panel.rs
//! Control panel, hover tooltip, and loading fade
//!
//! The panels never mutate simulation state directly; every interaction is
//! emitted as a [`Command`] and applied after the frame is built, so the UI
//! stays a pure view of the [`SolarSystem`].

use std::time::Instant;

use crate::system::commands::{Command, ZoomDirection};
use crate::system::state::SolarSystem;

/// Pixel offset of the tooltip from the pointer.
const TOOLTIP_OFFSET: [f32; 2] = [15.0, 15.0];

/// Main control panel: per-body speed sliders and global toggles.
///
/// When the panel is hidden only a small restore button is shown.
pub fn control_panel(ui: &imgui::Ui, system: &SolarSystem, commands: &mut Vec<Command>) {
    if !system.state.panel_visible {
        ui.window("##show_panel")
            .position([20.0, 20.0], imgui::Condition::Always)
            .flags(imgui::WindowFlags::NO_DECORATION | imgui::WindowFlags::ALWAYS_AUTO_RESIZE)
            .build(|| {
                if ui.button("Show Panel") {
                    commands.push(Command::TogglePanel);
                }
            });
        return;
    }

    ui.window("Solar System")
        .size([340.0, 0.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            ui.text("Orbital Speeds");
            ui.separator();

            for (i, body) in system.bodies.iter().enumerate() {
                let mut value = body.speed_multiplier;
                ui.set_next_item_width(200.0);
                if ui
                    .slider_config(body.info().name, 0.0, 5.0)
                    .display_format("%.1fx")
                    .build(&mut value)
                {
                    commands.push(Command::SetSpeed(i, value));
                }
            }

            ui.spacing();
            ui.separator();
            ui.spacing();

            let pause_label = if system.state.paused {
                "Resume"
            } else {
                "Pause"
            };
            if ui.button(pause_label) {
                commands.push(Command::TogglePause);
            }
            ui.same_line();
            if ui.button("Reset Speeds") {
                commands.push(Command::Reset);
            }

            ui.spacing();

            if ui.button("Zoom In") {
                commands.push(Command::Zoom(ZoomDirection::In));
            }
            ui.same_line();
            if ui.button("Zoom Out") {
                commands.push(Command::Zoom(ZoomDirection::Out));
            }

            ui.spacing();

            let theme_label = if system.state.theme_dark {
                "Light Theme"
            } else {
                "Dark Theme"
            };
            if ui.button(theme_label) {
                commands.push(Command::ToggleTheme);
            }
            ui.same_line();
            if ui.button("Hide Panel") {
                commands.push(Command::TogglePanel);
            }
        });
}

/// Name tooltip following the pointer while a body is hovered.
pub fn hover_tooltip(ui: &imgui::Ui, system: &SolarSystem) {
    let Some(target) = system.hovered else {
        return;
    };

    let mouse = ui.io().mouse_pos;
    ui.window("##hover_tooltip")
        .position(
            [mouse[0] + TOOLTIP_OFFSET[0], mouse[1] + TOOLTIP_OFFSET[1]],
            imgui::Condition::Always,
        )
        .flags(
            imgui::WindowFlags::NO_DECORATION
                | imgui::WindowFlags::ALWAYS_AUTO_RESIZE
                | imgui::WindowFlags::NO_INPUTS,
        )
        .build(|| {
            ui.text(target.label());
        });
}

/// Full-screen overlay shown at startup, fading out over about a second.
pub struct LoadingFade {
    start: Instant,
}

/// Seconds at full opacity before the fade begins.
const HOLD_SECONDS: f32 = 0.2;
/// Seconds the fade to transparent takes.
const FADE_SECONDS: f32 = 1.0;

impl LoadingFade {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// True while the overlay still has anything to draw.
    pub fn still_visible(&self) -> bool {
        self.start.elapsed().as_secs_f32() < HOLD_SECONDS + FADE_SECONDS
    }

    /// Draws the overlay; returns false once fully faded so the caller can
    /// stop invoking it.
    pub fn draw(&self, ui: &imgui::Ui) -> bool {
        if !self.still_visible() {
            return false;
        }
        let elapsed = self.start.elapsed().as_secs_f32();

        let alpha = if elapsed < HOLD_SECONDS {
            1.0
        } else {
            1.0 - (elapsed - HOLD_SECONDS) / FADE_SECONDS
        };

        let display = ui.io().display_size;
        ui.window("##loading")
            .position([0.0, 0.0], imgui::Condition::Always)
            .size(display, imgui::Condition::Always)
            .bg_alpha(alpha)
            .flags(
                imgui::WindowFlags::NO_DECORATION
                    | imgui::WindowFlags::NO_MOVE
                    | imgui::WindowFlags::NO_INPUTS,
            )
            .build(|| {
                let text = "Solar System";
                let text_size = ui.calc_text_size(text);
                ui.set_cursor_pos([
                    (display[0] - text_size[0]) / 2.0,
                    (display[1] - text_size[1]) / 2.0,
                ]);
                let style = ui.push_style_var(imgui::StyleVar::Alpha(alpha));
                ui.text(text);
                style.pop();
            });

        true
    }
}

impl Default for LoadingFade {
    fn default() -> Self {
        Self::new()
    }
}
