//! Render supervisor that swaps the UI for an error summary after the first
//! unrecovered rendering failure.
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use eframe::egui;

/// Something that can be drawn in place of a failed UI.
pub trait FallbackView {
    fn show(&self, ui: &mut egui::Ui, description: &str);
}

/// Default fallback: a heading plus collapsible failure details.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorSummary;

impl FallbackView for ErrorSummary {
    fn show(&self, ui: &mut egui::Ui, description: &str) {
        ui.heading("Something went wrong");
        ui.add_space(8.0);
        egui::CollapsingHeader::new("Show details")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(egui::RichText::new(description).monospace());
            });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    PassThrough,
    /// Terminal: once entered the guarded UI is never rendered again.
    Degraded { description: String },
}

pub struct FallbackGuard<V = ErrorSummary> {
    state: GuardState,
    fallback: V,
}

impl Default for FallbackGuard<ErrorSummary> {
    fn default() -> Self {
        Self::new(ErrorSummary)
    }
}

impl<V: FallbackView> FallbackGuard<V> {
    pub fn new(fallback: V) -> Self {
        Self {
            state: GuardState::PassThrough,
            fallback,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state, GuardState::Degraded { .. })
    }

    /// Record a failure reported by render code without panicking.
    pub fn fail(&mut self, description: impl Into<String>) {
        if self.is_degraded() {
            return;
        }
        let description = description.into();
        log::error!("Fallback guard caught an error: {description}");
        self.state = GuardState::Degraded { description };
    }

    /// Run `render` unless degraded. A panic inside it latches the guard.
    pub fn run<T>(&mut self, render: impl FnOnce() -> T) -> Option<T> {
        if self.is_degraded() {
            return None;
        }

        match panic::catch_unwind(AssertUnwindSafe(render)) {
            Ok(value) => Some(value),
            Err(payload) => {
                self.fail(describe_panic(payload.as_ref()));
                None
            }
        }
    }

    /// Draw the guarded UI, or the fallback once degraded.
    pub fn show<T>(
        &mut self,
        ctx: &egui::Context,
        render: impl FnOnce(&egui::Context) -> T,
    ) -> Option<T> {
        let was_degraded = self.is_degraded();
        let output = self.run(|| render(ctx));
        if !was_degraded && self.is_degraded() {
            // Drop the half-drawn pass so only the fallback reaches the screen.
            ctx.request_discard("rendering failure");
        }
        if let GuardState::Degraded { description } = &self.state {
            egui::CentralPanel::default().show(ctx, |ui| self.fallback.show(ui, description));
        }
        output
    }
}

fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown rendering failure".to_string()
    }
}
