//! Login screen
//!
//! The login runs on a worker thread; the button is disabled before the
//! thread starts and re-enabled when the outcome arrives.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, RichText, Ui};

use rts_app::app::AuthOutcome;

use crate::app::Services;

pub struct LoginPanel {
    username: String,
    password: String,
    is_authenticating: bool,
    receiver: Option<Receiver<AuthOutcome>>,
    /// Dismissible error banner
    error: Option<String>,
}

impl LoginPanel {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            is_authenticating: false,
            receiver: None,
            error: None,
        }
    }

    /// Draw the panel; returns the session token once logged in
    pub fn ui(&mut self, ui: &mut Ui, services: &Services) -> Option<String> {
        let token = self.poll_outcome(ui.ctx());

        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.heading("Anmeldung");
            ui.add_space(12.0);

            egui::Grid::new("login_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Benutzername");
                    ui.add_enabled(
                        !self.is_authenticating,
                        egui::TextEdit::singleline(&mut self.username).desired_width(240.0),
                    );
                    ui.end_row();

                    ui.label("Passwort");
                    let response = ui.add_enabled(
                        !self.is_authenticating,
                        egui::TextEdit::singleline(&mut self.password)
                            .password(true)
                            .desired_width(240.0),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.start_login(services);
                    }
                    ui.end_row();
                });

            ui.add_space(12.0);
            let label = if self.is_authenticating {
                "Überprüfung..."
            } else {
                "Anmelden"
            };
            if ui
                .add_enabled(!self.is_authenticating, egui::Button::new(label))
                .clicked()
            {
                self.start_login(services);
            }
            if self.is_authenticating {
                ui.spinner();
            }

            self.render_error(ui);
        });

        token
    }

    fn render_error(&mut self, ui: &mut Ui) {
        let mut dismissed = false;
        if let Some(ref error) = self.error {
            ui.add_space(12.0);
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(error).color(Color32::RED));
                    if ui.small_button("✕").clicked() {
                        dismissed = true;
                    }
                });
            });
        }
        if dismissed {
            self.error = None;
        }
    }

    fn start_login(&mut self, services: &Services) {
        if self.is_authenticating {
            return;
        }
        self.is_authenticating = true;
        self.error = None;

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);
        let auth = services.auth.clone();
        let username = self.username.clone();
        let password = self.password.clone();

        thread::spawn(move || {
            let outcome = match auth.lock() {
                Ok(mut auth) => auth.authenticate(&username, &password),
                Err(_) => AuthOutcome {
                    success: false,
                    message: "Anmeldedienst nicht verfügbar.".to_string(),
                    token: None,
                },
            };
            let _ = sender.send(outcome);
        });
    }

    fn poll_outcome(&mut self, ctx: &egui::Context) -> Option<String> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(outcome) => {
                self.is_authenticating = false;
                self.receiver = None;
                if outcome.success {
                    self.password.clear();
                    outcome.token
                } else {
                    self.error = Some(outcome.message);
                    None
                }
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint();
                None
            }
            Err(TryRecvError::Disconnected) => {
                self.is_authenticating = false;
                self.receiver = None;
                self.error = Some("Anmeldung wurde unerwartet abgebrochen.".to_string());
                None
            }
        }
    }
}
