//! Order form screen
//!
//! Loads the orders of a link into a [`FormView`] and edits it in place.
//! Submission runs on a worker thread and reports back over a channel.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rts_app::app::SubmitOutcome;
use rts_app::form::{FormOptions, FormView, OrderGroup, SelectField, COMMENT_MAX_CHARS};
use rts_app::link::orders_from_link;

use crate::app::Services;

pub struct OrderPanel {
    options: FormOptions,
    link_input: String,
    form: Option<FormView>,
    is_submitting: bool,
    /// Set after a successful submission; the form stays read-only
    submitted: bool,
    receiver: Option<Receiver<SubmitOutcome>>,
    /// Last outcome: (success, message)
    banner: Option<(bool, String)>,
}

impl OrderPanel {
    pub fn new(options: FormOptions, initial_link: Option<String>) -> Self {
        Self {
            options,
            link_input: initial_link.unwrap_or_default(),
            form: None,
            is_submitting: false,
            submitted: false,
            receiver: None,
            banner: None,
        }
    }

    /// Load the prefilled link right after login
    pub fn on_login(&mut self, services: &Services) {
        if self.form.is_none() && !self.link_input.trim().is_empty() {
            self.load_link(services);
        }
    }

    /// Forget the outcome of a previous session
    pub fn reset_submission(&mut self) {
        self.submitted = false;
        self.banner = None;
    }

    pub fn ui(&mut self, ui: &mut Ui, services: &Services, token: &str) {
        self.poll_outcome(ui.ctx());

        ui.horizontal(|ui| {
            ui.label("Link:");
            ui.add(egui::TextEdit::singleline(&mut self.link_input).desired_width(560.0));
            if ui
                .add_enabled(!self.is_submitting, egui::Button::new("Laden"))
                .clicked()
            {
                self.load_link(services);
            }
        });
        ui.separator();

        self.render_banner(ui);

        let editable = !self.is_submitting && !self.submitted;
        match self.form {
            None => {
                ui.label("Bitte einen Auftragslink einfügen und laden.");
            }
            Some(FormView::Empty(ref notice)) => {
                ui.label(RichText::new(notice.title).strong().color(Color32::RED));
                ui.label(notice.message);
                ui.label(RichText::new(notice.hint).small());
            }
            Some(FormView::Orders(ref mut groups)) => {
                ScrollArea::vertical()
                    .max_height(ui.available_height() - 48.0)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for group in groups.iter_mut() {
                            render_group(ui, group, editable);
                            ui.add_space(8.0);
                        }
                    });
            }
        }

        ui.separator();
        let can_submit = self.form.as_ref().is_some_and(FormView::can_submit)
            && !self.is_submitting
            && !self.submitted;
        ui.horizontal(|ui| {
            let label = if self.is_submitting {
                "Wird gesendet..."
            } else {
                "Absenden"
            };
            if ui.add_enabled(can_submit, egui::Button::new(label)).clicked() {
                self.start_submit(services, token);
            }
            if self.is_submitting {
                ui.spinner();
            }
        });
    }

    fn load_link(&mut self, services: &Services) {
        let orders = orders_from_link(&self.link_input);
        self.form = Some(FormView::build(&orders, &self.options));
        self.submitted = false;
        self.banner = None;

        let order_service = services.orders.clone();
        thread::spawn(move || order_service.notify_link_opened(&orders));
    }

    fn render_banner(&mut self, ui: &mut Ui) {
        let mut dismissed = false;
        if let Some((success, ref message)) = self.banner {
            let color = if success {
                Color32::from_rgb(0, 140, 60)
            } else {
                Color32::RED
            };
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(message).color(color));
                    if ui.small_button("✕").clicked() {
                        dismissed = true;
                    }
                });
            });
            ui.add_space(6.0);
        }
        if dismissed {
            self.banner = None;
        }
    }

    fn start_submit(&mut self, services: &Services, token: &str) {
        let Some(ref form) = self.form else {
            return;
        };
        if self.is_submitting {
            return;
        }
        self.is_submitting = true;
        self.banner = None;

        let confirmations = form.confirmations();
        let token = token.to_string();
        let order_service = services.orders.clone();
        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        thread::spawn(move || {
            let outcome = order_service.submit(&confirmations, Some(&token));
            let _ = sender.send(outcome);
        });
    }

    fn poll_outcome(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.receiver else {
            return;
        };
        match receiver.try_recv() {
            Ok(outcome) => {
                self.is_submitting = false;
                self.receiver = None;
                self.submitted = outcome.success;
                self.banner = Some((outcome.success, outcome.message));
            }
            Err(TryRecvError::Empty) => ctx.request_repaint(),
            Err(TryRecvError::Disconnected) => {
                self.is_submitting = false;
                self.receiver = None;
                self.banner = Some((false, "Übermittlung wurde unerwartet abgebrochen.".to_string()));
            }
        }
    }
}

fn combo(ui: &mut Ui, id: String, field: &mut SelectField) {
    let selected_text = field.selected_text().to_string();
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(220.0)
        .show_ui(ui, |ui| {
            for (index, option) in field.options.iter().enumerate() {
                ui.selectable_value(&mut field.selected, index, option.text.as_str());
            }
        });
}

fn render_group(ui: &mut Ui, group: &mut OrderGroup, editable: bool) {
    let id = group.display_id().to_string();
    egui::CollapsingHeader::new(RichText::new(group.heading()).strong())
        .id_salt(format!("order-{id}"))
        .default_open(true)
        .show(ui, |ui| {
            ui.label(RichText::new(format!("KW: {}", group.cw)).small());
            ui.add_enabled_ui(editable, |ui| {
                egui::Grid::new(format!("grid-{id}"))
                    .num_columns(2)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Wagons (Qty.)");
                        ui.add(egui::DragValue::new(&mut group.wagons).range(1..=999));
                        ui.end_row();

                        ui.label("Transport Date");
                        ui.add(egui::TextEdit::singleline(&mut group.transport_date).hint_text("YYYY-MM-DD"));
                        ui.end_row();

                        ui.label("Wagon Profile");
                        combo(ui, format!("profile-{id}"), &mut group.profile);
                        ui.end_row();

                        ui.label("Wagon Type");
                        combo(ui, format!("type-{id}"), &mut group.wagon_type);
                        ui.end_row();

                        ui.label(RichText::new(format!("Departure ({})", group.departure)).strong());
                        ui.end_row();

                        ui.label("Arrival Time Slot");
                        combo(ui, format!("departure-arrival-slot-{id}"), &mut group.departure_arrival_slot);
                        ui.end_row();

                        ui.label("Departure Time");
                        combo(ui, format!("departure-time-{id}"), &mut group.departure_time);
                        ui.end_row();

                        ui.label(RichText::new(format!("Destination ({})", group.destination)).strong());
                        ui.end_row();

                        ui.label("Delivery Date");
                        ui.add(egui::TextEdit::singleline(&mut group.delivery_date).hint_text("YYYY-MM-DD"));
                        ui.end_row();

                        ui.label("Arrival Time Slot");
                        combo(
                            ui,
                            format!("destination-arrival-slot-{id}"),
                            &mut group.destination_arrival_slot,
                        );
                        ui.end_row();

                        ui.label("Departure Time");
                        combo(
                            ui,
                            format!("destination-departure-time-{id}"),
                            &mut group.destination_departure_time,
                        );
                        ui.end_row();

                        ui.label("Reason for Underdelivery");
                        combo(ui, format!("reason-{id}"), &mut group.reason);
                        ui.end_row();
                    });

                ui.label("Comment (Free Text)");
                ui.add(
                    egui::TextEdit::multiline(&mut group.comment)
                        .char_limit(COMMENT_MAX_CHARS)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
            });
        });
}
