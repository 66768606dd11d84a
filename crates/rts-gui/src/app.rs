//! Main application structure: login screen, then the order form

use std::sync::{Arc, Mutex};

use eframe::egui::{self, Color32, RichText};
use tracing::{info, warn};

use rts_app::app::{AuthService, OrderService};
use rts_app::config::Config;
use rts_app::form::FormOptions;
use rts_app::repository::{open_attempt_repo, open_workflow_client};
use rts_domain::repository::LoginAttemptRepository;
use rts_store::MemoryAttemptStore;
use rts_types::Result;

use crate::login_panel::LoginPanel;
use crate::order_panel::OrderPanel;

/// Services shared with the worker threads
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<Mutex<AuthService>>,
    pub orders: Arc<OrderService>,
}

impl Services {
    fn open(config: &Config) -> Result<Self> {
        let gateway = open_workflow_client(config)?;
        let attempts: Arc<dyn LoginAttemptRepository> = match open_attempt_repo(config) {
            Ok(repo) => repo,
            Err(e) => {
                warn!("Attempt store unavailable, keeping attempts in memory: {}", e);
                Arc::new(MemoryAttemptStore::new())
            }
        };
        let auth = AuthService::new(gateway.clone(), attempts, config.throttle());
        Ok(Self {
            auth: Arc::new(Mutex::new(auth)),
            orders: Arc::new(OrderService::new(gateway)),
        })
    }
}

/// Main application state
pub struct RtsApp {
    services: Option<Services>,
    /// Set when the services could not be created
    startup_error: Option<String>,
    /// Token of the logged-in session
    session_token: Option<String>,
    login_panel: LoginPanel,
    order_panel: OrderPanel,
}

impl RtsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_link: Option<String>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.interaction.tooltip_delay = 0.5;
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        let config = match Config::load() {
            Ok(config) => config.with_env_overrides(),
            Err(e) => {
                warn!("Could not load configuration, using defaults: {}", e);
                Config::default().with_env_overrides()
            }
        };

        let (services, startup_error) = match Services::open(&config) {
            Ok(services) => (Some(services), None),
            Err(e) => (None, Some(format!("Initialisierung fehlgeschlagen: {}", e))),
        };

        Self {
            services,
            startup_error,
            session_token: None,
            login_panel: LoginPanel::new(),
            order_panel: OrderPanel::new(FormOptions::from_config(&config), initial_link),
        }
    }

    fn logout(&mut self) {
        if let Some(ref services) = self.services {
            match services.auth.lock() {
                Ok(mut auth) => auth.logout(),
                Err(e) => warn!("Auth service unavailable: {}", e),
            }
        }
        self.session_token = None;
        self.order_panel.reset_submission();
        info!("Session closed");
    }
}

impl eframe::App for RtsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Transportauftrag bestätigen");
                if self.session_token.is_some() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Abmelden").clicked() {
                            self.logout();
                        }
                    });
                }
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref error) = self.startup_error {
                ui.label(RichText::new(error).color(Color32::RED));
                return;
            }
            let Some(services) = self.services.clone() else {
                return;
            };

            match self.session_token.clone() {
                None => {
                    if let Some(token) = self.login_panel.ui(ui, &services) {
                        self.session_token = Some(token);
                        self.order_panel.on_login(&services);
                    }
                }
                Some(token) => self.order_panel.ui(ui, &services, &token),
            }
        });
    }
}
