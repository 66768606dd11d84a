//! Command implementations

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use rts_app::app::auth_service::MSG_LOGIN_OK;
use rts_app::app::{AuthService, OrderService};
use rts_app::config::{AttemptStorage, Config};
use rts_app::form::{build_form, render_html, FormOptions, FormView, OrderEdits};
use rts_app::link::orders_from_link;
use rts_app::repository::{open_attempt_repo, open_workflow_client};
use rts_domain::service::{decode_with, generate_time_slots, PayloadEncoding};
use rts_types::{Error, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{output_orders, output_outcome, output_slots, output_submission};

/// Environment variable consulted when `--password` is omitted
const ENV_PASSWORD: &str = "RTS_PASSWORD";

pub fn execute(cli: Cli) -> Result<()> {
    // Config commands edit the file as stored, without env overrides
    if let Commands::Config {
        show,
        set_auth_url,
        set_submit_url,
        set_link_opened_url,
        set_storage,
        set_output,
        reset,
    } = cli.command
    {
        return cmd_config(
            show,
            set_auth_url,
            set_submit_url,
            set_link_opened_url,
            set_storage,
            set_output,
            reset,
        );
    }

    let config = Config::load()?.with_env_overrides();
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Decode { value, encoding } => cmd_decode(&value, encoding),
        Commands::Orders { link, notify } => cmd_orders(&config, &link, notify, output_format),
        Commands::Slots { interval } => {
            let interval = interval.unwrap_or(config.time_slots.departure_interval);
            output_slots(output_format, &generate_time_slots(interval))
        }
        Commands::Render { link, output } => cmd_render(&config, &link, output),
        Commands::Login { username, password } => {
            cmd_login(&config, &username, password, output_format)
        }
        Commands::Submit {
            link,
            username,
            password,
            edits,
        } => cmd_submit(&config, &link, &username, password, edits, output_format),
        Commands::Config { .. } => Ok(()),
    }
}

fn cmd_decode(value: &str, encoding: PayloadEncoding) -> Result<()> {
    let decoded = decode_with(value, encoding)?;
    println!("{}", decoded);
    Ok(())
}

fn cmd_orders(config: &Config, link: &str, notify: bool, output_format: OutputFormat) -> Result<()> {
    let orders = orders_from_link(link);
    debug!("Link carried {} orders", orders.len());

    if notify {
        let service = OrderService::new(open_workflow_client(config)?);
        service.notify_link_opened(&orders);
    }

    output_orders(output_format, &orders)
}

fn cmd_render(config: &Config, link: &str, output: Option<PathBuf>) -> Result<()> {
    let orders = orders_from_link(link);
    let view = build_form(&orders, &FormOptions::from_config(config));
    let html = render_html(&view);

    match output {
        Some(path) => {
            std::fs::write(&path, html)?;
            println!("Form written to {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn resolve_password(password: Option<String>) -> String {
    password
        .or_else(|| std::env::var(ENV_PASSWORD).ok())
        .unwrap_or_default()
}

fn login(config: &Config, username: &str, password: Option<String>) -> Result<AuthService> {
    let gateway = open_workflow_client(config)?;
    let attempts = open_attempt_repo(config)?;
    let mut auth = AuthService::new(gateway, attempts, config.throttle());

    let outcome = auth.authenticate(username, &resolve_password(password));
    if !outcome.success {
        return Err(Error::Rejected(outcome.message));
    }
    info!("{}", outcome.message);
    Ok(auth)
}

fn cmd_login(
    config: &Config,
    username: &str,
    password: Option<String>,
    output_format: OutputFormat,
) -> Result<()> {
    let auth = login(config, username, password)?;
    output_outcome(output_format, auth.is_authenticated(), MSG_LOGIN_OK)
}

fn load_edits(path: &Path) -> Result<BTreeMap<String, OrderEdits>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn cmd_submit(
    config: &Config,
    link: &str,
    username: &str,
    password: Option<String>,
    edits: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    let orders = orders_from_link(link);
    let mut view = build_form(&orders, &FormOptions::from_config(config));
    if let FormView::Empty(notice) = &view {
        return Err(Error::Rejected(notice.message.to_string()));
    }

    if let Some(path) = edits {
        view.apply_edits(&load_edits(&path)?)?;
    }

    let auth = login(config, username, password)?;
    let service = OrderService::new(open_workflow_client(config)?);

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Submitting {} orders...", view.groups().len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let confirmations = view.confirmations();
    let outcome = service.submit(&confirmations, auth.session_token());
    pb.finish_and_clear();

    output_submission(output_format, outcome.success, &outcome.message, &confirmations)?;
    if !outcome.success {
        return Err(Error::Rejected(outcome.message));
    }
    Ok(())
}

fn cmd_config(
    show: bool,
    set_auth_url: Option<String>,
    set_submit_url: Option<String>,
    set_link_opened_url: Option<String>,
    set_storage: Option<AttemptStorage>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(url) = set_auth_url {
        config.endpoints.auth_url = url;
        modified = true;
    }

    if let Some(url) = set_submit_url {
        config.endpoints.submit_url = url;
        modified = true;
    }

    if let Some(url) = set_link_opened_url {
        config.endpoints.link_opened_url = url;
        modified = true;
    }

    if let Some(storage) = set_storage {
        config.attempt_storage = storage;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
