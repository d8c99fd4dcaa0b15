//! Terminal rendition of the about view.

use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use elystra_common::ElystraError;
use elystra_config::{ContactLink, ElystraConfig, PresenceConfig};
use elystra_presence::view::render_indicator;
use elystra_presence::{
    HttpConfig, Indicator, LanyardHttp, LiveCard, LoadState, Reloader, RoleAnnotation, Status,
    TeamView, TungsteniteConnector, WatcherConfig,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// What the caller should do once the view returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    Done,
    /// Tear everything down and mount the view again from scratch.
    Reload,
}

/// Records a reload request from the retry affordance.
#[derive(Debug, Default)]
pub struct ReloadRequest {
    requested: Cell<bool>,
}

impl ReloadRequest {
    pub fn requested(&self) -> bool {
        self.requested.get()
    }
}

impl Reloader for ReloadRequest {
    fn reload(&self) {
        self.requested.set(true);
    }
}

pub fn annotations(config: &ElystraConfig) -> Vec<RoleAnnotation> {
    config
        .team
        .iter()
        .map(|member| RoleAnnotation {
            identity: member.identity.clone(),
            role: member.role.clone(),
            description: member.description.clone(),
        })
        .collect()
}

pub fn http_config(presence: &PresenceConfig) -> HttpConfig {
    HttpConfig {
        api_base_url: presence.api_base_url.clone(),
        connect_timeout: Duration::from_secs(presence.connect_timeout_secs),
        request_timeout: Duration::from_secs(presence.request_timeout_secs),
    }
}

pub fn watcher_config(presence: &PresenceConfig) -> WatcherConfig {
    WatcherConfig {
        socket_url: presence.socket_url.clone(),
        reconnect_delay: Duration::from_millis(presence.reconnect_delay_ms),
    }
}

/// Mount the about view: load the team, print the cards, then follow
/// status changes until Ctrl-C (or return right away with `once`).
pub async fn run(
    config: &ElystraConfig,
    once: bool,
    color: bool,
) -> Result<ViewOutcome, ElystraError> {
    let source = Arc::new(LanyardHttp::new(http_config(&config.presence))?);
    let mut view = TeamView::new(annotations(config));

    println!("Loading team...");
    view.mount(source).await;

    match view.state() {
        LoadState::Loading => Ok(ViewOutcome::Done),
        LoadState::Failed(message) => {
            println!("{message}\n");
            println!("{}", render_footer(config, color));
            if once {
                return Ok(ViewOutcome::Done);
            }
            println!("Press Enter to retry, Ctrl-C to quit.");
            if !wait_for_retry().await? {
                return Ok(ViewOutcome::Done);
            }
            let request = ReloadRequest::default();
            view.retry(&request);
            Ok(if request.requested() {
                ViewOutcome::Reload
            } else {
                ViewOutcome::Done
            })
        }
        LoadState::Ready(_) => {
            let connector = Arc::new(TungsteniteConnector::new(Duration::from_secs(
                config.presence.connect_timeout_secs,
            )));
            let cards = view.mount_cards(connector, &watcher_config(&config.presence));

            for card in &cards {
                println!("{}\n", card.render(color));
            }
            println!("{}", render_footer(config, color));

            if !once {
                follow_changes(&cards, color).await;
            }
            for card in cards {
                card.watcher.stop().await;
            }
            Ok(ViewOutcome::Done)
        }
    }
}

/// The about and contact sections shown below the team in every state.
pub fn render_footer(config: &ElystraConfig, color: bool) -> String {
    let badge = if color {
        format!("{}●\x1b[0m We're Online", Indicator::Green.ansi())
    } else {
        "● We're Online".to_string()
    };
    let mut lines = vec![
        format!("About {}", config.site.site_name),
        "This project is under development.".to_string(),
        String::new(),
        badge,
    ];
    lines.extend(config.contact.iter().map(contact_line));
    lines.join("\n")
}

fn contact_line(link: &ContactLink) -> String {
    format!("  {}: {}", link.label, link.url)
}

/// Print one line per distinct status change until Ctrl-C.
async fn follow_changes(cards: &[LiveCard], color: bool) {
    let (tx, mut rx) = mpsc::channel::<(String, Status)>(64);
    let mut forwarders = Vec::with_capacity(cards.len());

    for card in cards {
        let mut status_rx = card.watcher.subscribe();
        let name = card.member.presence.display_name.clone();
        let tx = tx.clone();
        forwarders.push(tokio::spawn(async move {
            while status_rx.changed().await.is_ok() {
                let status = *status_rx.borrow_and_update();
                if tx.send((name.clone(), status)).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx);

    info!(cards = cards.len(), "Watching team presence");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                debug!("Ctrl-C received");
                break;
            }
            change = rx.recv() => match change {
                Some((name, status)) => println!(
                    "[{}] {name} is now {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    render_indicator(status, color)
                ),
                None => break,
            },
        }
    }

    for forwarder in forwarders {
        forwarder.abort();
    }
}

/// Wait for Enter. `false` on Ctrl-C or closed stdin.
async fn wait_for_retry() -> Result<bool, ElystraError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => Ok(false),
        line = lines.next_line() => Ok(line?.is_some()),
    }
}
