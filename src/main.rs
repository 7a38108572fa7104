use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind, MouseButton, MouseEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use frontline::adapters::ReqwestHttpClient;
use frontline::api::GameApiClient;
use frontline::app::{App, Outgoing};
use frontline::gesture::PointerKind;
use frontline::startup::{bootstrap, BootstrapMode, ClientConfig};
use frontline::sync::tasks::{spawn_command, spawn_poll, spawn_poll_timer};
use frontline::sync::SyncMessage;
use frontline::terminal::{install_panic_hook, BoardTerminal, TerminalSession};
use frontline::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "usage:
  frontline create <player-name>
  frontline join <room-id> <player-name>
  frontline --version";

/// Log file in the working directory. Stdout belongs to the board.
const LOG_FILE: &str = "frontline.log";
const LOG_ENV: &str = "FRONTLINE_LOG";
const DEFAULT_LOG_FILTER: &str = "frontline=info";

/// Longest wait between loop iterations when no gesture timer is pending.
const IDLE_TICK: Duration = Duration::from_millis(50);

type Api = GameApiClient<ReqwestHttpClient>;

#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Version,
    Help,
    Play(BootstrapMode),
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["--version"] | ["-V"] => Ok(Invocation::Version),
        ["--help"] | ["-h"] => Ok(Invocation::Help),
        ["create", name] => Ok(Invocation::Play(BootstrapMode::Create {
            player_name: non_empty(name, "player name")?,
        })),
        ["join", room, name] => Ok(Invocation::Play(BootstrapMode::Join {
            room_id: non_empty(room, "room id")?,
            player_name: non_empty(name, "player name")?,
        })),
        [] => Err("missing command".to_string()),
        [other, ..] => Err(format!("unrecognized arguments starting at {:?}", other)),
    }
}

fn non_empty(value: &str, what: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{} must not be empty", what))
    } else {
        Ok(trimmed.to_string())
    }
}

fn init_logging() -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = match parse_args(&args) {
        Ok(Invocation::Version) => {
            println!("frontline {}", VERSION);
            return Ok(());
        }
        Ok(Invocation::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(Invocation::Play(mode)) => mode,
        Err(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    color_eyre::install()?;
    init_logging()?;

    let config = ClientConfig::from_env()?;
    tracing::info!(version = VERSION, api = %config.api_base_url, "starting");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config, mode))
}

async fn run(config: ClientConfig, mode: BootstrapMode) -> Result<()> {
    let http = ReqwestHttpClient::with_timeout(config.request_timeout);
    let api: Arc<Api> = Arc::new(GameApiClient::with_http(config.api_base_url.clone(), http));

    // Bootstrap runs on the plain terminal so the room id can be shared.
    let mut announced = false;
    let started = bootstrap(api.as_ref(), &mode, config.room_poll_interval, |room| {
        if !announced {
            println!("Room {} is open. Waiting for an opponent to join...", room.id);
            announced = true;
        }
    })
    .await
    .map_err(|err| {
        tracing::error!(error = %err, "bootstrap failed");
        err
    })?;

    install_panic_hook();
    let mut session = TerminalSession::new()?;

    let (message_tx, mut message_rx) = mpsc::unbounded_channel();
    let poll_timer = spawn_poll_timer(config.poll_interval, message_tx.clone());

    let mut app = App::new(config, started.ids);
    app.start(started.initial);
    start_outgoing(&mut app, &api, &message_tx);

    let result = run_app(session.terminal(), &mut app, &api, &message_tx, &mut message_rx).await;

    poll_timer.abort();
    session.restore();
    tracing::info!("exiting");
    result
}

/// Spawn the network work the app queued.
fn start_outgoing(app: &mut App, api: &Arc<Api>, message_tx: &mpsc::UnboundedSender<SyncMessage>) {
    for outgoing in app.drain_outgoing() {
        let ids = app.sync.ids().clone();
        match outgoing {
            Outgoing::Poll(ticket) => {
                spawn_poll(Arc::clone(api), ids, ticket, message_tx.clone());
            }
            Outgoing::Command(ticket) => {
                spawn_command(Arc::clone(api), ids, ticket, message_tx.clone());
            }
        }
    }
}

async fn run_app(
    terminal: &mut BoardTerminal,
    app: &mut App,
    api: &Arc<Api>,
    message_tx: &mpsc::UnboundedSender<SyncMessage>,
    message_rx: &mut mpsc::UnboundedReceiver<SyncMessage>,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
        }

        let wait = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_TICK)
            .min(IDLE_TICK);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                app.tick(Instant::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(event)) => handle_event(app, event),
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "terminal event error");
                    }
                    None => app.quit(),
                }
            }

            Some(message) = message_rx.recv() => {
                app.handle_sync(message);
            }
        }

        start_outgoing(app, api, message_tx);

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_event(app: &mut App, event: Event) {
    let now = Instant::now();
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            app.handle_key(key.code, key.modifiers);
        }
        // Terminal pointers carry no touch/mouse distinction. Drags follow
        // the coordinate overlay, which is the only path that works without
        // hover events.
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                app.pointer_down(mouse.column, mouse.row, PointerKind::Touch, now);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                app.pointer_move(mouse.column, mouse.row, now);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                app.pointer_up(mouse.column, mouse.row, now);
            }
            MouseEventKind::Down(_) => app.pointer_cancel(now),
            _ => {}
        },
        Event::FocusLost => app.pointer_cancel(now),
        Event::Resize(..) => app.mark_dirty(),
        _ => {}
    }
}
