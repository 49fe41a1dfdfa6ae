//! Line-oriented terminal view.
//!
//! Typed lines become [`UiEvent`]s; [`AppEvent`]s coming back are rendered as
//! plain text on stdout.

use kanal::{AsyncReceiver, AsyncSender};
use khamsap_types::{AppEvent, ReadControl, TopicLabel, UiEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
commands:
  <text>          search zh, th, romanization and topic (empty line clears)
  :topic <name>   show one topic (:topic ALL for everything)
  :topics         list topics with entry counts
  :say <n>        speak row n
  :read           read the list aloud, or stop reading
  :stop           stop reading
  :voices         list synthesizer voices
  :reload         load the entry list again
  :help           this text
  :quit           exit";

/// What a typed line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ui(UiEvent),
    Help,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Command::Ui(UiEvent::SearchText(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "topic" | "t" => Command::Ui(UiEvent::SelectTopic(TopicLabel::parse(arg))),
        "topics" => Command::Ui(UiEvent::ListTopics),
        "say" | "s" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Ui(UiEvent::SpeakRow(n - 1)),
            _ => Command::Invalid(format!("':say' needs a row number, got '{arg}'")),
        },
        "read" | "r" => Command::Ui(UiEvent::ToggleRead),
        "stop" => Command::Ui(UiEvent::StopRead),
        "voices" => Command::Ui(UiEvent::ListVoices),
        "reload" => Command::Ui(UiEvent::Reload),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Ui(UiEvent::Close),
        other => Command::Invalid(format!("Unknown command ':{other}' (try :help)")),
    }
}

pub fn render(event: &AppEvent) -> Vec<String> {
    match event {
        AppEvent::DataLoaded { count, source } => {
            vec![format!("Loaded {count} entries from {source}")]
        }
        AppEvent::ShowRows(rows) if rows.is_empty() => vec!["(no entries)".to_string()],
        AppEvent::ShowRows(rows) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| format!("{:>3}. {} | {} | {}", i + 1, row.zh, row.th, row.rtgs))
            .collect(),
        AppEvent::ShowTopics(badges) => {
            let line = badges
                .iter()
                .map(|badge| {
                    let marker = if badge.active { "*" } else { " " };
                    format!("{marker}{} ({})", badge.label, badge.count)
                })
                .collect::<Vec<_>>()
                .join("  ");
            vec![format!("topics: {line}")]
        }
        AppEvent::ShowVoices(voices) if voices.is_empty() => {
            vec!["(no voices, using the device default)".to_string()]
        }
        AppEvent::ShowVoices(voices) => voices
            .iter()
            .map(|voice| {
                let marker = if voice.selected { "*" } else { " " };
                format!("{marker} {} [{}]", voice.name, voice.lang)
            })
            .collect(),
        AppEvent::ReadControl(control) => {
            vec![format!("[{}] {}", control.label(), control.title())]
        }
        AppEvent::Notice(notice) => vec![format!("! {notice}")],
        AppEvent::VoicesChanged { count } => vec![format!("({count} voices available)")],
        AppEvent::BackendReady => vec!["Ready. Type :help for commands.".to_string()],
        AppEvent::UiEvent(_) => Vec::new(),
    }
}

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let input = tokio::spawn(input_task(BufReader::new(tokio::io::stdin()), ui_to_app_tx));

    println!("Loading entries...");
    let mut control = ReadControl::default();
    while let Ok(event) = app_to_ui_rx.recv().await {
        // the control is redrawn only when it actually flips
        if let AppEvent::ReadControl(next) = event {
            if next == control {
                continue;
            }
            control = next;
        }

        for line in render(&event) {
            println!("{line}");
        }
    }

    tracing::debug!("UI channel closed");
    input.abort();
    Ok(())
}

/// Forward typed commands until EOF or `:quit`. A failed read also closes the app.
pub async fn input_task<R>(reader: R, ui_to_app_tx: AsyncSender<AppEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let Err(e) = read_input(reader, ui_to_app_tx.clone()).await else {
        return;
    };

    tracing::error!("Input stopped: {:#}", e);
    if let Err(e) = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await {
        tracing::debug!("Close not delivered: {}", e);
    }
}

async fn read_input<R>(reader: R, ui_to_app_tx: AsyncSender<AppEvent>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let event = match lines.next_line().await? {
            None => UiEvent::Close,
            Some(line) => match parse_command(&line) {
                Command::Ui(event) => event,
                Command::Help => {
                    println!("{HELP}");
                    continue;
                }
                Command::Invalid(message) => {
                    println!("! {message}");
                    continue;
                }
            },
        };

        let close = event == UiEvent::Close;
        ui_to_app_tx.send(AppEvent::UiEvent(event)).await?;
        if close {
            return Ok(());
        }
    }
}
