//! Interactive tally shell.
//!
//! Reads one command per line, runs it through [`crate::commands`] and
//! prints the table, grand total and history after every change. All
//! log output goes to stderr; only the table and messages go to stdout.

use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use drawer_core::{Labels, Locale, RowTotals};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info};

use crate::commands::history::HistoryResponse;
use crate::commands::tally::TallyResponse;
use crate::commands::{config, export, history, metadata, tally};
use crate::error::ApiError;
use crate::state::{AppConfig, DbState, ExportState, SessionState};

// =============================================================================
// Command Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bundle { face_value: i64, count: String },
    Manual { face_value: i64, count: String },
    Set {
        face_value: i64,
        bundle: Option<String>,
        manual: Option<String>,
    },
    Reset,
    Copy,
    Download,
    Name(String),
    Time(String),
    Summary,
    History,
    Show,
    Config,
    Help,
    Quit,
}

/// Parses a face value as typed: `500`, `500円`, `10,000`, `10000円`.
pub fn parse_face_value(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('円')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse().ok()
}

/// Parses one input line.
///
/// ## Errors
/// A usage line for the offending command.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let face_value = |usage: &str| -> Result<i64, String> {
        args.first()
            .and_then(|raw| parse_face_value(raw))
            .ok_or_else(|| format!("usage: {}", usage))
    };

    match word.to_ascii_lowercase().as_str() {
        "bundle" | "b" => Ok(Command::Bundle {
            face_value: face_value("bundle <value> <count>")?,
            count: args.get(1).unwrap_or(&"").to_string(),
        }),
        "manual" | "m" => Ok(Command::Manual {
            face_value: face_value("manual <value> <count>")?,
            count: args.get(1).unwrap_or(&"").to_string(),
        }),
        "set" => Ok(Command::Set {
            face_value: face_value("set <value> <bundle> <manual>")?,
            bundle: args.get(1).map(|s| s.to_string()),
            manual: args.get(2).map(|s| s.to_string()),
        }),
        "reset" => Ok(Command::Reset),
        "copy" => Ok(Command::Copy),
        "download" | "save" => Ok(Command::Download),
        "name" => Ok(Command::Name(rest.to_string())),
        "time" => Ok(Command::Time(rest.to_string())),
        "summary" => Ok(Command::Summary),
        "history" => Ok(Command::History),
        "show" | "" => Ok(Command::Show),
        "config" => Ok(Command::Config),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command: {} (try `help`)", other)),
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Terminal columns taken by `s`; CJK characters count double.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(fill), s)
}

fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

struct TableHeadings {
    denomination: &'static str,
    bundle: &'static str,
    manual: &'static str,
    quantity: &'static str,
    subtotal: &'static str,
    history: &'static str,
    saved: &'static str,
}

fn headings(locale: Locale) -> TableHeadings {
    match locale {
        Locale::Ja => TableHeadings {
            denomination: "金種",
            bundle: "束",
            manual: "バラ",
            quantity: "枚数",
            subtotal: "小計",
            history: "履歴",
            saved: "保存しました",
        },
        Locale::En => TableHeadings {
            denomination: "Denomination",
            bundle: "Bundles",
            manual: "Loose",
            quantity: "Qty",
            subtotal: "Subtotal",
            history: "History",
            saved: "Saved",
        },
    }
}

const NAME_WIDTH: usize = 14;
const COUNT_WIDTH: usize = 8;
const SUBTOTAL_WIDTH: usize = 14;

fn row_line(row: &RowTotals, labels: &Labels) -> String {
    let bundle = if row.supports_bundle {
        row.bundle_count.to_string()
    } else {
        "-".to_string()
    };

    format!(
        "{} {} {} {} {}",
        pad_right(&labels.row_name(row), NAME_WIDTH),
        pad_left(&bundle, COUNT_WIDTH),
        pad_left(&row.manual_count.to_string(), COUNT_WIDTH),
        pad_left(&row.quantity.to_string(), COUNT_WIDTH),
        pad_left(&row.subtotal.grouped(), SUBTOTAL_WIDTH),
    )
}

/// Renders the table and the grand total line.
pub fn render_table(response: &TallyResponse, labels: &Labels) -> String {
    let h = headings(labels.locale());

    let mut lines = Vec::with_capacity(response.rows.len() + 4);
    lines.push(
        format!(
            "{} {} {} {} {}",
            pad_right(h.denomination, NAME_WIDTH),
            pad_left(h.bundle, COUNT_WIDTH),
            pad_left(h.manual, COUNT_WIDTH),
            pad_left(h.quantity, COUNT_WIDTH),
            pad_left(h.subtotal, SUBTOTAL_WIDTH),
        )
        .bold()
        .to_string(),
    );

    for row in &response.rows {
        let line = row_line(row, labels);
        if row.quantity == 0 {
            lines.push(line.dimmed().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.push(String::new());
    lines.push(
        labels
            .grand_total_line(response.grand_total)
            .bold()
            .green()
            .to_string(),
    );
    lines.join("\n")
}

/// Renders the history list, oldest first.
pub fn render_history(response: &HistoryResponse, labels: &Labels) -> String {
    let h = headings(labels.locale());
    let mut lines = vec![format!(
        "{} ({}/{})",
        h.history,
        response.entries.len(),
        response.capacity
    )
    .bold()
    .to_string()];

    for (i, entry) in response.entries.iter().enumerate() {
        lines.push(format!("{:>3}. {}", i + 1, entry.text));
    }
    lines.join("\n")
}

const HELP: &str = "\
bundle <value> <count>          set bundles of 50 for a coin row
manual <value> <count>          set loose pieces for a row
set <value> <bundle> <manual>   set both counts of a row
reset                           record the grand total in history, clear rows
copy                            copy the summary to the clipboard
download                        save the summary as a text file
name <text>                     set the checker name (remembered)
time [YYYY-MM-DDTHH:MM]         set the check time; empty means now
summary | history | show        print the summary, history or table
config                          print the configuration
help | quit";

// =============================================================================
// Shell
// =============================================================================

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// The interactive shell and the state it drives.
pub struct Shell {
    config: AppConfig,
    db: DbState,
    session: SessionState,
    export: ExportState,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Shell {
    pub fn new(config: AppConfig, db: DbState, session: SessionState, export: ExportState) -> Self {
        Shell {
            config,
            db,
            session,
            export,
        }
    }

    fn labels(&self) -> Labels {
        self.session.with_session(|s| *s.labels())
    }

    fn screen(&self) -> String {
        let labels = self.labels();
        let table = render_table(&tally::get_tally(&self.session), &labels);
        let history = history::get_history(&self.session);

        if history.entries.is_empty() {
            table
        } else {
            format!("{}\n\n{}", table, render_history(&history, &labels))
        }
    }

    /// Runs one command.
    pub async fn execute(&self, command: Command, now: NaiveDateTime) -> Result<Outcome, ApiError> {
        debug!(?command, "Executing shell command");

        let out = match command {
            Command::Bundle { face_value, count } => {
                tally::set_bundle(&self.session, face_value, &count)?;
                self.screen()
            }
            Command::Manual { face_value, count } => {
                tally::set_manual(&self.session, face_value, &count)?;
                self.screen()
            }
            Command::Set {
                face_value,
                bundle,
                manual,
            } => {
                tally::set_row(
                    &self.session,
                    face_value,
                    bundle.as_deref(),
                    manual.as_deref(),
                )?;
                self.screen()
            }
            Command::Reset => {
                tally::reset_all(&self.session, now);
                self.screen()
            }
            Command::Copy => {
                let response =
                    export::copy_summary(&self.session, &self.export.clipboard, now).await?;
                response.notice.unwrap_or_default().green().to_string()
            }
            Command::Download => {
                let response =
                    export::download_summary(&self.session, &self.export.download, Local::now())
                        .await?;
                let path = response.path.unwrap_or_default();
                format!(
                    "{}: {}",
                    headings(self.labels().locale()).saved.green(),
                    path.display()
                )
            }
            Command::Name(name) => {
                let response =
                    metadata::set_checker_name(&self.db, &self.session, &name, now).await?;
                let shown = if response.checker_name.is_empty() {
                    self.labels().not_entered().to_string()
                } else {
                    response.checker_name
                };
                format!("{} {}", "✓".green(), shown)
            }
            Command::Time(raw) => {
                let response = metadata::set_check_timestamp(&self.session, &raw, now);
                if response.timestamp_valid || response.timestamp.is_empty() {
                    format!("{} {}", "✓".green(), response.resolved_timestamp)
                } else {
                    format!(
                        "{} {} → {}",
                        "?".yellow(),
                        response.timestamp,
                        response.resolved_timestamp
                    )
                }
            }
            Command::Summary => export::get_summary(&self.session, now),
            Command::History => {
                render_history(&history::get_history(&self.session), &self.labels())
            }
            Command::Show => self.screen(),
            Command::Config => {
                let config = config::get_config(&self.config);
                serde_json::to_string_pretty(&config)
                    .map_err(|e| ApiError::internal(e.to_string()))?
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Print(out))
    }

    /// Runs the read-eval-print loop until `quit`, Ctrl+C or Ctrl+D.
    pub async fn run(self) -> Result<(), ApiError> {
        let mut rl = DefaultEditor::new()
            .map_err(|e| ApiError::internal(format!("failed to initialize readline: {e}")))?;

        let title = self.labels().title();
        println!("{}", title.bold().green());
        println!("Type {} for commands, {} to exit.\n", "help".yellow(), "quit".yellow());
        println!("{}\n", self.screen());

        let prompt = format!("{}> ", "drawer".green());
        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }

                    let command = match parse_command(&line) {
                        Ok(command) => command,
                        Err(usage) => {
                            eprintln!("{}", usage.yellow());
                            continue;
                        }
                    };

                    match self.execute(command, local_now()).await {
                        Ok(Outcome::Print(out)) => println!("{}\n", out),
                        Ok(Outcome::Quit) => break,
                        Err(e) => eprintln!("{}: {e}", "error".red()),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("{}: {e}", "error".red());
                    break;
                }
            }
        }

        info!("Shell closed");
        Ok(())
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::clipboard::tests::FakeClipboard;
    use crate::sink::{ClipboardSink, DownloadSink};
    use chrono::NaiveDate;
    use drawer_db::{Database, DbConfig};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(21, 5, 0)
            .unwrap()
    }

    async fn shell(download_dir: &std::path::Path) -> Shell {
        let config = AppConfig::from_lookup(|_| None);
        let db = DbState::new(Database::new(DbConfig::in_memory()).await.unwrap());
        let session = SessionState::new(config.labels(), now());
        let export = ExportState::new(
            ClipboardSink::new(
                Box::new(FakeClipboard::new("system", false)),
                Box::new(FakeClipboard::new("osc52", false)),
            ),
            DownloadSink::new(download_dir),
        );
        Shell::new(config, db, session, export)
    }

    fn printed(outcome: Outcome) -> String {
        match outcome {
            Outcome::Print(s) => s,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_face_value_forms() {
        assert_eq!(parse_face_value("500"), Some(500));
        assert_eq!(parse_face_value("500円"), Some(500));
        assert_eq!(parse_face_value("10,000"), Some(10_000));
        assert_eq!(parse_face_value("abc"), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("bundle 500 2"),
            Ok(Command::Bundle {
                face_value: 500,
                count: "2".into()
            })
        );
        assert_eq!(
            parse_command("set 100 1"),
            Ok(Command::Set {
                face_value: 100,
                bundle: Some("1".into()),
                manual: None
            })
        );
        assert_eq!(
            parse_command("name  山田 太郎 "),
            Ok(Command::Name("山田 太郎".into()))
        );
        assert_eq!(parse_command("time"), Ok(Command::Time(String::new())));
        assert_eq!(parse_command("QUIT"), Ok(Command::Quit));
        assert!(parse_command("manual").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn test_display_width_counts_cjk_double() {
        assert_eq!(display_width("500円"), 5);
        assert_eq!(pad_left("円", 4), "  円");
    }

    #[tokio::test]
    async fn test_edit_then_reset_shows_history() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell(dir.path()).await;

        shell.execute(parse_command("set 500 2 3").unwrap(), now()).await.unwrap();
        let screen = printed(
            shell
                .execute(parse_command("manual 10000 4").unwrap(), now())
                .await
                .unwrap(),
        );
        assert!(screen.contains("91,500"));

        let screen = printed(shell.execute(Command::Reset, now()).await.unwrap());
        assert!(screen.contains("総合計: 91500 円"));
        assert!(screen.contains("総合計: 0円"));
    }

    #[tokio::test]
    async fn test_copy_prints_notice() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell(dir.path()).await;

        let out = printed(shell.execute(Command::Copy, now()).await.unwrap());
        assert!(out.contains("テキストをコピーしました。"));
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell(dir.path()).await;

        shell.execute(Command::Download, now()).await.unwrap();

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_denomination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell(dir.path()).await;

        assert!(shell
            .execute(parse_command("manual 3000 1").unwrap(), now())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_quit() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell(dir.path()).await;
        assert_eq!(shell.execute(Command::Quit, now()).await.unwrap(), Outcome::Quit);
    }
}
