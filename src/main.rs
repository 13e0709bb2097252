mod application;
mod domain;
mod error;
mod infrastructure;
mod ui;
mod utils;

use crossterm::event::{self, Event, KeyEventKind};
use std::env;
use std::io;
use std::time::Duration;

use crate::application::app::App;
use crate::application::cli::{cli_help, is_help, run_cli};
use crate::application::input::handle_key;
use crate::ui::tui::{Tui, restore_terminal, setup_terminal};
use crate::ui::ui;
use crate::utils::logging::init_logging;

fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        None | Some("tui") => run_tui(),
        Some("cli") => {
            if let Err(error) = run_cli(&args[2..]) {
                tracing::error!(%error, "cli command failed");
                eprintln!("{error}");
                std::process::exit(1);
            }
            Ok(())
        }
        Some(flag) if is_help(flag) => {
            print_help(&args[0]);
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {other}\n");
            print_help(&args[0]);
            std::process::exit(1);
        }
    }
}

fn run_tui() -> io::Result<()> {
    let _log_guard = init_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting board");
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, App::new());
    restore_terminal(&mut terminal)?;
    result
}

fn print_help(bin: &str) {
    println!(
        "tsboard {}\n\nUsage:\n  {bin} tui\n  {bin} cli <subcommand>\n\nCLI subcommands:\n{}",
        env!("CARGO_PKG_VERSION"),
        cli_help()
    );
}

fn run_app(terminal: &mut Tui, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui(frame, &mut app))?;

        app.tick();

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(&mut app, key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}
