use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::debug;

use kg_engine::{GameConfig, GameContext};
use kg_roster::DirSource;

use crate::console::Console;

pub fn run(
    dir: &Path,
    region: Option<&str>,
    unified: Option<String>,
    seed: Option<u64>,
    state: &Path,
) -> Result<(), String> {
    let settings = super::open_settings(state)?;
    let mut config = GameConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let source = DirSource::new(PathBuf::from(dir));
    let mut ctx = GameContext::new(Box::new(source), super::layout(unified), settings, config);

    // Switching region fetches the roster itself.
    match region {
        Some(code) => {
            ctx.set_region_code(code).map_err(|e| e.to_string())?;
        }
        None => {
            ctx.load_roster();
        }
    }

    let mut console = Console::new(ctx);
    debug!(state = %state.display(), status = %console.context().engine().status(), "session ready");
    let server = console.context().roster().region().code().to_uppercase();

    println!("  {} Kivotos Guessr", "Starting".bold());
    println!(
        "  Server: {server} | Max guesses: {}",
        console.context().settings().max_guesses()
    );
    println!("  Type a student's name to guess, 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", console.status_text());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match console.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
    }

    Ok(())
}
