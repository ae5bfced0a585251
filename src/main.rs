// looptty: a step-through terminal visualizer for the JavaScript event loop

use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use looptty::samples;
use looptty::simulator::simulate;
use looptty::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [file.js]", program_name);
    eprintln!("       {} --sample <id>", program_name);
    eprintln!("       {} --list-samples", program_name);
    eprintln!();
    eprintln!("With no argument the '{}' sample loads.", samples::default_sample().id);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("looptty");

    // Resolve the source to visualize: a file, a named sample, or the
    // default sample
    let source = match args.get(1).map(|s| s.as_str()) {
        None => samples::default_sample().code.to_string(),
        Some("--list-samples") => {
            for sample in samples::all() {
                println!(
                    "{:18} [{}] {} - {}",
                    sample.id,
                    sample.category.label(),
                    sample.title,
                    sample.description
                );
            }
            return Ok(());
        }
        Some("--sample") => {
            let Some(id) = args.get(2) else {
                eprintln!("Error: --sample requires an id");
                eprintln!();
                print_usage(program_name);
                std::process::exit(1);
            };
            match samples::find(id) {
                Some(sample) => sample.code.to_string(),
                None => {
                    eprintln!("Error: unknown sample '{}'", id);
                    eprintln!("Run '{} --list-samples' to see what is available", program_name);
                    std::process::exit(1);
                }
            }
        }
        Some("--help") | Some("-h") => {
            print_usage(program_name);
            return Ok(());
        }
        Some(file) => {
            if !Path::new(file).exists() {
                eprintln!("Error: File '{}' not found", file);
                eprintln!();
                print_usage(program_name);
                std::process::exit(1);
            }
            fs::read_to_string(file)?
        }
    };

    // Precompute the full trace; simulation never fails, worst case the
    // trace is short
    let trace = simulate(&source);
    eprintln!("Simulated {} execution steps.", trace.len());
    if trace.is_empty() {
        eprintln!("No recognized statements; the trace is empty.");
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(trace, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
