use std::fs;

use anyhow::Context;
use clap::Parser;
use pickup_schedule::config::get_config;
use pickup_schedule::render;
use pickup_schedule::schedule::ScheduleStore;

const HTML_FILENAME: &str = "pickup_schedule.html";

/// Prints the schedule as a monospace table, or writes it as an HTML page.
#[derive(Parser)]
#[command(disable_help_flag = true)]
struct Args {
    /// Write pickup_schedule.html instead of printing a table
    #[arg(short = 'h', long)]
    html: bool,
    /// Print help
    #[arg(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = get_config();
    let registry = config.schema.registry();
    let store = ScheduleStore::load(&config.data_file, config.slots)?;

    let mut buf = String::new();
    if args.html {
        render::render_html(&store, registry, &mut buf)?;
        fs::write(HTML_FILENAME, &buf)
            .with_context(|| format!("error writing file {HTML_FILENAME}"))?;
        println!("HTML table has been written to {HTML_FILENAME}");
    } else {
        render::render_text(&store, registry, &mut buf)?;
        print!("{buf}");
    }

    Ok(())
}
