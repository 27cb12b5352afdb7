//! Hostel Warden - Entry Point
//!
//! Interactive front-end for the allocation core. Reads commands from
//! stdin and only ever calls the core contract (allocate / status /
//! reset / save / load).

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use hostel_warden::core::error::Result;
use hostel_warden::hostel::layout::HostelLayout;
use hostel_warden::system::HostelSystem;
use hostel_warden::WardenError;

#[derive(Parser, Debug)]
#[command(name = "hostel-warden", about = "Dormitory room allocation system")]
struct Args {
    /// Fixed RNG seed for reproducible allocation runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML layout file (defaults to the built-in standard layout)
    #[arg(long)]
    layout: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostel_warden=info".into()),
        )
        .init();

    let args = Args::parse();

    let layout = match &args.layout {
        Some(path) => HostelLayout::from_file(path)?,
        None => HostelLayout::standard(),
    };

    let mut system = match args.seed {
        Some(seed) => HostelSystem::with_seed(&layout, seed)?,
        None => HostelSystem::new(&layout)?,
    };

    println!("=== Hostel Room Allocation System ===");
    println!("Commands: allocate, status, history, reset, save <file>, load <file>, quit");

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, arg) = match input.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (input, ""),
        };

        match command {
            "quit" | "q" | "exit" => break,
            "allocate" => {
                if let Err(e) = run_allocate(&mut system) {
                    println!("Error: {}", e);
                }
            }
            "status" | "s" => print_status(&system),
            "history" => print_history(&system),
            "reset" => {
                system.reset();
                println!("All allocations have been reset.");
            }
            "save" => match require_file(arg) {
                Ok(path) => match system.save_to_file(path) {
                    Ok(()) => println!("State saved to {}", path.display()),
                    Err(e) => println!("Error: {}", e),
                },
                Err(e) => println!("Error: {}", e),
            },
            "load" => match require_file(arg) {
                Ok(path) => match system.load_from_file(path) {
                    Ok(()) => println!("State loaded from {}", path.display()),
                    Err(e) => println!("Error: {}", e),
                },
                Err(e) => println!("Error: {}", e),
            },
            _ => println!("Invalid command. Try: allocate, status, history, reset, save, load, quit"),
        }
    }

    Ok(())
}

fn require_file(arg: &str) -> Result<&Path> {
    if arg.is_empty() {
        return Err(WardenError::InvalidRequest(
            "expected a file name, e.g. `save hostel.json`".to_string(),
        ));
    }
    Ok(Path::new(arg))
}

fn run_allocate(system: &mut HostelSystem) -> Result<()> {
    let count = prompt("Number of rooms needed: ")?;
    let group_size: usize = count.trim().parse().map_err(|_| {
        WardenError::InvalidRequest(format!("not a number: {:?}", count.trim()))
    })?;

    let rolls_line = prompt("Roll numbers (one per room, comma-separated): ")?;
    let rolls: Vec<String> = rolls_line
        .split(',')
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    let allocation = system.allocate(group_size, &rolls)?;

    println!("\n=== Allocation Result ===");
    for (roll, room) in &allocation {
        println!("{}: {}", roll, room);
    }
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn print_status(system: &HostelSystem) {
    let status = system.status();
    println!("\n=== Hostel Status ===");
    println!("Total Rooms:     {}", status.total_rooms);
    println!("Occupied Rooms:  {}", status.occupied_rooms);
    println!("Available Rooms: {}", status.available_rooms);
    println!("Total Slots:     {}", status.total_slots);
    println!("Occupied Slots:  {}", status.occupied_slots);
    println!("Available Slots: {}", status.available_slots);

    for (code, building) in &status.buildings {
        for (floor_id, floor) in &building.floors {
            println!(
                "  {} (building {}): {}/{} rooms free, {} slots",
                floor_id, code, floor.available_rooms, floor.total_rooms, floor.available_slots
            );
        }
    }
}

fn print_history(system: &HostelSystem) {
    let history = system.history();
    if history.is_empty() {
        println!("No allocations recorded.");
        return;
    }
    println!("\n=== Allocation History ===");
    for event in &history.events {
        println!(
            "{} - group of {}:",
            event.timestamp.to_rfc3339(),
            event.group_size
        );
        for (roll, room) in &event.allocation {
            println!("  {}: {}", roll, room);
        }
    }
}
