//! restitch - Main Binary
//!
//! Thin CLI over the puzzle engine: inspect parsed documents and play
//! reconstruction sessions on stdin.

use clap::{Parser, Subcommand};
use restitch::{
    core::Document,
    engine::PuzzleEngine,
    session::{Difficulty, SlotStatus, VerbosityLevel},
    Result,
};
use std::io::BufRead;
use std::path::PathBuf;

/// Verbosity level for event output (supports both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "normal" | "1" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "2" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, normal/1, verbose/2)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "restitch")]
#[command(about = "Document reconstruction puzzles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and dump its groups and fragments
    Parse {
        /// Source document
        doc: PathBuf,
    },

    /// Play a reconstruction session interactively on stdin
    Play {
        /// Source document
        doc: PathBuf,

        /// Group index to play
        #[arg(long, default_value_t = 0)]
        group: usize,

        /// Difficulty (easy, medium, hard)
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// RNG seed for reproducible sessions
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Event output verbosity
        #[arg(long, default_value = "normal")]
        verbosity: VerbosityArg,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { doc } => cmd_parse(&doc),
        Commands::Play {
            doc,
            group,
            difficulty,
            seed,
            verbosity,
        } => cmd_play(&doc, group, difficulty, seed, verbosity.0).await,
    }
}

fn cmd_parse(path: &PathBuf) -> Result<()> {
    let document = Document::load(path)?;
    println!("{}: {} group(s)", document.path, document.groups.len());

    for (gi, group) in document.groups.iter().enumerate() {
        let title = if group.title.is_empty() {
            "(preamble)"
        } else {
            group.title.as_str()
        };
        println!("\n[{}] {} ({} fragments)", gi, title, group.len());
        for fragment in &group.fragments {
            let mut flags = String::new();
            if fragment.is_static {
                flags.push('S');
            }
            if fragment.is_sub_heading {
                flags.push('H');
            }
            if let Some(block) = fragment.block_id {
                flags.push_str(&format!(" {}", block));
            }
            if let Some(flex) = fragment.flex_group_id {
                flags.push_str(&format!(" {}", flex));
            }
            println!(
                "  {:>3} [{:<6}] {:indent$}{}",
                fragment.original_index,
                flags.trim(),
                "",
                fragment.text.trim_end(),
                indent = fragment.indentation
            );
        }
    }
    Ok(())
}

async fn cmd_play(
    path: &PathBuf,
    group: usize,
    difficulty: Difficulty,
    seed: u64,
    verbosity: VerbosityLevel,
) -> Result<()> {
    let document = Document::load(path)?;
    let mut engine = PuzzleEngine::new(document).with_verbosity(verbosity);
    engine.seed_rng(seed);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    engine.set_win_notify(tx);

    engine.start_session(group, difficulty)?;
    print_board(&engine, group);

    if !engine.document().groups[group].is_restored {
        println!("\nCommands: show | pool | place <slot> <fragment-id> | remove <slot> | quit");

        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => continue,
                ["quit"] | ["q"] => {
                    engine.return_to_lobby();
                    return Ok(());
                }
                ["show"] => print_board(&engine, group),
                ["pool"] => print_pool(&engine),
                ["place", slot, id] => {
                    match (slot.parse(), id.parse()) {
                        (Ok(slot), Ok(id)) => {
                            if let Err(e) = engine.place(slot, restitch::core::FragmentId::new(id))
                            {
                                println!("{}", e);
                            }
                        }
                        _ => println!("usage: place <slot> <fragment-id>"),
                    }
                    print_board(&engine, group);
                }
                ["remove", slot] => {
                    match slot.parse() {
                        Ok(slot) => {
                            if let Err(e) = engine.unplace(slot) {
                                println!("{}", e);
                            }
                        }
                        _ => println!("usage: remove <slot>"),
                    }
                    print_board(&engine, group);
                }
                _ => println!("unknown command: {}", line),
            }

            if engine.document().groups[group].is_restored {
                break;
            }
        }
    }

    if engine.document().groups[group].is_restored {
        println!("\nGroup restored!");
        // Let the solved board sit for the display delay, then go back
        if let Some(epoch) = rx.recv().await {
            engine.handle_win_timer(epoch);
            println!("Returning to lobby.");
        }
    }
    Ok(())
}

fn print_board(engine: &PuzzleEngine, group_index: usize) {
    let Some(session) = engine.session() else {
        return;
    };
    let group = &engine.document().groups[group_index];
    let title = if group.title.is_empty() {
        "(preamble)"
    } else {
        group.title.as_str()
    };
    println!("\n== {} ({}) ==", title, session.difficulty);

    let statuses = engine.slot_statuses();
    for (i, slot) in session.slots.iter().enumerate() {
        let mark = match statuses[i] {
            SlotStatus::Empty => ' ',
            SlotStatus::Locked => '#',
            SlotStatus::Correct => '+',
            SlotStatus::Wrong => 'x',
        };
        match slot {
            Some(fragment) => println!("  {:>3} [{}] {}", i, mark, fragment.text.trim_end()),
            None => println!("  {:>3} [{}] ...", i, mark),
        }
    }
}

fn print_pool(engine: &PuzzleEngine) {
    println!("\npool:");
    for fragment in engine.available_pool() {
        println!("  #{:<4} {}", fragment.id, fragment.text.trim_end());
    }
}
