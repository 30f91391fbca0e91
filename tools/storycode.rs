/// StoryCode shell — edit a snippet and turn it into a story.
///
/// Usage: storycode [--config <path>] [--endpoint <url>] [--style <name>]
///                  [--snippet <path>] [--seed <n>] [--once]
///
/// Commands:
///   show              — print the current snippet
///   edit              — replace the snippet (finish with a lone '.')
///   load <path>       — replace the snippet with a file's contents
///   clear             — empty the snippet
///   style [name]      — show or set the style ('random' picks one)
///   generate          — send the snippet to the story service
///   wait              — block until the in-flight story arrives
///   status            — show the trigger and result pane
///   help              — list commands
///   quit              — exit

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

use storycode::core::config::ClientConfig;
use storycode::core::dispatch::{spawn_generation, Completion};
use storycode::core::service::{HttpStoryService, StoryService};
use storycode::core::view::{EditorView, Outcome, ResultPane, Settlement};
use storycode::logging;
use storycode::schema::source::SNIPPET_LANGUAGE;
use storycode::schema::style::StylePreset;

#[derive(Debug, Parser)]
#[command(name = "storycode", about = "Turn your code into a character-driven narrative.")]
struct Args {
    /// RON client config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Story service URL (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,
    /// Style preset label or a free-form phrase.
    #[arg(long)]
    style: Option<String>,
    /// Start with this file instead of the default snippet.
    #[arg(long)]
    snippet: Option<PathBuf>,
    /// Seed for `style random`.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Generate one story, print it and exit.
    #[arg(long)]
    once: bool,
}

fn main() {
    let args = Args::parse();
    logging::init("storycode=info");

    let mut config = match &args.config {
        Some(path) => match ClientConfig::load_from_ron(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("ERROR: Failed to load config {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ClientConfig::default(),
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(style) = &args.style {
        config.style = StylePreset::from_name(style);
    }
    if args.snippet.is_some() {
        config.snippet_path = args.snippet;
    }

    let mut view = EditorView::new(config.style.clone());
    match config.load_snippet() {
        Ok(Some(snippet)) => view.on_source_change(Some(snippet)),
        Ok(None) => {}
        Err(e) => {
            eprintln!("ERROR: Failed to read snippet: {}", e);
            process::exit(1);
        }
    }

    let service: Arc<dyn StoryService> =
        Arc::new(HttpStoryService::new(config.endpoint.clone(), config.timeout()));

    if args.once {
        let outcome = view.generate(service.as_ref());
        println!("{}", view.narrative());
        if outcome != Some(Outcome::Succeeded) {
            process::exit(1);
        }
        return;
    }

    println!("📜 StoryCode");
    println!("Turn your code into a character-driven narrative.");
    println!("Endpoint: {}", config.endpoint);
    println!("Style: {}", view.style());
    println!("Type 'help' for commands.\n");

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut in_flight: Option<Receiver<Completion>> = None;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        poll_completion(&mut view, &mut in_flight);

        print!("storycode> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        poll_completion(&mut view, &mut in_flight);

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "show" => {
                println!("--- Your Code Snippet ({}) ---", SNIPPET_LANGUAGE);
                for (i, l) in view.source().lines().enumerate() {
                    println!("{:>3} | {}", i + 1, l);
                }
                println!("--- End ---");
            }
            "edit" => {
                println!("Enter the new snippet. Finish with a line containing only '.'");
                let mut buf = String::new();
                loop {
                    let mut l = String::new();
                    if stdin.lock().read_line(&mut l).is_err() || l.is_empty() {
                        break;
                    }
                    if l.trim_end_matches(['\r', '\n']) == "." {
                        break;
                    }
                    buf.push_str(&l);
                }
                let buf = buf.trim_end_matches('\n').to_string();
                view.on_source_change(Some(buf));
                println!("Snippet updated ({} lines).", view.source().lines().count());
            }
            "load" => {
                if rest.is_empty() {
                    println!("Usage: load <path>");
                    continue;
                }
                match std::fs::read_to_string(rest) {
                    Ok(contents) => {
                        view.on_source_change(Some(contents));
                        println!("Loaded {} ({} lines).", rest, view.source().lines().count());
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "clear" => {
                view.on_source_change(None);
                println!("Snippet cleared.");
            }
            "style" => {
                if rest.is_empty() {
                    println!("Current style: {}", view.style());
                    println!("Presets:");
                    for preset in StylePreset::BUILT_IN {
                        println!("  {:<12} {}", preset.label(), preset);
                    }
                    println!("  random       pick a preset");
                    println!("Any other text is sent as-is.");
                    continue;
                }
                let style = if rest.eq_ignore_ascii_case("random") {
                    StylePreset::random(&mut rng)
                } else {
                    StylePreset::from_name(rest)
                };
                println!("Style set to: {}", style);
                view.set_style(style);
            }
            "generate" | "gen" | "g" => match view.on_generate_requested() {
                Some(pending) => {
                    in_flight = Some(spawn_generation(service.clone(), pending));
                    println!("{}", view.trigger_label());
                }
                None => println!("Still weaving the current tale. Use 'wait' or 'status'."),
            },
            "wait" | "w" => match in_flight.take() {
                Some(rx) => match rx.recv() {
                    Ok(completion) => apply_completion(&mut view, completion),
                    Err(_) => println!("ERROR: story worker went away"),
                },
                None => println!("No story in flight."),
            },
            "status" | "s" => {
                print_status(&view);
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn poll_completion(view: &mut EditorView, in_flight: &mut Option<Receiver<Completion>>) {
    let Some(rx) = in_flight else {
        return;
    };
    match rx.try_recv() {
        Ok(completion) => {
            *in_flight = None;
            apply_completion(view, completion);
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            *in_flight = None;
        }
    }
}

fn apply_completion(view: &mut EditorView, completion: Completion) {
    if let Settlement::Applied(_) = view.settle(completion.seq, completion.result) {
        println!("\n--- The Generated Story ---");
        println!("{}", view.narrative());
        println!("--- End ---\n");
    }
}

fn print_status(view: &EditorView) {
    let trigger = if view.trigger_enabled() { "enabled" } else { "disabled" };
    println!("Trigger: [{}] ({})", view.trigger_label(), trigger);
    println!("Style: {}", view.style());
    match view.result_pane() {
        ResultPane::Loading => println!("Result: ..."),
        ResultPane::Narrative("") => println!("Result: (none yet)"),
        ResultPane::Narrative(text) => println!("Result:\n{}", text),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  show               Print the current snippet");
    println!("  edit               Replace the snippet (finish with a lone '.')");
    println!("  load <path>        Replace the snippet with a file's contents");
    println!("  clear              Empty the snippet");
    println!("  style [name]       Show or set the story style ('random' picks one)");
    println!("  generate           Send the snippet to the story service");
    println!("  wait               Block until the in-flight story arrives");
    println!("  status             Show the trigger and result pane");
    println!("  help               Show this help");
    println!("  quit               Exit");
}
