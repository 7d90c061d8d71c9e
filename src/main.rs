//! keystash - Interactive Shell
//!
//! A small line-oriented shell over an in-memory backed store. Useful for
//! poking at normalization, batch addressing, and TTL behavior without
//! writing a host integration.

use keystash::{SetOptions, Store, Value};
use std::io::{self, BufRead, Write as _};
use std::time::Duration;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Shell configuration
struct Config {
    /// Log internal diagnostics
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { verbose: false }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--verbose" => {
                    config.verbose = true;
                    i += 1;
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("keystash version {}", keystash::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }
}

fn print_help() {
    println!(
        r#"
keystash - A TTL-Aware Key/Value Storage Facade

USAGE:
    keystash [OPTIONS]

OPTIONS:
        --verbose        Log internal diagnostics
    -v, --version        Print version information
        --help           Print this help message

COMMANDS (interactive):
    SET key value [ttl_ms]    Store a value, optionally with a TTL
    GET key [key ...]         Read one or more keys
    DEL key [key ...]         Remove keys (and their TTL records)
    KEYS                      List live keys
    ITEMS                     Dump every live entry
    TTL key                   Remaining lifetime in ms (-1 = expired)
    EXPIRE key ms             Set a TTL on an existing key
    HAS key                   Check for a live value
    PEEK key                  Raw read, no expiry processing
    SWEEP                     Clear all expired entries
    CLEAR                     Wipe the store
    QUIT                      Exit
"#
    );
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_args();

    // Set up logging
    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    println!(
        "keystash v{} - TTL-aware key/value shell (in-memory backend)",
        keystash::VERSION
    );
    println!("Type HELP for commands, QUIT to exit.\n");

    let store = Store::in_memory();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("keystash> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let cmd = parts[0].to_ascii_uppercase();
        let args = &parts[1..];
        debug!(cmd, ?args, "dispatching");

        match (cmd.as_str(), args) {
            ("SET", [key, value]) => match store.set(*key, *value) {
                Ok(()) => println!("OK"),
                Err(e) => println!("(error) {}", e),
            },
            ("SET", [key, value, ttl_ms]) => match ttl_ms.parse::<u64>() {
                Ok(ms) => {
                    let opts = SetOptions::with_ttl(Duration::from_millis(ms));
                    match store.set_with(*key, *value, &opts) {
                        Ok(()) => println!("OK"),
                        Err(e) => println!("(error) {}", e),
                    }
                }
                Err(_) => println!("(error) ttl must be an integer of milliseconds"),
            },
            ("GET", [key]) => print_value(store.get(key)),
            ("GET", keys) if !keys.is_empty() => {
                for (key, value) in keys.iter().zip(store.get_many(keys)) {
                    print!("{}: ", key);
                    print_value(value);
                }
            }
            ("DEL", keys) if !keys.is_empty() => {
                let list = Value::array(keys.iter().map(|k| Value::from(*k)));
                store.remove_item(&list);
                println!("OK");
            }
            ("KEYS", []) => {
                let keys = store.get_keys();
                if keys.is_empty() {
                    println!("(empty)");
                }
                for (i, key) in keys.iter().enumerate() {
                    println!("{}) {}", i + 1, key);
                }
            }
            ("ITEMS", []) => {
                let items = store.get_items();
                if items.is_empty() {
                    println!("(empty)");
                }
                for (key, value) in items {
                    println!("{} = \"{}\"", key, value);
                }
            }
            ("TTL", [key]) => match store.get_ttl(key) {
                Some(ms) => println!("{}", ms),
                None => println!("(no ttl)"),
            },
            ("EXPIRE", [key, ttl_ms]) => match ttl_ms.parse::<u64>() {
                Ok(ms) => {
                    if store.set_ttl(key, Duration::from_millis(ms)) {
                        println!("OK");
                    } else {
                        println!("(error) no such key");
                    }
                }
                Err(_) => println!("(error) ttl must be an integer of milliseconds"),
            },
            ("HAS", [key]) => println!("{}", store.has_key(key)),
            ("PEEK", [key]) => print_value(store.peek(key)),
            ("SWEEP", []) => {
                let swept = store.clear_expired();
                println!("swept {} key(s)", swept.len());
                for key in swept {
                    println!("  {}", key);
                }
            }
            ("CLEAR", []) => {
                store.clear();
                println!("OK");
            }
            ("HELP", _) => print_help(),
            ("QUIT", _) | ("EXIT", _) => break,
            _ => println!("(error) unknown command or wrong arguments, try HELP"),
        }
    }

    Ok(())
}

fn print_value(value: Option<String>) {
    match value {
        Some(v) => println!("\"{}\"", v),
        None => println!("(nil)"),
    }
}
