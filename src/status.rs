// Configuration status display: effective settings, blacklist size and
// whether the setup would pass validation.

use colored::Colorize;

use crate::config::{Config, ENV_BLACKLIST_FILE, ENV_ENDPOINT_URL};
use crate::lexical::Blacklist;

/// Display the effective configuration to the terminal.
///
/// `blacklist` is `None` when the configured term file couldn't be loaded;
/// the reason is reported by validation.
pub fn show(config: &Config, blacklist: Option<&Blacklist>) {
    let moderation = &config.moderation;

    println!("\n{}", "=== commentgate status ===".bold());

    if moderation.enable_remote {
        println!(
            "Remote classifier: {} ({}, model {}, timeout {}s)",
            "enabled".green(),
            moderation.endpoint_url.as_deref().unwrap_or("no endpoint"),
            moderation.model,
            moderation.timeout_secs
        );
        println!("Fallback policy: {}", moderation.fallback.as_str());
    } else {
        println!("Remote classifier: {}", "disabled".dimmed());
        println!("  Set {ENV_ENDPOINT_URL} to enable it");
    }

    if moderation.enable_lexical {
        println!("Lexical matcher: {}", "enabled".green());
    } else {
        println!("Lexical matcher: {}", "disabled".yellow());
    }

    match (&config.blacklist_file, blacklist) {
        (Some(path), Some(list)) => println!(
            "Blacklist: {} terms (built-in + {})",
            list.len(),
            path.display()
        ),
        (None, Some(list)) => {
            println!("Blacklist: {} terms (built-in)", list.len());
            println!("  Set {ENV_BLACKLIST_FILE} to add your own");
        }
        (_, None) => println!("Blacklist: {}", "could not be loaded".red()),
    }

    println!("Max comment length: {} characters", config.max_comment_chars);

    if !moderation.enable_remote && !moderation.enable_lexical {
        println!(
            "\n{}",
            "Warning: no classifier is enabled, every comment will be accepted.".yellow()
        );
    }

    match config.validate() {
        Ok(()) => println!("\nConfiguration: {}", "OK".green().bold()),
        Err(e) => println!("\nConfiguration: {} {e:#}", "INVALID".red().bold()),
    }
}
