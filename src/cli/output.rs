//! Terminal output for referral commands
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::Write;

use colored::Colorize;

use crate::domain::NodeDetails;

/// Placeholder for absent detail fields.
const MISSING: &str = "-";

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print labelled field (green label)
pub fn field(label: &str, msg: &(impl Display + ?Sized)) {
    println!("  {}: {}", label.green(), msg);
}

/// Print view-state line (dimmed, indented)
pub fn status(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg.to_string().dimmed());
}

/// Print plain output (no color, for data such as JSON)
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

/// Root-to-match path; the match itself is bold.
pub fn breadcrumb(names: &[&str]) {
    let Some((last, ancestors)) = names.split_last() else {
        return;
    };
    let sep = " > ".dimmed().to_string();
    let mut line: String = ancestors
        .iter()
        .map(|name| format!("{}{}", name, sep))
        .collect();
    line.push_str(&last.bold().to_string());
    println!("{}", line);
}

/// Detail card of one referral.
pub fn details(card: &NodeDetails) {
    println!("{}", card.name.cyan().bold());
    field("Name", &card.name);
    field("Email", card.email.as_deref().unwrap_or(MISSING));
    field("Referral Code", card.referral_code.as_deref().unwrap_or(MISSING));
    if let Some(image) = &card.image {
        field("Image", image);
    }
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl Display + ?Sized)) {
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}
