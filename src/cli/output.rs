use console::{style, Emoji};
use std::fmt::Display;

/// Centralized output formatting utilities for consistent CLI presentation
pub struct Output;

impl Output {
    /// Print a success message with checkmark
    pub fn success<T: Display>(message: T) {
        println!("{} {}", style(Emojis::SUCCESS).green(), message);
    }

    /// Print a warning message
    pub fn warning<T: Display>(message: T) {
        println!("{} {}", style(Emojis::WARNING).yellow(), message);
    }

    /// Print an info message
    pub fn info<T: Display>(message: T) {
        println!("{} {}", style(Emojis::INFO).cyan(), message);
    }

    /// Print a sub-item with arrow prefix
    pub fn sub_item<T: Display>(message: T) {
        println!("  {} {}", style("→").dim(), message);
    }

    /// Print a bullet point
    pub fn bullet<T: Display>(message: T) {
        println!("  {} {}", style("•").dim(), message);
    }

    /// Print a section header
    pub fn section<T: Display>(title: T) {
        println!("\n{}", style(title).bold().underlined());
    }

    /// Print a tip/suggestion
    pub fn tip<T: Display>(message: T) {
        println!("{} {}", style("TIP:").cyan(), style(message).dim());
    }

    /// Print next steps guidance
    pub fn next_steps(steps: &[&str]) {
        println!();
        Self::tip("Next steps:");
        for step in steps {
            Self::bullet(step);
        }
    }

    /// Print one row of the branch tree, highlighting the checked-out branch
    pub fn tree_line(prefix: &str, branch: &str, current: bool) {
        if current {
            println!(
                "{}{} {}",
                style(prefix).dim(),
                style(branch).green().bold(),
                style("(current)").dim()
            );
        } else {
            println!("{}{}", style(prefix).dim(), branch);
        }
    }
}

/// Emojis with plain-text fallbacks for terminals that cannot draw them
pub struct Emojis;

impl Emojis {
    pub const SUCCESS: Emoji<'_, '_> = Emoji("✓", "OK");
    pub const WARNING: Emoji<'_, '_> = Emoji("⚠", "WARNING");
    pub const INFO: Emoji<'_, '_> = Emoji("ℹ", "INFO");
}
