//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, shown only with `--verbose`
//! - `success` / `failure` for the final one-line outcome of a command
//!
//! # Example
//!
//! ```ignore
//! log!("favicon"; "Created {}", name);
//! debug!("pipeline"; "decoded {} source", kind);
//! logger::success("wrote favicons.zip (9 files)");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
///
/// Honors `--color` through `owo_colors::set_override`.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "favicon" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_green().bold().to_string())
            .to_string(),
        "archive" | "inspect" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_blue().bold().to_string())
            .to_string(),
        "error" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_red().bold().to_string())
            .to_string(),
        _ => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_yellow().bold().to_string())
            .to_string(),
    }
}

// ============================================================================
// Outcome lines
// ============================================================================

/// Print a success line (✓ prefix, green).
pub fn success(message: &str) {
    let mut stdout = stdout().lock();
    let mark = "✓".if_supports_color(Stream::Stdout, |m| m.green());
    writeln!(stdout, "{mark} {message}").ok();
    stdout.flush().ok();
}

/// Print a failure line (✗ prefix, red) with optional detail on the next line.
pub fn failure(summary: &str, detail: &str) {
    let mut stderr = std::io::stderr().lock();
    let mark = "✗".if_supports_color(Stream::Stderr, |m| m.red());
    if detail.is_empty() {
        writeln!(stderr, "{mark} {summary}").ok();
    } else {
        let detail = detail.if_supports_color(Stream::Stderr, |d| d.dimmed());
        writeln!(stderr, "{mark} {summary}\n{detail}").ok();
    }
    stderr.flush().ok();
}

// ============================================================================
// Tests
// ============================================================================
