use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Plain line to stdout.
pub fn echo(message: &str) {
    println!("{message}");
}

/// Informational line (blue when stdout is a terminal).
pub fn info(message: &str) {
    if std::io::stdout().is_terminal() {
        println!("{}", message.blue());
    } else {
        println!("{message}");
    }
}

/// Success line (green when stdout is a terminal).
pub fn success(message: &str) {
    if std::io::stdout().is_terminal() {
        println!("{}", message.green());
    } else {
        println!("{message}");
    }
}

/// Error line to stderr (red when stderr is a terminal).
pub fn error(message: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}", message.red());
    } else {
        eprintln!("{message}");
    }
}
