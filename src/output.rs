//! User-facing console lines, separate from tracing output.
//! Colored prefixes only when the stream is a TTY.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

fn emit(tone: Tone, msg: &str) {
    let to_stderr = matches!(tone, Tone::Warn | Tone::Error);
    let stream = if to_stderr { atty::Stream::Stderr } else { atty::Stream::Stdout };
    let label = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Success => "ok:",
    };
    let line = if atty::is(stream) {
        let painted = match tone {
            Tone::Info => label.cyan().bold().to_string(),
            Tone::Warn => label.yellow().bold().to_string(),
            Tone::Error => label.red().bold().to_string(),
            Tone::Success => label.green().bold().to_string(),
        };
        format!("{painted} {msg}")
    } else {
        format!("{label} {msg}")
    };
    if to_stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Success, msg);
}
