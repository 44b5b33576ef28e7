use log::warn;
use nix::sys::signal::{signal, SigHandler, Signal};

const SHELL_IGNORED: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

// The Rust runtime ignores SIGPIPE before main; stages must not inherit that.
const LINE_DEFAULTS: [Signal; 3] = [Signal::SIGINT, Signal::SIGQUIT, Signal::SIGPIPE];

/// The interactive shell survives Ctrl-C / Ctrl-\ aimed at the foreground line.
pub fn ignore_interactive_signals() {
    set_all(&SHELL_IGNORED, SigHandler::SigIgn);
}

/// Ignored dispositions survive exec, so a line's process puts them back
/// before anything else runs in it.
pub fn restore_default_signals() {
    set_all(&LINE_DEFAULTS, SigHandler::SigDfl);
}

fn set_all(signals: &[Signal], handler: SigHandler) {
    for &sig in signals {
        // SigIgn/SigDfl 不涉及自定义 handler
        if let Err(e) = unsafe { signal(sig, handler) } {
            warn!("设置信号 {} 失败: {}", sig, e);
        }
    }
}
