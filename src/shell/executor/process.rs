use std::fmt::Display;
use std::process;

use log::{debug, error};
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
pub const EXIT_NOT_FOUND: i32 = 127;

/// Reports `message` on stderr and terminates the current process with `code`.
///
/// Every failure inside a line's process tree ends here: there is no caller
/// to return an error to, only the process that hit it.
pub fn fatal(code: i32, message: impl Display) -> ! {
    error!("{}", message);
    eprintln!("xvsh: {}", message);
    process::exit(code)
}

/// Forks the current process.
///
/// The shell never starts threads, so the child may keep running Rust code
/// (parsing, opening files) until it execs or exits.
pub fn fork_process() -> nix::Result<ForkResult> {
    unsafe { fork() }
}

/// Blocks until `pid` terminates and returns its shell-style exit code.
pub fn wait_child(pid: Pid) -> i32 {
    loop {
        match waitpid(pid, None) {
            Ok(status) => {
                if let Some(code) = exit_code(status) {
                    debug!("回收子进程 {}: {:?}", pid, status);
                    return code;
                }
            }
            Err(Errno::EINTR) => continue,
            Err(e) => {
                error!("waitpid {} 失败: {}", pid, e);
                return EXIT_FAILURE;
            }
        }
    }
}

/// Exited children report their own code, signalled ones 128 + signal.
/// Anything else means the child is still alive.
pub fn exit_code(status: WaitStatus) -> Option<i32> {
    match status {
        WaitStatus::Exited(_, code) => Some(code),
        WaitStatus::Signaled(_, signal, _) => Some(128 + signal as i32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;

    #[test]
    fn test_exit_code_of_exited_child() {
        let pid = Pid::from_raw(42);
        assert_eq!(exit_code(WaitStatus::Exited(pid, 0)), Some(0));
        assert_eq!(exit_code(WaitStatus::Exited(pid, 127)), Some(127));
    }

    #[test]
    fn test_exit_code_of_signalled_child() {
        let pid = Pid::from_raw(42);
        assert_eq!(
            exit_code(WaitStatus::Signaled(pid, Signal::SIGKILL, false)),
            Some(137)
        );
        assert_eq!(
            exit_code(WaitStatus::Signaled(pid, Signal::SIGPIPE, false)),
            Some(141)
        );
    }

    #[test]
    fn test_live_child_has_no_exit_code() {
        assert_eq!(exit_code(WaitStatus::StillAlive), None);
        assert_eq!(exit_code(WaitStatus::Continued(Pid::from_raw(7))), None);
    }
}
