use std::ffi::CString;
use std::os::fd::{IntoRawFd, OwnedFd};
use std::os::unix::io::RawFd;
use std::process;

use log::debug;
use nix::errno::Errno;
use nix::fcntl::open;
use nix::unistd::{self, close, dup2, execvp, ForkResult};

use super::process::{
    fatal, fork_process, wait_child, EXIT_FAILURE, EXIT_NOT_EXECUTABLE, EXIT_NOT_FOUND,
};
use crate::shell::parser::ast::{Command, ExecCommand, PipeCommand, RedirectCommand};

/// Runs `command` as the last thing the current process does.
///
/// Call this only in a process dedicated to the command: every branch ends
/// by exec'ing a program or exiting, on success and on failure alike.
pub fn run(command: Command) -> ! {
    match command {
        Command::Exec(exec) => run_exec(exec),
        Command::Redirect(redirect) => run_redirect(redirect),
        Command::Pipe(pipe) => run_pipe(pipe),
    }
}

fn run_exec(exec: ExecCommand) -> ! {
    let Some(program) = exec.program() else {
        process::exit(0)
    };

    let argv = match exec
        .argv()
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(argv) => argv,
        Err(_) => fatal(
            EXIT_FAILURE,
            format_args!("{}: argument contains a NUL byte", program),
        ),
    };

    debug!("执行程序: {:?}", exec.argv());
    let err = match execvp(&argv[0], &argv) {
        Ok(never) => match never {},
        Err(e) => e,
    };

    let code = exec_failure_code(err);
    match err {
        Errno::ENOENT | Errno::ENOTDIR => {
            fatal(code, format_args!("{}: command not found", program))
        }
        Errno::EACCES => fatal(code, format_args!("{}: permission denied", program)),
        e => fatal(code, format_args!("{}: {}", program, e)),
    }
}

/// Exit status for a failed exec: 127 when nothing was found, 126 when
/// something was found but cannot run.
fn exec_failure_code(err: Errno) -> i32 {
    match err {
        Errno::ENOENT | Errno::ENOTDIR => EXIT_NOT_FOUND,
        Errno::EACCES | Errno::ENOEXEC => EXIT_NOT_EXECUTABLE,
        _ => EXIT_FAILURE,
    }
}

fn run_redirect(redirect: RedirectCommand) -> ! {
    let fd = match open(redirect.file.as_str(), redirect.flags(), redirect.mode()) {
        Ok(fd) => fd,
        Err(e) => fatal(
            EXIT_FAILURE,
            format_args!("cannot open {}: {}", redirect.file, e),
        ),
    };
    if let Err(e) = move_fd(fd, redirect.fd()) {
        fatal(
            EXIT_FAILURE,
            format_args!("cannot redirect {}: {}", redirect.file, e),
        );
    }
    debug!("重定向 fd {} -> {}", redirect.fd(), redirect.file);

    run(*redirect.command)
}

fn run_pipe(pipe: PipeCommand) -> ! {
    let PipeCommand { left, right } = pipe;
    let (read_end, write_end) = match unistd::pipe() {
        Ok(ends) => ends,
        Err(e) => fatal(EXIT_FAILURE, format_args!("pipe: {}", e)),
    };

    let left_pid = match fork_process() {
        Ok(ForkResult::Child) => {
            drop(read_end);
            attach(write_end, libc::STDOUT_FILENO);
            run(*left)
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(e) => fatal(EXIT_FAILURE, format_args!("fork: {}", e)),
    };

    let right_pid = match fork_process() {
        Ok(ForkResult::Child) => {
            drop(write_end);
            attach(read_end, libc::STDIN_FILENO);
            run(*right)
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(e) => {
            // 左侧已经在运行：关闭管道让它结束，再回收
            drop(read_end);
            drop(write_end);
            wait_child(left_pid);
            fatal(EXIT_FAILURE, format_args!("fork: {}", e))
        }
    };
    debug!("管道已建立: {} | {}", left_pid, right_pid);

    drop(read_end);
    drop(write_end);
    let left_status = wait_child(left_pid);
    let right_status = wait_child(right_pid);
    debug!("管道结束: {} | {}", left_status, right_status);
    process::exit(0)
}

/// Makes `fd` the process's `target` descriptor, or dies trying.
fn attach(fd: OwnedFd, target: RawFd) {
    if let Err(e) = move_fd(fd.into_raw_fd(), target) {
        fatal(EXIT_FAILURE, format_args!("dup2 onto {}: {}", target, e));
    }
}

/// Duplicates `fd` onto `target` and closes the original. If the kernel
/// already handed out `target` itself there is nothing to move.
fn move_fd(fd: RawFd, target: RawFd) -> nix::Result<()> {
    if fd == target {
        return Ok(());
    }
    dup2(fd, target)?;
    close(fd)
}
