//! Host terminal handling: scoped raw mode and flushed console output.

use std::io::{self, Write, stdin};
use std::os::fd::{AsRawFd, RawFd};
use termios::{ECHO, Termios};

/// Holds the terminal state captured before raw mode was applied.
///
/// Dropping the lock restores that state, so restoration happens on every
/// exit path: normal halt, error propagation and panic unwinding.
pub struct RawLock {
    fd: RawFd,
    termios_orig: Termios,
}

impl Drop for RawLock {
    fn drop(&mut self) {
        // terminal stays in raw mode but no means to repair
        let _ = termios::tcsetattr(self.fd, termios::TCSAFLUSH, &self.termios_orig);
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EchoOptions {
    EchoOn,
    EchoOff,
}

/// Puts stdin into raw mode so keystrokes arrive unbuffered and unechoed.
///
/// # Errors
/// - stdin is not a terminal (e.g. piped input), or the mode change failed.
///   Callers may run without the lock in that case.
pub fn set_terminal_raw(eo: EchoOptions) -> Result<RawLock, std::io::Error> {
    let fd = stdin().as_raw_fd();
    let termios_orig = Termios::from_fd(fd)?;
    let mut termios_raw = termios_orig;
    // https://man7.org/linux/man-pages/man3/termios.3.html
    termios::cfmakeraw(&mut termios_raw);
    // c_lflag ECHO needed if we want to echo characters back after all
    if eo == EchoOptions::EchoOn {
        termios_raw.c_lflag |= ECHO;
    }
    termios::tcsetattr(fd, termios::TCSAFLUSH, &termios_raw)?;
    Ok(RawLock { fd, termios_orig })
}

/// Writes a string to the console and flushes it.
pub fn print(out: &mut impl Write, message: &str) -> io::Result<()> {
    write_bytes(out, message.as_bytes())
}

/// Writes raw guest bytes and flushes so the guest sees its output immediately.
pub fn write_bytes(out: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
    out.write_all(bytes)?;
    out.flush()
}
