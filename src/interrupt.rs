//! Ctrl-C handling.
//!
//! An interrupt ends the process at once with status 1. Nothing is rolled
//! back; git keeps its own working copy consistent.

/// Exit status after an interrupt.
pub const EXIT_INTERRUPTED: i32 = 1;

#[cfg(unix)]
extern "C" fn on_interrupt(_signal: libc::c_int) {
    const MESSAGE: &[u8] = b"\nInterrupted\n";
    // Only async-signal-safe calls here.
    unsafe {
        libc::write(
            libc::STDERR_FILENO,
            MESSAGE.as_ptr() as *const libc::c_void,
            MESSAGE.len(),
        );
        libc::_exit(EXIT_INTERRUPTED);
    }
}

/// Route SIGINT to an immediate exit.
pub fn install_interrupt_handler() {
    #[cfg(unix)]
    {
        let handler = on_interrupt as extern "C" fn(libc::c_int);
        let previous = unsafe { libc::signal(libc::SIGINT, handler as libc::sighandler_t) };
        if previous == libc::SIG_ERR {
            tracing::debug!("could not install SIGINT handler");
        }
    }
}
