use std::{
    io,
    sync::{atomic::AtomicBool, Arc},
};

use signal_hook::consts::TERM_SIGNALS;

/// Routes SIGINT, SIGTERM and SIGQUIT into `flag`.
///
/// The first signal only sets the flag, so the sweep can stop at the next row
/// boundary. A second one, arriving while the flag is already set, terminates
/// the process with exit status 1.
pub fn install(flag: &Arc<AtomicBool>) -> io::Result<()> {
    for &signal in TERM_SIGNALS {
        // Registered first so it sees the flag as it was before this signal.
        signal_hook::flag::register_conditional_shutdown(signal, 1, flag.clone())?;
        signal_hook::flag::register(signal, flag.clone())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_hook::{consts::SIGTERM, low_level::raise};
    use std::sync::atomic::Ordering;

    #[test]
    fn first_signal_only_raises_the_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        install(&flag).unwrap();

        raise(SIGTERM).unwrap();

        assert!(flag.load(Ordering::SeqCst));
    }
}
