use indicatif::{ProgressBar, ProgressStyle};

/// Shows a spinner with the elapsed time on stderr until the function returns.
pub(crate) fn spin_until_done<R>(msg: impl Into<String>, func: impl FnOnce() -> R) -> R {
    let spinner = ProgressBar::new_spinner()
        .with_style(ProgressStyle::default_spinner().template("{msg}: {elapsed:>10} {spinner:.green}"));
    spinner.set_message(msg.into());
    spinner.enable_steady_tick(100);
    let res = func();
    spinner.finish_and_clear();
    res
}
