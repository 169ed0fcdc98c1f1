//! Progress feedback for one-shot commands
//!
//! Spinners are suppressed when:
//! - `--quiet` flag is passed
//! - `WORDCTL_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Global quiet mode state
static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode from flags and environment
///
/// Call this once at startup with the --quiet flag value.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("WORDCTL_QUIET").map(|v| v == "1").unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn message_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Create a spinner that respects quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Finish a spinner with a success message
pub fn finish_success(pb: Option<ProgressBar>, msg: impl Into<String>) {
    if let Some(pb) = pb {
        pb.set_style(message_style());
        pb.finish_with_message(format!("✓ {}", msg.into()));
    }
}

/// Finish a spinner with an error message
pub fn finish_error(pb: Option<ProgressBar>, msg: impl Into<String>) {
    if let Some(pb) = pb {
        pb.set_style(message_style());
        pb.finish_with_message(format!("✗ {}", msg.into()));
    }
}

/// Await an operation behind a spinner
///
/// `failure` maps the error to the line shown when the spinner finishes.
pub async fn with_spinner_async<T, E>(
    msg: impl Into<String>,
    success_msg: impl FnOnce(&T) -> String,
    failure: impl FnOnce(&E) -> String,
    f: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let pb = spinner(msg);

    match f.await {
        Ok(result) => {
            finish_success(pb, success_msg(&result));
            Ok(result)
        }
        Err(e) => {
            finish_error(pb, failure(&e));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spinner_passes_results_through() {
        let ok: Result<u32, String> =
            with_spinner_async("working", |n| format!("{n}"), |e: &String| e.clone(), async { Ok(7) })
                .await;
        assert_eq!(ok, Ok(7));

        let err: Result<u32, String> = with_spinner_async(
            "working",
            |n| format!("{n}"),
            |e: &String| e.clone(),
            async { Err("boom".to_string()) },
        )
        .await;
        assert_eq!(err, Err("boom".to_string()));
    }
}
