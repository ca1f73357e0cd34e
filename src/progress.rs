/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::domain::Domain;
use crate::pipeline::Stage;
use crate::sources::SourceId;
use crate::status::{SourceStatus, StatusSink};

const TICK: Duration = Duration::from_millis(100);

/// Terminal spinners on stderr, one per source plus a resolve bar.
pub struct ProgressSink {
    multi: MultiProgress,
    sources: Mutex<HashMap<SourceId, ProgressBar>>,
    resolve: Mutex<Option<ProgressBar>>,
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.magenta} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

impl ProgressSink {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            sources: Mutex::new(HashMap::new()),
            resolve: Mutex::new(None),
        }
    }

    fn spinner(&self, message: String) -> ProgressBar {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(spinner_style());
        bar.set_message(message);
        bar.enable_steady_tick(TICK);
        bar
    }
}

impl Default for ProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for ProgressSink {
    fn stage_changed(&self, domain: &Domain, stage: Stage) {
        if stage == Stage::Fetching {
            if let Ok(mut sources) = self.sources.lock() {
                sources.clear();
            }
            let _ = self.multi.println(format!("{}", format!("--- {} ---", domain).bright_magenta()));
        }
    }

    fn source_status(&self, source: SourceId, status: &SourceStatus) {
        let Ok(mut sources) = self.sources.lock() else {
            return;
        };
        match status {
            SourceStatus::Pending => {
                let bar = self.spinner(format!("[*] {}", source));
                sources.insert(source, bar);
            }
            SourceStatus::Succeeded(count) => {
                if let Some(bar) = sources.remove(&source) {
                    bar.finish_and_clear();
                    let _ = self.multi.println(format!(
                        "{}",
                        format!("[✔] {}: {} found", source, count).bright_green()
                    ));
                }
            }
            SourceStatus::Failed(reason) => {
                if let Some(bar) = sources.remove(&source) {
                    bar.finish_and_clear();
                    let _ = self.multi.println(format!(
                        "{} {}",
                        format!("[x] {} error", source).bright_red(),
                        reason.yellow()
                    ));
                }
            }
        }
    }

    fn resolve_started(&self, total: usize) {
        let bar = self.multi.add(ProgressBar::new(total as u64));
        bar.set_style(bar_style());
        bar.set_message("resolving");
        if let Ok(mut slot) = self.resolve.lock() {
            *slot = Some(bar);
        }
    }

    fn probe_completed(&self, _host: &str, _alive: bool) {
        if let Ok(slot) = self.resolve.lock() {
            if let Some(bar) = slot.as_ref() {
                bar.inc(1);
            }
        }
    }

    fn resolve_finished(&self, alive: usize) {
        if let Ok(mut slot) = self.resolve.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
        let _ = self.multi.println(format!(
            "{}",
            format!("[✔] Active subdomains: {}", alive).bright_green()
        ));
    }
}
