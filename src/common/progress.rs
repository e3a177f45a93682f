use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Failed to create progress style")
    );
    pb.set_message(message.to_string());
    pb
}

/// Bar over a known number of journals; the message shows the journal being worked on
pub fn create_journal_progress_bar(total_journals: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_journals);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} journals {msg}")
            .expect("Failed to create progress style")
            .progress_chars("#>-")
    );
    pb
}
