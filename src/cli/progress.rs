//! CLI-specific progress handling for butterfly-stitch
//!
//! Provides a chunk progress bar for the command-line interface.

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar counting engine requests
pub fn create_progress_bar(total_chunks: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_chunks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} chunks {msg}")
            .expect("Failed to create progress style")
            .progress_chars("#>-")
    );
    pb
}

/// Progress manager for a chunked resolution
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_chunks: u64, message: &str) -> Self {
        let pb = create_progress_bar(total_chunks);

        // Print initial message to stderr
        eprintln!("{}", message);

        Self { pb }
    }

    /// Update from the resolver's (done, total) callback
    pub fn update(&self, done: usize, total: usize) {
        if self.pb.length().unwrap_or(0) != total as u64 {
            self.pb.set_length(total as u64);
        }
        self.pb.set_position(done as u64);
        if done >= total {
            self.pb.finish_with_message("✅ done");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_progress_bar_template() {
        let pb = create_progress_bar(3);
        assert_eq!(pb.length().unwrap(), 3);

        pb.set_position(1);
        pb.finish();
    }

    #[test]
    fn test_progress_manager_update() {
        let manager = ProgressManager::new(0, "Test resolution");
        manager.update(1, 3);
        assert_eq!(manager.pb.length().unwrap(), 3);
        assert_eq!(manager.pb.position(), 1);

        manager.update(3, 3);
        assert!(manager.pb.is_finished());
    }
}
