use indicatif::{ProgressBar, ProgressStyle};

/// Returns a hidden bar counting processed raster tiles; it is drawn
/// once added to a `MultiProgress`.
pub fn tiles(count: u64) -> ProgressBar {
    let pb = ProgressBar::hidden();
    pb.set_prefix("Adjust");
    pb.set_length(count);
    pb.set_style(
        ProgressStyle::with_template("{prefix} {pos}/{len} tiles [{elapsed}]\n[{wide_bar:.cyan/blue}]")
            .expect("incorrect progress bar format string")
            .progress_chars("#>-"),
    );
    pb
}
