use indicatif::{ProgressBar, ProgressStyle};

pub fn row_spinner() -> ProgressBar {
    ProgressBar::new_spinner().with_style(
        ProgressStyle::with_template("[{elapsed_precise}] {spinner} {human_pos} rows ({per_sec})")
            .expect("hardcoded"),
    )
}
