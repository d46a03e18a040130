// 進捗通知: 完了ページ数を受け取り、端末にバーを描画する

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives page-completion events from the assembler.
///
/// `completed` is the number of pages finished so far, `total` the batch
/// size. The assembler reports under a lock, so calls arrive strictly
/// ordered with `completed` increasing by one per call. Implementations
/// must be `Send + Sync`; worker threads share a single reporter.
pub trait ProgressReporter: Send + Sync {
    fn page_completed(&self, completed: usize, total: usize);
}

/// 何も表示しないレポーター。ライブラリ利用時の既定値。
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn page_completed(&self, _completed: usize, _total: usize) {}
}

/// 端末用レポーター: `|████   | 40% (2/5)` 形式のバーをstdoutへ描画する。
///
/// 最終ページの通知で確定し、改行して終了する。
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::with_template("|{bar:35}| {percent:>3}% ({pos}/{len})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█ "),
        );
        Self { bar }
    }
}

impl ProgressReporter for TerminalProgress {
    fn page_completed(&self, completed: usize, total: usize) {
        self.bar.set_position(completed as u64);
        if completed == total {
            self.bar.finish();
        }
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        // 途中失敗でもバーを放置せず改行して抜ける
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
