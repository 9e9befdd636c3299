//! Run-compressed rendering of a [`Buffer`] to styled terminal text.

use std::fmt::Write;

use ahash::AHashMap;
use crossterm::style::ContentStyle;

use super::{Buffer, StyleId};

/// Maps a [`StyleId`] to a concrete terminal style at render time.
///
/// Returning `None` renders the affected cells as raw unstyled text, so an
/// incomplete style table degrades gracefully instead of failing.
pub trait StyleResolver {
    fn resolve(&self, id: StyleId) -> Option<ContentStyle>;
}

impl StyleResolver for AHashMap<StyleId, ContentStyle> {
    fn resolve(&self, id: StyleId) -> Option<ContentStyle> {
        self.get(&id).copied()
    }
}

impl Buffer {
    /// Converts the buffer into a styled string, rows joined with `"\n"`.
    /// An empty buffer (zero width or height) renders as `""`.
    ///
    /// Consecutive cells sharing a `StyleId` are merged into runs, and each
    /// run is resolved and styled exactly once. Per-run rather than per-cell
    /// cost is the performance contract of this path: a row costs as many
    /// style resolutions as it has distinct-style runs, regardless of width.
    pub fn render(&self, styles: &impl StyleResolver) -> String {
        if self.width() == 0 || self.height() == 0 {
            return String::new();
        }

        let mut lines = Vec::with_capacity(self.height());
        // Reusable run text buffer, cleared between runs.
        let mut chunk = String::with_capacity(self.width());

        for row in self.rows() {
            // Each cell is ~1 byte of content plus amortized ANSI overhead;
            // 2x width is a reasonable pre-size.
            let mut line = String::with_capacity(self.width() * 2);

            let mut run_start = 0;
            while run_start < row.len() {
                let style = row[run_start].style;
                let mut run_end = run_start + 1;
                while run_end < row.len() && row[run_end].style == style {
                    run_end += 1;
                }

                chunk.clear();
                chunk.extend(row[run_start..run_end].iter().map(|cell| cell.ch));
                match styles.resolve(style) {
                    Some(resolved) => {
                        let _ = write!(line, "{}", resolved.apply(&chunk));
                    }
                    None => line.push_str(&chunk),
                }

                run_start = run_end;
            }

            lines.push(line);
        }

        lines.join("\n")
    }
}
