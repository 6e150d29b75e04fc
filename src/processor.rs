use crate::config::DelimiterMode;
use crate::error::SelpgError;
use crate::page_range::PageRange;
use std::io::{BufRead, Write};

/// Position within the input while it is being paged.
#[derive(Debug)]
struct PageCursor {
    current_page: u64,
    line_count_in_page: u64,
}

impl PageCursor {
    fn new() -> Self {
        PageCursor {
            current_page: 1,
            line_count_in_page: 0,
        }
    }

    /// Page number of the record just read. In line-count mode the line that
    /// overflows `page_length` is the first line of the next page. In
    /// form-feed mode the cursor moves on after the record, so the next
    /// chunk lands on the following page.
    fn place(&mut self, mode: DelimiterMode) -> u64 {
        match mode {
            DelimiterMode::LineCount { page_length } => {
                self.line_count_in_page += 1;
                if self.line_count_in_page > page_length {
                    self.current_page += 1;
                    self.line_count_in_page = 1;
                }
                self.current_page
            }
            DelimiterMode::FormFeed => {
                let page = self.current_page;
                self.current_page += 1;
                page
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageStats {
    /// Last page that received any input; zero for empty input.
    pub pages: u64,
    pub records_read: u64,
    pub records_written: u64,
    pub bytes_written: u64,
}

impl PageStats {
    /// Whether the input held every page of `range`.
    pub fn check(&self, range: &PageRange) -> Result<(), SelpgError> {
        range.check_total(self.pages)
    }
}

/// Read `input` to the end once, writing every record whose page falls in
/// `range` to `output`. Records are lines or form-feed chunks depending on
/// `mode` and are copied byte for byte, terminator included.
pub fn process<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    range: &PageRange,
    mode: DelimiterMode,
) -> Result<PageStats, SelpgError> {
    let terminator = mode.terminator();
    let mut cursor = PageCursor::new();
    let mut stats = PageStats::default();
    let mut record = Vec::new();

    loop {
        record.clear();
        let n = input
            .read_until(terminator, &mut record)
            .map_err(SelpgError::io("reading input"))?;
        if n == 0 {
            break;
        }

        let page = cursor.place(mode);
        if page != stats.pages {
            tracing::debug!(page, record = stats.records_read + 1, "page begins");
        }
        stats.pages = page;
        stats.records_read += 1;

        if range.contains(page) {
            output
                .write_all(&record)
                .map_err(SelpgError::io("writing output"))?;
            stats.records_written += 1;
            stats.bytes_written += n as u64;
        }
    }

    tracing::info!(
        pages = stats.pages,
        records_read = stats.records_read,
        records_written = stats.records_written,
        bytes_written = stats.bytes_written,
        "input exhausted"
    );

    Ok(stats)
}
