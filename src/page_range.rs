use crate::error::SelpgError;
use serde::Serialize;

/// Largest accepted page number or page length.
pub const MAX_PAGE: u64 = i64::MAX as u64;

/// An inclusive `[start, end]` window of 1-based page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub start: u64,
    pub end: u64,
}

impl PageRange {
    /// Parse the start and end page arguments, checking start first.
    pub fn parse(start: &str, end: &str) -> Result<Self, SelpgError> {
        let start_page = parse_page_number(start)
            .ok_or_else(|| SelpgError::InvalidStartPage(start.to_string()))?;

        let end_page = parse_page_number(end)
            .filter(|&n| n >= start_page)
            .ok_or_else(|| SelpgError::InvalidEndPage(end.to_string()))?;

        Ok(PageRange {
            start: start_page,
            end: end_page,
        })
    }

    pub fn contains(&self, page: u64) -> bool {
        self.start <= page && page <= self.end
    }

    /// Check the range against the number of pages found in the input.
    pub fn check_total(&self, total_pages: u64) -> Result<(), SelpgError> {
        if total_pages < self.start {
            return Err(SelpgError::StartPageBeyondInput {
                start: self.start,
                total: total_pages,
            });
        }

        if total_pages < self.end {
            return Err(SelpgError::EndPageBeyondInput {
                end: self.end,
                total: total_pages,
            });
        }

        Ok(())
    }
}

/// Parse a positive page number (or page length) in `[1, MAX_PAGE]`.
pub fn parse_page_number(s: &str) -> Option<u64> {
    s.trim()
        .parse::<u64>()
        .ok()
        .filter(|&n| (1..=MAX_PAGE).contains(&n))
}
