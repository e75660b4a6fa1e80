use std::fmt;

pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Plain-text table with left-aligned columns sized to their widest cell.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.chars().count();
                match widths.get_mut(i) {
                    Some(slot) => *slot = (*slot).max(w),
                    None => widths.push(w),
                }
            }
        }
        widths
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(f, &rule, &widths)?;
        for row in &self.rows {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

/// Client-side paging over an already-filtered list. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub rows: usize,
    pub page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS_PER_PAGE,
            page: 1,
        }
    }
}

impl Paginator {
    /// Unsupported page sizes fall back to the default.
    pub fn new(rows: usize, page: usize) -> Self {
        let rows = if ROWS_PER_PAGE_OPTIONS.contains(&rows) {
            rows
        } else {
            DEFAULT_ROWS_PER_PAGE
        };
        Self {
            rows,
            page: page.max(1),
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows).max(1)
    }

    /// The page is clamped to the last one.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let page = self.page.min(self.page_count(items.len()));
        let start = (page - 1) * self.rows;
        let end = (start + self.rows).min(items.len());
        &items[start.min(end)..end]
    }

    /// `Showing 11 to 20 of 42 employees`
    pub fn report(&self, total: usize, noun: &str) -> String {
        if total == 0 {
            return format!("Showing 0 to 0 of 0 {noun}");
        }
        let page = self.page.min(self.page_count(total));
        let first = (page - 1) * self.rows + 1;
        let last = (page * self.rows).min(total);
        format!("Showing {first} to {last} of {total} {noun}")
    }
}
