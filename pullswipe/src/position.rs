//! Content/global index translation.
//!
//! The host list shows `headers + content + footers` cells. Everything the
//! adapter and the app talk about is a content index; everything the host
//! list talks about (hit testing, visible range, notifications) is a global
//! index. All conversions between the two go through [`PositionMapper`].

/// Which region of the list a global position falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// One of the header decorations, with its index among headers.
    Header(usize),
    /// A content item, with its content index.
    Content(usize),
    /// One of the footer decorations, with its index among footers.
    Footer(usize),
}

/// Header/footer bookkeeping for one list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMapper {
    header_count: usize,
    footer_count: usize,
    content_count: usize,
}

impl PositionMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_count(&self) -> usize {
        self.header_count
    }

    pub fn footer_count(&self) -> usize {
        self.footer_count
    }

    pub fn content_count(&self) -> usize {
        self.content_count
    }

    /// Total number of cells the host list shows.
    pub fn total_count(&self) -> usize {
        self.header_count + self.content_count + self.footer_count
    }

    pub fn set_content_count(&mut self, count: usize) {
        self.content_count = count;
    }

    /// Register a header. Returns the global position it occupies.
    pub fn push_header(&mut self) -> usize {
        self.header_count += 1;
        self.header_count - 1
    }

    /// Remove the last header. Returns the global position it occupied.
    pub fn pop_header(&mut self) -> Option<usize> {
        self.header_count = self.header_count.checked_sub(1)?;
        Some(self.header_count)
    }

    /// Register a footer. Returns the global position it occupies.
    pub fn push_footer(&mut self) -> usize {
        self.footer_count += 1;
        self.total_count() - 1
    }

    /// Remove the last footer. Returns the global position it occupied.
    pub fn pop_footer(&mut self) -> Option<usize> {
        let position = self.total_count().checked_sub(1)?;
        self.footer_count = self.footer_count.checked_sub(1)?;
        Some(position)
    }

    /// Content index to global index.
    pub fn to_global(&self, content_index: usize) -> usize {
        content_index + self.header_count
    }

    /// Global index to content index, `None` for decorations and positions
    /// past the end.
    pub fn to_content(&self, global: usize) -> Option<usize> {
        match self.region(global)? {
            Region::Content(index) => Some(index),
            _ => None,
        }
    }

    /// Classify a global position. `None` if it is past the last footer.
    pub fn region(&self, global: usize) -> Option<Region> {
        let content_end = self.header_count + self.content_count;
        if global < self.header_count {
            Some(Region::Header(global))
        } else if global < content_end {
            Some(Region::Content(global - self.header_count))
        } else if global < content_end + self.footer_count {
            Some(Region::Footer(global - content_end))
        } else {
            None
        }
    }

    pub fn is_header(&self, global: usize) -> bool {
        global < self.header_count
    }

    pub fn is_footer(&self, global: usize) -> bool {
        global >= self.header_count + self.content_count
    }

    /// Header or footer cell.
    pub fn is_decoration(&self, global: usize) -> bool {
        self.is_header(global) || self.is_footer(global)
    }

    /// Grid span lookup that keeps decorations full-width.
    ///
    /// `inner` receives a content index and is only consulted for content
    /// cells; without it every content cell spans one column.
    pub fn span_size(
        &self,
        global: usize,
        span_count: usize,
        inner: Option<&dyn Fn(usize) -> usize>,
    ) -> usize {
        match self.region(global) {
            Some(Region::Content(index)) => inner.map(|lookup| lookup(index)).unwrap_or(1),
            _ => span_count,
        }
    }
}

/// A change to the content collection, in content indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChange {
    /// Everything may have changed.
    Reset,
    RangeChanged { start: usize, count: usize },
    RangeInserted { start: usize, count: usize },
    RangeRemoved { start: usize, count: usize },
    Moved { from: usize, to: usize },
}

impl ContentChange {
    /// The same change expressed in global indices.
    pub fn to_global(self, mapper: &PositionMapper) -> ContentChange {
        match self {
            ContentChange::Reset => ContentChange::Reset,
            ContentChange::RangeChanged { start, count } => ContentChange::RangeChanged {
                start: mapper.to_global(start),
                count,
            },
            ContentChange::RangeInserted { start, count } => ContentChange::RangeInserted {
                start: mapper.to_global(start),
                count,
            },
            ContentChange::RangeRemoved { start, count } => ContentChange::RangeRemoved {
                start: mapper.to_global(start),
                count,
            },
            ContentChange::Moved { from, to } => ContentChange::Moved {
                from: mapper.to_global(from),
                to: mapper.to_global(to),
            },
        }
    }
}
