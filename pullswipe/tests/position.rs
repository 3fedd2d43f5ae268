use pullswipe::{ContentChange, PositionMapper, Region};

fn mapper(headers: usize, content: usize, footers: usize) -> PositionMapper {
    let mut mapper = PositionMapper::new();
    for _ in 0..headers {
        mapper.push_header();
    }
    mapper.set_content_count(content);
    for _ in 0..footers {
        mapper.push_footer();
    }
    mapper
}

// =============================================================================
// Index Translation Tests
// =============================================================================

#[test]
fn test_to_global_shifts_past_headers() {
    let m = mapper(2, 5, 1);
    assert_eq!(m.to_global(0), 2);
    assert_eq!(m.to_global(4), 6);
}

#[test]
fn test_to_content_drops_decorations() {
    let m = mapper(2, 5, 1);
    assert_eq!(m.to_content(0), None);
    assert_eq!(m.to_content(1), None);
    assert_eq!(m.to_content(2), Some(0));
    assert_eq!(m.to_content(6), Some(4));
    assert_eq!(m.to_content(7), None);
    assert_eq!(m.to_content(8), None);
}

#[test]
fn test_translation_without_headers_is_identity() {
    let m = mapper(0, 3, 0);
    for i in 0..3 {
        assert_eq!(m.to_global(i), i);
        assert_eq!(m.to_content(i), Some(i));
    }
}

#[test]
fn test_region_classification() {
    let m = mapper(1, 2, 2);
    assert_eq!(m.total_count(), 5);
    assert_eq!(m.region(0), Some(Region::Header(0)));
    assert_eq!(m.region(1), Some(Region::Content(0)));
    assert_eq!(m.region(2), Some(Region::Content(1)));
    assert_eq!(m.region(3), Some(Region::Footer(0)));
    assert_eq!(m.region(4), Some(Region::Footer(1)));
    assert_eq!(m.region(5), None);
}

#[test]
fn test_decoration_predicates() {
    let m = mapper(1, 2, 1);
    assert!(m.is_header(0));
    assert!(!m.is_header(1));
    assert!(m.is_footer(3));
    assert!(!m.is_footer(2));
    assert!(m.is_decoration(0));
    assert!(m.is_decoration(3));
    assert!(!m.is_decoration(1));
}

#[test]
fn test_empty_content_with_decorations() {
    let m = mapper(1, 0, 1);
    assert_eq!(m.region(0), Some(Region::Header(0)));
    assert_eq!(m.region(1), Some(Region::Footer(0)));
    assert_eq!(m.to_content(1), None);
}

// =============================================================================
// Decoration Bookkeeping Tests
// =============================================================================

#[test]
fn test_push_and_pop_positions() {
    let mut m = mapper(0, 3, 0);
    assert_eq!(m.push_header(), 0);
    assert_eq!(m.push_header(), 1);
    assert_eq!(m.push_footer(), 5);
    assert_eq!(m.pop_footer(), Some(5));
    assert_eq!(m.pop_footer(), None);
    assert_eq!(m.pop_header(), Some(1));
    assert_eq!(m.header_count(), 1);
}

// =============================================================================
// Span Tests
// =============================================================================

#[test]
fn test_span_size_decorations_full_width() {
    let m = mapper(1, 4, 1);
    assert_eq!(m.span_size(0, 3, None), 3);
    assert_eq!(m.span_size(5, 3, None), 3);
    assert_eq!(m.span_size(1, 3, None), 1);
}

#[test]
fn test_span_size_delegates_with_content_index() {
    let m = mapper(1, 4, 0);
    let lookup = |index: usize| if index == 0 { 2 } else { 1 };
    assert_eq!(m.span_size(1, 3, Some(&lookup)), 2);
    assert_eq!(m.span_size(2, 3, Some(&lookup)), 1);
    assert_eq!(m.span_size(0, 3, Some(&lookup)), 3);
}

// =============================================================================
// Content Change Tests
// =============================================================================

#[test]
fn test_content_change_to_global() {
    let m = mapper(2, 10, 0);
    assert_eq!(
        ContentChange::RangeInserted { start: 3, count: 2 }.to_global(&m),
        ContentChange::RangeInserted { start: 5, count: 2 }
    );
    assert_eq!(
        ContentChange::RangeRemoved { start: 0, count: 1 }.to_global(&m),
        ContentChange::RangeRemoved { start: 2, count: 1 }
    );
    assert_eq!(
        ContentChange::Moved { from: 1, to: 4 }.to_global(&m),
        ContentChange::Moved { from: 3, to: 6 }
    );
    assert_eq!(ContentChange::Reset.to_global(&m), ContentChange::Reset);
}
