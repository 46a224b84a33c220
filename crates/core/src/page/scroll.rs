//! Scroll-driven page state: progress bar width and the active nav section.

/// Scroll position as a percentage of the scrollable range, in [0, 100].
///
/// Returns 0 when the document is no taller than the viewport.
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let range = document_height - viewport_height;
    if range.is_nan() || range <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / range * 100.0).clamp(0.0, 100.0)
}

/// Layout of one page section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, offset_top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            offset_top,
            height,
        }
    }

    /// A section becomes current once the viewport top passes a point a
    /// third of its height above it.
    fn is_reached(&self, scroll_y: f64) -> bool {
        scroll_y >= self.offset_top - self.height / 3.0
    }
}

/// The last section, in document order, that the scroll position has reached.
pub fn active_section(sections: &[Section], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| s.is_reached(scroll_y))
        .map(|s| s.id.as_str())
}

/// Whether a nav link should be highlighted for the active section.
///
/// With no active section no link is highlighted.
pub fn link_is_active(href: &str, active: Option<&str>) -> bool {
    match active {
        Some(id) if !id.is_empty() => href.contains(id),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<Section> {
        vec![
            Section::new("home", 0.0, 900.0),
            Section::new("skills", 900.0, 600.0),
            Section::new("contact", 1500.0, 300.0),
        ]
    }

    #[test]
    fn progress_is_percentage_of_scrollable_range() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 3000.0, 1000.0), 50.0);
        assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn progress_is_zero_without_scrollable_range() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 500.0, 800.0), 0.0);
        assert_eq!(scroll_progress(f64::NAN, 3000.0, 800.0), 0.0);
    }

    #[test]
    fn progress_clamps_overscroll() {
        assert_eq!(scroll_progress(-50.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(2500.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn first_section_is_active_at_top() {
        assert_eq!(active_section(&page(), 0.0), Some("home"));
    }

    #[test]
    fn section_activates_a_third_of_its_height_early() {
        // skills: 900 - 600 / 3 = 700
        assert_eq!(active_section(&page(), 699.0), Some("home"));
        assert_eq!(active_section(&page(), 700.0), Some("skills"));
        // contact: 1500 - 100 = 1400
        assert_eq!(active_section(&page(), 1400.0), Some("contact"));
    }

    #[test]
    fn no_section_reached() {
        let sections = vec![Section::new("late", 1000.0, 300.0)];
        assert_eq!(active_section(&sections, 0.0), None);
        assert_eq!(active_section(&[], 100.0), None);
    }

    #[test]
    fn link_matching_is_substring() {
        assert!(link_is_active("#skills", Some("skills")));
        assert!(link_is_active("/index.html#contact", Some("contact")));
        assert!(!link_is_active("#home", Some("skills")));
    }

    #[test]
    fn nothing_highlighted_without_active_section() {
        assert!(!link_is_active("#home", None));
        assert!(!link_is_active("#home", Some("")));
    }
}
