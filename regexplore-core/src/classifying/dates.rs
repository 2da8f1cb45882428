//! Date sub-classifier
//!
//! Server logs mostly carry one of three day-level shapes. Each gets its own fragment so
//! the generated pattern keeps the separators and month style of the sample.

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const DAY_MONTH_NAME_YEAR: &str = r"\d{1,2}/[A-Za-z]{3}/\d{4}";
pub(crate) const ISO_DATE: &str = r"\d{4}-\d{2}-\d{2}";
pub(crate) const DAY_MONTH_YEAR: &str = r"\d{1,2}/\d{1,2}/\d{4}";

/// Shapes in the order they are tried
static DATE_SHAPES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [DAY_MONTH_NAME_YEAR, ISO_DATE, DAY_MONTH_YEAR]
        .into_iter()
        .map(|fragment| (Regex::new(&format!("^{}$", fragment)).unwrap(), fragment))
        .collect()
});

/// Fragment for a whole-span date, or `None` when the text is not date-shaped
pub fn date_fragment(text: &str) -> Option<&'static str> {
    DATE_SHAPES
        .iter()
        .find(|(shape, _)| shape.is_match(text))
        .map(|(_, fragment)| *fragment)
}
