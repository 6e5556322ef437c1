//! Field extraction over a markup subtree
//!
//! Matching is by tag name and class token, searching the container's
//! descendants in document order. Criteria that match nothing are simply
//! left out of the result.

use scraper::ElementRef;
use tracing::{debug, trace};

use super::criteria::{ExtractionCriteria, FieldMap, FieldSelector};

/// First descendant of `root` (excluding `root`) matching `selector`
pub fn find_element<'a>(root: ElementRef<'a>, selector: &FieldSelector) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| matches_selector(element, selector))
}

fn matches_selector(element: &ElementRef<'_>, selector: &FieldSelector) -> bool {
    let value = element.value();
    value.name().eq_ignore_ascii_case(&selector.tag)
        && value.classes().any(|class| class == selector.class)
}

/// Human-readable text of an element, trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extract every field in `criteria` that matches inside `container`
pub fn extract_fields(container: ElementRef<'_>, criteria: &ExtractionCriteria) -> FieldMap {
    let mut scraped = FieldMap::new();

    for (key, selector) in criteria.iter() {
        match find_element(container, selector) {
            Some(element) => {
                scraped.insert(key.to_string(), element_text(element));
            }
            None => trace!("No element matched {} for field '{}'", selector, key),
        }
    }

    scraped
}

/// Run [`extract_fields`] over each direct child element of `container`,
/// dropping children where nothing matched
pub fn parse_forecast_list(container: ElementRef<'_>, criteria: &ExtractionCriteria) -> Vec<FieldMap> {
    let mut children = 0usize;
    let results: Vec<FieldMap> = container
        .children()
        .filter_map(ElementRef::wrap)
        .inspect(|_| children += 1)
        .map(|item| extract_fields(item, criteria))
        .filter(|fields| !fields.is_empty())
        .collect();

    debug!(
        "Extracted {} of {} items from <{}>",
        results.len(),
        children,
        container.value().name()
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    const DAYS: &str = r#"
        <ul class="days">
            <li class="day">
                <span class="date-time">Mon</span>
                <div class="wrapper"><span class="temp">75°/60°</span><p class="temp">62°</p></div>
                <span class="description extra">  Partly Cloudy  </span>
            </li>
            <li class="spacer"></li>
            text between items
            <li class="day">
                <span class="date-time">Tue</span>
                <span class="description"><b>Rain</b> showers</span>
            </li>
        </ul>
    "#;

    fn container<'a>(html: &'a Html, css: &str) -> ElementRef<'a> {
        let selector = Selector::parse(css).unwrap();
        html.select(&selector).next().unwrap()
    }

    fn criteria() -> ExtractionCriteria {
        ExtractionCriteria::new()
            .class_field("span", "date-time")
            .class_field("span", "description")
            .class_field("p", "temp")
    }

    #[test]
    fn test_extract_fields_takes_first_match_by_tag_and_class() {
        let html = Html::parse_fragment(DAYS);
        let first = container(&html, "li.day");

        let fields = extract_fields(first, &criteria());
        assert_eq!(fields.get("date-time").map(String::as_str), Some("Mon"));
        assert_eq!(fields.get("description").map(String::as_str), Some("Partly Cloudy"));
        // the <span class="temp"> is skipped because the tag differs
        assert_eq!(fields.get("temp").map(String::as_str), Some("62°"));
    }

    #[test]
    fn test_extract_fields_joins_nested_text() {
        let html = Html::parse_fragment(DAYS);
        let days = container(&html, "ul.days");
        let results = parse_forecast_list(days, &criteria());
        assert_eq!(results[1].get("description").map(String::as_str), Some("Rain showers"));
        assert!(!results[1].contains_key("temp"));
    }

    #[test]
    fn test_extract_fields_without_matches_is_empty() {
        let html = Html::parse_fragment(DAYS);
        let spacer = container(&html, "li.spacer");
        assert!(extract_fields(spacer, &criteria()).is_empty());
    }

    #[test]
    fn test_container_itself_is_not_matched() {
        let html = Html::parse_fragment(r#"<div class="outer"><span class="date-time">Wed</span></div>"#);
        let span = container(&html, "span.date-time");
        assert!(extract_fields(span, &criteria()).is_empty());
    }

    #[test]
    fn test_parse_forecast_list_drops_empty_items() {
        let html = Html::parse_fragment(DAYS);
        let days = container(&html, "ul.days");
        let element_children = days.children().filter_map(ElementRef::wrap).count();

        let results = parse_forecast_list(days, &criteria());
        assert_eq!(element_children, 3);
        assert_eq!(results.len(), 2);
        assert!(results.len() <= element_children);
        assert_eq!(results[0].get("date-time").map(String::as_str), Some("Mon"));
        assert_eq!(results[1].get("date-time").map(String::as_str), Some("Tue"));
    }

    #[test]
    fn test_find_element_matches_class_tokens_only() {
        let html = Html::parse_fragment(r#"<section><div class="temperature">x</div><div class="a temp b">y</div></section>"#);
        let section = container(&html, "section");
        let found = find_element(section, &FieldSelector::new("div", "temp")).unwrap();
        assert_eq!(element_text(found), "y");
    }
}
