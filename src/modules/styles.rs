// Typed style setters. Each property a helper may touch has a variant here,
// so nothing ever assembles a property assignment from strings at runtime.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Inline,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleProperty {
    Display(Display),
    Visibility(Visibility),
    Color(String),
}

impl StyleProperty {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Display(_) => "display",
            Self::Visibility(_) => "visibility",
            Self::Color(_) => "color",
        }
    }

    pub fn css_value(&self) -> String {
        match self {
            Self::Display(Display::None) => "none".to_string(),
            Self::Display(Display::Inline) => "inline".to_string(),
            Self::Display(Display::Block) => "block".to_string(),
            Self::Visibility(Visibility::Visible) => "visible".to_string(),
            Self::Visibility(Visibility::Hidden) => "hidden".to_string(),
            Self::Color(c) => c.clone(),
        }
    }

    /// Maps a legacy `(property, value)` pair onto a typed setter.
    /// Unknown properties or values give `None` and are not applied.
    pub fn parse(property: &str, value: &str) -> Option<Self> {
        match (property, value) {
            ("display", "none") => Some(Self::Display(Display::None)),
            ("display", "inline") => Some(Self::Display(Display::Inline)),
            ("display", "block") => Some(Self::Display(Display::Block)),
            ("visibility", "visible") => Some(Self::Visibility(Visibility::Visible)),
            ("visibility", "hidden") => Some(Self::Visibility(Visibility::Hidden)),
            ("color", c) if !c.is_empty() => Some(Self::Color(c.to_string())),
            _ => None,
        }
    }
}

/// Host side of style changes (the page DOM in a browser).
///
/// Every method tolerates missing elements: nothing matches, nothing changes.
pub trait StyleApplicator {
    /// Sets `property` on every element with tag `tag` (`"*"` for any) whose
    /// class attribute equals `class`.
    fn apply_by_class(&mut self, tag: &str, class: &str, property: &StyleProperty);
    fn apply_by_id(&mut self, id: &str, property: &StyleProperty);
    /// Inline value of `property` on element `id`; empty when unset, `None`
    /// when there is no such element.
    fn style_of(&self, id: &str, property: &str) -> Option<String>;
    fn set_image_source(&mut self, id: &str, src: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub class: Option<String>,
    pub style: BTreeMap<String, String>,
    pub src: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.style.insert(property.to_string(), value.to_string());
        self
    }

    pub fn style(&self, property: &str) -> &str {
        self.style.get(property).map(String::as_str).unwrap_or("")
    }

    fn apply(&mut self, property: &StyleProperty) {
        self.style
            .insert(property.name().to_string(), property.css_value());
    }
}

/// Flat in-memory element list standing in for a rendered page.
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    pub elements: Vec<Element>,
}

impl PageElements {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }

    fn by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id.as_deref() == Some(id))
    }
}

impl StyleApplicator for PageElements {
    fn apply_by_class(&mut self, tag: &str, class: &str, property: &StyleProperty) {
        for element in self.elements.iter_mut().filter(|e| {
            (tag == "*" || e.tag.eq_ignore_ascii_case(tag)) && e.class.as_deref() == Some(class)
        }) {
            element.apply(property);
        }
    }

    fn apply_by_id(&mut self, id: &str, property: &StyleProperty) {
        if let Some(element) = self.by_id_mut(id) {
            element.apply(property);
        }
    }

    fn style_of(&self, id: &str, property: &str) -> Option<String> {
        self.by_id(id).map(|e| e.style(property).to_string())
    }

    fn set_image_source(&mut self, id: &str, src: &str) {
        if let Some(element) = self.by_id_mut(id) {
            element.src = Some(src.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn page() -> PageElements {
        PageElements::new(vec![
            Element::new("a").with_class("eLink"),
            Element::new("IMG").with_class("eLink"),
            Element::new("span").with_class("eLink"),
            Element::new("a").with_class("eLink other"),
            Element::new("div").with_id("region"),
        ])
    }

    #[test]
    fn test_apply_by_class_matches_tag_and_exact_class() {
        let mut page = page();
        page.apply_by_class("img", "eLink", &StyleProperty::Display(Display::None));

        let hidden: Vec<&str> = page
            .elements
            .iter()
            .filter(|e| e.style("display") == "none")
            .map(|e| e.tag.as_str())
            .collect();
        assert_eq!(hidden, vec!["IMG"]);
    }

    #[test]
    fn test_apply_by_class_wildcard_tag() {
        let mut page = page();
        page.apply_by_class("*", "eLink", &StyleProperty::Display(Display::Inline));
        assert_eq!(
            page.elements
                .iter()
                .filter(|e| e.style("display") == "inline")
                .count(),
            3
        );
    }

    #[test]
    fn test_missing_id_is_ignored() {
        let mut page = page();
        page.apply_by_id("nope", &StyleProperty::Display(Display::Block));
        page.set_image_source("nope", "x.gif");
        assert_eq!(page.style_of("nope", "display"), None);
        assert_eq!(page.style_of("region", "display").as_deref(), Some(""));
    }

    #[rstest]
    #[case("display", "none", Some(StyleProperty::Display(Display::None)))]
    #[case("display", "block", Some(StyleProperty::Display(Display::Block)))]
    #[case("visibility", "hidden", Some(StyleProperty::Visibility(Visibility::Hidden)))]
    #[case("color", "#EAA914", Some(StyleProperty::Color("#EAA914".to_string())))]
    #[case("display", "flex", None)]
    #[case("innerHTML", "<b>x</b>", None)]
    fn test_parse_legacy_pairs(
        #[case] property: &str,
        #[case] value: &str,
        #[case] expected: Option<StyleProperty>,
    ) {
        assert_eq!(StyleProperty::parse(property, value), expected);
    }

    #[test]
    fn test_parse_then_css_value_round_trips() {
        let prop = StyleProperty::parse("visibility", "visible").unwrap();
        assert_eq!(prop.name(), "visibility");
        assert_eq!(prop.css_value(), "visible");
    }
}
