//! Builders for content-item fixtures used across unit tests.

use contentindex_shared::{
    ContentItem, Element, Elements, ItemSystem, LinkedItemsElement, RichTextElement, Term,
    TermsElement, TextElement,
};

pub(crate) struct ItemBuilder {
    system: ItemSystem,
    elements: Elements,
}

impl ItemBuilder {
    pub(crate) fn new(codename: &str) -> Self {
        Self {
            system: ItemSystem {
                id: format!("id-{codename}"),
                name: codename.replace('_', " "),
                codename: codename.to_string(),
                language: "en".into(),
                item_type: "component".into(),
                collection: "default".into(),
            },
            elements: Elements::new(),
        }
    }

    pub(crate) fn language(mut self, language: &str) -> Self {
        self.system.language = language.to_string();
        self
    }

    pub(crate) fn item_type(mut self, item_type: &str) -> Self {
        self.system.item_type = item_type.to_string();
        self
    }

    pub(crate) fn element(mut self, key: &str, element: Element) -> Self {
        self.elements.insert(key.to_string(), element);
        self
    }

    pub(crate) fn text(self, key: &str, value: &str) -> Self {
        self.element(key, text(value))
    }

    pub(crate) fn rich_text(self, key: &str, html: &str, linked: Vec<ContentItem>) -> Self {
        self.element(key, rich_text(html, linked))
    }

    pub(crate) fn linked_items(self, key: &str, linked: Vec<ContentItem>) -> Self {
        self.element(key, linked_items(linked))
    }

    pub(crate) fn build(self) -> ContentItem {
        ContentItem {
            system: self.system,
            elements: self.elements,
        }
    }
}

pub(crate) fn text(value: &str) -> Element {
    Element::Text(TextElement {
        value: Some(value.to_string()),
        ..Default::default()
    })
}

pub(crate) fn url_slug(value: &str) -> Element {
    Element::UrlSlug(TextElement {
        value: Some(value.to_string()),
        ..Default::default()
    })
}

pub(crate) fn rich_text(html: &str, linked: Vec<ContentItem>) -> Element {
    Element::RichText(RichTextElement {
        value: Some(html.to_string()),
        linked_items: linked,
        ..Default::default()
    })
}

pub(crate) fn linked_items(linked: Vec<ContentItem>) -> Element {
    Element::LinkedItems(LinkedItemsElement {
        value: linked.iter().map(|i| i.system.codename.clone()).collect(),
        linked_items: linked,
        ..Default::default()
    })
}

pub(crate) fn taxonomy(names: &[&str]) -> Element {
    Element::Taxonomy(TermsElement {
        value: names
            .iter()
            .map(|name| Term {
                name: name.to_string(),
                codename: name.to_lowercase().replace(' ', "_"),
            })
            .collect(),
        ..Default::default()
    })
}

pub(crate) fn multiple_choice(names: &[&str]) -> Element {
    match taxonomy(names) {
        Element::Taxonomy(terms) => Element::MultipleChoice(terms),
        other => other,
    }
}
