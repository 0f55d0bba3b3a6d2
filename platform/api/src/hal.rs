//! HAL hypermedia: resources decorated with named links.
//!
//! A single resource renders as its own fields plus `_links`:
//!
//! ```json
//! { "id": 1, "_links": { "self": { "href": "http://host/things/1" } } }
//! ```
//!
//! A collection renders its items under `_embedded.<rel>` next to its own `_links`.

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeStruct},
};

pub const SELF_REL: &str = "self";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Link", 1)?;
        state.serialize_field("href", &self.href)?;
        state.end()
    }
}

/// Links keyed by relation, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, link: Link) {
        self.0.push(link);
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|link| link.rel == rel)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in &self.0 {
            map.serialize_entry(&link.rel, link)?;
        }
        map.end()
    }
}

/// A resource plus its links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RepresentationModel<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> RepresentationModel<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            links: Links::new(),
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel)
    }

    pub fn self_href(&self) -> Option<&str> {
        self.link(SELF_REL).map(|link| link.href.as_str())
    }
}

/// An ordered list of resources embedded under `rel`, plus the collection's own links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionModel<T> {
    pub rel: &'static str,
    pub content: Vec<T>,
    pub links: Links,
}

impl<T> CollectionModel<T> {
    pub fn new(rel: &'static str, content: Vec<T>) -> Self {
        Self {
            rel,
            content,
            links: Links::new(),
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel)
    }
}

struct Embedded<'a, T> {
    rel: &'static str,
    items: &'a [T],
}

impl<T: Serialize> Serialize for Embedded<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.rel, self.items)?;
        map.end()
    }
}

impl<T: Serialize> Serialize for CollectionModel<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "_embedded",
            &Embedded {
                rel: self.rel,
                items: &self.content,
            },
        )?;
        map.serialize_entry("_links", &self.links)?;
        map.end()
    }
}

/// Expands path templates such as `/employees/{id}` against a public base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Substitutes each `{name}` in `template` and prefixes the base URL.
    pub fn expand(&self, template: &str, params: &[(&str, &str)]) -> String {
        let mut path = template.to_string();
        for (name, value) in params {
            path = path.replace(&format!("{{{name}}}"), value);
        }
        format!("{}{}", self.base_url, path)
    }

    pub fn link(&self, rel: &str, template: &str, params: &[(&str, &str)]) -> Link {
        Link::new(rel, self.expand(template, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Thing {
        id: i64,
    }

    #[test]
    fn expand_substitutes_parameters() {
        let links = LinkBuilder::new("http://localhost:8080/");
        assert_eq!(
            links.expand("/employees/{id}", &[("id", "7")]),
            "http://localhost:8080/employees/7"
        );
        assert_eq!(links.expand("/employees", &[]), "http://localhost:8080/employees");
    }

    #[test]
    fn representation_flattens_content_next_to_links() {
        let model = RepresentationModel::new(Thing { id: 1 })
            .with_link(Link::new("self", "http://h/things/1"))
            .with_link(Link::new("things", "http://h/things"));
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "_links": {
                    "self": { "href": "http://h/things/1" },
                    "things": { "href": "http://h/things" }
                }
            })
        );
        assert_eq!(model.self_href(), Some("http://h/things/1"));
    }

    #[test]
    fn links_serialize_in_insertion_order() {
        let mut links = Links::new();
        links.push(Link::new("self", "a"));
        links.push(Link::new("employees", "b"));
        let text = serde_json::to_string(&links).unwrap();
        assert_eq!(text, r#"{"self":{"href":"a"},"employees":{"href":"b"}}"#);
    }

    #[test]
    fn empty_collection_still_embeds_and_links() {
        let collection: CollectionModel<Thing> =
            CollectionModel::new("things", Vec::new()).with_link(Link::new("self", "http://h/things"));
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(
            value,
            json!({
                "_embedded": { "things": [] },
                "_links": { "self": { "href": "http://h/things" } }
            })
        );
    }
}
