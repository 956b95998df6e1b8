//! `Selection` implementation over a `scraper` tree.
use hq_query::{QueryError, Selection};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::fmt;

/// Zero or more nodes of an [`HtmlDocument`](crate::HtmlDocument).
#[derive(Clone)]
pub struct HtmlSelection<'a> {
    document: &'a Html,
    scope: Scope<'a>,
}

#[derive(Clone)]
enum Scope<'a> {
    /// The document node, which is not an element.
    Document,
    Elements(Vec<ElementRef<'a>>),
}

impl<'a> HtmlSelection<'a> {
    pub(crate) fn document(document: &'a Html) -> Self {
        Self {
            document,
            scope: Scope::Document,
        }
    }

    fn elements(&self, elements: Vec<ElementRef<'a>>) -> Self {
        Self {
            document: self.document,
            scope: Scope::Elements(elements),
        }
    }

    fn first(&self) -> Option<ElementRef<'a>> {
        match &self.scope {
            Scope::Document => None,
            Scope::Elements(elements) => elements.first().copied(),
        }
    }
}

fn compile(selector: &str) -> Result<Selector, QueryError> {
    Selector::parse(selector).map_err(|e| QueryError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

impl<'a> Selection for HtmlSelection<'a> {
    fn find(&self, selector: &str) -> Result<Self, QueryError> {
        let compiled = compile(selector)?;
        let found = match &self.scope {
            Scope::Document => self.document.select(&compiled).collect(),
            Scope::Elements(elements) => {
                // Overlapping subtrees must not report the same node twice.
                let mut seen = HashSet::new();
                elements
                    .iter()
                    .flat_map(|el| el.select(&compiled))
                    .filter(|el| seen.insert(el.id()))
                    .collect()
            }
        };
        let found = self.elements(found);
        log::trace!("find('{}') matched {} node(s)", selector, found.count());
        Ok(found)
    }

    fn each(&self) -> Vec<Self> {
        match &self.scope {
            Scope::Document => vec![self.clone()],
            Scope::Elements(elements) => elements
                .iter()
                .map(|el| self.elements(vec![*el]))
                .collect(),
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.first()
            .and_then(|el| el.value().attr(name))
            .map(str::to_string)
    }

    fn inner_html(&self) -> Result<String, QueryError> {
        Ok(match &self.scope {
            Scope::Document => self.document.html(),
            Scope::Elements(_) => self.first().map(|el| el.inner_html()).unwrap_or_default(),
        })
    }

    fn text(&self) -> String {
        match &self.scope {
            Scope::Document => self.document.root_element().text().collect(),
            Scope::Elements(elements) => elements.iter().flat_map(|el| el.text()).collect(),
        }
    }

    fn count(&self) -> usize {
        match &self.scope {
            Scope::Document => 1,
            Scope::Elements(elements) => elements.len(),
        }
    }

    fn at(&self, index: usize) -> Self {
        match &self.scope {
            Scope::Document if index == 0 => self.clone(),
            Scope::Document => self.elements(vec![]),
            Scope::Elements(elements) => {
                self.elements(elements.get(index).copied().into_iter().collect())
            }
        }
    }
}

impl fmt::Debug for HtmlSelection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Scope::Document => f.write_str("HtmlSelection(#document)"),
            Scope::Elements(elements) => f
                .debug_tuple("HtmlSelection")
                .field(&elements.iter().map(|el| el.value().name()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

impl PartialEq for HtmlSelection<'_> {
    fn eq(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.document, other.document) {
            return false;
        }
        match (&self.scope, &other.scope) {
            (Scope::Document, Scope::Document) => true,
            (Scope::Elements(a), Scope::Elements(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id() == y.id())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::HtmlDocument;
    use hq_query::{QueryError, Selection};

    const PAGE: &str = r#"<html><head><title>T</title></head><body>
        <div id="main"><a href="/one" class="x">One</a><div><a href="/two">Two</a></div></div>
        <ul><li>a</li><li>b</li></ul>
    </body></html>"#;

    #[test]
    fn test_find_from_document_root() {
        let doc = HtmlDocument::parse(PAGE);
        let links = doc.root().find("a").unwrap();
        assert_eq!(links.count(), 2);
        assert_eq!(doc.root().find("html").unwrap().count(), 1);
    }

    #[test]
    fn test_find_deduplicates_nested_scopes() {
        let doc = HtmlDocument::parse(PAGE);
        let divs = doc.root().find("div").unwrap();
        assert_eq!(divs.count(), 2);
        // The inner link is a descendant of both divs.
        let links = divs.find("a").unwrap();
        assert_eq!(links.count(), 2);
    }

    #[test]
    fn test_find_excludes_scope_itself() {
        let doc = HtmlDocument::parse(PAGE);
        let main = doc.root().find("#main").unwrap();
        assert_eq!(main.find("div").unwrap().count(), 1);
    }

    #[test]
    fn test_each_and_at() {
        let doc = HtmlDocument::parse(PAGE);
        let items = doc.root().find("li").unwrap();
        let each = items.each();
        assert_eq!(each.len(), 2);
        assert_eq!(each[1].text(), "b");
        assert_eq!(items.at(1), each[1]);
        assert_eq!(items.at(7).count(), 0);
    }

    #[test]
    fn test_attr_reads_first_node() {
        let doc = HtmlDocument::parse(PAGE);
        let links = doc.root().find("a").unwrap();
        assert_eq!(links.attr("href").as_deref(), Some("/one"));
        assert_eq!(links.attr("title"), None);
        assert_eq!(doc.root().attr("href"), None);
    }

    #[test]
    fn test_text_concatenates_all_nodes() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.root().find("li").unwrap().text(), "ab");
        assert_eq!(doc.root().find("title").unwrap().text(), "T");
    }

    #[test]
    fn test_inner_html() {
        let doc = HtmlDocument::parse(PAGE);
        let ul = doc.root().find("ul").unwrap();
        assert_eq!(ul.inner_html().unwrap(), "<li>a</li><li>b</li>");
        assert_eq!(doc.root().find("nope").unwrap().inner_html().unwrap(), "");
        assert!(doc.root().inner_html().unwrap().contains("<title>T</title>"));
    }

    #[test]
    fn test_document_root_behaves_as_single_node() {
        let doc = HtmlDocument::parse(PAGE);
        let root = doc.root();
        assert_eq!(root.count(), 1);
        assert_eq!(root.each(), vec![root.clone()]);
        assert_eq!(root.at(0), root);
        assert_eq!(root.at(1).count(), 0);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = HtmlDocument::parse(PAGE);
        let err = doc.root().find("a[").unwrap_err();
        assert!(matches!(err, QueryError::Selector { ref selector, .. } if selector == "a["));
    }
}
