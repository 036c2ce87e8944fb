//! Shared fixtures for integration tests

use nodequery::{Document, NodeId};

/// Sample page:
///
/// ```text
/// <html>
///   <body id="main">
///     <div id="t1" class="title">Hello</div>
///     <div id="d2"><span id="s1">World</span></div>
///     <p id="p1">Plain <span id="s2">text</span></p>
///   </body>
/// </html>
/// ```
pub struct Page {
    pub doc: Document,
    pub html: NodeId,
    pub body: NodeId,
    pub title: NodeId,
    pub div2: NodeId,
    pub span1: NodeId,
    pub para: NodeId,
    pub span2: NodeId,
}

pub fn page() -> Page {
    let mut doc = Document::new();
    let html = doc.create_root("html").unwrap();
    let body = doc.append_element(html, "body").unwrap();
    doc.set_attribute(body, "id", "main").unwrap();

    let title = doc.append_element(body, "div").unwrap();
    doc.set_attribute(title, "id", "t1").unwrap();
    doc.set_attribute(title, "class", "title").unwrap();
    doc.append_text(title, "Hello").unwrap();

    let div2 = doc.append_element(body, "div").unwrap();
    doc.set_attribute(div2, "id", "d2").unwrap();
    let span1 = doc.append_element(div2, "span").unwrap();
    doc.set_attribute(span1, "id", "s1").unwrap();
    doc.append_text(span1, "World").unwrap();

    let para = doc.append_element(body, "p").unwrap();
    doc.set_attribute(para, "id", "p1").unwrap();
    doc.append_text(para, "Plain ").unwrap();
    let span2 = doc.append_element(para, "span").unwrap();
    doc.set_attribute(span2, "id", "s2").unwrap();
    doc.append_text(span2, "text").unwrap();

    Page {
        doc,
        html,
        body,
        title,
        div2,
        span1,
        para,
        span2,
    }
}
