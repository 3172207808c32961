//! Render tree
//!
//! A minimal element tree produced by the render functions. It serializes to
//! escaped HTML for the browser-style dashboard and to plain text for the
//! terminal, and can be inspected directly in tests.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// A user operation triggered by a rendered control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowLogin,
    ShowRegister,
    ShowDashboard,
    Logout,
    Login,
    Register,
    ShowOnboarding,
    ShowChannels,
    ShowVideos,
    ShowBlogPosts,
    AddChannel,
    IndexChannel(i64),
    SyncChannel(i64),
    RefreshVideos,
    ShowChannelVideos(i64),
    SearchVideos,
    /// Move the paged list on screen to this page
    GoToPage(u32),
    ViewVideo(i64),
    ProcessVideo(i64),
    ShowSuggestions(i64),
    GenerateBlogPost(i64),
    BulkGenerate(Vec<i64>),
    RefreshBlogPosts,
    EditBlogPost(i64),
    SaveBlogPost(i64),
    PublishBlogPost(i64),
    DeleteBlogPost(i64),
    DismissNotification(String),
}

impl Action {
    /// Stable name used for the `data-action` attribute
    pub fn name(&self) -> &'static str {
        match self {
            Action::ShowLogin => "show-login",
            Action::ShowRegister => "show-register",
            Action::ShowDashboard => "show-dashboard",
            Action::Logout => "logout",
            Action::Login => "login",
            Action::Register => "register",
            Action::ShowOnboarding => "show-onboarding",
            Action::ShowChannels => "show-channels",
            Action::ShowVideos => "show-videos",
            Action::ShowBlogPosts => "show-blog-posts",
            Action::AddChannel => "add-channel",
            Action::IndexChannel(_) => "index-channel",
            Action::SyncChannel(_) => "sync-channel",
            Action::RefreshVideos => "refresh-videos",
            Action::ShowChannelVideos(_) => "show-channel-videos",
            Action::SearchVideos => "search-videos",
            Action::GoToPage(_) => "go-to-page",
            Action::ViewVideo(_) => "view-video",
            Action::ProcessVideo(_) => "process-video",
            Action::ShowSuggestions(_) => "show-suggestions",
            Action::GenerateBlogPost(_) => "generate-blog-post",
            Action::BulkGenerate(_) => "bulk-generate",
            Action::RefreshBlogPosts => "refresh-blog-posts",
            Action::EditBlogPost(_) => "edit-blog-post",
            Action::SaveBlogPost(_) => "save-blog-post",
            Action::PublishBlogPost(_) => "publish-blog-post",
            Action::DeleteBlogPost(_) => "delete-blog-post",
            Action::DismissNotification(_) => "dismiss-notification",
        }
    }

    /// Target of the action, if it has one
    pub fn target(&self) -> Option<String> {
        match self {
            Action::IndexChannel(id)
            | Action::SyncChannel(id)
            | Action::ShowChannelVideos(id)
            | Action::ViewVideo(id)
            | Action::ProcessVideo(id)
            | Action::ShowSuggestions(id)
            | Action::GenerateBlogPost(id)
            | Action::EditBlogPost(id)
            | Action::SaveBlogPost(id)
            | Action::PublishBlogPost(id)
            | Action::DeleteBlogPost(id) => Some(id.to_string()),
            Action::GoToPage(page) => Some(page.to_string()),
            Action::BulkGenerate(ids) => Some(
                ids.iter()
                    .map(i64::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Action::DismissNotification(id) => Some(id.clone()),
            _ => None,
        }
    }
}

/// A node of the render tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with classes, attributes, children and an optional action
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub action: Option<Action>,
    pub children: Vec<Node>,
}

const VOID_TAGS: &[&str] = &["img", "input", "br", "hr"];

const BLOCK_TAGS: &[&str] = &[
    "div", "section", "nav", "form", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "li",
    "label", "textarea", "main",
];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Add space-separated classes
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Depth-first iterator over every element in the tree
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(self, &mut out);
        out
    }

    /// First element carrying the given id
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements()
            .into_iter()
            .find(|e| e.get_attr("id") == Some(id))
    }

    /// All elements carrying the given class
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// Every action reachable from this node, in document order
    pub fn actions(&self) -> Vec<Action> {
        self.elements()
            .into_iter()
            .filter_map(|e| e.action.clone())
            .collect()
    }

    /// Concatenated text content, ignoring markup
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Serialize to HTML with text and attribute values escaped
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }

    /// Render for a terminal: one line per block, hidden elements skipped,
    /// buttons shown as `[Label]`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        write_text(self, &mut out);

        let mut lines: Vec<String> = Vec::new();
        for line in out.lines() {
            let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
            if !line.is_empty() {
                lines.push(line);
            }
        }
        lines.join("\n")
    }
}

impl Element {
    pub fn is_hidden(&self) -> bool {
        self.has_class("d-none")
    }
}

fn collect_elements<'a>(node: &'a Node, out: &mut Vec<&'a Element>) {
    if let Node::Element(e) = node {
        out.push(e);
        for child in &e.children {
            collect_elements(child, out);
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(e) => {
            for child in &e.children {
                collect_text(child, out);
            }
        }
    }
}

fn write_html(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&encode_text(text)),
        Node::Element(e) => {
            out.push('<');
            out.push_str(e.tag);
            if !e.classes.is_empty() {
                let classes = e.classes.join(" ");
                let _ = write!(
                    out,
                    " class=\"{}\"",
                    encode_double_quoted_attribute(&classes)
                );
            }
            for (name, value) in &e.attrs {
                let _ = write!(
                    out,
                    " {}=\"{}\"",
                    name,
                    encode_double_quoted_attribute(value)
                );
            }
            if let Some(action) = &e.action {
                let _ = write!(out, " data-action=\"{}\"", action.name());
                if let Some(target) = action.target() {
                    let _ = write!(
                        out,
                        " data-target=\"{}\"",
                        encode_double_quoted_attribute(&target)
                    );
                }
            }
            out.push('>');

            if VOID_TAGS.contains(&e.tag) {
                return;
            }

            for child in &e.children {
                write_html(child, out);
            }
            let _ = write!(out, "</{}>", e.tag);
        }
    }
}

fn write_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(e) => {
            if e.is_hidden() {
                return;
            }

            let block = BLOCK_TAGS.contains(&e.tag);
            if block {
                out.push('\n');
            }

            match e.tag {
                "button" => {
                    out.push_str(" [");
                    for child in &e.children {
                        write_text(child, out);
                    }
                    out.push_str("] ");
                }
                "input" => {
                    let label = e
                        .get_attr("placeholder")
                        .or_else(|| e.get_attr("name"))
                        .unwrap_or("input");
                    let value = e.get_attr("value").unwrap_or("");
                    let _ = write!(out, " <{}: {}> ", label, value);
                }
                "img" => {}
                _ => {
                    if e.tag == "li" {
                        out.push_str("- ");
                    }
                    for child in &e.children {
                        write_text(child, out);
                    }
                }
            }

            if block {
                out.push('\n');
            }
        }
    }
}
