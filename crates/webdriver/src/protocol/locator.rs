// By - locator strategies for child-element search
//
// A locator supplies the (strategy, value) pair a find command carries. The
// handle consumes locators only to build child-search commands; how results
// become new handles is the session's concern.

use std::fmt;

/// A query descriptor naming a locator strategy and its value.
///
/// # Example
///
/// ```ignore
/// use webdriver_rs::By;
///
/// let row = table.find_element(&By::css("tr.selected")).await?;
/// let cells = row.find_elements(&By::tag_name("td")).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum By {
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Element name attribute
    Name(String),
    /// Tag name
    TagName(String),
    /// Exact anchor text
    LinkText(String),
    /// Substring of anchor text
    PartialLinkText(String),
    /// Single class name
    ClassName(String),
}

impl By {
    pub fn css(selector: impl Into<String>) -> Self {
        By::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        By::XPath(expression.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        By::Id(id.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        By::Name(name.into())
    }

    pub fn tag_name(tag_name: impl Into<String>) -> Self {
        By::TagName(tag_name.into())
    }

    pub fn link_text(text: impl Into<String>) -> Self {
        By::LinkText(text.into())
    }

    pub fn partial_link_text(text: impl Into<String>) -> Self {
        By::PartialLinkText(text.into())
    }

    pub fn class_name(class_name: impl Into<String>) -> Self {
        By::ClassName(class_name.into())
    }

    /// The wire name of this strategy.
    pub fn strategy(&self) -> &'static str {
        match self {
            By::Css(_) => "css selector",
            By::XPath(_) => "xpath",
            By::Id(_) => "id",
            By::Name(_) => "name",
            By::TagName(_) => "tag name",
            By::LinkText(_) => "link text",
            By::PartialLinkText(_) => "partial link text",
            By::ClassName(_) => "class name",
        }
    }

    /// The strategy's value.
    pub fn value(&self) -> &str {
        match self {
            By::Css(v)
            | By::XPath(v)
            | By::Id(v)
            | By::Name(v)
            | By::TagName(v)
            | By::LinkText(v)
            | By::PartialLinkText(v)
            | By::ClassName(v) => v,
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy(), self.value())
    }
}
