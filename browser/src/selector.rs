use std::borrow::Cow;
use std::fmt;

/// How to find an element on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Css(Cow<'static, str>),
    XPath(Cow<'static, str>),
}

impl Selector {
    pub const fn css(query: &'static str) -> Self {
        Selector::Css(Cow::Borrowed(query))
    }

    pub const fn xpath(query: &'static str) -> Self {
        Selector::XPath(Cow::Borrowed(query))
    }

    pub fn query(&self) -> &str {
        match self {
            Selector::Css(q) | Selector::XPath(q) => q,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(q) => write!(f, "css:{q}"),
            Selector::XPath(q) => write!(f, "xpath:{q}"),
        }
    }
}
