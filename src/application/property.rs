//! String-keyed property access for selections.
//!
//! A property name starting with the attribute marker (`@` by default) reads
//! an attribute of the first selected node; any other name is run as a
//! selector. This is a thin adapter over [`Selection::attr`] and
//! [`Selection::query`].

use std::fmt;

use tracing::instrument;

use crate::application::error::SelectionResult;
use crate::application::selection::Selection;
use crate::config::Settings;
use crate::infrastructure::traits::{Matcher, TreeModel};

/// Default prefix marking a property name as an attribute name.
pub const ATTRIBUTE_MARKER: char = '@';

/// Parsed property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property<'p> {
    /// Attribute name with the marker stripped
    Attribute(&'p str),
    /// Selector to query for
    Selector(&'p str),
}

impl<'p> Property<'p> {
    /// Parses `name` using the default `@` marker.
    pub fn parse(name: &'p str) -> Self {
        Self::parse_with_marker(name, ATTRIBUTE_MARKER)
    }

    pub fn parse_with_marker(name: &'p str, marker: char) -> Self {
        match name.strip_prefix(marker) {
            Some(attribute) => Property::Attribute(attribute),
            None => Property::Selector(name),
        }
    }
}

/// Result of resolving a property against a selection.
pub enum PropertyValue<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    Attribute(Option<&'a str>),
    Selection(Selection<'a, T, M>),
}

impl<'a, T, M> PropertyValue<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    /// Attribute value, None for selections and absent attributes.
    pub fn as_attribute(&self) -> Option<&'a str> {
        match self {
            PropertyValue::Attribute(value) => *value,
            PropertyValue::Selection(_) => None,
        }
    }

    pub fn into_selection(self) -> Option<Selection<'a, T, M>> {
        match self {
            PropertyValue::Attribute(_) => None,
            PropertyValue::Selection(selection) => Some(selection),
        }
    }
}

impl<'a, T, M> fmt::Debug for PropertyValue<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Attribute(value) => f.debug_tuple("Attribute").field(value).finish(),
            PropertyValue::Selection(selection) => {
                f.debug_tuple("Selection").field(selection).finish()
            }
        }
    }
}

/// Resolves property names with a configurable attribute marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyResolver {
    marker: char,
}

impl Default for PropertyResolver {
    fn default() -> Self {
        Self::new(ATTRIBUTE_MARKER)
    }
}

impl PropertyResolver {
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.resolver.attribute_marker)
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn parse<'p>(&self, name: &'p str) -> Property<'p> {
        Property::parse_with_marker(name, self.marker)
    }

    #[instrument(level = "trace", skip(self, selection))]
    pub fn resolve<'a, T, M>(
        &self,
        selection: &Selection<'a, T, M>,
        name: &str,
    ) -> SelectionResult<PropertyValue<'a, T, M>>
    where
        T: TreeModel + ?Sized,
        M: Matcher<T> + ?Sized,
    {
        match self.parse(name) {
            Property::Attribute(attribute) => Ok(PropertyValue::Attribute(selection.attr(attribute))),
            Property::Selector(selector) => selection.query(selector).map(PropertyValue::Selection),
        }
    }
}

impl<'a, T, M> Selection<'a, T, M>
where
    T: TreeModel + ?Sized,
    M: Matcher<T> + ?Sized,
{
    /// `@name` reads attribute `name` of the first node, anything else is
    /// queried as a selector.
    pub fn get_property(&self, name: &str) -> SelectionResult<PropertyValue<'a, T, M>> {
        PropertyResolver::default().resolve(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("@id", Property::Attribute("id"))]
    #[case("@", Property::Attribute(""))]
    #[case("@@x", Property::Attribute("@x"))]
    #[case("div.title", Property::Selector("div.title"))]
    #[case("a @b", Property::Selector("a @b"))]
    #[case("", Property::Selector(""))]
    fn given_name_when_parsing_then_discriminates_on_leading_marker(
        #[case] name: &str,
        #[case] expected: Property<'static>,
    ) {
        assert_eq!(Property::parse(name), expected);
    }

    #[test]
    fn given_custom_marker_when_parsing_then_uses_it() {
        let resolver = PropertyResolver::new('$');
        assert_eq!(resolver.parse("$href"), Property::Attribute("href"));
        assert_eq!(resolver.parse("@href"), Property::Selector("@href"));
        assert_eq!(PropertyResolver::default().marker(), '@');
    }

    #[test]
    fn given_default_settings_when_building_resolver_then_uses_at_marker() {
        let resolver = PropertyResolver::from_settings(&Settings::default());
        assert_eq!(resolver, PropertyResolver::default());
    }
}
