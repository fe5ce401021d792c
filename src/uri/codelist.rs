//! Concept URI templates for code lists published elsewhere.
//!
//! Existing code lists only give us a concept-scheme URI. Concept URIs are
//! recovered by matching the scheme against known publishing conventions,
//! tried in order; the first match wins.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::template::variable;
use crate::debug;

/// Publishing convention a concept-scheme URI follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConceptUriStyle {
    /// `…/concept-scheme/<id>` with concepts at `…/concept-scheme/<id>/<code>`.
    Global,
    /// `…#scheme/<id>` with concepts at `…#concept/<id>/<code>`.
    DatasetLocal,
    /// `<cl>.csv#code-list` with concepts at `<cl>.csv#<code>`.
    Package,
}

type Formatter = fn(&Captures<'_>, &str) -> String;

fn global(caps: &Captures<'_>, var: &str) -> String {
    format!("{}/concept-scheme/{}/{}", &caps[1], &caps[2], variable(var, true))
}

fn dataset_local(caps: &Captures<'_>, var: &str) -> String {
    format!("{}#concept/{}/{}", &caps[1], &caps[2], variable(var, true))
}

fn package(caps: &Captures<'_>, var: &str) -> String {
    format!("{}#{}", &caps[1], variable(var, true))
}

static PATTERNS: LazyLock<Vec<(ConceptUriStyle, Regex, Formatter)>> = LazyLock::new(|| {
    [
        (
            ConceptUriStyle::Global,
            r"^(.+)/concept-scheme/([^/#]+)/?$",
            global as Formatter,
        ),
        (
            ConceptUriStyle::DatasetLocal,
            r"^(.+)#scheme/([^/#]+)$",
            dataset_local as Formatter,
        ),
        (ConceptUriStyle::Package, r"^(.+)#code-list$", package as Formatter),
    ]
    .into_iter()
    .map(|(style, pattern, format)| {
        let regex = Regex::new(pattern).expect("concept scheme pattern is valid");
        (style, regex, format)
    })
    .collect()
});

/// Which convention `scheme_uri` follows, if any.
pub fn recognise(scheme_uri: &str) -> Option<ConceptUriStyle> {
    PATTERNS
        .iter()
        .find(|(_, regex, _)| regex.is_match(scheme_uri))
        .map(|(style, _, _)| *style)
}

/// `valueUrl` template for concepts of the scheme `scheme_uri`, with the
/// cell value bound to `var`.
///
/// Unrecognised schemes fall back to `{+var}`: cells are expected to hold
/// full concept URIs already.
pub fn concept_uri_template(scheme_uri: &str, var: &str) -> String {
    for (_, regex, format) in PATTERNS.iter() {
        if let Some(caps) = regex.captures(scheme_uri) {
            return format(&caps, var);
        }
    }
    debug!("uri"; "unrecognised concept scheme `{}`, cells are used as URIs", scheme_uri);
    variable(var, true)
}
