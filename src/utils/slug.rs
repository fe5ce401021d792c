//! URI-safe identifiers.
//!
//! Every locally minted URI segment in a package comes from [`slug`]. The
//! functions here never fail; callers detect collisions between distinct
//! labels themselves (see `validate::collision`).

use deunicode::deunicode;

/// Convert a human label into a URI-safe identifier.
///
/// Transliterates to ASCII, lower-cases, collapses every run of non-word
/// characters into a single `-` and drops leading/trailing hyphens.
///
/// # Examples
/// ```
/// use csvcube::utils::slug;
/// assert_eq!(slug("Gross Domestic Product (GDP)"), "gross-domestic-product-gdp");
/// assert_eq!(slug("Ça va?"), "ca-va");
/// assert_eq!(slug("already-a-slug"), "already-a-slug");
/// ```
pub fn slug(label: &str) -> String {
    let ascii = deunicode(label).to_ascii_lowercase();
    let mut out = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Check whether a value already is an absolute URI (non-empty scheme).
///
/// # Examples
/// ```
/// use csvcube::utils::looks_like_uri;
/// assert!(looks_like_uri("http://example.com/some/thing"));
/// assert!(looks_like_uri("urn:isbn:0451450523"));
/// assert!(!looks_like_uri("some label"));
/// assert!(!looks_like_uri("./relative.csv#code-list"));
/// ```
pub fn looks_like_uri(value: &str) -> bool {
    url::Url::parse(value).is_ok_and(|u| !u.scheme().is_empty())
}

/// CSV-W safe column `name` for a column title.
///
/// Lower-cases and replaces every non-word character with `_`, so the name
/// can be used as a URI template variable.
///
/// # Examples
/// ```
/// use csvcube::utils::csvw_column_name;
/// assert_eq!(csvw_column_name("Reference Area"), "reference_area");
/// assert_eq!(csvw_column_name("Value (GBP)"), "value__gbp_");
/// ```
pub fn csvw_column_name(title: &str) -> String {
    deunicode(title)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Derive an identifier from the last path or fragment segment of a URI.
///
/// Used to name generated resources (component specifications) for
/// components that only exist as external references.
pub fn uri_tail_identifier(uri: &str) -> String {
    let trimmed = uri.trim_end_matches(['/', '#']);
    let tail = trimmed
        .rsplit(['/', '#'])
        .next()
        .unwrap_or(trimmed);
    slug(tail)
}
