//! Reduce a raw user-agent string to a browser family.
//!
//! Nearly every user agent starts with `Mozilla/5.0`, so the product token
//! alone says nothing. Known engines are matched by marker, most specific
//! first: Chrome user agents also carry `Safari`, Edge and Opera carry
//! `Chrome`.

/// Markers in priority order, with the family they identify.
const MARKERS: &[(&str, &str)] = &[
  ("Edg", "Edge"),
  ("OPR/", "Opera"),
  ("Opera", "Opera"),
  ("SamsungBrowser", "Samsung Internet"),
  ("CriOS", "Chrome"),
  ("Chrome", "Chrome"),
  ("FxiOS", "Firefox"),
  ("Firefox", "Firefox"),
  ("Safari", "Safari"),
  ("MSIE", "Internet Explorer"),
  ("Trident", "Internet Explorer"),
];

/// Family label for `useragent`.
///
/// Falls back to the product token before the first `/` (e.g. `curl` for
/// `curl/8.0`), and to `"Unknown"` for a blank string.
pub fn browser_family(useragent: &str) -> &str {
  let trimmed = useragent.trim();
  if trimmed.is_empty() {
    return "Unknown";
  }
  if let Some(&(_, family)) = MARKERS.iter().find(|(marker, _)| trimmed.contains(marker)) {
    return family;
  }
  trimmed
    .split('/')
    .next()
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .unwrap_or("Unknown")
}
