//! Locators and the JS snippets that implement DOM operations.
//!
//! Every browser-side operation is a small generated JavaScript expression
//! executed over CDP. A [`Locator`] renders to a resolver expression that
//! evaluates to an array of matching elements; the operation builders wrap
//! that resolver with the actual work (click, fill, visibility probe, ...).

use std::fmt;

/// A DOM-locating expression.
///
/// CSS covers most selectors; the text variants match on visible content,
/// case-insensitive, which is what this application's markup supports best.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Standard CSS selector.
    Css(String),
    /// Deepest elements whose text matches any pattern, case-insensitive.
    Text(Vec<String>),
    /// Buttons (or `role=button` / submit inputs) whose label matches.
    ButtonText(Vec<String>),
    /// Links (anchors or `role=link`) whose text matches.
    LinkText(Vec<String>),
    /// Buttons with one of `labels` in the ancestry of an element matching `text`.
    NearButton { text: String, labels: Vec<String> },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn text(pattern: impl Into<String>) -> Self {
        Locator::Text(vec![pattern.into()])
    }

    pub fn text_any(patterns: &[&str]) -> Self {
        Locator::Text(patterns.iter().map(|p| p.to_string()).collect())
    }

    pub fn button(pattern: impl Into<String>) -> Self {
        Locator::ButtonText(vec![pattern.into()])
    }

    pub fn button_any(patterns: &[&str]) -> Self {
        Locator::ButtonText(patterns.iter().map(|p| p.to_string()).collect())
    }

    pub fn link(pattern: impl Into<String>) -> Self {
        Locator::LinkText(vec![pattern.into()])
    }

    pub fn link_any(patterns: &[&str]) -> Self {
        Locator::LinkText(patterns.iter().map(|p| p.to_string()).collect())
    }

    pub fn near_button(text: impl Into<String>, label: impl Into<String>) -> Self {
        Locator::NearButton {
            text: text.into(),
            labels: vec![label.into()],
        }
    }

    pub fn near_button_any(text: impl Into<String>, labels: &[&str]) -> Self {
        Locator::NearButton {
            text: text.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// JS expression evaluating to an array of matching elements.
    pub fn resolver_js(&self) -> String {
        match self {
            Locator::Css(selector) => format!(
                "Array.from(document.querySelectorAll({}))",
                js_string(selector)
            ),
            Locator::Text(patterns) => format!(
                r#"(() => {{
  const re = new RegExp({pattern}, 'i');
  const hits = Array.from(document.querySelectorAll('body *'))
    .filter(el => re.test(el.textContent || ''));
  return hits.filter(el => !hits.some(other => other !== el && el.contains(other)));
}})()"#,
                pattern = js_string(&regex_alternation(patterns)),
            ),
            Locator::ButtonText(patterns) => format!(
                r#"(() => {{
  const re = new RegExp({pattern}, 'i');
  return Array.from(document.querySelectorAll('button, [role="button"], input[type="submit"]'))
    .filter(el => re.test(el.textContent || el.value || ''));
}})()"#,
                pattern = js_string(&regex_alternation(patterns)),
            ),
            Locator::LinkText(patterns) => format!(
                r#"(() => {{
  const re = new RegExp({pattern}, 'i');
  return Array.from(document.querySelectorAll('a, [role="link"]'))
    .filter(el => re.test(el.textContent || ''));
}})()"#,
                pattern = js_string(&regex_alternation(patterns)),
            ),
            Locator::NearButton { text, labels } => format!(
                r#"(() => {{
  const reText = new RegExp({text}, 'i');
  const reLabel = new RegExp({label}, 'i');
  const hits = Array.from(document.querySelectorAll('body *'))
    .filter(el => reText.test(el.textContent || ''));
  const deepest = hits.filter(el => !hits.some(other => other !== el && el.contains(other)));
  for (const hit of deepest) {{
    let scope = hit;
    for (let depth = 0; depth < 6 && scope; depth++) {{
      const buttons = Array.from(scope.querySelectorAll('button, [role="button"]'))
        .filter(b => reLabel.test(b.textContent || ''));
      if (buttons.length) return buttons;
      scope = scope.parentElement;
    }}
  }}
  return [];
}})()"#,
                text = js_string(&regex_alternation(&[text.clone()])),
                label = js_string(&regex_alternation(labels)),
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "css={selector}"),
            Locator::Text(patterns) => write!(f, "text~/{}/i", patterns.join("|")),
            Locator::ButtonText(patterns) => write!(f, "button~/{}/i", patterns.join("|")),
            Locator::LinkText(patterns) => write!(f, "link~/{}/i", patterns.join("|")),
            Locator::NearButton { text, labels } => {
                write!(f, "button~/{}/i near text~/{text}/i", labels.join("|"))
            }
        }
    }
}

/// Embed a Rust string as a JS string literal.
pub fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Join literal patterns into one regex alternation, escaping metacharacters.
fn regex_alternation<S: AsRef<str>>(patterns: &[S]) -> String {
    patterns
        .iter()
        .map(|p| escape_regex(p.as_ref()))
        .collect::<Vec<_>>()
        .join("|")
}

fn escape_regex(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(
            c,
            '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
                | '/'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// Operation builders. Each returns a self-contained JS expression.

pub fn js_count(locator: &Locator) -> String {
    format!("({}).length", locator.resolver_js())
}

pub fn js_exists(locator: &Locator) -> String {
    format!("({}).length > 0", locator.resolver_js())
}

pub fn js_is_visible(locator: &Locator) -> String {
    format!(
        r#"(() => {{
  const el = ({resolver})[0];
  if (!el) return false;
  const rect = el.getBoundingClientRect();
  const style = window.getComputedStyle(el);
  return rect.width > 0 && rect.height > 0
    && style.visibility !== 'hidden' && style.display !== 'none';
}})()"#,
        resolver = locator.resolver_js()
    )
}

pub fn js_is_enabled(locator: &Locator) -> String {
    format!(
        "(() => {{ const el = ({})[0]; return !!el && !el.disabled; }})()",
        locator.resolver_js()
    )
}

pub fn js_is_actionable(locator: &Locator) -> String {
    format!(
        r#"(() => {{
  const el = ({resolver})[0];
  if (!el || el.disabled) return false;
  const rect = el.getBoundingClientRect();
  const style = window.getComputedStyle(el);
  return rect.width > 0 && rect.height > 0
    && style.visibility !== 'hidden' && style.display !== 'none';
}})()"#,
        resolver = locator.resolver_js()
    )
}

pub fn js_click(locator: &Locator) -> String {
    format!(
        r#"(() => {{
  const el = ({resolver})[0];
  if (!el) return false;
  el.scrollIntoView({{ block: 'center' }});
  el.click();
  return true;
}})()"#,
        resolver = locator.resolver_js()
    )
}

/// Fill through the native value setter so controlled inputs see the change.
pub fn js_fill(locator: &Locator, value: &str) -> String {
    format!(
        r#"(() => {{
  const el = ({resolver})[0];
  if (!el) return false;
  el.focus();
  const proto = el instanceof HTMLTextAreaElement
    ? HTMLTextAreaElement.prototype
    : HTMLInputElement.prototype;
  const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
  setter.call(el, {value});
  el.dispatchEvent(new Event('input', {{ bubbles: true }}));
  el.dispatchEvent(new Event('change', {{ bubbles: true }}));
  return true;
}})()"#,
        resolver = locator.resolver_js(),
        value = js_string(value),
    )
}

pub fn js_text(locator: &Locator) -> String {
    format!(
        "(() => {{ const el = ({})[0]; return el ? el.textContent : null; }})()",
        locator.resolver_js()
    )
}

pub fn js_value(locator: &Locator) -> String {
    format!(
        "(() => {{ const el = ({})[0]; return el ? el.value : null; }})()",
        locator.resolver_js()
    )
}

pub fn js_local_storage_get(key: &str) -> String {
    format!("window.localStorage.getItem({})", js_string(key))
}

pub fn js_local_storage_clear() -> String {
    "window.localStorage.clear()".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_resolver_quotes_the_selector() {
        let js = Locator::css(r#"input[type="email"]"#).resolver_js();
        assert!(js.contains("querySelectorAll"));
        assert!(js.contains(r#"\"email\""#));
    }

    #[test]
    fn text_patterns_escape_regex_metacharacters() {
        let js = Locator::text("p&l ($)").resolver_js();
        assert!(js.contains(r"\\(\\$\\)") || js.contains(r"\(\$\)"));
        assert!(js.contains("'i'"));
    }

    #[test]
    fn button_alternation_joins_patterns() {
        let js = Locator::button_any(&["execute", "confirm"]).resolver_js();
        assert!(js.contains("execute|confirm"));
        assert!(js.contains("role=\\\"button\\\"") || js.contains(r#"[role="button"]"#));
    }

    #[test]
    fn near_button_embeds_both_text_and_label() {
        let js = Locator::near_button("AAPL", "trade").resolver_js();
        assert!(js.contains("AAPL"));
        assert!(js.contains("trade"));
        assert!(js.contains("parentElement"));
    }

    #[test]
    fn enabled_probe_checks_the_disabled_attribute() {
        let js = js_is_enabled(&Locator::button("execute"));
        assert!(js.contains("!el.disabled"));
        assert!(js.contains("!!el"));
    }

    #[test]
    fn link_resolver_targets_anchors() {
        let js = Locator::link("portfolio").resolver_js();
        assert!(js.contains(r#"'a, [role="link"]'"#));
    }

    #[test]
    fn fill_uses_native_setter_and_input_event() {
        let js = js_fill(&Locator::css("input"), "it's a value");
        assert!(js.contains("getOwnPropertyDescriptor"));
        assert!(js.contains("new Event('input'"));
        assert!(js.contains("it's a value"));
    }

    #[test]
    fn display_names_the_strategy() {
        assert_eq!(Locator::css("nav").to_string(), "css=nav");
        assert_eq!(Locator::text("Logout").to_string(), "text~/Logout/i");
        assert_eq!(
            Locator::near_button("AAPL", "trade").to_string(),
            "button~/trade/i near text~/AAPL/i"
        );
    }

    #[test]
    fn js_string_escapes_quotes_and_backslashes() {
        assert_eq!(js_string(r#"a"b\c"#), r#""a\"b\\c""#);
    }
}
