use std::sync::LazyLock;

use regex::Regex;

/// The static import forms recognized in source text:
/// `import ... from '...'`, `export ... from '...'`, `require('...')`,
/// and dynamic `import('...')` with a literal argument.
static IMPORT_FORMS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?:import|export)\s+.*?from\s+['"]([^'"]+)['"]"#,
        r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
        r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("builtin import pattern"))
    .collect()
});

/// Extract every literal module specifier appearing in a recognized static
/// import form, in match order per form.
///
/// The source is never executed or evaluated; a specifier built at runtime
/// (`require(someVar)`, template strings) is invisible here. Filtering
/// relative specifiers from bare package names is the caller's concern.
pub fn extract_specifiers(content: &str) -> Vec<String> {
    let mut specifiers = Vec::new();

    for form in IMPORT_FORMS.iter() {
        for caps in form.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                specifiers.push(m.as_str().to_string());
            }
        }
    }

    specifiers
}
