//! Import statement extraction.
//!
//! A line-oriented heuristic, not a parser. Each line loses its comment and
//! is split on `;`; every piece that is an `import ...` or
//! `from ... import ...` statement counts. Parenthesised name lists may
//! continue over several lines.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// `import a.b as c, d`
static IMPORT_STMT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+(.+)").expect("IMPORT_STMT must compile"));

/// `from a.b import x, y`; relative imports never match.
static FROM_STMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*from\s+([A-Za-z_][\w.]*)\s+import\s+(.*)").expect("FROM_STMT must compile")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").expect("IDENTIFIER must compile"));

/// Names found in import statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedNames {
    /// Top-level modules, e.g. `matplotlib` for `import matplotlib.pyplot`.
    pub modules: BTreeSet<String>,
    /// Names imported from `typing`.
    pub typing_names: BTreeSet<String>,
}

/// Collect the top-level modules and typing names `code` imports.
pub fn extract_imports(code: &str) -> ImportedNames {
    let mut found = ImportedNames::default();
    let mut lines = code.lines();

    while let Some(line) = lines.next() {
        for statement in strip_comment(line).split(';') {
            if let Some(caps) = FROM_STMT.captures(statement) {
                let module = &caps[1];
                let mut names = caps[2].to_string();
                if names.contains('(') && !names.contains(')') {
                    for next in lines.by_ref() {
                        names.push(',');
                        names.push_str(strip_comment(next));
                        if next.contains(')') {
                            break;
                        }
                    }
                }

                add_root(&mut found.modules, module);
                if module == "typing" {
                    found
                        .typing_names
                        .extend(split_names(&names).map(String::from));
                }
            } else if let Some(caps) = IMPORT_STMT.captures(statement) {
                for name in split_names(&caps[1]) {
                    add_root(&mut found.modules, name);
                }
            }
        }
    }

    found
}

/// Split `a as b, c` (optionally parenthesised) into `a`, `c`.
fn split_names(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').filter_map(|part| {
        let part =
            part.trim_matches(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == '\\');
        part.split_whitespace().next()
    })
}

fn add_root(modules: &mut BTreeSet<String>, dotted: &str) {
    if let Some(root) = dotted.split('.').next() {
        if IDENTIFIER.is_match(root) {
            modules.insert(root.to_string());
        }
    }
}

fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules(code: &str) -> Vec<String> {
        extract_imports(code).modules.into_iter().collect()
    }

    #[test]
    fn plain_and_dotted_imports() {
        assert_eq!(
            modules("import matplotlib.pyplot as plt\nimport numpy as np"),
            vec!["matplotlib", "numpy"]
        );
    }

    #[test]
    fn comma_separated_imports() {
        assert_eq!(
            modules("import os, sys as system, json"),
            vec!["json", "os", "sys"]
        );
    }

    #[test]
    fn from_imports_use_root_module() {
        assert_eq!(
            modules("from sklearn.linear_model import LinearRegression"),
            vec!["sklearn"]
        );
    }

    #[test]
    fn relative_imports_are_ignored() {
        assert!(modules("from . import sibling\nfrom .pkg import thing").is_empty());
    }

    #[test]
    fn indented_imports_count() {
        assert_eq!(
            modules("def f():\n    import requests\n    return requests"),
            vec!["requests"]
        );
    }

    #[test]
    fn comments_and_strings_after_import_are_ignored() {
        assert_eq!(modules("import yaml  # config\n"), vec!["yaml"]);
        assert!(modules("x = 'import os'").is_empty());
    }

    #[test]
    fn statements_after_semicolons_count() {
        assert_eq!(
            modules("import numpy as np; import pandas\nimport os; from yaml import safe_load"),
            vec!["numpy", "os", "pandas", "yaml"]
        );
        assert_eq!(modules("x = 1; import requests  # fetch"), vec!["requests"]);
    }

    #[test]
    fn typing_names_are_collected() {
        let found = extract_imports("from typing import Dict, List as L\nimport os");
        assert_eq!(
            found.typing_names.into_iter().collect::<Vec<_>>(),
            vec!["Dict", "List"]
        );
        assert!(found.modules.contains("typing"));
    }

    #[test]
    fn parenthesised_lists_span_lines() {
        let code = "from typing import (\n    Optional,  # maybe\n    Union,\n)\nimport attr";
        let found = extract_imports(code);
        assert_eq!(
            found.typing_names.into_iter().collect::<Vec<_>>(),
            vec!["Optional", "Union"]
        );
        assert!(found.modules.contains("attr"));
    }
}
