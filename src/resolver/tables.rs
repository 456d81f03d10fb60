//! Built-in name tables.

/// Names from the `typing` vocabulary that are never installable packages.
pub const TYPE_HINT_NAMES: &[&str] = &[
    "Any",
    "AsyncIterable",
    "AsyncIterator",
    "Awaitable",
    "Callable",
    "ChainMap",
    "Collection",
    "ContextManager",
    "Coroutine",
    "Counter",
    "DefaultDict",
    "Deque",
    "Dict",
    "FrozenSet",
    "Generator",
    "Generic",
    "Iterable",
    "Iterator",
    "List",
    "Mapping",
    "MutableMapping",
    "MutableSequence",
    "Optional",
    "OrderedDict",
    "Sequence",
    "Set",
    "Tuple",
    "Type",
    "TypeVar",
    "Union",
];

/// Import names (and common abbreviations) that install under a different name.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("sklearn", "scikit-learn"),
    ("bs4", "beautifulsoup4"),
    ("talib", "ta-lib"),
    ("cv2", "opencv-python"),
    ("pil", "pillow"),
    ("PIL", "pillow"),
    ("plt", "matplotlib"),
    ("np", "numpy"),
    ("pd", "pandas"),
    ("yaml", "pyyaml"),
    ("dateutil", "python-dateutil"),
];

/// Distributions whose import name is not the distribution name with `-` as `_`.
pub const DEFAULT_IMPORT_NAMES: &[(&str, &str)] = &[
    ("beautifulsoup4", "bs4"),
    ("scikit-learn", "sklearn"),
    ("opencv-python", "cv2"),
    ("pillow", "PIL"),
    ("ta-lib", "talib"),
    ("pyyaml", "yaml"),
    ("python-dateutil", "dateutil"),
];

/// Distributions that are nearly always needed alongside another one.
pub const DEFAULT_COMMON_DEPENDENCIES: &[(&str, &[&str])] = &[
    ("matplotlib", &["numpy"]),
    ("seaborn", &["matplotlib", "pandas"]),
    ("scikit-learn", &["numpy", "scipy"]),
    ("tensorflow", &["numpy"]),
    ("torch", &["numpy"]),
];

/// Bare words that naive import scraping picks up but are not packages.
pub const CANDIDATE_DENYLIST: &[&str] = &[
    "errors",
    "error",
    "exceptions",
    "exception",
    "warnings",
    "warning",
    "data",
    "typing",
];

/// Standard-library top-level modules recognised without asking the interpreter.
///
/// Also holds the generic words in [`CANDIDATE_DENYLIST`] so they never reach
/// the resolver.
pub const STDLIB_MODULES: &[&str] = &[
    "__future__",
    "abc",
    "argparse",
    "array",
    "ast",
    "asyncio",
    "base64",
    "binascii",
    "bisect",
    "builtins",
    "bz2",
    "calendar",
    "cmath",
    "codecs",
    "collections",
    "concurrent",
    "configparser",
    "contextlib",
    "contextvars",
    "copy",
    "csv",
    "ctypes",
    "data",
    "dataclasses",
    "datetime",
    "decimal",
    "difflib",
    "dis",
    "email",
    "enum",
    "errno",
    "error",
    "errors",
    "exception",
    "exceptions",
    "faulthandler",
    "fnmatch",
    "fractions",
    "functools",
    "gc",
    "getpass",
    "gettext",
    "glob",
    "gzip",
    "hashlib",
    "heapq",
    "hmac",
    "html",
    "http",
    "imaplib",
    "importlib",
    "inspect",
    "io",
    "ipaddress",
    "itertools",
    "json",
    "keyword",
    "locale",
    "logging",
    "lzma",
    "math",
    "mimetypes",
    "multiprocessing",
    "numbers",
    "operator",
    "os",
    "pathlib",
    "pdb",
    "pickle",
    "platform",
    "pprint",
    "queue",
    "random",
    "re",
    "secrets",
    "select",
    "selectors",
    "shlex",
    "shutil",
    "signal",
    "smtplib",
    "socket",
    "sqlite3",
    "ssl",
    "stat",
    "statistics",
    "string",
    "struct",
    "subprocess",
    "sys",
    "sysconfig",
    "tarfile",
    "tempfile",
    "textwrap",
    "threading",
    "time",
    "timeit",
    "tkinter",
    "token",
    "tokenize",
    "traceback",
    "types",
    "typing",
    "unicodedata",
    "unittest",
    "urllib",
    "uuid",
    "venv",
    "warning",
    "warnings",
    "weakref",
    "xml",
    "zipfile",
    "zlib",
    "zoneinfo",
];

/// Whether `name` is a typing-vocabulary name.
pub fn is_type_hint_name(name: &str) -> bool {
    TYPE_HINT_NAMES.contains(&name)
}

/// Whether `name` is in the static standard-library list.
pub fn is_known_stdlib(name: &str) -> bool {
    STDLIB_MODULES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_hints_are_exact_match() {
        assert!(is_type_hint_name("Dict"));
        assert!(is_type_hint_name("DefaultDict"));
        assert!(!is_type_hint_name("dict"));
        assert!(!is_type_hint_name("typing"));
    }

    #[test]
    fn denylist_words_count_as_stdlib() {
        for word in CANDIDATE_DENYLIST {
            assert!(is_known_stdlib(word), "{} should be filtered early", word);
        }
    }

    #[test]
    fn aliases_and_import_names_agree() {
        for (dist, module) in DEFAULT_IMPORT_NAMES {
            let aliased = DEFAULT_ALIASES
                .iter()
                .any(|(alias, target)| target == dist && alias == module);
            assert!(aliased, "{} should alias back to {}", module, dist);
        }
    }

    #[test]
    fn pandas_has_no_common_dependencies() {
        assert!(!DEFAULT_COMMON_DEPENDENCIES
            .iter()
            .any(|(name, _)| *name == "pandas"));
    }
}
