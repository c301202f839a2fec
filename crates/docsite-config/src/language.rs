//! Syntax-highlighting languages that may be enabled in addition to the
//! renderer's bundled set.

/// Canonical language identifiers recognized by the highlighter.
const LANGUAGES: &[&str] = &[
    "abap", "actionscript", "ada", "apacheconf", "apl", "applescript", "arduino", "asciidoc",
    "aspnet", "autohotkey", "bash", "basic", "batch", "bicep", "c", "clojure", "cmake",
    "cobol", "coffeescript", "cpp", "crystal", "csharp", "csp", "css", "d", "dart", "diff",
    "django", "docker", "elixir", "elm", "erlang", "fortran", "fsharp", "git", "glsl", "go",
    "gradle", "graphql", "groovy", "haml", "handlebars", "haskell", "hcl", "http", "ini",
    "java", "javascript", "json", "json5", "jsx", "julia", "kotlin", "latex", "less", "lisp",
    "lua", "makefile", "markdown", "matlab", "nginx", "nim", "nix", "objectivec", "ocaml",
    "pascal", "perl", "php", "powershell", "prolog", "protobuf", "python", "r", "racket",
    "reason", "regex", "ruby", "rust", "sass", "scala", "scheme", "scss", "solidity", "sql",
    "swift", "toml", "tsx", "typescript", "vbnet", "verilog", "vhdl", "vim", "visual-basic",
    "wasm", "xml", "yaml", "zig",
];

/// Alternate spellings and the canonical identifier they stand for.
const ALIASES: &[(&str, &str)] = &[
    ("cs", "csharp"),
    ("dotnet", "csharp"),
    ("fs", "fsharp"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("kt", "kotlin"),
    ("ps1", "powershell"),
    ("yml", "yaml"),
    ("md", "markdown"),
    ("html", "xml"),
    ("dockerfile", "docker"),
    ("objc", "objectivec"),
    ("vb", "visual-basic"),
    ("golang", "go"),
    ("tex", "latex"),
    ("proto", "protobuf"),
];

/// Resolve a language identifier to its canonical form.
///
/// Matching is exact (identifiers are lowercase). Returns `None` for
/// unrecognized identifiers.
#[must_use]
pub fn canonical_language(id: &str) -> Option<&'static str> {
    if let Ok(i) = LANGUAGES.binary_search(&id) {
        return Some(LANGUAGES[i]);
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == id)
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_sorted_for_binary_search() {
        assert!(LANGUAGES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_aliases_point_to_known_languages() {
        for (alias, canonical) in ALIASES {
            assert!(
                LANGUAGES.contains(canonical),
                "alias {alias} points to unknown {canonical}"
            );
            assert!(!LANGUAGES.contains(alias), "alias {alias} shadows a language");
        }
    }

    #[test]
    fn test_canonical_language() {
        assert_eq!(canonical_language("csharp"), Some("csharp"));
        assert_eq!(canonical_language("fsharp"), Some("fsharp"));
        assert_eq!(canonical_language("cs"), Some("csharp"));
        assert_eq!(canonical_language("CSharp"), None);
        assert_eq!(canonical_language("klingon"), None);
        assert_eq!(canonical_language(""), None);
    }
}
