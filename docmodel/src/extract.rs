use crate::types::{CustomTag, LinkedFile, LinkedProgram, LinkedSymbol};
use serde::Serialize;

/// The runnable test extracted from a single documentation tag: the tag's
/// non-blank lines, split into import lines and code lines in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestUnit {
    pub code: Vec<String>,
    pub imports: Vec<String>,
}

impl TestUnit {
    /// Classifies one tag's content. Returns `None` when the tag carries no
    /// content; that is the only failure path.
    ///
    /// A line whose leading whitespace is followed by the literal characters
    /// `import` is an import line. This is a prefix test, not a token test:
    /// `importantValue = 1` also lands in the import sequence, and the
    /// evaluator contract expects exactly this classification.
    pub fn from_tag(tag: &CustomTag) -> Option<TestUnit> {
        let content = tag.content.as_ref()?;
        let joined = content.concat();

        let mut code = Vec::new();
        let mut imports = Vec::new();
        for line in joined.lines() {
            if line.is_empty() {
                continue;
            }
            if line.trim_start().starts_with("import") {
                imports.push(line.to_string());
            } else {
                code.push(line.to_string());
            }
        }

        Some(TestUnit { code, imports })
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.imports.is_empty()
    }
}

/// All test units found on one exported symbol. Never materialized with an
/// empty unit list: a symbol whose tags all come up empty has no tests.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolTests {
    pub name: String,
    pub units: Vec<TestUnit>,
}

impl SymbolTests {
    pub fn from_symbol(symbol: &LinkedSymbol) -> Option<SymbolTests> {
        let documentation = symbol.documentation.as_ref()?;
        let tags = documentation.custom_tags.as_ref()?;

        let units: Vec<TestUnit> = tags
            .iter()
            .filter(|tag| tag.kind().is_some())
            .filter_map(TestUnit::from_tag)
            .collect();
        if units.is_empty() {
            return None;
        }

        Some(SymbolTests {
            name: symbol.name.clone(),
            units,
        })
    }
}

/// The tests of every exported symbol of one file. Materialized for every
/// file in the program, so callers can tell "no doctests" from "no file";
/// the symbol list is empty when nothing qualifies.
#[derive(Debug, Clone, Serialize)]
pub struct FileTests {
    pub module_name: String,
    pub symbols: Vec<SymbolTests>,
}

impl FileTests {
    pub fn from_file(file: &LinkedFile) -> FileTests {
        let symbols = file
            .symbol
            .as_ref()
            .and_then(|symbol| symbol.exports.as_ref())
            .map(|exports| {
                exports
                    .values()
                    .filter_map(SymbolTests::from_symbol)
                    .collect()
            })
            .unwrap_or_default();

        FileTests {
            module_name: file.module_name.clone(),
            symbols,
        }
    }

    pub fn has_tests(&self) -> bool {
        !self.symbols.is_empty()
    }
}

/// The full extraction result for a linked program, one entry per file in
/// the program's file mapping, in key order.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramTests {
    pub files: Vec<FileTests>,
}

impl ProgramTests {
    pub fn from_program(program: &LinkedProgram) -> ProgramTests {
        ProgramTests {
            files: program.files.values().map(FileTests::from_file).collect(),
        }
    }

    pub fn total_symbols(&self) -> usize {
        self.files.iter().map(|file| file.symbols.len()).sum()
    }

    pub fn total_units(&self) -> usize {
        self.files
            .iter()
            .flat_map(|file| &file.symbols)
            .map(|symbol| symbol.units.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Documentation;
    use std::collections::BTreeMap;

    fn example_tag(content: &str) -> CustomTag {
        CustomTag::new("example", vec![content.to_string()])
    }

    #[test]
    fn test_classifies_imports_and_code_in_order() {
        let tag = example_tag("import { add } from \"./math\";\nadd(1, 2); // 3\n");
        let unit = TestUnit::from_tag(&tag).unwrap();

        assert_eq!(unit.imports, vec!["import { add } from \"./math\";"]);
        assert_eq!(unit.code, vec!["add(1, 2); // 3"]);
    }

    #[test]
    fn test_contentless_tag_yields_nothing() {
        let tag = CustomTag::contentless("example");
        assert!(TestUnit::from_tag(&tag).is_none());
    }

    #[test]
    fn test_blank_lines_dropped_from_both_sequences() {
        let tag = example_tag("\nimport a from \"a\";\n\nconst x = 1;\n\n\nx;\n");
        let unit = TestUnit::from_tag(&tag).unwrap();

        assert_eq!(unit.imports, vec!["import a from \"a\";"]);
        assert_eq!(unit.code, vec!["const x = 1;", "x;"]);
    }

    #[test]
    fn test_content_fragments_concatenated_before_splitting() {
        let tag = CustomTag::new(
            "doctest",
            vec!["import x from".to_string(), " \"x\";\nx();".to_string()],
        );
        let unit = TestUnit::from_tag(&tag).unwrap();

        assert_eq!(unit.imports, vec!["import x from \"x\";"]);
        assert_eq!(unit.code, vec!["x();"]);
    }

    #[test]
    fn test_indented_import_keeps_original_line() {
        let tag = example_tag("  import b from \"b\";\nb();");
        let unit = TestUnit::from_tag(&tag).unwrap();

        assert_eq!(unit.imports, vec!["  import b from \"b\";"]);
    }

    #[test]
    fn test_import_prefix_collision_classified_as_import() {
        let tag = example_tag("importantValue = 1;\nuse(importantValue);");
        let unit = TestUnit::from_tag(&tag).unwrap();

        assert_eq!(unit.imports, vec!["importantValue = 1;"]);
        assert_eq!(unit.code, vec!["use(importantValue);"]);
    }

    #[test]
    fn test_sequences_are_disjoint_and_order_preserving() {
        let tag = example_tag("a();\nimport b from \"b\";\nc();\nimport d from \"d\";\n");
        let unit = TestUnit::from_tag(&tag).unwrap();

        assert_eq!(unit.code, vec!["a();", "c();"]);
        assert_eq!(unit.imports, vec!["import b from \"b\";", "import d from \"d\";"]);
        for line in &unit.code {
            assert!(!unit.imports.contains(line));
        }
    }

    #[test]
    fn test_symbol_without_documentation_yields_nothing() {
        let symbol = LinkedSymbol::new("add");
        assert!(SymbolTests::from_symbol(&symbol).is_none());

        let symbol = LinkedSymbol::new("add").with_documentation(Documentation::default());
        assert!(SymbolTests::from_symbol(&symbol).is_none());
    }

    #[test]
    fn test_symbol_without_recognized_tags_yields_nothing() {
        let symbol = LinkedSymbol::new("add").with_tags(vec![
            CustomTag::new("param", vec!["a - first addend".to_string()]),
            CustomTag::new("returns", vec!["the sum".to_string()]),
        ]);
        assert!(SymbolTests::from_symbol(&symbol).is_none());
    }

    #[test]
    fn test_symbol_with_only_contentless_tags_yields_nothing() {
        let symbol = LinkedSymbol::new("add").with_tags(vec![
            CustomTag::contentless("example"),
            CustomTag::contentless("doctest"),
        ]);
        assert!(SymbolTests::from_symbol(&symbol).is_none());
    }

    #[test]
    fn test_symbol_keeps_tag_order_and_drops_unrecognized() {
        let symbol = LinkedSymbol::new("add").with_tags(vec![
            example_tag("first();"),
            CustomTag::new("param", vec!["ignored".to_string()]),
            CustomTag::new("doctest", vec!["second();".to_string()]),
        ]);

        let tests = SymbolTests::from_symbol(&symbol).unwrap();
        assert_eq!(tests.name, "add");
        assert_eq!(tests.units.len(), 2);
        assert_eq!(tests.units[0].code, vec!["first();"]);
        assert_eq!(tests.units[1].code, vec!["second();"]);
    }

    #[test]
    fn test_file_without_symbol_or_exports_is_empty_but_present() {
        let file = LinkedFile::new("empty");
        let tests = FileTests::from_file(&file);
        assert_eq!(tests.module_name, "empty");
        assert!(tests.symbols.is_empty());

        let file = LinkedFile::new("bare").with_symbol(LinkedSymbol::new("bare"));
        let tests = FileTests::from_file(&file);
        assert!(tests.symbols.is_empty());
    }

    #[test]
    fn test_file_with_untested_exports_is_empty_but_present() {
        let mut exports = BTreeMap::new();
        exports.insert("add".to_string(), LinkedSymbol::new("add"));
        exports.insert("sub".to_string(), LinkedSymbol::new("sub"));
        let file = LinkedFile::new("math")
            .with_symbol(LinkedSymbol::new("math").with_exports(exports));

        let tests = FileTests::from_file(&file);
        assert_eq!(tests.module_name, "math");
        assert!(tests.symbols.is_empty());
        assert!(!tests.has_tests());
    }

    #[test]
    fn test_program_keeps_every_file_in_key_order() {
        let mut exports = BTreeMap::new();
        exports.insert(
            "add".to_string(),
            LinkedSymbol::new("add").with_tags(vec![example_tag("add(1, 2);")]),
        );

        let mut files = BTreeMap::new();
        files.insert(
            "src/math.ts".to_string(),
            LinkedFile::new("math").with_symbol(LinkedSymbol::new("math").with_exports(exports)),
        );
        files.insert("src/empty.ts".to_string(), LinkedFile::new("empty"));

        let tests = ProgramTests::from_program(&LinkedProgram::new(files));
        assert_eq!(tests.files.len(), 2);
        // BTreeMap key order: src/empty.ts before src/math.ts.
        assert_eq!(tests.files[0].module_name, "empty");
        assert_eq!(tests.files[1].module_name, "math");
        assert_eq!(tests.total_symbols(), 1);
        assert_eq!(tests.total_units(), 1);
    }
}
