use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Documentation-tag kinds that mark runnable examples.
///
/// Tag names arrive as free-form strings from the documentation toolchain;
/// only these two spellings qualify a tag for extraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Example,
    Doctest,
}

impl TagKind {
    /// Recognizes a raw tag name, case-sensitively. Anything other than
    /// `example` or `doctest` maps to no kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "example" => Some(TagKind::Example),
            "doctest" => Some(TagKind::Doctest),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Example => "example",
            TagKind::Doctest => "doctest",
        }
    }
}

/// One custom annotation from a symbol's documentation comment. Content is
/// an ordered sequence of text fragments; the toolchain may omit it
/// entirely for contentless tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTag {
    pub tag_name: String,
    #[serde(default)]
    pub content: Option<Vec<String>>,
}

impl CustomTag {
    pub fn new(tag_name: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            content: Some(content),
        }
    }

    pub fn contentless(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            content: None,
        }
    }

    pub fn kind(&self) -> Option<TagKind> {
        TagKind::from_name(&self.tag_name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
    #[serde(default)]
    pub custom_tags: Option<Vec<CustomTag>>,
}

impl Documentation {
    pub fn with_tags(tags: Vec<CustomTag>) -> Self {
        Self {
            custom_tags: Some(tags),
        }
    }
}

/// A linked symbol as emitted by the formatter/linker: a named declaration,
/// its documentation, and (for module-level symbols) an export table keyed
/// by export name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedSymbol {
    pub name: String,
    #[serde(default)]
    pub documentation: Option<Documentation>,
    #[serde(default)]
    pub exports: Option<BTreeMap<String, LinkedSymbol>>,
}

impl LinkedSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documentation: None,
            exports: None,
        }
    }

    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn with_tags(self, tags: Vec<CustomTag>) -> Self {
        self.with_documentation(Documentation::with_tags(tags))
    }

    pub fn with_exports(mut self, exports: BTreeMap<String, LinkedSymbol>) -> Self {
        self.exports = Some(exports);
        self
    }
}

/// One source file of the linked program. The module symbol (and with it
/// the export table) is absent for files that expose nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedFile {
    pub module_name: String,
    #[serde(default)]
    pub symbol: Option<LinkedSymbol>,
}

impl LinkedFile {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: LinkedSymbol) -> Self {
        self.symbol = Some(symbol);
        self
    }
}

/// The linked program document produced by the documentation toolchain.
/// Files are keyed by path; iteration follows the map's key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedProgram {
    pub files: BTreeMap<String, LinkedFile>,
}

impl LinkedProgram {
    pub fn new(files: BTreeMap<String, LinkedFile>) -> Self {
        Self { files }
    }
}
