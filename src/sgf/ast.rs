//! Syntax tree for SGF collections

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Root of an SGF file: one or more game trees
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub trees: Vec<GameTree>,
}

/// A sequence of nodes followed by zero or more variations
#[derive(Debug, Clone, PartialEq)]
pub struct GameTree {
    pub sequence: Vec<Spanned<Node>>,
    pub variations: Vec<GameTree>,
    pub span: Span,
}

impl GameTree {
    /// Nodes of the main line: this sequence, then the first variation, recursively
    pub fn main_line(&self) -> Vec<&Node> {
        let mut nodes = vec![];
        let mut tree = Some(self);
        while let Some(t) = tree {
            nodes.extend(t.sequence.iter().map(|n| &n.node));
            tree = t.variations.first();
        }
        nodes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub properties: Vec<Property>,
}

impl Node {
    /// First property with the given identifier
    pub fn get(&self, ident: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.ident.node == ident)
    }
}

/// `Ident[value][value]...`
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub ident: Spanned<String>,
    pub values: Vec<Spanned<String>>,
}
