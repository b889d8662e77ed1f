use std::fmt;
use std::fmt::Write as _;

/// Boolean operators joining two sub-rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// Binding strength used by the parser. `AND` binds tighter than `OR`.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            LogicalOp::And => 1,
            LogicalOp::Or => 0,
        }
    }

    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }

    /// Look up an operator by its exact (upper-case) keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "AND" => Some(LogicalOp::And),
            "OR" => Some(LogicalOp::Or),
            _ => None,
        }
    }

    pub(crate) fn apply(self, left: bool, right: bool) -> bool {
        match self {
            LogicalOp::And => left && right,
            LogicalOp::Or => left || right,
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A node of a rule tree.
///
/// Leaves keep the condition text exactly as written (trimmed); it is decoded
/// into a [`Condition`](super::Condition) only when evaluated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "super::wire::WireNode", into = "super::wire::WireNode")
)]
pub enum Node {
    Operand(String),
    Operator {
        op: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Leaf holding `condition`, trimmed. The text is not validated here.
    #[must_use]
    pub fn operand(condition: &str) -> Node {
        Node::Operand(condition.trim().to_owned())
    }

    #[must_use]
    pub fn join(op: LogicalOp, left: Node, right: Node) -> Node {
        Node::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn and(self, other: Node) -> Node {
        Node::join(LogicalOp::And, self, other)
    }

    #[must_use]
    pub fn or(self, other: Node) -> Node {
        Node::join(LogicalOp::Or, self, other)
    }

    #[must_use]
    pub fn is_operand(&self) -> bool {
        matches!(self, Node::Operand(_))
    }

    /// Height of the subtree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Node::Operand(_) => 1,
            Node::Operator { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Operand(text) => out.push(text),
            Node::Operator { left, right, .. } => {
                left.collect_conditions(out);
                right.collect_conditions(out);
            }
        }
    }

    fn count_ops(&self, wanted: LogicalOp) -> usize {
        match self {
            Node::Operand(_) => 0,
            Node::Operator { op, left, right } => {
                usize::from(*op == wanted) + left.count_ops(wanted) + right.count_ops(wanted)
            }
        }
    }

    fn write_outline(&self, level: usize, out: &mut String) {
        let indent = " ".repeat(level * 4);
        match self {
            Node::Operand(text) => {
                let _ = writeln!(out, "{indent}Operand: {text}");
            }
            Node::Operator { op, left, right } => {
                let _ = writeln!(out, "{indent}Operator: {op}");
                let _ = writeln!(out, "{indent}Left:");
                left.write_outline(level + 1, out);
                let _ = writeln!(out, "{indent}Right:");
                right.write_outline(level + 1, out);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operand(text) => f.write_str(text),
            Node::Operator { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// A parsed rule: a tree of [`Node`]s, or nothing.
///
/// The empty AST is what parsing yields for input without any condition, and
/// what combining zero rules yields. It evaluates to `false`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[must_use]
pub struct Ast {
    root: Option<Node>,
}

impl Ast {
    /// Wrap a hand-built tree. Trees from [`RuleEngine::parse`](crate::RuleEngine::parse)
    /// are bounded by the engine's depth limit; this constructor is not, and
    /// evaluation recurses once per level.
    pub fn new(root: Node) -> Self {
        Self { root: Some(root) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    #[must_use]
    pub fn into_root(self) -> Option<Node> {
        self.root
    }

    /// Condition texts of every leaf, left to right.
    #[must_use]
    pub fn conditions(&self) -> Vec<&str> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_conditions(&mut out);
        }
        out
    }

    /// Number of operator nodes of the given kind.
    #[must_use]
    pub fn operator_count(&self, op: LogicalOp) -> usize {
        self.root.as_ref().map_or(0, |root| root.count_ops(op))
    }

    /// Height of the tree; `0` when empty.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    /// Indented, line-per-node dump of the tree.
    ///
    /// ```
    /// let ast = condrule::parse("age > 30 AND dept = 'Sales'").unwrap();
    /// assert_eq!(
    ///     ast.outline(),
    ///     "Operator: AND\nLeft:\n    Operand: age > 30\nRight:\n    Operand: dept = 'Sales'\n"
    /// );
    /// ```
    #[must_use]
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if let Some(root) = &self.root {
            root.write_outline(0, &mut out);
        }
        out
    }
}

#[cfg(feature = "binary-cache")]
impl Ast {
    /// Encode this tree into the framed binary format.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, crate::serial::SerializeError> {
        crate::serial::encode(self)
    }

    /// Decode a tree produced by [`to_bytes`](Self::to_bytes). The header,
    /// checksum and every condition are verified.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on a bad
    /// header, version, length or checksum, or a tree that fails validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::serial::DeserializeError> {
        crate::serial::decode(bytes)
    }
}

impl From<Node> for Ast {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

impl From<Option<Node>> for Ast {
    fn from(root: Option<Node>) -> Self {
        Self { root }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => Ok(()),
        }
    }
}
