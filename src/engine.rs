use crate::{Ast, Context, EvaluationReport, ParseError};

/// What parsing does with a rule that holds no condition at all (for example
/// `""` or `"AND OR"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyExpressionPolicy {
    /// Return the empty [`Ast`], which evaluates to `false`.
    #[default]
    Lenient,
    /// Fail with [`ParseError::EmptyExpression`].
    Reject,
}

/// How [`RuleEngine::combine`] counts `AND`/`OR` to choose the operator that
/// joins the combined rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperatorCounting {
    /// Count raw occurrences of the substrings `AND` and `OR` in the rule
    /// strings. Text inside values and identifiers is counted too, so
    /// `status = 'AND'` adds one `AND` and `COLOR = 'red'` adds one `OR`.
    #[default]
    Textual,
    /// Count operator nodes of the parsed trees.
    Parsed,
}

/// Parses, combines and evaluates rules.
///
/// The engine holds nothing but its policies: it is `Copy`, every method takes
/// `&self`, and one instance can be used from any number of threads.
///
/// Parsing and combining reject trees deeper than
/// [`max_depth`](RuleEngineBuilder::max_depth) levels with
/// [`ParseError::TooDeep`]. Evaluation, display and drop all recurse once per
/// level, so the limit bounds their stack use.
///
/// # Example
///
/// ```
/// use condrule::{Context, EmptyExpressionPolicy, OperatorCounting, RuleEngine};
///
/// let engine = RuleEngine::builder()
///     .empty_expressions(EmptyExpressionPolicy::Reject)
///     .operator_counting(OperatorCounting::Parsed)
///     .build();
///
/// let ast = engine.combine(["age > 30 AND dept = 'Sales'", "salary > 50000"]).unwrap();
/// let ctx = Context::new()
///     .set("age", 35_i64)
///     .set("dept", "Sales")
///     .set("salary", 60000_i64);
/// assert!(engine.evaluate(&ast, &ctx));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEngine {
    empty: EmptyExpressionPolicy,
    counting: OperatorCounting,
    max_depth: usize,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            empty: EmptyExpressionPolicy::default(),
            counting: OperatorCounting::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builder for a [`RuleEngine`] with non-default policies.
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct RuleEngineBuilder {
    engine: RuleEngine,
}

impl RuleEngineBuilder {
    pub fn empty_expressions(mut self, policy: EmptyExpressionPolicy) -> Self {
        self.engine.empty = policy;
        self
    }

    pub fn operator_counting(mut self, counting: OperatorCounting) -> Self {
        self.engine.counting = counting;
        self
    }

    /// Deepest tree, in levels, that parsing and combining will build. A
    /// single condition is one level. Values below 1 are raised to 1.
    pub fn max_depth(mut self, levels: usize) -> Self {
        self.engine.max_depth = levels.max(1);
        self
    }

    #[must_use]
    pub fn build(self) -> RuleEngine {
        self.engine
    }
}

impl RuleEngine {
    /// Depth limit used unless [`RuleEngineBuilder::max_depth`] says otherwise.
    pub const DEFAULT_MAX_DEPTH: usize = 1024;

    /// An engine with the default policies: lenient empty expressions and
    /// textual operator counting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RuleEngineBuilder {
        RuleEngineBuilder::default()
    }

    #[must_use]
    pub fn empty_expressions(&self) -> EmptyExpressionPolicy {
        self.empty
    }

    #[must_use]
    pub fn operator_counting(&self) -> OperatorCounting {
        self.counting
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse one rule string into an [`Ast`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if a condition is malformed, parentheses do not
    /// balance, the tree would exceed the depth limit, or (under
    /// [`EmptyExpressionPolicy::Reject`]) the rule holds no condition.
    pub fn parse(&self, rule: &str) -> Result<Ast, ParseError> {
        crate::parse::build_ast(rule, self)
    }

    /// Parse every rule and join the trees, in order, under the operator that
    /// occurs most often across them (`AND` on a tie).
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of the first rule that fails to parse, or
    /// [`ParseError::TooDeep`] if the joined tree exceeds the depth limit.
    pub fn combine<I, S>(&self, rules: I) -> Result<Ast, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        crate::combine::combine(self, rules)
    }

    /// Evaluate an [`Ast`] against a context. The empty AST is `false`.
    #[must_use]
    pub fn evaluate(&self, ast: &Ast, ctx: &Context) -> bool {
        crate::evaluate::evaluate(ast, ctx)
    }

    /// Like [`evaluate`](Self::evaluate), also reporting every leaf's outcome.
    pub fn evaluate_detailed(&self, ast: &Ast, ctx: &Context) -> EvaluationReport {
        crate::evaluate::evaluate_detailed(ast, ctx)
    }
}
