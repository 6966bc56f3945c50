//! Exact Boolean matching over the inverted index.
//!
//! Queries go through three stages: a regex lexer, a shunting-yard pass to
//! postfix, and a stack evaluation over document-id sets.

use crate::corpus::Corpus;
use crate::index::{DocId, InvertedIndex};
use crate::normalize::{Normalizer, SimpleNormalizer};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

lazy_static! {
    static ref QUERY_RE: Regex = Regex::new(r"\w+|\(|\)").expect("valid regex");
}

/// A Boolean query that cannot be evaluated. Raised instead of returning an
/// empty result, so callers can tell "matched nothing" from "made no sense".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query contains no terms and no operators at all.
    #[error("query is empty")]
    Empty,
    /// A `)` without a matching `(`, or a `(` left open at end of input.
    #[error("unbalanced parentheses in query")]
    UnbalancedParens,
    /// An operator reached evaluation with too few operands, e.g. `AND cat`.
    #[error("operator {0} is missing an operand")]
    MissingOperand(&'static str),
    /// Evaluation finished with a number of operand sets other than one,
    /// e.g. `cat dog` (two leftovers) or `()` (none).
    #[error("query reduced to {0} operand sets instead of exactly one")]
    Unreduced(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryToken {
    Term(String),
    And,
    Or,
    Not,
    Open,
    Close,
}

impl QueryToken {
    fn op_name(&self) -> &'static str {
        match self {
            QueryToken::And => "AND",
            QueryToken::Or => "OR",
            QueryToken::Not => "NOT",
            QueryToken::Open => "(",
            QueryToken::Close => ")",
            QueryToken::Term(_) => "TERM",
        }
    }
}

/// NOT binds tighter than AND, AND tighter than OR.
fn precedence(token: &QueryToken) -> u8 {
    match token {
        QueryToken::Not => 3,
        QueryToken::And => 2,
        QueryToken::Or => 1,
        _ => 0,
    }
}

/// Scan the query into terms, operators and parentheses.
///
/// Word runs are maximal, so `note` is a term, not `NOT` + `e`. Operator
/// keywords are recognized case-insensitively; anything that is neither a
/// word run nor a parenthesis is dropped without comment.
fn lex(query: &str) -> Vec<QueryToken> {
    QUERY_RE
        .find_iter(query)
        .map(|mat| match mat.as_str() {
            "(" => QueryToken::Open,
            ")" => QueryToken::Close,
            word if word.eq_ignore_ascii_case("and") => QueryToken::And,
            word if word.eq_ignore_ascii_case("or") => QueryToken::Or,
            word if word.eq_ignore_ascii_case("not") => QueryToken::Not,
            word => QueryToken::Term(word.to_lowercase()),
        })
        .collect()
}

/// Shunting-yard: infix tokens to postfix, parentheses consumed.
///
/// Same-precedence operators pop left-to-right (pop on greater-or-equal), so
/// `a AND b AND c` evaluates as `(a AND b) AND c`.
fn to_postfix(tokens: Vec<QueryToken>) -> Result<Vec<QueryToken>, QueryError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<QueryToken> = Vec::new();

    for token in tokens {
        match token {
            QueryToken::Term(_) => output.push(token),
            QueryToken::Open => stack.push(token),
            QueryToken::Close => loop {
                match stack.pop() {
                    Some(QueryToken::Open) => break,
                    Some(op) => output.push(op),
                    None => return Err(QueryError::UnbalancedParens),
                }
            },
            op => {
                while let Some(top) = stack.last() {
                    if matches!(top, QueryToken::Open) || precedence(top) < precedence(&op) {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(op);
            }
        }
    }

    while let Some(op) = stack.pop() {
        if matches!(op, QueryToken::Open) {
            return Err(QueryError::UnbalancedParens);
        }
        output.push(op);
    }
    Ok(output)
}

/// Evaluate a postfix token sequence over the index's document sets.
fn eval_postfix(index: &InvertedIndex, postfix: &[QueryToken]) -> Result<HashSet<DocId>, QueryError> {
    let mut stack: Vec<HashSet<DocId>> = Vec::new();

    for token in postfix {
        match token {
            QueryToken::Term(term) => stack.push(index.doc_set(term)),
            QueryToken::Not => {
                let operand = stack.pop().ok_or(QueryError::MissingOperand("NOT"))?;
                let mut complement = index.all_docs();
                complement.retain(|doc| !operand.contains(doc));
                stack.push(complement);
            }
            QueryToken::And | QueryToken::Or => {
                let name = token.op_name();
                let right = stack.pop().ok_or(QueryError::MissingOperand(name))?;
                let left = stack.pop().ok_or(QueryError::MissingOperand(name))?;
                let result = match token {
                    QueryToken::And => left.intersection(&right).copied().collect(),
                    _ => left.union(&right).copied().collect(),
                };
                stack.push(result);
            }
            // parentheses never survive to_postfix
            QueryToken::Open | QueryToken::Close => return Err(QueryError::UnbalancedParens),
        }
    }

    let result = stack.pop().ok_or(QueryError::Unreduced(0))?;
    if !stack.is_empty() {
        return Err(QueryError::Unreduced(stack.len() + 1));
    }
    Ok(result)
}

/// Exact-match retrieval: `AND` / `OR` / `NOT` expressions over literal
/// terms, evaluated against term-membership sets.
pub struct BooleanModel {
    index: InvertedIndex,
}

impl BooleanModel {
    /// Index `corpus` with the default [`SimpleNormalizer`].
    pub fn new(corpus: &Corpus) -> Self {
        Self::with_normalizer(corpus, &SimpleNormalizer)
    }

    /// Index `corpus` with a caller-supplied normalizer. The normalizer is
    /// only needed at build time: query terms are looked up lowercased but
    /// otherwise literal, matching how the index keys were produced only to
    /// the extent the normalizer lowercases.
    pub fn with_normalizer<N: Normalizer>(corpus: &Corpus, normalizer: &N) -> Self {
        Self {
            index: InvertedIndex::build(corpus, normalizer),
        }
    }

    /// Evaluate a Boolean expression, returning the matching document ids.
    ///
    /// Unknown terms match the empty set; an empty or unparseable query is a
    /// [`QueryError`]. `and`, `or` and `not` are reserved words in any case
    /// mix and cannot themselves be searched for.
    pub fn query(&self, query: &str) -> Result<BTreeSet<String>, QueryError> {
        let tokens = lex(query);
        if tokens.is_empty() {
            return Err(QueryError::Empty);
        }
        let postfix = to_postfix(tokens)?;
        tracing::debug!(?postfix, "evaluating boolean query");
        let docs = eval_postfix(&self.index, &postfix)?;
        Ok(docs
            .into_iter()
            .filter_map(|doc| self.index.id_of(doc))
            .map(str::to_string)
            .collect())
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }
}
