use std::collections::BTreeSet;
use trove::{BooleanModel, Corpus, QueryError};

fn animal_corpus() -> Corpus {
    let mut corpus = Corpus::new();
    corpus.insert("d1", "The cat sat on the mat.");
    corpus.insert("d2", "A dog barked at the cat.");
    corpus.insert("d3", "Fish swim in the sea.");
    corpus
}

fn ids(set: &BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[test]
fn conjunction_requires_all_terms() {
    let model = BooleanModel::new(&animal_corpus());
    assert_eq!(ids(&model.query("cat AND sat").unwrap()), vec!["d1"]);
    assert_eq!(ids(&model.query("cat AND dog").unwrap()), vec!["d2"]);
}

#[test]
fn disjunction_accepts_any_term() {
    let model = BooleanModel::new(&animal_corpus());
    assert_eq!(ids(&model.query("mat OR fish").unwrap()), vec!["d1", "d3"]);
}

#[test]
fn negation_complements_the_whole_corpus() {
    let model = BooleanModel::new(&animal_corpus());
    assert_eq!(ids(&model.query("NOT cat").unwrap()), vec!["d3"]);
    assert_eq!(ids(&model.query("cat AND NOT dog").unwrap()), vec!["d1"]);
}

#[test]
fn tautology_returns_everything_contradiction_nothing() {
    let model = BooleanModel::new(&animal_corpus());
    assert_eq!(model.query("cat OR NOT cat").unwrap().len(), 3);
    assert!(model.query("cat AND NOT cat").unwrap().is_empty());
}

#[test]
fn and_binds_tighter_than_or() {
    let model = BooleanModel::new(&animal_corpus());
    let implicit = model.query("fish OR cat AND dog").unwrap();
    assert_eq!(implicit, model.query("fish OR (cat AND dog)").unwrap());
    assert_eq!(ids(&implicit), vec!["d2", "d3"]);
    assert_eq!(ids(&model.query("(fish OR cat) AND dog").unwrap()), vec!["d2"]);
}

#[test]
fn operators_work_in_any_case() {
    let model = BooleanModel::new(&animal_corpus());
    let upper = model.query("cat AND NOT dog").unwrap();
    assert_eq!(model.query("cat and not dog").unwrap(), upper);
    assert_eq!(model.query("Cat And Not Dog").unwrap(), upper);
}

#[test]
fn query_terms_match_case_insensitively() {
    let model = BooleanModel::new(&animal_corpus());
    assert_eq!(ids(&model.query("CAT").unwrap()), vec!["d1", "d2"]);
}

#[test]
fn query_terms_are_literal_not_stemmed() {
    // documents are stemmed at index time ("barked" -> "bark"), query terms
    // are only lowercased, so the inflected form finds nothing
    let model = BooleanModel::new(&animal_corpus());
    assert_eq!(ids(&model.query("bark").unwrap()), vec!["d2"]);
    assert!(model.query("barked").unwrap().is_empty());
}

#[test]
fn unknown_terms_are_empty_sets_not_errors() {
    let model = BooleanModel::new(&animal_corpus());
    assert!(model.query("zeppelin").unwrap().is_empty());
    assert_eq!(ids(&model.query("zeppelin OR fish").unwrap()), vec!["d3"]);
    assert_eq!(model.query("NOT zeppelin").unwrap().len(), 3);
}

#[test]
fn malformed_queries_are_reported_not_swallowed() {
    let model = BooleanModel::new(&animal_corpus());
    assert_eq!(model.query(""), Err(QueryError::Empty));
    assert_eq!(model.query("  \t "), Err(QueryError::Empty));
    assert_eq!(model.query("cat AND"), Err(QueryError::MissingOperand("AND")));
    assert_eq!(model.query("OR cat"), Err(QueryError::MissingOperand("OR")));
    assert_eq!(model.query("(cat OR dog"), Err(QueryError::UnbalancedParens));
    assert_eq!(model.query("cat) OR dog"), Err(QueryError::UnbalancedParens));
    assert_eq!(model.query("cat dog"), Err(QueryError::Unreduced(2)));
}

#[test]
fn results_are_sorted_by_document_id() {
    let mut corpus = Corpus::new();
    corpus.insert("zebra.txt", "shared term");
    corpus.insert("apple.txt", "shared term");
    corpus.insert("mango.txt", "shared term");
    let model = BooleanModel::new(&corpus);
    assert_eq!(
        ids(&model.query("term").unwrap()),
        vec!["apple.txt", "mango.txt", "zebra.txt"]
    );
}
