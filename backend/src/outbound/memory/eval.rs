//! Interpreter for the aggregation DSL over owned BSON documents.
//!
//! Semantics follow MongoDB closely enough for the stages the catalogue
//! uses: dotted paths fan out over arrays of sub-documents, lookups compare
//! every local value with every foreign value, and sorting ranks values by
//! BSON type before comparing them.

use std::cmp::Ordering;
use std::collections::HashMap;

use bson::{Bson, Document};
use pagination::SortDirection;

use crate::domain::pipeline::{Expr, Filter, SortSpec, Stage};

/// Run `stages` over `docs`; `collections` backs lookups.
pub(super) fn run_stages(
    mut docs: Vec<Document>,
    stages: &[Stage],
    collections: &HashMap<String, Vec<Document>>,
) -> Vec<Document> {
    for stage in stages {
        match stage {
            Stage::Lookup {
                from,
                local_field,
                foreign_field,
                as_field,
            } => {
                let foreign = collections.get(from).map_or(&[][..], Vec::as_slice);
                for doc in &mut docs {
                    let joined = lookup(doc, local_field, foreign, foreign_field);
                    set_path(doc, as_field, Bson::Array(joined));
                }
            }
            Stage::Set { field, expr } => {
                for doc in &mut docs {
                    match eval(doc, expr) {
                        Some(value) => set_path(doc, field, value),
                        None => unset_path(doc, field),
                    }
                }
            }
            Stage::Unset(paths) => {
                for doc in &mut docs {
                    for path in paths {
                        unset_path(doc, path);
                    }
                }
            }
            Stage::MatchId(id) => docs.retain(|doc| doc.get("_id") == Some(&Bson::ObjectId(*id))),
        }
    }
    docs
}

/// Stable sort; missing fields rank as null.
pub(super) fn sort(docs: &mut [Document], spec: &SortSpec) {
    docs.sort_by(|a, b| {
        let ordering = compare(
            get_path(a, &spec.field).unwrap_or(&Bson::Null),
            get_path(b, &spec.field).unwrap_or(&Bson::Null),
        );
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Whether `doc` satisfies `filter`.
pub(super) fn matches(doc: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::Id(id) => doc.get("_id") == Some(&Bson::ObjectId(*id)),
        Filter::FieldEq { field, value } => values_at(doc, field)
            .iter()
            .any(|candidate| compare(candidate, value) == Ordering::Equal),
    }
}

fn lookup(doc: &Document, local_field: &str, foreign: &[Document], foreign_field: &str) -> Vec<Bson> {
    let local = values_at(doc, local_field);
    foreign
        .iter()
        .filter(|candidate| {
            values_at(candidate, foreign_field).iter().any(|theirs| {
                local
                    .iter()
                    .any(|ours| compare(ours, theirs) == Ordering::Equal)
            })
        })
        .cloned()
        .map(Bson::Document)
        .collect()
}

fn eval(doc: &Document, expr: &Expr) -> Option<Bson> {
    match expr {
        Expr::First(path) => match get_path(doc, path) {
            Some(Bson::Array(items)) => items.first().cloned(),
            _ => None,
        },
        Expr::Size(path) => {
            let len = match get_path(doc, path) {
                Some(Bson::Array(items)) => items.len(),
                _ => 0,
            };
            Some(i32::try_from(len).map_or_else(|_| Bson::Int64(len as i64), Bson::Int32))
        }
        Expr::Coalesce(paths) => paths
            .iter()
            .filter_map(|path| get_path(doc, path))
            .find(|value| !matches!(value, Bson::Null))
            .cloned(),
        Expr::AttachMatches {
            array,
            key,
            source,
            as_field,
        } => {
            let Some(Bson::Array(items)) = get_path(doc, array) else {
                return None;
            };
            let candidates = match get_path(doc, source) {
                Some(Bson::Array(candidates)) => candidates.as_slice(),
                _ => &[],
            };
            let items = items
                .iter()
                .map(|item| match item {
                    Bson::Document(element) => {
                        Bson::Document(attach(element.clone(), key, candidates, as_field))
                    }
                    other => other.clone(),
                })
                .collect();
            Some(Bson::Array(items))
        }
    }
}

fn attach(mut element: Document, key: &str, candidates: &[Bson], as_field: &str) -> Document {
    let matched = get_path(&element, key).and_then(|wanted| {
        candidates.iter().find(|candidate| match candidate {
            Bson::Document(c) => c
                .get("_id")
                .is_some_and(|id| compare(id, wanted) == Ordering::Equal),
            _ => false,
        })
    });
    match matched.cloned() {
        Some(found) => set_path(&mut element, as_field, found),
        None => unset_path(&mut element, as_field),
    }
    element
}

/// Value at a dotted path, following sub-documents only.
pub(super) fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Bson::Document(inner) => inner.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Every value a dotted path reaches, fanning out over arrays.
///
/// A missing path yields a single null so it can match missing foreign
/// fields the way MongoDB lookups do.
fn values_at(doc: &Document, path: &str) -> Vec<Bson> {
    let mut out = Vec::new();
    match doc.get(path.split('.').next().unwrap_or(path)) {
        Some(value) => collect(value, path.split_once('.').map(|(_, rest)| rest), &mut out),
        None => out.push(Bson::Null),
    }
    if out.is_empty() {
        out.push(Bson::Null);
    }
    out
}

fn collect(value: &Bson, rest: Option<&str>, out: &mut Vec<Bson>) {
    match (value, rest) {
        (Bson::Array(items), None) => out.extend(items.iter().cloned()),
        (value, None) => out.push(value.clone()),
        (Bson::Array(items), Some(_)) => {
            for item in items {
                collect(item, rest, out);
            }
        }
        (Bson::Document(inner), Some(rest)) => {
            let (head, tail) = match rest.split_once('.') {
                Some((head, tail)) => (head, Some(tail)),
                None => (rest, None),
            };
            if let Some(next) = inner.get(head) {
                collect(next, tail, out);
            }
        }
        (_, Some(_)) => {}
    }
}

/// Write `value` at a dotted path, creating intermediate documents.
pub(super) fn set_path(doc: &mut Document, path: &str, value: Bson) {
    match path.split_once('.') {
        None => {
            doc.insert(path, value);
        }
        Some((head, rest)) => {
            if !matches!(doc.get(head), Some(Bson::Document(_))) {
                doc.insert(head, Document::new());
            }
            if let Some(Bson::Document(inner)) = doc.get_mut(head) {
                set_path(inner, rest, value);
            }
        }
    }
}

/// Remove a dotted path; array segments apply to each sub-document.
fn unset_path(doc: &mut Document, path: &str) {
    let Some((head, rest)) = path.split_once('.') else {
        doc.remove(path);
        return;
    };
    match doc.get_mut(head) {
        Some(Bson::Document(inner)) => unset_path(inner, rest),
        Some(Bson::Array(items)) => {
            for item in items {
                if let Bson::Document(inner) = item {
                    unset_path(inner, rest);
                }
            }
        }
        _ => {}
    }
}

fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::MinKey => 0,
        Bson::Null | Bson::Undefined => 1,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_) => 2,
        Bson::String(_) | Bson::Symbol(_) => 3,
        Bson::Document(_) => 4,
        Bson::Array(_) => 5,
        Bson::Binary(_) => 6,
        Bson::ObjectId(_) => 7,
        Bson::Boolean(_) => 8,
        Bson::DateTime(_) => 9,
        Bson::Timestamp(_) => 10,
        Bson::RegularExpression(_) => 11,
        Bson::MaxKey => 13,
        _ => 12,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

/// Total order over BSON values, ranking types first.
pub(super) fn compare(a: &Bson, b: &Bson) -> Ordering {
    let by_rank = type_rank(a).cmp(&type_rank(b));
    if by_rank != Ordering::Equal {
        return by_rank;
    }
    match (a, b) {
        (Bson::Int64(x), Bson::Int64(y)) => x.cmp(y),
        (x, y) if type_rank(x) == 2 => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
        (Bson::String(x) | Bson::Symbol(x), Bson::String(y) | Bson::Symbol(y)) => x.cmp(y),
        (Bson::Document(x), Bson::Document(y)) => {
            for ((xk, xv), (yk, yv)) in x.iter().zip(y.iter()) {
                let ordering = xk.cmp(yk).then_with(|| compare(xv, yv));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            x.len().cmp(&y.len())
        }
        (Bson::Array(x), Bson::Array(y)) => {
            for (xv, yv) in x.iter().zip(y.iter()) {
                let ordering = compare(xv, yv);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            x.len().cmp(&y.len())
        }
        (Bson::Binary(x), Bson::Binary(y)) => x.bytes.cmp(&y.bytes),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
        (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
        (Bson::DateTime(x), Bson::DateTime(y)) => x.timestamp_millis().cmp(&y.timestamp_millis()),
        (Bson::Timestamp(x), Bson::Timestamp(y)) => {
            (x.time, x.increment).cmp(&(y.time, y.increment))
        }
        _ => Ordering::Equal,
    }
}
