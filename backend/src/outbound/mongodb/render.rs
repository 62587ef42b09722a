//! Translation of the aggregation DSL into MongoDB pipeline documents.

use bson::{Bson, Document, doc};

use crate::domain::pipeline::{AggregateQuery, Expr, Filter, Stage};

/// Full pipeline including sort, skip and limit stages.
pub(super) fn pipeline(query: &AggregateQuery) -> Vec<Document> {
    let mut out: Vec<Document> = query.stages.iter().map(stage).collect();
    if let Some(sort) = &query.sort {
        out.push(doc! { "$sort": { sort.field.as_str(): sort.direction.as_multiplier() } });
    }
    if query.skip > 0 {
        out.push(doc! { "$skip": clamp(query.skip) });
    }
    out.push(doc! { "$limit": clamp(query.limit) });
    out
}

/// Query filter document.
pub(super) fn filter(filter: &Filter) -> Document {
    match filter {
        Filter::Id(id) => doc! { "_id": *id },
        Filter::FieldEq { field, value } => doc! { field.as_str(): value.clone() },
    }
}

fn clamp(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn field_ref(path: &str) -> String {
    format!("${path}")
}

fn stage(stage: &Stage) -> Document {
    match stage {
        Stage::Lookup {
            from,
            local_field,
            foreign_field,
            as_field,
        } => doc! {
            "$lookup": {
                "from": from.as_str(),
                "localField": local_field.as_str(),
                "foreignField": foreign_field.as_str(),
                "as": as_field.as_str(),
            }
        },
        Stage::Set { field, expr } => doc! { "$set": { field.as_str(): expression(expr) } },
        Stage::Unset(paths) => doc! { "$unset": paths.clone() },
        Stage::MatchId(id) => doc! { "$match": { "_id": *id } },
    }
}

fn expression(expr: &Expr) -> Bson {
    match expr {
        Expr::First(path) => Bson::Document(doc! { "$arrayElemAt": [field_ref(path), 0] }),
        Expr::Size(path) => Bson::Document(doc! {
            "$size": { "$ifNull": [field_ref(path), []] }
        }),
        Expr::Coalesce(paths) => paths
            .iter()
            .rev()
            .fold(Bson::String("$$REMOVE".to_owned()), |fallback, path| {
                Bson::Document(doc! { "$ifNull": [field_ref(path), fallback] })
            }),
        Expr::AttachMatches {
            array,
            key,
            source,
            as_field,
        } => Bson::Document(doc! {
            "$map": {
                "input": field_ref(array),
                "as": "line",
                "in": {
                    "$mergeObjects": [
                        "$$line",
                        {
                            as_field.as_str(): {
                                "$arrayElemAt": [
                                    {
                                        "$filter": {
                                            "input": field_ref(source),
                                            "as": "candidate",
                                            "cond": {
                                                "$eq": ["$$candidate._id", format!("$$line.{key}")]
                                            },
                                        }
                                    },
                                    0,
                                ]
                            }
                        },
                    ]
                },
            }
        }),
    }
}
