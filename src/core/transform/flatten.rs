//! Nested-to-flat denormalization
//!
//! Each entity family walks a fixed nesting path and emits one row per leaf
//! combination. Every level is an outer join: a parent without children
//! still yields one row whose child columns are null. Child columns are
//! named `<role>_<field>`.
//!
//! Column sets come from serializing the entity, so the wire field names
//! become column names and every row of a family has the same columns in
//! declaration order. The null columns of an absent child are taken from
//! its `Default` value.

use crate::domain::{
    Article, ArticleGrouping, ChessError, ContainerRelation, Customer, CustomerAlias,
    MarketingChannel, MarketingSegment, MarketingSubchannel, Order, OrderLine, Result, Route,
    RouteClient, Sale, SaleLine, SalesForceAssignment, Staff, StockRecord,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// One output row: ordered `(column, value)` pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRow {
    columns: Vec<(String, Value)>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.columns.push((column.into(), value));
    }

    /// Appends the columns of another row
    pub fn extend(&mut self, other: FlatRow) {
        self.columns.extend(other.columns);
    }

    /// Value of a column
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.columns.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Row as a JSON object, keeping column order
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self.columns.iter().cloned().collect();
        Value::Object(map)
    }
}

/// Entity families that can be denormalized into flat rows
pub trait Flatten: Sized {
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>>;
}

fn column_name(role: &str, field: &str) -> String {
    if role.is_empty() {
        field.to_string()
    } else {
        format!("{role}_{field}")
    }
}

/// Columns of one entity, without the nested collections named in `skip`
pub(crate) fn entity_columns<T: Serialize>(entity: &T, role: &str, skip: &[&str]) -> Result<FlatRow> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => {
            let mut row = FlatRow::new();
            for (key, value) in map {
                if !skip.contains(&key.as_str()) {
                    row.push(column_name(role, &key), value);
                }
            }
            Ok(row)
        }
        other => Err(ChessError::Serialization(format!(
            "Expected an object to flatten, got {other}"
        ))),
    }
}

/// Columns of a child level; null-valued when the child is absent
fn child_columns<T: Default + Serialize>(child: Option<&T>, role: &str, skip: &[&str]) -> Result<FlatRow> {
    match child {
        Some(c) => entity_columns(c, role, skip),
        None => {
            let mut row = entity_columns(&T::default(), role, skip)?;
            for (_, value) in row.columns.iter_mut() {
                *value = Value::Null;
            }
            Ok(row)
        }
    }
}

/// Outer-join view of a child collection: `[None]` when it is absent or empty
fn children_or_none<T>(children: Option<&[T]>) -> Vec<Option<&T>> {
    match children {
        Some(list) if !list.is_empty() => list.iter().map(Some).collect(),
        _ => vec![None],
    }
}

fn flatten_one_level<P, C>(
    parents: &[P],
    parent_skip: &str,
    children: impl Fn(&P) -> Option<&[C]>,
    role: &str,
) -> Result<Vec<FlatRow>>
where
    P: Serialize,
    C: Default + Serialize,
{
    let mut rows = Vec::new();
    for parent in parents {
        let base = entity_columns(parent, "", &[parent_skip])?;
        for child in children_or_none(children(parent)) {
            let mut row = base.clone();
            row.extend(child_columns(child, role, &[])?);
            rows.push(row);
        }
    }
    Ok(rows)
}

struct Level<'a> {
    key: &'a str,
    role: &'a str,
}

fn flatten_two_levels<P, C, G>(
    parents: &[P],
    child: Level<'_>,
    children: impl Fn(&P) -> Option<&[C]>,
    grandchild: Level<'_>,
    grandchildren: impl Fn(&C) -> Option<&[G]>,
) -> Result<Vec<FlatRow>>
where
    P: Serialize,
    C: Default + Serialize,
    G: Default + Serialize,
{
    let mut rows = Vec::new();
    for parent in parents {
        let base = entity_columns(parent, "", &[child.key])?;
        for c in children_or_none(children(parent)) {
            let child_row = child_columns(c, child.role, &[grandchild.key])?;
            for g in children_or_none(c.and_then(&grandchildren)) {
                let mut row = base.clone();
                row.extend(child_row.clone());
                row.extend(child_columns(g, grandchild.role, &[])?);
                rows.push(row);
            }
        }
    }
    Ok(rows)
}

fn flatten_leaf<T: Serialize>(records: &[T]) -> Result<Vec<FlatRow>> {
    records.iter().map(|r| entity_columns(r, "", &[])).collect()
}

impl Flatten for Sale {
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>> {
        flatten_one_level::<_, SaleLine>(records, "líneas del venta", |s| s.lines.as_deref(), "linea")
    }
}

impl Flatten for Order {
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>> {
        flatten_one_level::<_, OrderLine>(records, "líneas del pedido", |o| o.lineas.as_deref(), "linea")
    }
}

impl Flatten for Route {
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>> {
        flatten_one_level::<_, RouteClient>(records, "clienteRutas", |r| r.cliente_rutas.as_deref(), "cli")
    }
}

impl Flatten for Article {
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>> {
        flatten_two_levels::<_, ArticleGrouping, ContainerRelation>(
            records,
            Level { key: "eAgrupaciones", role: "agrup" },
            |a| a.agrupaciones.as_deref(),
            Level { key: "relavacio", role: "env" },
            |g| g.relavacio.as_deref(),
        )
    }
}

impl Flatten for MarketingSegment {
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>> {
        flatten_two_levels::<_, MarketingChannel, MarketingSubchannel>(
            records,
            Level { key: "CanalesMkt", role: "canal" },
            |s| s.canales_mkt.as_deref(),
            Level { key: "SubCanalesMkt", role: "subcanal" },
            |c| c.subcanales_mkt.as_deref(),
        )
    }
}

impl Flatten for Customer {
    /// One row per customer with the alias in force and its sales-force
    /// assignments as positional `fuerza<i>_` column groups
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>> {
        let assignments_of = |c: &Customer| -> Vec<SalesForceAssignment> {
            c.current_alias()
                .and_then(|a| a.clifuerza.clone())
                .unwrap_or_default()
        };
        let slots = records
            .iter()
            .map(|c| assignments_of(c).len())
            .max()
            .unwrap_or(0);

        let mut rows = Vec::with_capacity(records.len());
        for customer in records {
            let mut row = entity_columns(customer, "", &["cliente alias"])?;
            row.extend(child_columns::<CustomerAlias>(
                customer.current_alias(),
                "alias",
                &["Clifuerza"],
            )?);

            let assignments = assignments_of(customer);
            for slot in 1..=slots {
                row.extend(child_columns(
                    assignments.get(slot - 1),
                    &format!("fuerza{slot}"),
                    &[],
                )?);
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

impl Flatten for StockRecord {
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>> {
        flatten_leaf(records)
    }
}

impl Flatten for Staff {
    fn flatten(records: &[Self]) -> Result<Vec<FlatRow>> {
        flatten_leaf(records)
    }
}
