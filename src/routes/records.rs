use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{campaign_record, uploaded_file};
use crate::error::AppError;

/// Optional filters over campaign records. Supplied filters are ANDed;
/// absent ones impose no constraint. The day-range pair only applies when
/// both bounds are present.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct RecordFilterQuery {
    pub client: Option<String>,
    pub year: Option<i32>,
    pub product: Option<String>,
    pub campaign: Option<String>,
    pub segment: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub days_from: Option<i32>,
    pub days_to: Option<i32>,
    pub file_id: Option<Uuid>,
}

/// Case-insensitive substring match: lower(col) LIKE lower('%value%').
fn icontains(col: campaign_record::Column, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(format!("%{}%", value.to_lowercase()))
}

fn build_condition(query: &RecordFilterQuery) -> Condition {
    let mut condition = Condition::all();

    let substring_filters = [
        (campaign_record::Column::Client, &query.client),
        (campaign_record::Column::Product, &query.product),
        (campaign_record::Column::MailingCode, &query.campaign),
        (campaign_record::Column::Segment, &query.segment),
        (campaign_record::Column::Category, &query.category),
        (campaign_record::Column::Source, &query.source),
    ];
    for (col, value) in substring_filters {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            condition = condition.add(icontains(col, v));
        }
    }

    // Year of mail_date as a closed date range; same semantics as EXTRACT,
    // but portable and able to use the column index.
    if let Some(year) = query.year {
        if let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            condition = condition.add(campaign_record::Column::MailDate.between(start, end));
        }
    }

    if let (Some(from), Some(to)) = (query.days_from, query.days_to) {
        condition = condition.add(campaign_record::Column::Days.between(from, to));
    }

    if let Some(file_id) = query.file_id {
        condition = condition.add(campaign_record::Column::UploadedFileId.eq(file_id));
    }

    condition
}

/// GET /records
#[utoipa::path(
    get,
    path = "/records",
    params(RecordFilterQuery),
    responses(
        (status = 200, description = "Records matching every supplied filter"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Records"
)]
pub async fn list_records(
    State(db): State<DatabaseConnection>,
    Query(query): Query<RecordFilterQuery>,
) -> Result<Json<Vec<campaign_record::Model>>, AppError> {
    let records = campaign_record::Entity::find()
        .filter(build_condition(&query))
        .order_by_asc(campaign_record::Column::Id)
        .all(&db)
        .await?;

    Ok(Json(records))
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FilterGroup {
    pub label: String,
    pub options: Vec<serde_json::Value>,
}

async fn distinct_strings(
    db: &DatabaseConnection,
    file_id: Uuid,
    col: campaign_record::Column,
) -> Result<Vec<serde_json::Value>, AppError> {
    let values: Vec<String> = campaign_record::Entity::find()
        .select_only()
        .column(col)
        .filter(campaign_record::Column::UploadedFileId.eq(file_id))
        .distinct()
        .into_tuple()
        .all(db)
        .await?;

    Ok(values.into_iter().map(serde_json::Value::from).collect())
}

async fn distinct_years(
    db: &DatabaseConnection,
    file_id: Uuid,
) -> Result<Vec<serde_json::Value>, AppError> {
    let dates: Vec<NaiveDate> = campaign_record::Entity::find()
        .select_only()
        .column(campaign_record::Column::MailDate)
        .filter(campaign_record::Column::UploadedFileId.eq(file_id))
        .distinct()
        .into_tuple()
        .all(db)
        .await?;

    let years: BTreeSet<i32> = dates.iter().map(|d| d.year()).collect();
    Ok(years.into_iter().map(serde_json::Value::from).collect())
}

/// GET /files/{id}/filters
///
/// Distinct values per filterable field among one file's records, shaped for
/// populating filter dropdowns.
#[utoipa::path(
    get,
    path = "/files/{id}/filters",
    params(
        ("id" = Uuid, Path, description = "Uploaded file ID")
    ),
    responses(
        (status = 200, description = "Distinct filter values per field", body = Vec<FilterGroup>),
        (status = 404, description = "File not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Records"
)]
pub async fn unique_filter_values(
    Path(id): Path<Uuid>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<FilterGroup>>, AppError> {
    uploaded_file::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let groups = vec![
        FilterGroup {
            label: "Client".to_string(),
            options: distinct_strings(&db, id, campaign_record::Column::Client).await?,
        },
        FilterGroup {
            label: "Year".to_string(),
            options: distinct_years(&db, id).await?,
        },
        FilterGroup {
            label: "Campaign".to_string(),
            options: distinct_strings(&db, id, campaign_record::Column::MailingCode).await?,
        },
        FilterGroup {
            label: "Category".to_string(),
            options: distinct_strings(&db, id, campaign_record::Column::Category).await?,
        },
        FilterGroup {
            label: "Offer".to_string(),
            options: distinct_strings(&db, id, campaign_record::Column::Offer).await?,
        },
        FilterGroup {
            label: "Product".to_string(),
            options: distinct_strings(&db, id, campaign_record::Column::Product).await?,
        },
        FilterGroup {
            label: "Source".to_string(),
            options: distinct_strings(&db, id, campaign_record::Column::Source).await?,
        },
        FilterGroup {
            label: "Segment".to_string(),
            options: distinct_strings(&db, id, campaign_record::Column::Segment).await?,
        },
    ];

    Ok(Json(groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn empty_query() -> RecordFilterQuery {
        RecordFilterQuery {
            client: None,
            year: None,
            product: None,
            campaign: None,
            segment: None,
            category: None,
            source: None,
            days_from: None,
            days_to: None,
            file_id: None,
        }
    }

    fn sql(query: &RecordFilterQuery) -> String {
        campaign_record::Entity::find()
            .filter(build_condition(query))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn no_filters_impose_no_constraint() {
        assert!(!sql(&empty_query()).contains("WHERE"));
    }

    #[test]
    fn client_and_year_are_conjoined() {
        let mut query = empty_query();
        query.client = Some("Acme".to_string());
        query.year = Some(2023);

        let sql = sql(&query);
        assert!(sql.contains("LIKE '%acme%'"));
        assert!(sql.contains("BETWEEN '2023-01-01' AND '2023-12-31'"));
        assert!(sql.contains(" AND "));
    }

    #[test]
    fn substring_match_lowercases_both_sides() {
        let mut query = empty_query();
        query.client = Some("AcMe".to_string());

        let sql = sql(&query);
        assert!(sql.contains(r#"LOWER("client")"#));
        assert!(sql.contains("'%acme%'"));
    }

    #[test]
    fn days_range_is_inclusive() {
        let mut query = empty_query();
        query.days_from = Some(10);
        query.days_to = Some(20);

        assert!(sql(&query).contains("BETWEEN 10 AND 20"));
    }

    #[test]
    fn days_range_needs_both_bounds() {
        let mut only_from = empty_query();
        only_from.days_from = Some(10);
        assert!(!sql(&only_from).contains("WHERE"));

        let mut only_to = empty_query();
        only_to.days_to = Some(20);
        assert!(!sql(&only_to).contains("WHERE"));
    }

    #[test]
    fn empty_string_params_are_ignored() {
        let mut query = empty_query();
        query.product = Some(String::new());
        assert!(!sql(&query).contains("WHERE"));
    }

    #[test]
    fn file_scope_filters_on_the_owning_file() {
        let mut query = empty_query();
        let id = Uuid::new_v4();
        query.file_id = Some(id);

        let sql = sql(&query);
        assert!(sql.contains("uploaded_file_id"));
        assert!(sql.contains(&id.to_string()));
    }

    #[test]
    fn every_substring_filter_reaches_its_column() {
        let mut query = empty_query();
        query.product = Some("gadget".to_string());
        query.campaign = Some("MLG".to_string());
        query.segment = Some("gold".to_string());
        query.category = Some("toys".to_string());
        query.source = Some("list-a".to_string());

        let sql = sql(&query);
        for col in ["product", "mailing_code", "segment", "category", "source"] {
            assert!(sql.contains(&format!(r#"LOWER("{}")"#, col)), "missing {}", col);
        }
        assert!(sql.contains("'%mlg%'"));
    }
}
