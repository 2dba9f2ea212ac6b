use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{campaign_record, uploaded_file};
use crate::error::AppError;

/// Projection of the columns the monthly rollup needs; the other ~70 record
/// fields never leave the database.
#[derive(Debug, FromQueryResult)]
struct RollupSource {
    mail_date: NaiveDate,
    ship_qty: Option<i32>,
    mailed: Option<i32>,
    days: Option<i32>,
    ror_net_percent: Option<f64>,
    mail_orders: Option<i32>,
    phone_orders: Option<i32>,
    web_orders: Option<i32>,
    backorders: Option<i32>,
    total_cost: Option<f64>,
    gross_sales: Option<f64>,
    net_orders: Option<i32>,
    refunds: Option<f64>,
    net_profit_loss: Option<f64>,
    gross_orders: Option<i32>,
}

#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
pub struct MonthlyRollup {
    pub year: i32,
    pub month: u32,
    pub campaign_count: i64,
    pub shipped: i64,
    pub mailed: i64,
    pub days_since_making: i64,
    /// Additive sum of ror_net_percent across rows; the dashboards consume
    /// the raw sum, not a weighted average.
    pub ror_percent: f64,
    pub mail_order: i64,
    pub phone_order: i64,
    pub web_order: i64,
    pub backorder: i64,
    pub total_order: i64,
    pub cost: f64,
    pub sales: f64,
    pub net_sales: i64,
    pub refund_count: f64,
    pub refunds: f64,
    pub profit: f64,
    pub gross_orders: i64,
    pub refund_percent: f64,
}

fn add_int(acc: &mut i64, v: Option<i32>) {
    *acc += v.unwrap_or(0) as i64;
}

fn add_float(acc: &mut f64, v: Option<f64>) {
    *acc += v.unwrap_or(0.0);
}

/// Groups records by (year, month) of mail date and sums the dashboard
/// metrics per group, most recent month first. NULL cells contribute
/// nothing to a sum.
fn rollup_by_month(rows: &[RollupSource]) -> Vec<MonthlyRollup> {
    let mut groups: BTreeMap<(i32, u32), MonthlyRollup> = BTreeMap::new();

    for row in rows {
        let key = (row.mail_date.year(), row.mail_date.month());
        let group = groups.entry(key).or_insert_with(|| MonthlyRollup {
            year: key.0,
            month: key.1,
            ..Default::default()
        });

        group.campaign_count += 1;
        add_int(&mut group.shipped, row.ship_qty);
        add_int(&mut group.mailed, row.mailed);
        add_int(&mut group.days_since_making, row.days);
        add_float(&mut group.ror_percent, row.ror_net_percent);
        add_int(&mut group.mail_order, row.mail_orders);
        add_int(&mut group.phone_order, row.phone_orders);
        add_int(&mut group.web_order, row.web_orders);
        add_int(&mut group.backorder, row.backorders);
        add_float(&mut group.cost, row.total_cost);
        add_float(&mut group.sales, row.gross_sales);
        add_int(&mut group.net_sales, row.net_orders);
        add_float(&mut group.refund_count, row.refunds);
        add_float(&mut group.refunds, row.refunds);
        add_float(&mut group.profit, row.net_profit_loss);
        add_int(&mut group.gross_orders, row.gross_orders);
    }

    groups
        .into_values()
        .rev() // BTreeMap is ascending; output wants most recent first
        .map(|mut group| {
            group.total_order = group.mail_order + group.phone_order + group.web_order;
            group.refund_percent = if group.total_order > 0 {
                group.backorder as f64 / group.total_order as f64 * 100.0
            } else {
                0.0
            };
            group
        })
        .collect()
}

/// GET /files/{id}/aggregate
#[utoipa::path(
    get,
    path = "/files/{id}/aggregate",
    params(
        ("id" = Uuid, Path, description = "Uploaded file ID")
    ),
    responses(
        (status = 200, description = "Monthly rollups, most recent first", body = Vec<MonthlyRollup>),
        (status = 404, description = "File not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Aggregation"
)]
pub async fn aggregate_file(
    Path(id): Path<Uuid>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<MonthlyRollup>>, AppError> {
    uploaded_file::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let rows: Vec<RollupSource> = campaign_record::Entity::find()
        .select_only()
        .columns([
            campaign_record::Column::MailDate,
            campaign_record::Column::ShipQty,
            campaign_record::Column::Mailed,
            campaign_record::Column::Days,
            campaign_record::Column::RorNetPercent,
            campaign_record::Column::MailOrders,
            campaign_record::Column::PhoneOrders,
            campaign_record::Column::WebOrders,
            campaign_record::Column::Backorders,
            campaign_record::Column::TotalCost,
            campaign_record::Column::GrossSales,
            campaign_record::Column::NetOrders,
            campaign_record::Column::Refunds,
            campaign_record::Column::NetProfitLoss,
            campaign_record::Column::GrossOrders,
        ])
        .filter(campaign_record::Column::UploadedFileId.eq(id))
        .into_model::<RollupSource>()
        .all(&db)
        .await?;

    Ok(Json(rollup_by_month(&rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(year: i32, month: u32) -> RollupSource {
        RollupSource {
            mail_date: NaiveDate::from_ymd_opt(year, month, 15).unwrap(),
            ship_qty: None,
            mailed: None,
            days: None,
            ror_net_percent: None,
            mail_orders: None,
            phone_orders: None,
            web_orders: None,
            backorders: None,
            total_cost: None,
            gross_sales: None,
            net_orders: None,
            refunds: None,
            net_profit_loss: None,
            gross_orders: None,
        }
    }

    #[test]
    fn sums_within_one_month_group() {
        let mut a = source(2023, 6);
        a.ship_qty = Some(100);
        a.mail_orders = Some(10);
        a.phone_orders = Some(5);
        a.web_orders = Some(5);
        a.backorders = Some(4);
        a.ror_net_percent = Some(12.5);
        a.total_cost = Some(100.0);

        let mut b = source(2023, 6);
        b.ship_qty = Some(50);
        b.mail_orders = Some(20);
        b.ror_net_percent = Some(7.5);
        b.total_cost = Some(50.5);

        let rollups = rollup_by_month(&[a, b]);
        assert_eq!(rollups.len(), 1);

        let group = &rollups[0];
        assert_eq!(group.year, 2023);
        assert_eq!(group.month, 6);
        assert_eq!(group.campaign_count, 2);
        assert_eq!(group.shipped, 150);
        assert_eq!(group.mail_order, 30);
        assert_eq!(group.total_order, 40);
        assert_eq!(group.ror_percent, 20.0);
        assert_eq!(group.cost, 150.5);
        assert_eq!(group.refund_percent, 10.0);
    }

    #[test]
    fn zero_orders_gives_zero_refund_percent() {
        let mut a = source(2022, 1);
        a.backorders = Some(7);

        let rollups = rollup_by_month(&[a]);
        assert_eq!(rollups[0].total_order, 0);
        assert_eq!(rollups[0].refund_percent, 0.0);
    }

    #[test]
    fn null_cells_contribute_nothing() {
        let rollups = rollup_by_month(&[source(2023, 3)]);
        let group = &rollups[0];
        assert_eq!(group.campaign_count, 1);
        assert_eq!(group.shipped, 0);
        assert_eq!(group.ror_percent, 0.0);
        assert_eq!(group.refunds, 0.0);
    }

    #[test]
    fn ordered_most_recent_first() {
        let rows = vec![
            source(2022, 11),
            source(2023, 2),
            source(2023, 9),
            source(2021, 12),
        ];
        let rollups = rollup_by_month(&rows);
        let order: Vec<(i32, u32)> = rollups.iter().map(|g| (g.year, g.month)).collect();
        assert_eq!(
            order,
            vec![(2023, 9), (2023, 2), (2022, 11), (2021, 12)]
        );
    }

    #[test]
    fn refunds_duplicated_into_both_output_fields() {
        let mut a = source(2023, 5);
        a.refunds = Some(42.0);
        let rollups = rollup_by_month(&[a]);
        assert_eq!(rollups[0].refund_count, 42.0);
        assert_eq!(rollups[0].refunds, 42.0);
    }
}
