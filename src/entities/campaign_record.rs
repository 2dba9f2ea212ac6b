use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of direct-mail campaign performance data. Field order matches the
/// spreadsheet column order (column 0 = client .. column 86 = action); the
/// ingestion pipeline maps columns positionally, so do not reorder.
///
/// Numeric fields are nullable: sanitization degrades unparseable cells to
/// NULL instead of rejecting the row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "campaign_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub uploaded_file_id: Uuid,

    pub client: String,
    pub group_code: String,
    pub mailing_code: String,
    pub mlg_desc: String,
    pub mail_date: Date,
    pub offer: String,
    pub offer_desc: String,
    pub product: String,
    pub product_desc: String,
    pub category: String,
    pub source: String,
    pub mailing_list: String,
    pub segment: String,
    pub ship_qty: Option<i32>,
    pub mailed: Option<i32>,
    pub ror_net_percent: Option<f64>,

    pub printing_cost: Option<f64>,
    pub lists_cost: Option<f64>,
    pub postage_cost: Option<f64>,
    pub lettershop_cost: Option<f64>,
    pub dp_cost: Option<f64>,
    pub misc_cost: Option<f64>,
    pub total_mailing_cost: Option<f64>,

    pub mail_orders: Option<i32>,
    pub phone_orders: Option<i32>,
    pub web_orders: Option<i32>,
    pub gross_orders: Option<i32>,
    pub gross_percent: Option<f64>,
    pub net_orders: Option<i32>,
    pub net_percent: Option<f64>,

    pub ac: Option<i32>,
    pub active_subs: Option<i32>,
    pub inquirers: Option<i32>,
    pub backorders: Option<i32>,
    pub bo_amount: Option<f64>,
    pub percent_with_bo: Option<f64>,

    pub prod_amount: Option<f64>,
    pub x_sell_amount: Option<f64>,
    pub misc_amount: Option<f64>,
    pub non_cc_amount: Option<f64>,
    pub cc_amount: Option<f64>,
    pub auto_ships: Option<i32>,

    pub gross_sales: Option<f64>,
    pub refunds: Option<f64>,
    pub product_cost: Option<f64>,
    pub call_ctr: Option<f64>,
    pub merch_fee: Option<f64>,
    pub royalties: Option<f64>,
    pub total_cost: Option<f64>,
    pub net_profit_loss: Option<f64>,

    pub net_roi: Option<f64>,
    pub percent_breakeven: Option<f64>,
    pub be_orders: Option<i32>,
    pub net_per_piece: Option<f64>,
    pub avg_order: Option<f64>,
    pub avg_with_autoship: Option<f64>,
    pub avg_turns: Option<f64>,

    pub mlg_cost: Option<f64>,
    pub net_pl_order: Option<f64>,
    pub avg_with_autoship_2: Option<f64>,

    pub nsf_count: Option<i32>,
    pub days: Option<i32>,
    pub aov: Option<f64>,
    pub be_aov: Option<f64>,
    pub lt_aov: Option<f64>,
    pub qty_mailed: Option<i32>,

    pub ntf_buyers: Option<i32>,
    pub fe_cost: Option<f64>,
    pub fe_cpo: Option<f64>,
    pub fe_purch: Option<i32>,
    pub fe_aov: Option<f64>,
    pub fe_roi: Option<f64>,
    pub subs_percent: Option<f64>,

    pub be_orders_2: Option<i32>,
    pub be_mlg_qty: Option<i32>,
    pub be_cost: Option<f64>,
    pub be_cpo: Option<f64>,
    pub be_purch: Option<i32>,
    pub be_aov_last: Option<f64>,

    pub tot_purch: Option<i32>,
    pub tot_cost: Option<f64>,
    pub net_pl: Option<f64>,
    pub lt_roi: Option<f64>,
    pub pl_per_buyers: Option<f64>,
    pub delta: Option<f64>,
    pub pl_per_buyer_total: Option<f64>,

    pub action: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::uploaded_file::Entity",
        from = "Column::UploadedFileId",
        to = "super::uploaded_file::Column::Id",
        on_delete = "Cascade"
    )]
    UploadedFile,
}

impl Related<super::uploaded_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadedFile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
