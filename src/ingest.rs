//! Spreadsheet ingestion: fixed columnar layout, positional mapping.
//!
//! Row 0 is the header and is skipped. Columns 0..=86 map to the
//! `campaign_records` fields in declaration order; the sheet is trusted to
//! follow that layout, so a short row is a schema mismatch that fails the
//! whole ingestion rather than silently misaligning data.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use sea_orm::{ActiveValue::NotSet, Set};
use uuid::Uuid;

use crate::entities::campaign_record;
use crate::error::AppError;
use crate::normalize::{
    cell_date, cell_float, cell_int, cell_text, clean_currency, clean_number, clean_percentage,
};

pub const EXPECTED_COLUMNS: usize = 87;

/// Reads the first worksheet into data rows (header dropped). A workbook
/// calamine cannot open is a validation fault; nothing gets persisted.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<Vec<Data>>, AppError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::validation("file", format!("Unreadable spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::validation("file", "Spreadsheet contains no worksheets"))?
        .map_err(|e| AppError::validation("file", format!("Unreadable worksheet: {}", e)))?;

    Ok(range.rows().skip(1).map(|row| row.to_vec()).collect())
}

/// Builds the full record batch for one uploaded file.
pub fn records_from_rows(
    file_id: Uuid,
    rows: &[Vec<Data>],
) -> Result<Vec<campaign_record::ActiveModel>, AppError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| record_from_row(file_id, i + 2, row))
        .collect()
}

/// Maps one data row to an ActiveModel. `row_number` is the 1-based sheet row
/// (header included) used in error messages.
fn record_from_row(
    file_id: Uuid,
    row_number: usize,
    row: &[Data],
) -> Result<campaign_record::ActiveModel, AppError> {
    if row.len() < EXPECTED_COLUMNS {
        return Err(AppError::validation(
            "file",
            format!(
                "Row {}: expected {} columns, found {}",
                row_number,
                EXPECTED_COLUMNS,
                row.len()
            ),
        ));
    }

    let mail_date = cell_date(&row[4]).ok_or_else(|| {
        AppError::validation(
            "mail_date",
            format!("Row {}: unparseable mail date", row_number),
        )
    })?;

    Ok(campaign_record::ActiveModel {
        id: NotSet,
        uploaded_file_id: Set(file_id),

        client: Set(cell_text(&row[0])),
        group_code: Set(cell_text(&row[1])),
        mailing_code: Set(cell_text(&row[2])),
        mlg_desc: Set(cell_text(&row[3])),
        mail_date: Set(mail_date),
        offer: Set(cell_text(&row[5])),
        offer_desc: Set(cell_text(&row[6])),
        product: Set(cell_text(&row[7])),
        product_desc: Set(cell_text(&row[8])),
        category: Set(cell_text(&row[9])),
        source: Set(cell_text(&row[10])),
        mailing_list: Set(cell_text(&row[11])),
        segment: Set(cell_text(&row[12])),
        ship_qty: Set(clean_number(&row[13])),
        mailed: Set(clean_number(&row[14])),
        ror_net_percent: Set(clean_percentage(&row[15])),

        printing_cost: Set(clean_currency(&row[16])),
        lists_cost: Set(clean_currency(&row[17])),
        postage_cost: Set(clean_currency(&row[18])),
        lettershop_cost: Set(clean_currency(&row[19])),
        dp_cost: Set(clean_currency(&row[20])),
        misc_cost: Set(clean_currency(&row[21])),
        total_mailing_cost: Set(clean_currency(&row[22])),

        mail_orders: Set(clean_number(&row[23])),
        phone_orders: Set(clean_number(&row[24])),
        web_orders: Set(clean_number(&row[25])),
        gross_orders: Set(clean_number(&row[26])),
        gross_percent: Set(clean_percentage(&row[27])),
        net_orders: Set(clean_number(&row[28])),
        net_percent: Set(clean_percentage(&row[29])),

        ac: Set(cell_int(&row[30])),
        active_subs: Set(clean_number(&row[31])),
        inquirers: Set(cell_int(&row[32])),
        backorders: Set(clean_number(&row[33])),
        bo_amount: Set(cell_float(&row[34])),
        percent_with_bo: Set(clean_percentage(&row[35])),

        prod_amount: Set(clean_currency(&row[36])),
        x_sell_amount: Set(clean_currency(&row[37])),
        misc_amount: Set(clean_currency(&row[38])),
        non_cc_amount: Set(clean_currency(&row[39])),
        cc_amount: Set(clean_currency(&row[40])),
        auto_ships: Set(cell_int(&row[41])),

        gross_sales: Set(clean_currency(&row[42])),
        refunds: Set(clean_currency(&row[43])),
        product_cost: Set(clean_currency(&row[44])),
        call_ctr: Set(clean_currency(&row[45])),
        merch_fee: Set(clean_currency(&row[46])),
        royalties: Set(clean_currency(&row[47])),
        total_cost: Set(clean_currency(&row[48])),
        net_profit_loss: Set(clean_currency(&row[49])),

        net_roi: Set(clean_percentage(&row[50])),
        percent_breakeven: Set(clean_percentage(&row[51])),
        be_orders: Set(clean_number(&row[52])),
        net_per_piece: Set(clean_currency(&row[53])),
        avg_order: Set(clean_currency(&row[54])),
        avg_with_autoship: Set(clean_currency(&row[55])),
        avg_turns: Set(cell_float(&row[56])),

        mlg_cost: Set(clean_currency(&row[57])),
        net_pl_order: Set(clean_currency(&row[58])),
        avg_with_autoship_2: Set(clean_currency(&row[59])),

        nsf_count: Set(clean_number(&row[60])),
        days: Set(clean_number(&row[61])),
        aov: Set(clean_currency(&row[62])),
        be_aov: Set(clean_currency(&row[63])),
        lt_aov: Set(clean_currency(&row[64])),
        qty_mailed: Set(clean_number(&row[65])),

        ntf_buyers: Set(clean_number(&row[66])),
        fe_cost: Set(clean_currency(&row[67])),
        fe_cpo: Set(clean_currency(&row[68])),
        fe_purch: Set(cell_int(&row[69])),
        fe_aov: Set(clean_currency(&row[70])),
        fe_roi: Set(clean_currency(&row[71])),
        subs_percent: Set(clean_percentage(&row[72])),

        be_orders_2: Set(clean_number(&row[73])),
        be_mlg_qty: Set(clean_number(&row[74])),
        be_cost: Set(clean_currency(&row[75])),
        be_cpo: Set(clean_currency(&row[76])),
        be_purch: Set(cell_int(&row[77])),
        be_aov_last: Set(cell_float(&row[78])),

        tot_purch: Set(clean_number(&row[79])),
        tot_cost: Set(clean_currency(&row[80])),
        net_pl: Set(clean_currency(&row[81])),
        lt_roi: Set(clean_currency(&row[82])),
        pl_per_buyers: Set(clean_currency(&row[83])),
        delta: Set(clean_currency(&row[84])),
        pl_per_buyer_total: Set(clean_currency(&row[85])),

        action: Set(cell_text(&row[86])),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn blank_row() -> Vec<Data> {
        let mut row = vec![Data::Empty; EXPECTED_COLUMNS];
        row[4] = Data::String("2023-06-01".to_string());
        row
    }

    #[test]
    fn maps_columns_positionally() {
        let file_id = Uuid::new_v4();
        let mut row = blank_row();
        row[0] = Data::String("Acme Direct".to_string());
        row[2] = Data::String("MLG-001".to_string());
        row[13] = Data::String("2,431".to_string());
        row[15] = Data::String("99.05%".to_string());
        row[16] = Data::String("$1,234.56".to_string());
        row[61] = Data::Int(45);
        row[86] = Data::String("keep".to_string());

        let record = record_from_row(file_id, 2, &row).unwrap();

        assert_eq!(record.uploaded_file_id, Set(file_id));
        assert_eq!(record.client, Set("Acme Direct".to_string()));
        assert_eq!(record.mailing_code, Set("MLG-001".to_string()));
        assert_eq!(
            record.mail_date,
            Set(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())
        );
        assert_eq!(record.ship_qty, Set(Some(2431)));
        assert_eq!(record.ror_net_percent, Set(Some(99.05)));
        assert_eq!(record.printing_cost, Set(Some(1234.56)));
        assert_eq!(record.days, Set(Some(45)));
        assert_eq!(record.action, Set("keep".to_string()));
    }

    #[test]
    fn unparseable_numerics_degrade_to_null() {
        let mut row = blank_row();
        row[13] = Data::String("n/a".to_string());
        row[16] = Data::String("free".to_string());
        row[15] = Data::String("-%".to_string());

        let record = record_from_row(Uuid::new_v4(), 2, &row).unwrap();

        assert_eq!(record.ship_qty, Set(None));
        assert_eq!(record.printing_cost, Set(None));
        assert_eq!(record.ror_net_percent, Set(None));
    }

    #[test]
    fn short_row_fails_the_ingestion() {
        let row = vec![Data::Empty; EXPECTED_COLUMNS - 1];
        let err = record_from_row(Uuid::new_v4(), 3, &row).unwrap_err();
        match err {
            AppError::Validation { field, message } => {
                assert_eq!(field, "file");
                assert!(message.contains("Row 3"));
                assert!(message.contains("87"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_mail_date_fails_the_row() {
        let mut row = blank_row();
        row[4] = Data::String("not a date".to_string());
        let err = record_from_row(Uuid::new_v4(), 2, &row).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "mail_date"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn one_record_per_data_row() {
        let rows = vec![blank_row(), blank_row(), blank_row()];
        let records = records_from_rows(Uuid::new_v4(), &rows).unwrap();
        assert_eq!(records.len(), 3);
    }
}
