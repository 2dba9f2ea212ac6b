use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CampaignRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CampaignRecords::UploadedFileId).uuid().not_null())
                    .col(ColumnDef::new(CampaignRecords::Client).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::GroupCode).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::MailingCode).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::MlgDesc).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::MailDate).date().not_null())
                    .col(ColumnDef::new(CampaignRecords::Offer).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::OfferDesc).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::Product).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::ProductDesc).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::Category).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::Source).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::MailingList).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::Segment).string().not_null())
                    .col(ColumnDef::new(CampaignRecords::ShipQty).integer())
                    .col(ColumnDef::new(CampaignRecords::Mailed).integer())
                    .col(ColumnDef::new(CampaignRecords::RorNetPercent).double())
                    .col(ColumnDef::new(CampaignRecords::PrintingCost).double())
                    .col(ColumnDef::new(CampaignRecords::ListsCost).double())
                    .col(ColumnDef::new(CampaignRecords::PostageCost).double())
                    .col(ColumnDef::new(CampaignRecords::LettershopCost).double())
                    .col(ColumnDef::new(CampaignRecords::DpCost).double())
                    .col(ColumnDef::new(CampaignRecords::MiscCost).double())
                    .col(ColumnDef::new(CampaignRecords::TotalMailingCost).double())
                    .col(ColumnDef::new(CampaignRecords::MailOrders).integer())
                    .col(ColumnDef::new(CampaignRecords::PhoneOrders).integer())
                    .col(ColumnDef::new(CampaignRecords::WebOrders).integer())
                    .col(ColumnDef::new(CampaignRecords::GrossOrders).integer())
                    .col(ColumnDef::new(CampaignRecords::GrossPercent).double())
                    .col(ColumnDef::new(CampaignRecords::NetOrders).integer())
                    .col(ColumnDef::new(CampaignRecords::NetPercent).double())
                    .col(ColumnDef::new(CampaignRecords::Ac).integer())
                    .col(ColumnDef::new(CampaignRecords::ActiveSubs).integer())
                    .col(ColumnDef::new(CampaignRecords::Inquirers).integer())
                    .col(ColumnDef::new(CampaignRecords::Backorders).integer())
                    .col(ColumnDef::new(CampaignRecords::BoAmount).double())
                    .col(ColumnDef::new(CampaignRecords::PercentWithBo).double())
                    .col(ColumnDef::new(CampaignRecords::ProdAmount).double())
                    .col(ColumnDef::new(CampaignRecords::XSellAmount).double())
                    .col(ColumnDef::new(CampaignRecords::MiscAmount).double())
                    .col(ColumnDef::new(CampaignRecords::NonCcAmount).double())
                    .col(ColumnDef::new(CampaignRecords::CcAmount).double())
                    .col(ColumnDef::new(CampaignRecords::AutoShips).integer())
                    .col(ColumnDef::new(CampaignRecords::GrossSales).double())
                    .col(ColumnDef::new(CampaignRecords::Refunds).double())
                    .col(ColumnDef::new(CampaignRecords::ProductCost).double())
                    .col(ColumnDef::new(CampaignRecords::CallCtr).double())
                    .col(ColumnDef::new(CampaignRecords::MerchFee).double())
                    .col(ColumnDef::new(CampaignRecords::Royalties).double())
                    .col(ColumnDef::new(CampaignRecords::TotalCost).double())
                    .col(ColumnDef::new(CampaignRecords::NetProfitLoss).double())
                    .col(ColumnDef::new(CampaignRecords::NetRoi).double())
                    .col(ColumnDef::new(CampaignRecords::PercentBreakeven).double())
                    .col(ColumnDef::new(CampaignRecords::BeOrders).integer())
                    .col(ColumnDef::new(CampaignRecords::NetPerPiece).double())
                    .col(ColumnDef::new(CampaignRecords::AvgOrder).double())
                    .col(ColumnDef::new(CampaignRecords::AvgWithAutoship).double())
                    .col(ColumnDef::new(CampaignRecords::AvgTurns).double())
                    .col(ColumnDef::new(CampaignRecords::MlgCost).double())
                    .col(ColumnDef::new(CampaignRecords::NetPlOrder).double())
                    .col(ColumnDef::new(CampaignRecords::AvgWithAutoship2).double())
                    .col(ColumnDef::new(CampaignRecords::NsfCount).integer())
                    .col(ColumnDef::new(CampaignRecords::Days).integer())
                    .col(ColumnDef::new(CampaignRecords::Aov).double())
                    .col(ColumnDef::new(CampaignRecords::BeAov).double())
                    .col(ColumnDef::new(CampaignRecords::LtAov).double())
                    .col(ColumnDef::new(CampaignRecords::QtyMailed).integer())
                    .col(ColumnDef::new(CampaignRecords::NtfBuyers).integer())
                    .col(ColumnDef::new(CampaignRecords::FeCost).double())
                    .col(ColumnDef::new(CampaignRecords::FeCpo).double())
                    .col(ColumnDef::new(CampaignRecords::FePurch).integer())
                    .col(ColumnDef::new(CampaignRecords::FeAov).double())
                    .col(ColumnDef::new(CampaignRecords::FeRoi).double())
                    .col(ColumnDef::new(CampaignRecords::SubsPercent).double())
                    .col(ColumnDef::new(CampaignRecords::BeOrders2).integer())
                    .col(ColumnDef::new(CampaignRecords::BeMlgQty).integer())
                    .col(ColumnDef::new(CampaignRecords::BeCost).double())
                    .col(ColumnDef::new(CampaignRecords::BeCpo).double())
                    .col(ColumnDef::new(CampaignRecords::BePurch).integer())
                    .col(ColumnDef::new(CampaignRecords::BeAovLast).double())
                    .col(ColumnDef::new(CampaignRecords::TotPurch).integer())
                    .col(ColumnDef::new(CampaignRecords::TotCost).double())
                    .col(ColumnDef::new(CampaignRecords::NetPl).double())
                    .col(ColumnDef::new(CampaignRecords::LtRoi).double())
                    .col(ColumnDef::new(CampaignRecords::PlPerBuyers).double())
                    .col(ColumnDef::new(CampaignRecords::Delta).double())
                    .col(ColumnDef::new(CampaignRecords::PlPerBuyerTotal).double())
                    .col(ColumnDef::new(CampaignRecords::Action).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_records_uploaded_file_id")
                            .from(CampaignRecords::Table, CampaignRecords::UploadedFileId)
                            .to(UploadedFiles::Table, UploadedFiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_campaign_records_uploaded_file_id")
                    .table(CampaignRecords::Table)
                    .col(CampaignRecords::UploadedFileId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CampaignRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CampaignRecords {
    Table,
    Id,
    UploadedFileId,
    Client,
    GroupCode,
    MailingCode,
    MlgDesc,
    MailDate,
    Offer,
    OfferDesc,
    Product,
    ProductDesc,
    Category,
    Source,
    MailingList,
    Segment,
    ShipQty,
    Mailed,
    RorNetPercent,
    PrintingCost,
    ListsCost,
    PostageCost,
    LettershopCost,
    DpCost,
    MiscCost,
    TotalMailingCost,
    MailOrders,
    PhoneOrders,
    WebOrders,
    GrossOrders,
    GrossPercent,
    NetOrders,
    NetPercent,
    Ac,
    ActiveSubs,
    Inquirers,
    Backorders,
    BoAmount,
    PercentWithBo,
    ProdAmount,
    XSellAmount,
    MiscAmount,
    NonCcAmount,
    CcAmount,
    AutoShips,
    GrossSales,
    Refunds,
    ProductCost,
    CallCtr,
    MerchFee,
    Royalties,
    TotalCost,
    NetProfitLoss,
    NetRoi,
    PercentBreakeven,
    BeOrders,
    NetPerPiece,
    AvgOrder,
    AvgWithAutoship,
    AvgTurns,
    MlgCost,
    NetPlOrder,
    #[sea_orm(iden = "avg_with_autoship_2")]
    AvgWithAutoship2,
    NsfCount,
    Days,
    Aov,
    BeAov,
    LtAov,
    QtyMailed,
    NtfBuyers,
    FeCost,
    FeCpo,
    FePurch,
    FeAov,
    FeRoi,
    SubsPercent,
    #[sea_orm(iden = "be_orders_2")]
    BeOrders2,
    BeMlgQty,
    BeCost,
    BeCpo,
    BePurch,
    BeAovLast,
    TotPurch,
    TotCost,
    NetPl,
    LtRoi,
    PlPerBuyers,
    Delta,
    PlPerBuyerTotal,
    Action,
}

#[derive(DeriveIden)]
enum UploadedFiles {
    Table,
    Id,
}
