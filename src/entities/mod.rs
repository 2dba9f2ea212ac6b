pub mod campaign_record;
pub mod uploaded_file;
