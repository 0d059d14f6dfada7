pub mod publication_date;
pub mod rich_text;
