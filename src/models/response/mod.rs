pub mod email_list;
pub mod item_list;
