pub mod item_row;
