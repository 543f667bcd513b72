use tabled::Table;

use crate::utils;

pub async fn emotions() {
    println!("{}", Table::new(utils::emotion_table_rows()));
}
