use diesel::prelude::*;
use inkpress::schema::{blogs, categories};

mod common;

#[test]
fn test_creates_and_migrates_db_file() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let mut conn = pool.get().expect("should acquire DB connection");

    let total_blogs = blogs::table
        .count()
        .get_result::<i64>(&mut conn)
        .expect("blogs table should exist");
    let total_categories = categories::table
        .count()
        .get_result::<i64>(&mut conn)
        .expect("categories table should exist");

    assert_eq!(total_blogs, 0);
    assert_eq!(total_categories, 0);
}
