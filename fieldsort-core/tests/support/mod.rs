#![allow(dead_code)]

use chrono::NaiveDate;
use fieldsort_core::{FieldRegistry, Record};
use once_cell::sync::Lazy;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub create_date: NaiveDate,
}

static USERS: Lazy<FieldRegistry<User>> = Lazy::new(|| {
    FieldRegistry::builder("User")
        .field("id", |u: &User| &u.id)
        .field("name", |u: &User| &u.name)
        .field("createDate", |u: &User| &u.create_date)
        .build()
        .expect("user fields")
});

impl Record for User {
    fn registry() -> &'static FieldRegistry<Self> {
        &USERS
    }
}

pub fn user(id: i32, name: &str, date: &str) -> User {
    User {
        id,
        name: name.to_string(),
        create_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date"),
    }
}

/// The five users every scenario starts from.
pub fn users() -> Vec<User> {
    vec![
        user(2, "叶水燕", "2014-05-12"),
        user(1, "杨忠杰", "2014-05-13"),
        user(4, "何国群", "2014-05-15"),
        user(0, "杨晓婷", "2014-05-14"),
        user(3, "钟婷婷", "2014-05-11"),
    ]
}

pub fn ids<'a>(users: impl IntoIterator<Item = &'a User>) -> Vec<i32> {
    users.into_iter().map(|u| u.id).collect()
}
