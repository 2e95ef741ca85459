//! Sort the five sample users by each of their keys.
//!
//! Run with `RUST_LOG=fieldsort_core=debug` to see comparator and sort stats.

use chrono::NaiveDate;
use fieldsort_core::{FieldRegistry, Record, SortError, sort_ascending, sort_descending};
use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct User {
    id: i32,
    name: String,
    create_date: NaiveDate,
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

fn user(id: i32, name: &str, day: u32) -> User {
    User {
        id,
        name: name.to_string(),
        create_date: NaiveDate::from_ymd_opt(2014, 5, day).expect("valid day"),
    }
}

fn print(title: &str, users: &[User]) {
    println!("{title}");
    for u in users {
        println!("  {:>2}  {}  {}", u.id, u.name, u.create_date);
    }
}

fn main() -> Result<(), SortError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut users = vec![
        user(2, "叶水燕", 12),
        user(1, "杨忠杰", 13),
        user(4, "何国群", 15),
        user(0, "杨晓婷", 14),
        user(3, "钟婷婷", 11),
    ];

    sort_ascending(&mut users, "id")?;
    print("ascending by id", &users);

    sort_ascending(&mut users, "createDate")?;
    print("ascending by createDate", &users);

    sort_descending(&mut users, "id")?;
    print("descending by id", &users);

    sort_ascending(&mut users, "name")?;
    print("ascending by name", &users);

    if let Err(err) = sort_ascending(&mut users, "nickname") {
        println!("error: {err}");
    }
    Ok(())
}
