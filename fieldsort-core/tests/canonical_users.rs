mod support;

use fieldsort_core::{
    CodePointCollation, FieldSorter, PivotStrategy, SortOptions, sort_ascending, sort_descending,
};
use std::sync::Arc;
use support::{ids, users};

#[test]
fn ascending_by_id() {
    let mut records = users();
    sort_ascending(&mut records, "id").expect("sort by id");
    assert_eq!(ids(&records), vec![0, 1, 2, 3, 4]);
}

#[test]
fn ascending_by_create_date() {
    let mut records = users();
    sort_ascending(&mut records, "createDate").expect("sort by date");
    assert_eq!(ids(&records), vec![3, 2, 1, 0, 4]);
}

#[test]
fn descending_by_id() {
    let mut records = users();
    sort_descending(&mut records, "id").expect("sort by id");
    assert_eq!(ids(&records), vec![4, 3, 2, 1, 0]);
}

#[test]
fn ascending_by_name_follows_gbk_order() {
    let mut records = users();
    sort_ascending(&mut records, "name").expect("sort by name");
    assert_eq!(ids(&records), vec![4, 0, 1, 2, 3]);
    assert_eq!(
        records.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["何国群", "杨晓婷", "杨忠杰", "叶水燕", "钟婷婷"]
    );
}

#[test]
fn code_point_collation_gives_a_different_name_order() {
    let sorter =
        FieldSorter::new(SortOptions::default().with_collation(Arc::new(CodePointCollation)));
    let mut records = users();
    sorter.ascending(&mut records, "name").expect("sort by name");
    // 何 U+4F55, 叶 U+53F6, 杨 U+6768, 钟 U+949F; 忠 U+5FE0 < 晓 U+6653
    assert_eq!(ids(&records), vec![4, 2, 1, 0, 3]);
}

#[test]
fn every_pivot_strategy_agrees_on_the_scenario() {
    for pivot in [
        PivotStrategy::First,
        PivotStrategy::MedianOfThree,
        PivotStrategy::Random,
    ] {
        let sorter = FieldSorter::new(SortOptions::default().with_pivot(pivot).with_seed(42));
        let mut records = users();
        sorter.ascending(&mut records, "createDate").expect("sort");
        assert_eq!(ids(&records), vec![3, 2, 1, 0, 4], "{pivot:?}");
    }
}
