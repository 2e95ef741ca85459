//! Category-aware three-way comparison of two records by one named key

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::access::{FieldDescriptor, FieldRegistry, FieldValue};
use crate::category::Category;
use crate::collation::Collation;
use crate::error::{Result, SortError};
use crate::options::{NullOrdering, SortOptions, SortOrder};

/// Text date formats accepted for date keys, tried after RFC 3339.
const DATETIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
const DATE_PATTERN: &str = "%Y-%m-%d";

/// Compares records of type `R` by one key.
///
/// The field is resolved and classified once, when the comparator is built;
/// [`KeyComparator::compare`] only reads the two values and orders them.
pub struct KeyComparator<R> {
    field: FieldDescriptor<R>,
    category: Category,
    order: SortOrder,
    nulls: NullOrdering,
    collation: Arc<dyn Collation>,
}

impl<R> fmt::Debug for KeyComparator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyComparator")
            .field("field", &self.field.name())
            .field("category", &self.category)
            .field("order", &self.order)
            .field("nulls", &self.nulls)
            .field("collation", &self.collation.name())
            .finish()
    }
}

impl<R: 'static> KeyComparator<R> {
    /// Resolve `field` on `registry`, classify it and capture its getter.
    ///
    /// Fails with `FieldNotFound` or `UnsupportedKeyType` before any record
    /// is looked at.
    pub fn new(
        registry: &FieldRegistry<R>,
        field: &str,
        order: SortOrder,
        options: &SortOptions,
    ) -> Result<Self> {
        let descriptor = registry.resolve(field)?;
        let category =
            Category::classify_field(registry.type_name(), field, descriptor.field_type())?;

        debug!(
            record = registry.type_name(),
            field,
            declared = %descriptor.field_type(),
            declared_on = descriptor.declared_on(),
            %category,
            %order,
            "built key comparator"
        );

        Ok(Self {
            field: descriptor.clone(),
            category,
            order,
            nulls: options.nulls,
            collation: Arc::clone(&options.collation),
        })
    }
}

impl<R> KeyComparator<R> {
    /// Resolved key name.
    pub fn field(&self) -> &str {
        self.field.name()
    }

    /// Category the key was classified as.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Direction.
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Three-way comparison of `a` and `b` under this key and direction.
    pub fn compare(&self, a: &R, b: &R) -> Result<Ordering> {
        let left = self.field.read(a);
        let right = self.field.read(b);

        match (left.is_null(), right.is_null()) {
            (false, false) => {}
            (left_null, right_null) => return self.compare_nulls(left_null, right_null),
        }

        let natural = match self.category {
            Category::Numeric => self.compare_numeric(&left, &right)?,
            Category::Text => self.compare_text(&left, &right)?,
            Category::Date => self.instant(&left)?.cmp(&self.instant(&right)?),
        };
        Ok(self.order.apply(natural))
    }

    fn compare_nulls(&self, left_null: bool, right_null: bool) -> Result<Ordering> {
        let null_side = match self.nulls {
            NullOrdering::Reject => {
                return Err(SortError::unsupported(
                    self.field.name(),
                    Some(self.category),
                    "value is null",
                ));
            }
            NullOrdering::First => Ordering::Less,
            NullOrdering::Last => Ordering::Greater,
        };
        Ok(match (left_null, right_null) {
            (true, true) => Ordering::Equal,
            (true, false) => null_side,
            _ => null_side.reverse(),
        })
    }

    fn compare_numeric(&self, left: &FieldValue<'_>, right: &FieldValue<'_>) -> Result<Ordering> {
        use FieldValue::{Int, UInt};

        // Integer pairs order the same exactly as through a decimal
        Ok(match (left, right) {
            (Int(a), Int(b)) => a.cmp(b),
            (UInt(a), UInt(b)) => a.cmp(b),
            (Int(a), UInt(b)) => signed_vs_unsigned(*a, *b),
            (UInt(a), Int(b)) => signed_vs_unsigned(*b, *a).reverse(),
            _ => self.decimal(left)?.cmp(&self.decimal(right)?),
        })
    }

    fn decimal(&self, value: &FieldValue<'_>) -> Result<BigDecimal> {
        let rendered: Cow<'_, str> = match value {
            FieldValue::Int(v) => v.to_string().into(),
            FieldValue::UInt(v) => v.to_string().into(),
            FieldValue::Float(v) if v.is_finite() => v.to_string().into(),
            FieldValue::Text(text) => Cow::Borrowed(text.trim()),
            other => return Err(self.unparsable(other, "is not a finite number")),
        };

        BigDecimal::from_str(&rendered).map_err(|_| self.unparsable(value, "is not a number"))
    }

    fn compare_text(&self, left: &FieldValue<'_>, right: &FieldValue<'_>) -> Result<Ordering> {
        let left = self.text(left)?;
        let right = self.text(right)?;
        Ok(self
            .collation
            .collation_key(&left)
            .cmp(&self.collation.collation_key(&right)))
    }

    fn text<'v>(&self, value: &'v FieldValue<'_>) -> Result<Cow<'v, str>> {
        Ok(match value {
            FieldValue::Text(text) => Cow::Borrowed(&**text),
            FieldValue::Char(c) => Cow::Owned(c.to_string()),
            FieldValue::Int(v) => Cow::Owned(v.to_string()),
            FieldValue::UInt(v) => Cow::Owned(v.to_string()),
            FieldValue::Float(v) => Cow::Owned(v.to_string()),
            FieldValue::Bool(v) => Cow::Owned(v.to_string()),
            FieldValue::Date(v) => Cow::Owned(v.to_string()),
            FieldValue::DateTime(v) => Cow::Owned(v.to_string()),
            FieldValue::Timestamp(v) => Cow::Owned(v.to_rfc3339()),
            other => return Err(self.unparsable(other, "has no text form")),
        })
    }

    fn instant(&self, value: &FieldValue<'_>) -> Result<DateTime<Utc>> {
        match value {
            FieldValue::Timestamp(ts) => Ok(*ts),
            FieldValue::DateTime(dt) => Ok(dt.and_utc()),
            FieldValue::Date(date) => {
                midnight(*date).ok_or_else(|| self.unparsable(value, "is out of range"))
            }
            FieldValue::Text(text) => {
                parse_instant(text).ok_or_else(|| self.unparsable(value, "is not a date"))
            }
            other => Err(self.unparsable(other, "is not a date")),
        }
    }

    fn unparsable(&self, value: &FieldValue<'_>, problem: &str) -> SortError {
        SortError::unsupported(
            self.field.name(),
            Some(self.category),
            format!("value {} {problem}", value.describe()),
        )
    }
}

fn signed_vs_unsigned(signed: i128, unsigned: u128) -> Ordering {
    if signed < 0 {
        Ordering::Less
    } else {
        (signed as u128).cmp(&unsigned)
    }
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

/// Parse a text date: RFC 3339, then `yyyy-MM-dd HH:mm:ss`, then `yyyy-MM-dd`.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, DATETIME_PATTERN) {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(text, DATE_PATTERN)
        .ok()
        .and_then(midnight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::FieldType;
    use crate::collation::CodePointCollation;

    #[derive(Debug)]
    struct Row {
        int: i64,
        uint: u32,
        float: f64,
        name: String,
        day: NaiveDate,
        when: Option<DateTime<Utc>>,
        raw: String,
        flag: bool,
    }

    fn registry() -> FieldRegistry<Row> {
        FieldRegistry::builder("Row")
            .field("int", |r: &Row| &r.int)
            .field("uint", |r: &Row| &r.uint)
            .field("float", |r: &Row| &r.float)
            .field("name", |r: &Row| &r.name)
            .field("day", |r: &Row| &r.day)
            .field("when", |r: &Row| &r.when)
            .field("flag", |r: &Row| &r.flag)
            .field_with("rawNumber", FieldType::F64, false, |r: &Row| {
                FieldValue::Text(Cow::Borrowed(r.raw.as_str()))
            })
            .field_with("rawDate", FieldType::Date, false, |r: &Row| {
                FieldValue::Text(Cow::Borrowed(r.raw.as_str()))
            })
            .build()
            .unwrap()
    }

    fn row(int: i64, float: f64, name: &str, day: u32, raw: &str) -> Row {
        Row {
            int,
            uint: int.unsigned_abs() as u32,
            float,
            name: name.to_string(),
            day: NaiveDate::from_ymd_opt(2014, 5, day).unwrap(),
            when: None,
            raw: raw.to_string(),
            flag: false,
        }
    }

    fn comparator(field: &str, order: SortOrder) -> KeyComparator<Row> {
        KeyComparator::new(&registry(), field, order, &SortOptions::default()).unwrap()
    }

    #[test]
    fn numeric_ascending_and_descending() {
        let a = row(1, 0.5, "", 1, "");
        let b = row(2, 0.25, "", 1, "");

        let asc = comparator("int", SortOrder::Ascending);
        assert_eq!(asc.category(), Category::Numeric);
        assert_eq!(asc.compare(&a, &b).unwrap(), Ordering::Less);
        assert_eq!(asc.compare(&a, &a).unwrap(), Ordering::Equal);

        let desc = comparator("int", SortOrder::Descending);
        assert_eq!(desc.compare(&a, &b).unwrap(), Ordering::Greater);

        let float = comparator("float", SortOrder::Ascending);
        assert_eq!(float.compare(&a, &b).unwrap(), Ordering::Greater);
    }

    #[test]
    fn decimal_comparison_has_no_binary_rounding() {
        let c = comparator("rawNumber", SortOrder::Ascending);
        let big = row(0, 0.0, "", 1, "9007199254740993");
        let smaller = row(0, 0.0, "", 1, "9007199254740992.5");
        // Both round to the same f64
        assert_eq!(c.compare(&smaller, &big).unwrap(), Ordering::Less);

        let equal_a = row(0, 0.0, "", 1, "1.0");
        let equal_b = row(0, 0.0, "", 1, "1");
        assert_eq!(c.compare(&equal_a, &equal_b).unwrap(), Ordering::Equal);
    }

    #[test]
    fn mixed_sign_integers() {
        assert_eq!(signed_vs_unsigned(-1, 0), Ordering::Less);
        assert_eq!(signed_vs_unsigned(5, 5), Ordering::Equal);
        assert_eq!(signed_vs_unsigned(i128::MAX, u128::MAX), Ordering::Less);
    }

    #[test]
    fn unparsable_number_names_field_and_category() {
        let c = comparator("rawNumber", SortOrder::Ascending);
        let err = c
            .compare(&row(0, 0.0, "", 1, "12"), &row(0, 0.0, "", 1, "twelve"))
            .unwrap_err();
        match err {
            SortError::UnsupportedKeyType {
                field, category, ..
            } => {
                assert_eq!(field, "rawNumber");
                assert_eq!(category, Some(Category::Numeric));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nan_is_rejected() {
        let c = comparator("float", SortOrder::Ascending);
        let err = c
            .compare(&row(0, f64::NAN, "", 1, ""), &row(0, 1.0, "", 1, ""))
            .unwrap_err();
        assert!(err.is_unsupported_key_type());
    }

    #[test]
    fn text_uses_collation() {
        let a = row(0, 0.0, "叶水燕", 1, "");
        let b = row(0, 0.0, "杨忠杰", 1, "");

        let gbk = comparator("name", SortOrder::Ascending);
        assert_eq!(gbk.compare(&a, &b).unwrap(), Ordering::Greater);

        let options = SortOptions::default().with_collation(Arc::new(CodePointCollation));
        let codepoint =
            KeyComparator::new(&registry(), "name", SortOrder::Ascending, &options).unwrap();
        assert_eq!(codepoint.compare(&a, &b).unwrap(), Ordering::Less);
    }

    #[test]
    fn dates_on_one_axis() {
        let c = comparator("day", SortOrder::Ascending);
        assert_eq!(
            c.compare(&row(0, 0.0, "", 11, ""), &row(0, 0.0, "", 15, ""))
                .unwrap(),
            Ordering::Less
        );

        let text = comparator("rawDate", SortOrder::Descending);
        assert_eq!(
            text.compare(
                &row(0, 0.0, "", 1, "2014-05-12"),
                &row(0, 0.0, "", 1, "2014-05-12 08:30:00")
            )
            .unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            text.compare(
                &row(0, 0.0, "", 1, "2014-05-12T00:00:00+08:00"),
                &row(0, 0.0, "", 1, "2014-05-11 17:00:00")
            )
            .unwrap(),
            // 16:00 UTC is earlier, so it sorts after under descending
            Ordering::Greater
        );
    }

    #[test]
    fn null_handling() {
        let mut present = row(0, 0.0, "", 1, "");
        present.when = Some(Utc::now());
        let missing = row(0, 0.0, "", 1, "");

        let reject = comparator("when", SortOrder::Ascending);
        assert!(reject.compare(&present, &missing).unwrap_err().is_unsupported_key_type());

        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let last = KeyComparator::new(
                &registry(),
                "when",
                order,
                &SortOptions::default().with_nulls(NullOrdering::Last),
            )
            .unwrap();
            assert_eq!(last.compare(&missing, &present).unwrap(), Ordering::Greater);
            assert_eq!(last.compare(&present, &missing).unwrap(), Ordering::Less);
            assert_eq!(last.compare(&missing, &missing).unwrap(), Ordering::Equal);

            let first = KeyComparator::new(
                &registry(),
                "when",
                order,
                &SortOptions::default().with_nulls(NullOrdering::First),
            )
            .unwrap();
            assert_eq!(first.compare(&missing, &present).unwrap(), Ordering::Less);
        }
    }

    #[test]
    fn construction_fails_fast() {
        let options = SortOptions::default();
        let missing =
            KeyComparator::new(&registry(), "nope", SortOrder::Ascending, &options).unwrap_err();
        assert!(missing.is_field_not_found());

        let unsupported =
            KeyComparator::new(&registry(), "flag", SortOrder::Ascending, &options).unwrap_err();
        assert!(unsupported.is_unsupported_key_type());
        assert_eq!(unsupported.field(), Some("flag"));
    }

    #[test]
    fn parse_instant_patterns() {
        assert!(parse_instant("2014-05-12").is_some());
        assert!(parse_instant(" 2014-05-12 23:59:59 ").is_some());
        assert!(parse_instant("2014-05-12T23:59:59Z").is_some());
        assert!(parse_instant("12/05/2014").is_none());
    }
}
