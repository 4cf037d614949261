//! Приведение разнородных значений с провода: числа, строки, даты, идентификаторы.
//!
//! Все функции тотальные: на мусор отвечают значением по умолчанию, а не ошибкой.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use std::str::FromStr;

/// `null`/отсутствие/`""` → 0, число как есть, строка парсится, остальное → 0.
pub fn coerce_number(value: Option<&Value>) -> Decimal {
    match value {
        None | Some(Value::Null) => Decimal::ZERO,
        Some(Value::Number(n)) => number_to_decimal(n),
        Some(Value::String(s)) => parse_decimal(s).unwrap_or(Decimal::ZERO),
        Some(_) => Decimal::ZERO,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    // `1_000` понимает FromStr у Decimal, но это не числовой литерал
    if s.is_empty() || s.contains('_') {
        return None;
    }
    s.parse::<Decimal>().ok().or_else(|| parse_scientific(s))
}

fn parse_scientific(s: &str) -> Option<Decimal> {
    let (_, exp) = s.split_once(|c| c == 'e' || c == 'E')?;
    // за пределами 28 знаков Decimal всё равно не представим
    let exp: i32 = exp.parse().ok()?;
    if exp.abs() > 28 {
        return None;
    }
    Decimal::from_scientific(s).ok()
}

/// Число с провода в Decimal. Текст числа сохраняется (`arbitrary_precision`), поэтому
/// всё, что помещается в Decimal, читается точно. Больше `Decimal::MAX` по модулю —
/// насыщение до `MAX`/`MIN`, меньше 1e-28 — ноль.
fn number_to_decimal(n: &Number) -> Decimal {
    if let Some(d) = parse_decimal(&n.to_string()) {
        return d;
    }
    let Some(f) = n.as_f64().filter(|f| f.is_finite()) else {
        return Decimal::ZERO;
    };
    if let Some(d) = Decimal::from_f64(f) {
        return d;
    }
    match f {
        f if f >= 1.0 => Decimal::MAX,
        f if f <= -1.0 => Decimal::MIN,
        _ => Decimal::ZERO,
    }
}

/// Decimal → JSON-число без потери знаков; целые пишутся без дробной части.
pub fn decimal_to_json(d: Decimal) -> Value {
    Number::from_str(&d.normalize().to_string())
        .map(Value::Number)
        .unwrap_or_else(|_| Value::from(0))
}

/// Первое значение по списку ключей, которое есть и не `null`. `0`, `false`, `""` считаются значениями.
pub fn first_present<'a, 'k, I>(record: &'a Map<String, Value>, keys: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = &'k str>,
{
    keys.into_iter()
        .filter_map(|k| record.get(k))
        .find(|v| !v.is_null())
}

pub fn first_present_as_string<'k, I>(record: &Map<String, Value>, keys: I) -> String
where
    I: IntoIterator<Item = &'k str>,
{
    first_present(record, keys)
        .map(value_to_string)
        .unwrap_or_default()
}

pub fn first_present_as_number<'k, I>(record: &Map<String, Value>, keys: I) -> Decimal
where
    I: IntoIterator<Item = &'k str>,
{
    coerce_number(first_present(record, keys))
}

pub fn first_present_as_date<'k, I>(record: &Map<String, Value>, keys: I) -> String
where
    I: IntoIterator<Item = &'k str>,
{
    normalize_date(&first_present_as_string(record, keys))
}

/// Строковое представление скаляра. Массивы и объекты → `""`.
pub fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(n),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

/// Идентификатор сохранённой записи: целое > 0. Иначе `None` — строка считается новой.
pub fn as_existing_id(id: &str) -> Option<u64> {
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    if let Ok(n) = id.parse::<u64>() {
        return Some(n).filter(|n| *n > 0);
    }
    parse_decimal(id).and_then(positive_whole)
}

pub fn as_existing_id_value(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => as_existing_id(s),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(u).filter(|u| *u > 0);
            }
            positive_whole(number_to_decimal(n))
        }
        _ => None,
    }
}

fn positive_whole(d: Decimal) -> Option<u64> {
    if d > Decimal::ZERO && d.fract().is_zero() {
        d.to_u64()
    } else {
        None
    }
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Приводит дату к `YYYY-MM-DD`. Нулевая дата MySQL → `""`, нераспознанное — как есть.
pub fn normalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() || s.starts_with("0000-00-00") {
        return String::new();
    }
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        });
    match parsed {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn coerce_number_table() {
        assert_eq!(coerce_number(None), Decimal::ZERO);
        assert_eq!(coerce_number(Some(&Value::Null)), Decimal::ZERO);
        assert_eq!(coerce_number(Some(&json!(""))), Decimal::ZERO);
        assert_eq!(coerce_number(Some(&json!("12.5"))), Decimal::new(125, 1));
        assert_eq!(coerce_number(Some(&json!("abc"))), Decimal::ZERO);
        assert_eq!(coerce_number(Some(&json!(42))), Decimal::from(42));
        assert_eq!(coerce_number(Some(&json!(-3.25))), Decimal::new(-325, 2));
        assert_eq!(coerce_number(Some(&json!(" 7 "))), Decimal::from(7));
        assert_eq!(coerce_number(Some(&json!("1e3"))), Decimal::from(1000));
        assert_eq!(coerce_number(Some(&json!(true))), Decimal::ZERO);
        assert_eq!(coerce_number(Some(&json!("1_000"))), Decimal::ZERO);
    }

    #[test]
    fn numbers_keep_all_digits_and_saturate_out_of_range() {
        let n: Value = serde_json::from_str("0.12345678901234567891").unwrap();
        assert_eq!(coerce_number(Some(&n)), Decimal::from_str("0.12345678901234567891").unwrap());
        let n: Value = serde_json::from_str("1234567890123.4567").unwrap();
        assert_eq!(coerce_number(Some(&n)), Decimal::new(12345678901234567, 4));
        assert_eq!(coerce_number(Some(&json!(1e300))), Decimal::MAX);
        assert_eq!(coerce_number(Some(&json!(-1e300))), Decimal::MIN);
        assert_eq!(coerce_number(Some(&json!(1e-300))), Decimal::ZERO);
    }

    #[test]
    fn first_present_skips_null_and_absent_but_keeps_zero() {
        let r = obj(json!({"a": null, "b": 5}));
        assert_eq!(first_present(&r, ["a", "b"]), Some(&json!(5)));
        let r = obj(json!({"a": 0, "b": 9}));
        assert_eq!(first_present(&r, ["a", "b"]), Some(&json!(0)));
        let r = obj(json!({"a": ""}));
        assert_eq!(first_present(&r, ["a"]), Some(&json!("")));
        assert_eq!(first_present(&r, ["z"]), None);
    }

    #[test]
    fn typed_wrappers() {
        let r = obj(json!({"NumFRI": 1204, "numFRI": "X", "MontBSC": "2500", "f": 3878.0}));
        assert_eq!(first_present_as_string(&r, ["NumFRI", "numFRI"]), "1204");
        assert_eq!(first_present_as_string(&r, ["f"]), "3878");
        assert_eq!(first_present_as_string(&r, ["missing"]), "");
        assert_eq!(first_present_as_number(&r, ["MontBSC"]), Decimal::from(2500));
        let r = obj(json!({"DateReg": null, "date": "2024-05-02 00:00:00"}));
        assert_eq!(first_present_as_date(&r, ["DateReg", "date"]), "2024-05-02");
    }

    #[test]
    fn existing_ids() {
        assert_eq!(as_existing_id("36"), Some(36));
        assert_eq!(as_existing_id(" 36 "), Some(36));
        assert_eq!(as_existing_id("0"), None);
        assert_eq!(as_existing_id("-4"), None);
        assert_eq!(as_existing_id(""), None);
        assert_eq!(as_existing_id("legacy-item-0"), None);
        assert_eq!(as_existing_id("12.5"), None);
        assert_eq!(as_existing_id_value(&json!(1914)), Some(1914));
        assert_eq!(as_existing_id_value(&json!(0)), None);
        assert_eq!(as_existing_id_value(&json!(null)), None);
    }

    #[test]
    fn timestamp_like_placeholder_still_counts_as_existing() {
        // эвристика: всё, что парсится как целое > 0, считается сохранённым
        assert_eq!(as_existing_id("1712345678901"), Some(1_712_345_678_901));
    }

    #[test]
    fn dates_are_normalized() {
        assert_eq!(normalize_date("2024-03-05"), "2024-03-05");
        assert_eq!(normalize_date("2024-03-05 10:11:12"), "2024-03-05");
        assert_eq!(normalize_date("2024-03-05T10:11:12.000000Z"), "2024-03-05");
        assert_eq!(normalize_date("05/03/2024"), "2024-03-05");
        assert_eq!(normalize_date("0000-00-00"), "");
        assert_eq!(normalize_date("bientôt"), "bientôt");
    }

    #[test]
    fn decimal_renders_integral_values_without_fraction() {
        assert_eq!(decimal_to_json(Decimal::new(250000, 2)), json!(2500));
        assert_eq!(decimal_to_json(Decimal::new(125, 1)), json!(12.5));
        assert_eq!(decimal_to_json(Decimal::new(-4200, 2)), json!(-42));
        let exact = Decimal::from_str("0.12345678901234567891").unwrap();
        assert_eq!(decimal_to_json(exact).to_string(), "0.12345678901234567891");
        assert_eq!(decimal_to_json(Decimal::MAX).to_string(), Decimal::MAX.to_string());
    }
}
