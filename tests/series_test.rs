use colframe::error::Error;
use colframe::{Series, SeriesType, Value};

#[test]
fn test_series_creation() {
    let series = Series::new(vec![1, 2, 3, 4, 5], SeriesType::Int, "test");
    assert_eq!(series.len(), 5);
    assert_eq!(series.name(), "test");
    assert_eq!(series.series_type(), SeriesType::Int);
    assert_eq!(series.get(0).unwrap(), Value::Int(1));
    assert_eq!(series.get(4).unwrap(), Value::Int(5));
    assert!(matches!(series.get(5), Err(Error::IndexOutOfBounds { .. })));
}

#[test]
fn test_series_display() {
    let series = Series::new(vec![1.5, 2.0], SeriesType::Float, "f");
    assert_eq!(series.to_string(), "{f [1.5 2] float}");
    let series = Series::new(vec![true, false], SeriesType::Boolean, "b");
    assert_eq!(series.to_string(), "{b [true false] bool}");
    let series = Series::new(vec![Value::from("x"), Value::Null], SeriesType::String, "s");
    assert_eq!(series.to_string(), "{s [x NA] string}");
}

#[test]
fn test_series_coercion_on_creation() {
    let series = Series::new(
        vec![Value::Float(2.7), Value::Boolean(true), Value::from("3")],
        SeriesType::Int,
        "mixed",
    );
    assert_eq!(series.get(0).unwrap(), Value::Int(2));
    assert_eq!(series.get(1).unwrap(), Value::Int(1));
    assert!(series.is_null(2));

    let series = Series::new(vec![1, 0], SeriesType::Boolean, "flags");
    assert_eq!(series.values(), vec![Value::Boolean(true), Value::Boolean(false)]);

    let series = Series::new(vec![f64::NAN, 1.0], SeriesType::Float, "nan");
    assert!(series.is_null(0));
    assert_eq!(series.count_nulls(), 1);
}

#[test]
fn test_series_range_and_empty() {
    let range = Series::new_range(2, 5, "r");
    assert_eq!(range.to_string(), "{r [2 3 4] int}");

    let empty = Series::new_empty(SeriesType::String, 2, "e");
    assert_eq!(empty.values(), vec![Value::from(""), Value::from("")]);
    assert!(!empty.any_null());
}

#[test]
fn test_series_copy_is_independent() {
    let mut original = Series::new(vec![1, 2, 3], SeriesType::Int, "a");
    let copy = original.copy();
    original.set(0, 10).unwrap();
    original.set(1, Value::Null).unwrap();
    assert_eq!(copy.values(), vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert!(!copy.any_null());
}

#[test]
fn test_series_set_keeps_validity() {
    let mut series = Series::new(vec![1, 2, 3], SeriesType::Int, "a");
    assert!(series.validity().is_none());

    series.set(1, Value::Null).unwrap();
    assert!(series.is_null(1));
    assert!(series.validity().is_some());

    series.set(1, 7).unwrap();
    assert!(series.is_valid(1));
    assert_eq!(series.get(1).unwrap(), Value::Int(7));

    assert!(series.set(3, 1).is_err());
}

#[test]
fn test_series_append() {
    let mut series = Series::new(vec![1], SeriesType::Int, "a");
    series.append(2);
    series.append(Value::Null);
    series.append(2.9);
    assert_eq!(series.to_string(), "{a [1 2 NA 2] int}");
    assert_eq!(series.null_mask(), vec![false, false, true, false]);
}

#[test]
fn test_series_slice() {
    let series = Series::new(vec![Some(1), None, Some(3), Some(4)], SeriesType::Int, "a");
    let sliced = series.slice(1, 3).unwrap();
    assert_eq!(sliced.values(), vec![Value::Null, Value::Int(3)]);
    assert_eq!(sliced.count_nulls(), 1);

    assert!(series.slice(3, 2).is_err());
    assert!(series.slice(0, 5).is_err());
    assert_eq!(series.slice(2, 2).unwrap().len(), 0);

    assert_eq!(series.head(2).unwrap().len(), 2);
    assert_eq!(series.tail(1).unwrap().values(), vec![Value::Int(4)]);
}

#[test]
fn test_series_sort() {
    let mut series = Series::new(vec![3, 1, 2], SeriesType::Int, "a");
    series.sort();
    assert_eq!(series.to_string(), "{a [1 2 3] int}");

    let mut series = Series::new(
        vec![Value::from("pear"), Value::Null, Value::from("apple")],
        SeriesType::String,
        "s",
    );
    series.sort();
    assert_eq!(series.to_string(), "{s [apple pear NA] string}");
    assert!(series.is_null(2));

    let mut series = Series::new(vec![true, false, true], SeriesType::Boolean, "b");
    series.sort();
    assert_eq!(series.to_string(), "{b [false true true] bool}");
}

#[test]
fn test_series_sorted_index_matches_sort() {
    let original = Series::new(vec![Some(5), None, Some(1), Some(5), Some(0)], SeriesType::Int, "a");
    let index = original.sorted_index();
    assert_eq!(index, vec![4, 2, 0, 3, 1]);

    let mut ordered = original.copy();
    ordered.order(&index).unwrap();
    let mut sorted = original.copy();
    sorted.sort();
    assert_eq!(ordered, sorted);
}

#[test]
fn test_series_order_and_inverse() {
    let original = Series::new(vec![10, 20, 30, 40], SeriesType::Int, "a");
    let positions = [2, 0, 3, 1];
    let mut series = original.copy();
    series.order(&positions).unwrap();
    assert_eq!(series.to_string(), "{a [30 10 40 20] int}");

    let mut inverse = [0; 4];
    for (p, &q) in positions.iter().enumerate() {
        inverse[q] = p;
    }
    series.order(&inverse).unwrap();
    assert_eq!(series, original);

    assert!(matches!(series.order(&[0, 1]), Err(Error::LengthMismatch { .. })));
    assert!(series.order(&[0, 0, 1, 2]).is_err());
}

#[test]
fn test_series_mean() {
    let series = Series::new(vec![10, 20, 30, 40, 50], SeriesType::Int, "n");
    assert_eq!(series.mean().unwrap(), 30.0);

    let with_na = Series::new(vec![Some(1.0), None, Some(3.0)], SeriesType::Float, "f");
    assert_eq!(with_na.mean().unwrap(), 2.0);

    let strings = Series::new(vec!["a"], SeriesType::String, "s");
    assert!(matches!(strings.mean(), Err(Error::InvalidOperation(_))));
}

#[test]
fn test_series_quantile() {
    let series = Series::new(vec![5, 3, 1, 4, 2], SeriesType::Int, "q");
    assert_eq!(series.quantile(0.5).unwrap(), Value::Int(3));
    assert_eq!(series.quantile(0.25).unwrap(), Value::Int(2));
    assert_eq!(series.quantile(0.0).unwrap(), Value::Int(1));
    assert_eq!(series.quantile(1.0).unwrap(), Value::Int(5));
    assert_eq!(series.median().unwrap(), Value::Int(3));

    assert!(matches!(series.quantile(1.5), Err(Error::InvalidInput(_))));
    assert!(series.quantile(-0.1).is_err());
    assert!(Series::new(vec!["a"], SeriesType::String, "s").quantile(0.5).is_err());
    assert!(Series::new_empty(SeriesType::Int, 0, "e").quantile(0.5).is_err());
}

#[test]
fn test_series_value_counting() {
    let series = Series::new(vec!["a", "b", "a", "c", "a"], SeriesType::String, "s");
    let counts = series.value_counts();
    assert_eq!(counts[&Value::from("a")], 3);
    assert_eq!(counts[&Value::from("b")], 1);
    assert_eq!(series.count(&Value::from("a")), 3);
    assert_eq!(series.n_unique(), 3);
    assert!(!series.unique());
    assert_eq!(series.mode(), Some(Value::from("a")));

    let distinct = Series::new(vec![1, 2, 3], SeriesType::Int, "d");
    assert!(distinct.unique());
    assert_eq!(distinct.mode(), Some(Value::Int(1)));
}

#[test]
fn test_series_homogeneous() {
    assert!(Series::new(vec![2, 2, 2], SeriesType::Int, "h").homogeneous().unwrap());
    assert!(!Series::new(vec![2, 3], SeriesType::Int, "h").homogeneous().unwrap());
    assert!(matches!(
        Series::new_empty(SeriesType::Int, 0, "e").homogeneous(),
        Err(Error::EmptyData(_))
    ));
}

#[test]
fn test_series_type_categories() {
    assert!(Series::new(vec![1], SeriesType::Int, "i").is_numeric());
    assert!(Series::new(vec![true], SeriesType::Boolean, "b").is_numeric());
    assert!(Series::new(vec!["x"], SeriesType::String, "s").is_object());
}
